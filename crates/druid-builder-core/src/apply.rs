//! Functional-boundary apply
//!
//! `apply()` takes the current document and one [`Command`] and returns the
//! next document. It works on a copy: on error the caller's document is
//! exactly as it was, and on success the string mirror is refreshed.
//!
//! ```
//! use druid_builder_core::{apply, Command, NodePath, QueryDocument};
//!
//! let doc = QueryDocument::default();
//! let next = apply(&doc, Command::SelectKind {
//!     path: NodePath::root(),
//!     key: Some("timeseries".to_string()),
//! }).unwrap();
//! assert_eq!(next.builder["queryType"], "timeseries");
//! ```

use crate::commands::Command;
use crate::editor::{collection, node};
use crate::errors::{BuilderError, Result};
use crate::model::{shallow_merge, NodePath, PathSegment};
use crate::registry::{category_at, Category, NodeKind};
use crate::session::QueryDocument;
use serde_json::Value;

/// Apply one command, returning the next document
///
/// # Errors
///
/// Addressing errors (bad path, index out of range, unknown kind or field)
/// and edits whose shape does not fit the field. The input document is
/// never modified.
pub fn apply(document: &QueryDocument, cmd: Command) -> Result<QueryDocument> {
    let mut next = document.clone();
    apply_in_place(&mut next, cmd)?;
    next.refresh_expr();
    Ok(next)
}

fn apply_in_place(doc: &mut QueryDocument, cmd: Command) -> Result<()> {
    match cmd {
        Command::SelectKind { path, key } => {
            let category = category_at(&doc.builder, &path)?;
            let slot = slot_mut(&mut doc.builder, &path)?;
            match key {
                None => *slot = Value::Null,
                Some(key) => match category.catalog().get(&key) {
                    Some(kind) => node::mount(kind, slot),
                    None => {
                        tracing::debug!(%path, key = %key, "no editor for custom kind, slot unchanged");
                    }
                },
            }
        }

        Command::EditField {
            path,
            kind,
            field,
            edit,
        } => {
            let (kind, slot) = mounted(doc, &path, kind.as_deref())?;
            node::edit_field(kind, slot, &field, edit)?;
        }

        Command::EditScalar { path, kind, edit } => {
            let (kind, slot) = mounted(doc, &path, kind.as_deref())?;
            node::edit_scalar(kind, slot, edit)?;
        }

        Command::AddChild { path, kind, field } => {
            let (kind, slot) = mounted(doc, &path, kind.as_deref())?;
            collection::add_element(kind, slot, &field)?;
        }

        Command::RemoveChild {
            path,
            kind,
            field,
            index,
        } => {
            let (kind, slot) = mounted(doc, &path, kind.as_deref())?;
            collection::remove_element(kind, slot, &field, index).map_err(|err| match err {
                BuilderError::IndexOutOfRange { index, len, .. } => BuilderError::IndexOutOfRange {
                    path: path.field(&field).to_string(),
                    index,
                    len,
                },
                other => other,
            })?;
        }

        Command::EditElement {
            path,
            kind,
            field,
            index,
            edit,
        } => {
            let (kind, slot) = mounted(doc, &path, kind.as_deref())?;
            collection::edit_element(kind, slot, &field, index, edit)?;
        }

        Command::ReplaceNode { path, value } => {
            category_at(&doc.builder, &path)?;
            *slot_mut(&mut doc.builder, &path)? = value;
        }

        Command::MergeSettings { settings } => shallow_merge(&mut doc.settings, &settings),
    }
    Ok(())
}

/// Resolve the kind at `path`, mount it, and hand back the slot
fn mounted<'a>(
    doc: &'a mut QueryDocument,
    path: &NodePath,
    hint: Option<&str>,
) -> Result<(&'static NodeKind, &'a mut Value)> {
    let category = category_at(&doc.builder, path)?;
    let slot = slot_mut(&mut doc.builder, path)?;
    let kind = resolve_kind(category, slot, hint)?;
    node::mount(kind, slot);
    Ok((kind, slot))
}

/// Kind named by `hint`, else the kind the stored value resolves to
pub fn resolve_kind(category: Category, slot: &Value, hint: Option<&str>) -> Result<&'static NodeKind> {
    let catalog = category.catalog();
    match hint {
        Some(key) => catalog.require(key),
        None => catalog.resolve(slot).ok_or_else(|| BuilderError::UnknownKind {
            category: category.name().to_string(),
            key: slot
                .get(category.discriminant_key())
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
    }
}

/// Slot at `path`, `None` when any segment is missing
pub(crate) fn slot_ref<'a>(root: &'a Value, path: &NodePath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| match segment {
            PathSegment::Field(name) => current.get(name.as_str()),
            PathSegment::Index(index) => current.get(*index),
        })
}

/// Mutable slot at `path`; the last segment may name an absent field
pub(crate) fn slot_mut<'a>(root: &'a mut Value, path: &NodePath) -> Result<&'a mut Value> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        let not_found = || BuilderError::PathNotFound {
            path: path.truncated(depth).to_string(),
        };
        current = match segment {
            PathSegment::Field(name) => current
                .as_object_mut()
                .ok_or_else(not_found)?
                .entry(name.clone())
                .or_insert(Value::Null),
            PathSegment::Index(index) => {
                let items = current.as_array_mut().ok_or_else(not_found)?;
                let len = items.len();
                items.get_mut(*index).ok_or_else(|| BuilderError::IndexOutOfRange {
                    path: path.truncated(depth).to_string(),
                    index: *index,
                    len,
                })?
            }
        };
    }
    Ok(current)
}
