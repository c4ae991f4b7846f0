//! Mounting a kind onto a slot and editing its fields

use super::fields::{apply_edit, EditOutcome, FieldEdit};
use crate::errors::{BuilderError, Result};
use crate::model::Node;
use crate::registry::{FieldSpec, KindMode, NodeKind};
use serde_json::Value;

/// Bring `slot` into the shape `kind` expects.
///
/// Structured kinds: a slot that is not an object becomes `{}`; keys outside
/// the whitelist are deleted; the discriminant is forced; absent fields with
/// a default get it. Scalar kinds keep a string and clear anything else.
/// Raw kinds are left untouched. Mounting twice changes nothing.
pub fn mount(kind: &NodeKind, slot: &mut Value) {
    match kind.mode {
        KindMode::Raw => {}
        KindMode::Scalar(_) => {
            if !slot.is_string() {
                *slot = Value::Null;
            }
        }
        KindMode::Structured => {
            let mut node = match slot.take() {
                Value::Object(map) => Node::from_map(map),
                Value::Null => Node::new(),
                other => {
                    tracing::debug!(kind = kind.label, found = %other, "slot is not an object, resetting");
                    Node::new()
                }
            };

            let stripped = node.strip_to(&kind.whitelist());
            if !stripped.is_empty() {
                tracing::debug!(kind = kind.label, stripped = ?stripped, "stripped undeclared keys");
            }
            if let Some(discriminant) = kind.discriminant {
                node.insert(
                    kind.category.discriminant_key(),
                    Value::String(discriminant.to_string()),
                );
            }
            for field in kind.fields {
                if let Some(default) = field.default.value() {
                    node.set_default(field.name, default);
                }
            }
            *slot = node.into();
        }
    }
}

/// Declared field `name` of `kind`
pub fn field_spec(kind: &NodeKind, name: &str) -> Result<&'static FieldSpec> {
    kind.field(name).ok_or_else(|| BuilderError::FieldNotDeclared {
        kind: kind.label.to_string(),
        field: name.to_string(),
    })
}

/// Apply a leaf edit to field `name` of a mounted structured node
pub fn edit_field(kind: &NodeKind, slot: &mut Value, name: &str, edit: FieldEdit) -> Result<()> {
    let spec = field_spec(kind, name)?;
    let node = slot
        .as_object_mut()
        .ok_or_else(|| BuilderError::FieldNotDeclared {
            kind: kind.label.to_string(),
            field: name.to_string(),
        })?;

    let edit_name = edit.name();
    let outcome = apply_edit(&spec.shape, node.get(name), edit).ok_or_else(|| {
        BuilderError::ShapeMismatch {
            kind: kind.label.to_string(),
            field: name.to_string(),
            expected: spec.shape.name().to_string(),
            edit: edit_name.to_string(),
        }
    })?;

    match outcome {
        EditOutcome::Set(value) => {
            node.insert(name.to_string(), value);
        }
        EditOutcome::Remove => node.retain(|k, _| k != name),
        EditOutcome::Skip => {
            tracing::debug!(kind = kind.label, field = name, "edit left field unchanged");
        }
    }
    Ok(())
}

/// Edit the value of a scalar kind stored directly in its slot
pub fn edit_scalar(kind: &NodeKind, slot: &mut Value, edit: FieldEdit) -> Result<()> {
    let KindMode::Scalar(shape) = kind.mode else {
        return Err(BuilderError::ShapeMismatch {
            kind: kind.label.to_string(),
            field: String::new(),
            expected: "scalar kind".to_string(),
            edit: edit.name().to_string(),
        });
    };
    let edit_name = edit.name();
    let outcome = apply_edit(&shape, Some(&*slot), edit).ok_or_else(|| BuilderError::ShapeMismatch {
        kind: kind.label.to_string(),
        field: String::new(),
        expected: shape.name().to_string(),
        edit: edit_name.to_string(),
    })?;
    match outcome {
        EditOutcome::Set(value) => *slot = value,
        EditOutcome::Remove => *slot = Value::Null,
        EditOutcome::Skip => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;
    use serde_json::json;

    fn kind(category: Category, key: &str) -> &'static NodeKind {
        category.catalog().get(key).unwrap()
    }

    #[test]
    fn test_mount_strips_forces_and_defaults() {
        let mut slot = json!({"type": "bound", "dimension": "d", "lower": "1", "extra": 1});
        mount(kind(Category::Filter, "selector"), &mut slot);
        assert_eq!(slot, json!({"type": "selector", "dimension": "d"}));

        let mut slot = json!(null);
        mount(kind(Category::Filter, "and"), &mut slot);
        assert_eq!(slot, json!({"type": "and", "fields": []}));
    }

    #[test]
    fn test_mount_keeps_existing_values_and_explicit_null() {
        let mut slot = json!({"queryType": "scan", "intervals": null, "columns": ["a"]});
        mount(kind(Category::Query, "scan"), &mut slot);
        assert_eq!(slot["intervals"], Value::Null);
        assert_eq!(slot["columns"], json!(["a"]));
        assert_eq!(slot["virtualColumns"], json!([]));
        assert_eq!(slot["dataSource"], json!({}));
    }

    #[test]
    fn test_mount_is_idempotent() {
        let mut once = json!({"type": "cardinality", "name": "n", "junk": true});
        mount(kind(Category::Aggregation, "cardinality"), &mut once);
        let mut twice = once.clone();
        mount(kind(Category::Aggregation, "cardinality"), &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mount_resets_wrong_shapes() {
        let mut slot = json!([1, 2]);
        mount(kind(Category::Filter, "true"), &mut slot);
        assert_eq!(slot, json!({"type": "true"}));

        let mut slot = json!({"type": "period"});
        mount(kind(Category::Granularity, "simple"), &mut slot);
        assert_eq!(slot, Value::Null);

        let mut slot = json!("day");
        mount(kind(Category::Granularity, "simple"), &mut slot);
        assert_eq!(slot, json!("day"));
    }

    #[test]
    fn test_raw_mount_leaves_slot() {
        let mut slot = json!({"anything": [1, {"goes": true}]});
        let before = slot.clone();
        mount(kind(Category::Query, "json"), &mut slot);
        assert_eq!(slot, before);
    }

    #[test]
    fn test_edit_field_sets_and_removes() {
        let limit = kind(Category::Query, "scan");
        let mut slot = json!(null);
        mount(limit, &mut slot);

        edit_field(limit, &mut slot, "limit", FieldEdit::Number("10".into())).unwrap();
        assert_eq!(slot["limit"], json!(10));
        edit_field(limit, &mut slot, "limit", FieldEdit::Number("".into())).unwrap();
        assert!(slot.get("limit").is_none());
        edit_field(limit, &mut slot, "limit", FieldEdit::Number("many".into())).unwrap();
        assert!(slot.get("limit").is_none());
    }

    #[test]
    fn test_edit_field_rejects_undeclared_and_mismatched() {
        let selector = kind(Category::Filter, "selector");
        let mut slot = json!(null);
        mount(selector, &mut slot);

        assert!(matches!(
            edit_field(selector, &mut slot, "pattern", FieldEdit::Text("x".into())),
            Err(BuilderError::FieldNotDeclared { .. })
        ));
        assert!(matches!(
            edit_field(selector, &mut slot, "dimension", FieldEdit::Boolean(true)),
            Err(BuilderError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_scalar_edit() {
        let simple = kind(Category::Granularity, "simple");
        let mut slot = json!(null);
        edit_scalar(simple, &mut slot, FieldEdit::Choice(Some("hour".into()))).unwrap();
        assert_eq!(slot, json!("hour"));
        edit_scalar(simple, &mut slot, FieldEdit::Choice(None)).unwrap();
        assert_eq!(slot, Value::Null);

        let period = kind(Category::Granularity, "period");
        assert!(edit_scalar(period, &mut slot, FieldEdit::Text("P1D".into())).is_err());
    }
}
