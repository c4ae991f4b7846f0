//! Ordered child collections and their row keys
//!
//! The stored array holds the elements; [`RowKeys`] holds one stable UI key
//! per element, kept in step with every add and remove. Keys never enter
//! the document.

use super::fields::{apply_edit, EditOutcome, FieldEdit};
use super::node::field_spec;
use crate::errors::{BuilderError, Result};
use crate::registry::{FieldSpec, NodeKind};
use serde_json::Value;
use uuid::Uuid;

/// Stable keys for the rows of one collection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowKeys {
    keys: Vec<String>,
}

impl RowKeys {
    /// One fresh key per existing element
    pub fn hydrate(len: usize) -> Self {
        Self {
            keys: (0..len).map(|_| Uuid::now_v7().to_string()).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key for a newly appended element
    pub fn push(&mut self) -> String {
        let key = Uuid::now_v7().to_string();
        self.keys.push(key.clone());
        key
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.keys.len()).then(|| self.keys.remove(index))
    }
}

fn collection_field(kind: &NodeKind, field: &str) -> Result<&'static FieldSpec> {
    let spec = field_spec(kind, field)?;
    if !spec.shape.is_collection() {
        return Err(BuilderError::NotACollection {
            kind: kind.label.to_string(),
            field: field.to_string(),
        });
    }
    Ok(spec)
}

fn array_mut<'a>(kind: &NodeKind, slot: &'a mut Value, field: &str) -> Result<&'a mut Vec<Value>> {
    let node = slot
        .as_object_mut()
        .ok_or_else(|| BuilderError::FieldNotDeclared {
            kind: kind.label.to_string(),
            field: field.to_string(),
        })?;
    let entry = node.entry(field.to_string()).or_insert(Value::Null);
    if !entry.is_array() {
        tracing::debug!(kind = kind.label, field, "collection is not an array, resetting");
        *entry = Value::Array(Vec::new());
    }
    entry.as_array_mut().ok_or_else(|| BuilderError::NotACollection {
        kind: kind.label.to_string(),
        field: field.to_string(),
    })
}

/// Length of collection `field` as stored, zero when absent
pub fn collection_len(slot: &Value, field: &str) -> usize {
    slot.get(field).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Append an empty element; returns the new length
pub fn add_element(kind: &NodeKind, slot: &mut Value, field: &str) -> Result<usize> {
    let spec = collection_field(kind, field)?;
    let element = spec
        .shape
        .new_element()
        .ok_or_else(|| BuilderError::NotACollection {
            kind: kind.label.to_string(),
            field: field.to_string(),
        })?;
    let items = array_mut(kind, slot, field)?;
    items.push(element);
    Ok(items.len())
}

/// Remove element `index`, keeping the order of the rest
pub fn remove_element(kind: &NodeKind, slot: &mut Value, field: &str, index: usize) -> Result<Value> {
    collection_field(kind, field)?;
    let items = array_mut(kind, slot, field)?;
    if index >= items.len() {
        return Err(BuilderError::IndexOutOfRange {
            path: field.to_string(),
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

/// Edit element `index` of a collection of plain values in place
pub fn edit_element(kind: &NodeKind, slot: &mut Value, field: &str, index: usize, edit: FieldEdit) -> Result<()> {
    let spec = collection_field(kind, field)?;
    let edit_name = edit.name();
    let mismatch = || BuilderError::ShapeMismatch {
        kind: kind.label.to_string(),
        field: field.to_string(),
        expected: spec.shape.name().to_string(),
        edit: edit_name.to_string(),
    };
    let element_shape = spec.shape.element_shape().ok_or_else(mismatch)?;

    let items = array_mut(kind, slot, field)?;
    let len = items.len();
    let element = items.get_mut(index).ok_or_else(|| BuilderError::IndexOutOfRange {
        path: field.to_string(),
        index,
        len,
    })?;

    match apply_edit(&element_shape, Some(&*element), edit).ok_or_else(mismatch)? {
        EditOutcome::Set(value) => *element = value,
        EditOutcome::Remove => *element = Value::Null,
        EditOutcome::Skip => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::fields::{DateTimeInput, IntervalBound};
    use crate::registry::Category;
    use serde_json::json;

    fn kind(category: Category, key: &str) -> &'static NodeKind {
        category.catalog().get(key).unwrap()
    }

    #[test]
    fn test_row_keys_follow_add_and_remove() {
        let mut keys = RowKeys::hydrate(2);
        let first = keys.keys()[0].clone();
        let third = keys.push();
        assert_eq!(keys.len(), 3);
        keys.remove(1);
        assert_eq!(keys.keys(), &[first, third]);
        assert_eq!(keys.remove(7), None);
    }

    #[test]
    fn test_add_appends_shape_specific_element() {
        let and = kind(Category::Filter, "and");
        let mut slot = json!({"type": "and", "fields": []});
        assert_eq!(add_element(and, &mut slot, "fields").unwrap(), 1);
        assert_eq!(slot["fields"], json!([{}]));

        let scan = kind(Category::Query, "scan");
        let mut slot = json!({"queryType": "scan"});
        add_element(scan, &mut slot, "intervals").unwrap();
        assert_eq!(slot["intervals"], json!([""]));
    }

    #[test]
    fn test_add_on_non_collection_fails() {
        let scan = kind(Category::Query, "scan");
        let mut slot = json!({"queryType": "scan"});
        assert!(matches!(
            add_element(scan, &mut slot, "limit"),
            Err(BuilderError::NotACollection { .. })
        ));
    }

    #[test]
    fn test_remove_keeps_order() {
        let or = kind(Category::Filter, "or");
        let mut slot = json!({"type": "or", "fields": [{"type": "true"}, {"type": "false"}, {"type": "not"}]});
        let removed = remove_element(or, &mut slot, "fields", 0).unwrap();
        assert_eq!(removed, json!({"type": "true"}));
        assert_eq!(slot["fields"], json!([{"type": "false"}, {"type": "not"}]));
        assert!(matches!(
            remove_element(or, &mut slot, "fields", 2),
            Err(BuilderError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_edit_interval_element() {
        let scan = kind(Category::Query, "scan");
        let mut slot = json!({"queryType": "scan", "intervals": ["", "a/b"]});
        edit_element(
            scan,
            &mut slot,
            "intervals",
            0,
            FieldEdit::Interval {
                bound: IntervalBound::Start,
                input: DateTimeInput::Raw("$__from".into()),
            },
        )
        .unwrap();
        assert_eq!(slot["intervals"], json!(["$__from/", "a/b"]));
    }

    #[test]
    fn test_edit_subtotal_element() {
        let group_by = kind(Category::Query, "groupby");
        let mut slot = json!({"queryType": "groupBy", "subtotalsSpec": [[]]});
        edit_element(
            group_by,
            &mut slot,
            "subtotalsSpec",
            0,
            FieldEdit::MultiValue(vec!["country".into(), "city".into()]),
        )
        .unwrap();
        assert_eq!(slot["subtotalsSpec"], json!([["country", "city"]]));
    }

    #[test]
    fn test_node_elements_are_not_edited_in_place() {
        let and = kind(Category::Filter, "and");
        let mut slot = json!({"type": "and", "fields": [{}]});
        assert!(matches!(
            edit_element(and, &mut slot, "fields", 0, FieldEdit::Text("x".into())),
            Err(BuilderError::ShapeMismatch { .. })
        ));
    }
}
