//! Scenario 01: picking and switching node kinds
//!
//! ## Scenarios Covered
//!
//! 1. Selecting a kind on an empty slot writes only the discriminant
//! 2. Switching kind strips every field the new kind does not declare
//! 3. Switching back does not restore stripped fields
//! 4. Clearing the selection sets the slot to null
//! 5. The discriminant written is the kind's wire name, whatever case was picked

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{path, session};
use druid_builder_core::editor::Selection;
use druid_builder_core::{FieldEdit, NodePath};
use serde_json::{json, Value};

#[test]
fn test_selector_then_regex_drops_dimension() {
    // GIVEN a timeseries query whose filter slot holds an empty node
    let mut s = session(json!({"queryType": "timeseries", "filter": {}}));
    let filter = path("filter");

    // WHEN Selector is picked
    s.select_kind(&filter, Some("Selector")).unwrap();

    // THEN only the discriminant is written
    assert_eq!(s.document().builder["filter"], json!({"type": "selector"}));

    // WHEN the dimension is edited
    s.edit_field(&filter, "dimension", FieldEdit::Text("foo".into()))
        .unwrap();
    assert_eq!(
        s.document().builder["filter"],
        json!({"type": "selector", "dimension": "foo"})
    );

    // AND the kind is switched to Regex
    s.select_kind(&filter, Some("Regex")).unwrap();

    // THEN dimension is gone and the Regex fields are editable
    assert_eq!(s.document().builder["filter"], json!({"type": "regex"}));
    s.edit_field(&filter, "expr", FieldEdit::Text("^a.*".into())).unwrap();
    s.edit_field(&filter, "index", FieldEdit::Number("1".into())).unwrap();
    s.edit_field(&filter, "replaceMissingValue", FieldEdit::Boolean(true))
        .unwrap();
    assert_eq!(
        s.document().builder["filter"],
        json!({"type": "regex", "expr": "^a.*", "index": 1, "replaceMissingValue": true})
    );
}

#[test]
fn test_switching_back_does_not_restore_fields() {
    // GIVEN a Bound filter with bounds set
    let mut s = session(json!({
        "queryType": "timeseries",
        "filter": {"type": "bound", "dimension": "age", "lower": "18", "upper": "65"}
    }));
    let filter = path("filter");

    // WHEN switching to Selector and back to Bound
    s.select_kind(&filter, Some("selector")).unwrap();
    s.select_kind(&filter, Some("bound")).unwrap();

    // THEN only the shared field survived the round trip
    assert_eq!(
        s.document().builder["filter"],
        json!({"type": "bound", "dimension": "age"})
    );
}

#[test]
fn test_clear_sets_null_and_selector_empties() {
    // GIVEN a query with a Not filter
    let mut s = session(json!({"queryType": "timeseries", "filter": {"type": "not", "field": {"type": "true"}}}));
    let filter = path("filter");

    // WHEN the selection is cleared
    let selection = s.select_kind(&filter, None).unwrap();

    // THEN the slot is null and nothing is selected
    assert_eq!(selection, Selection::Cleared);
    assert_eq!(s.document().builder["filter"], Value::Null);
    assert_eq!(s.selector(&filter).unwrap().current(), None);
}

#[test]
fn test_discriminant_is_wire_name() {
    // GIVEN an empty document
    let mut s = session(Value::Null);

    // WHEN kinds are picked with mixed-case keys
    s.select_kind(&NodePath::root(), Some("GroupBy")).unwrap();
    s.add_child(&NodePath::root(), "aggregations").unwrap();
    s.select_kind(&path("aggregations[0]"), Some("LONGSUM")).unwrap();

    // THEN stored discriminants are the names Druid expects
    assert_eq!(s.document().builder["queryType"], "groupBy");
    assert_eq!(s.document().builder["aggregations"][0]["type"], "longSum");
    assert_eq!(s.selector(&path("aggregations[0]")).unwrap().current(), Some("longsum"));
}

#[test]
fn test_root_switch_strips_query_fields() {
    // GIVEN a scan query with scan-only fields
    let mut s = session(json!({
        "queryType": "scan",
        "dataSource": {"type": "table", "name": "wiki"},
        "columns": ["page"],
        "limit": 10
    }));

    // WHEN the query kind becomes Timeseries
    s.select_kind(&NodePath::root(), Some("timeseries")).unwrap();

    // THEN scan-only fields are gone, shared ones kept, defaults added
    let builder = &s.document().builder;
    assert_eq!(builder["dataSource"], json!({"type": "table", "name": "wiki"}));
    assert!(builder.get("columns").is_none());
    assert_eq!(builder["limit"], 10);
    assert_eq!(builder["intervals"], json!([]));
}
