//! Scenario 05: field editors over real documents
//!
//! ## Scenarios Covered
//!
//! 1. Slots holding the wrong JSON shape are reset before editing
//! 2. Simple granularity is a bare string; period granularity is an object
//! 3. Creatable choice options stay local to the session
//! 4. Multi-value fields accept typed-in values verbatim, suggest registry
//!    options, and never select a value twice
//! 5. Key/value maps drop rows without a key
//! 6. Numeric inputs: empty removes, unparseable text is ignored

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{path, session};
use druid_builder_core::{FieldEdit, NodePath};
use serde_json::json;

#[test]
fn test_wrong_shapes_are_reset() {
    // GIVEN a stored query with mangled slots
    let mut s = session(json!({
        "queryType": "scan",
        "filter": "oops",
        "intervals": "2020-01-01/2020-02-01"
    }));
    let root = NodePath::root();

    // WHEN an AND filter is mounted over a string
    s.select_kind(&path("filter"), Some("and")).unwrap();

    // THEN the slot becomes a fresh node
    assert_eq!(s.document().builder["filter"], json!({"type": "and", "fields": []}));

    // WHEN an interval is added to a collection stored as a string
    s.add_child(&root, "intervals").unwrap();

    // THEN the collection restarts as an array
    assert_eq!(s.document().builder["intervals"], json!([""]));
    assert_eq!(s.row_keys(&root, "intervals").len(), 1);
}

#[test]
fn test_granularity_switches_between_string_and_object() {
    // GIVEN a timeseries query
    let mut s = session(json!({"queryType": "timeseries"}));
    let granularity = path("granularity");

    // WHEN the simple granularity is chosen and set
    s.select_kind(&granularity, Some("simple")).unwrap();
    s.edit_scalar(&granularity, FieldEdit::Choice(Some("hour".into())))
        .unwrap();

    // THEN it is stored as a bare string
    assert_eq!(s.document().builder["granularity"], "hour");

    // WHEN switching to period
    s.select_kind(&granularity, Some("period")).unwrap();
    s.edit_field(&granularity, "period", FieldEdit::Text("PT15M".into()))
        .unwrap();

    // THEN the string is replaced by a typed object
    assert_eq!(
        s.document().builder["granularity"],
        json!({"type": "period", "period": "PT15M"})
    );
}

#[test]
fn test_created_choice_option_is_session_local() {
    // GIVEN a simple granularity
    let mut s = session(json!({"queryType": "timeseries", "granularity": "day"}));
    let granularity = path("granularity");
    let seeded = s.choice_options(&granularity, None).unwrap().len();

    // WHEN a new option is typed in
    let value = s.create_choice_option(&granularity, None, "Fifteen_Minute").unwrap();

    // THEN its value is the lower-cased label and it is selected
    assert_eq!(value, "fifteen_minute");
    assert_eq!(s.document().builder["granularity"], "fifteen_minute");
    let options = s.choice_options(&granularity, None).unwrap();
    assert_eq!(options.len(), seeded + 1);
    assert_eq!(options.last().map(|o| o.label.as_str()), Some("Fifteen_Minute"));

    // AND a new session does not see it
    let fresh = session(json!({"queryType": "timeseries", "granularity": "day"}));
    assert_eq!(fresh.choice_options(&granularity, None).unwrap().len(), seeded);
}

#[test]
fn test_scan_order_choice_can_be_cleared() {
    // GIVEN a scan query with an order
    let mut s = session(json!({"queryType": "scan", "order": "ascending"}));

    // WHEN the choice is cleared
    s.edit_field(&NodePath::root(), "order", FieldEdit::Choice(None))
        .unwrap();

    // THEN the field is removed, not nulled
    assert!(s.document().builder.get("order").is_none());
}

#[test]
fn test_multi_value_creation_keeps_text_verbatim() {
    // GIVEN a scan query with one column
    let mut s = session(json!({"queryType": "scan", "columns": ["channel"]}));
    let root = NodePath::root();

    // WHEN a column is typed in
    let values = s.create_multi_value(&root, "columns", "Page Title").unwrap();

    // THEN it is appended exactly as typed
    assert_eq!(values, vec!["channel".to_string(), "Page Title".to_string()]);
    assert_eq!(s.document().builder["columns"], json!(["channel", "Page Title"]));
    let labels: Vec<String> = s
        .multi_value_options(&root, "columns")
        .unwrap()
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert_eq!(labels, vec!["channel", "Page Title"]);

    // WHEN the selection is replaced
    s.edit_field(&root, "columns", FieldEdit::MultiValue(vec!["user".into()]))
        .unwrap();

    // THEN the options follow it
    assert_eq!(s.multi_value_options(&root, "columns").unwrap().len(), 1);
}

#[test]
fn test_segment_metadata_suggests_analysis_types() {
    // GIVEN a fresh segment metadata query
    let mut s = session(json!(null));
    let root = NodePath::root();
    s.select_kind(&root, Some("segmentmetadata")).unwrap();

    // THEN the analysis types are offered before anything is selected
    let values: Vec<String> = s
        .multi_value_options(&root, "analysisTypes")
        .unwrap()
        .into_iter()
        .map(|o| o.value)
        .collect();
    assert_eq!(
        values,
        vec![
            "cardinality",
            "minmax",
            "size",
            "interval",
            "timestampSpec",
            "queryGranularity",
            "aggregators",
            "rollup"
        ]
    );

    // WHEN two suggestions are selected
    s.edit_field(
        &root,
        "analysisTypes",
        FieldEdit::MultiValue(vec!["size".into(), "rollup".into()]),
    )
    .unwrap();

    // THEN the suggestions are still all there
    assert_eq!(s.multi_value_options(&root, "analysisTypes").unwrap().len(), 8);
    assert_eq!(s.document().builder["analysisTypes"], json!(["size", "rollup"]));
}

#[test]
fn test_multi_value_creation_does_not_duplicate() {
    // GIVEN a scan query with one column
    let mut s = session(json!({"queryType": "scan", "columns": ["channel"]}));
    let root = NodePath::root();
    let commits = s.host().documents.len();

    // WHEN the selected column is typed in again
    let values = s.create_multi_value(&root, "columns", "channel").unwrap();

    // THEN nothing changes
    assert_eq!(values, vec!["channel".to_string()]);
    assert_eq!(s.document().builder["columns"], json!(["channel"]));
    assert_eq!(s.host().documents.len(), commits);
}

#[test]
fn test_multi_value_creation_on_a_text_field_fails() {
    let mut s = session(json!({"queryType": "scan"}));
    assert!(s.create_multi_value(&NodePath::root(), "limit", "5").is_err());
    assert!(s.host().documents.is_empty());
}

#[test]
fn test_lookup_map_rows() {
    // GIVEN a selector filter with a map lookup extraction
    let mut s = session(json!({"queryType": "scan"}));
    let filter = path("filter");
    let extraction = path("filter.extractionFn");
    let lookup = path("filter.extractionFn.lookup");
    s.select_kind(&filter, Some("selector")).unwrap();
    s.select_kind(&extraction, Some("lookup")).unwrap();
    s.select_kind(&lookup, Some("map")).unwrap();

    // WHEN a row is added but has no key yet
    s.add_map_entry(&lookup, "map").unwrap();

    // THEN the row shows but nothing is stored
    assert_eq!(s.map_entries(&lookup, "map").len(), 1);
    assert_eq!(s.document().builder["filter"]["extractionFn"]["lookup"]["map"], json!({}));

    // WHEN the row is filled in
    assert!(s.set_map_entry(&lookup, "map", 0, "us", "United States").unwrap());

    // THEN the pair is stored
    assert_eq!(
        s.document().builder["filter"]["extractionFn"]["lookup"],
        json!({"type": "map", "map": {"us": "United States"}})
    );

    // WHEN the row is removed by id
    let id = s.map_entries(&lookup, "map")[0].id.clone();
    assert!(s.remove_map_entry(&lookup, "map", &id).unwrap());
    assert!(!s.remove_map_entry(&lookup, "map", &id).unwrap());

    // THEN the map is empty again
    assert_eq!(s.document().builder["filter"]["extractionFn"]["lookup"]["map"], json!({}));
}

#[test]
fn test_number_inputs() {
    // GIVEN a scan query
    let mut s = session(json!({"queryType": "scan"}));
    let root = NodePath::root();

    // WHEN a number is typed, then garbage, then nothing
    s.edit_field(&root, "batchSize", FieldEdit::Number("20480".into()))
        .unwrap();
    s.edit_field(&root, "batchSize", FieldEdit::Number("lots".into()))
        .unwrap();
    assert_eq!(s.document().builder["batchSize"], 20480);
    s.edit_field(&root, "batchSize", FieldEdit::Number("".into()))
        .unwrap();

    // THEN the last edit removed the field
    assert!(s.document().builder.get("batchSize").is_none());
}
