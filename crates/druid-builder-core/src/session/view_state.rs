//! UI-local state of a query editor session
//!
//! Everything here is display bookkeeping that never enters the document:
//! selector custom entries, row keys, created choice options, raw JSON text
//! and key/value rows. Entries are keyed by the path of the slot or field
//! they belong to, and follow the document when rows are removed.

use crate::editor::{ChoiceField, JsonField, KeyValueMapField, KindSelector, MultiValueField, RowKeys};
use crate::model::NodePath;
use crate::registry::{Category, ChoiceOption, FieldShape};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    selectors: BTreeMap<NodePath, KindSelector>,
    rows: BTreeMap<NodePath, RowKeys>,
    choices: BTreeMap<NodePath, ChoiceField>,
    multi_values: BTreeMap<NodePath, MultiValueField>,
    json: BTreeMap<NodePath, JsonField>,
    key_values: BTreeMap<NodePath, KeyValueMapField>,
}

impl ViewState {
    pub fn selector(&self, path: &NodePath) -> Option<&KindSelector> {
        self.selectors.get(path)
    }

    /// Selector of the slot at `path`, hydrated from `slot` on first use
    pub fn selector_mut(&mut self, path: &NodePath, category: Category, slot: &Value) -> &mut KindSelector {
        self.selectors
            .entry(path.clone())
            .or_insert_with(|| KindSelector::hydrate(category, slot))
    }

    pub fn set_selector(&mut self, path: &NodePath, selector: KindSelector) {
        self.selectors.insert(path.clone(), selector);
    }

    /// Row keys of the collection at `path`, re-hydrated when the stored
    /// length no longer matches
    pub fn rows_mut(&mut self, path: &NodePath, len: usize) -> &mut RowKeys {
        let rows = self.rows.entry(path.clone()).or_insert_with(|| RowKeys::hydrate(len));
        if rows.len() != len {
            tracing::debug!(%path, keys = rows.len(), len, "row keys out of step, re-hydrating");
            *rows = RowKeys::hydrate(len);
        }
        rows
    }

    pub fn choice_mut(&mut self, path: &NodePath, seed: &[ChoiceOption]) -> &mut ChoiceField {
        self.choices
            .entry(path.clone())
            .or_insert_with(|| ChoiceField::new(seed))
    }

    pub fn choice(&self, path: &NodePath) -> Option<&ChoiceField> {
        self.choices.get(path)
    }

    pub fn multi_value_mut(
        &mut self,
        path: &NodePath,
        shape: &FieldShape,
        current: Option<&Value>,
    ) -> &mut MultiValueField {
        self.multi_values
            .entry(path.clone())
            .or_insert_with(|| MultiValueField::for_shape(shape, current))
    }

    pub fn multi_value(&self, path: &NodePath) -> Option<&MultiValueField> {
        self.multi_values.get(path)
    }

    pub fn json_mut(&mut self, path: &NodePath, current: &Value) -> &mut JsonField {
        self.json
            .entry(path.clone())
            .or_insert_with(|| JsonField::from_value(current))
    }

    pub fn key_values_mut(&mut self, path: &NodePath, current: Option<&Value>) -> &mut KeyValueMapField {
        self.key_values
            .entry(path.clone())
            .or_insert_with(|| KeyValueMapField::from_value(current))
    }

    /// Drop state strictly below `path`; the slot's own selector stays
    pub fn forget_below(&mut self, path: &NodePath) {
        let below = |key: &NodePath| key != path && key.starts_with(path);
        self.selectors.retain(|key, _| !below(key));
        self.rows.retain(|key, _| !below(key));
        self.choices.retain(|key, _| !below(key));
        self.multi_values.retain(|key, _| !below(key));
        self.json.retain(|key, _| !below(key));
        self.key_values.retain(|key, _| !below(key));
    }

    /// Drop `path`'s own selector and everything below it
    pub fn forget_slot(&mut self, path: &NodePath) {
        self.selectors.remove(path);
        self.forget_below(path);
    }

    /// Drop raw JSON text of `path` and its ancestors, which no longer match the document
    pub fn forget_json_over(&mut self, path: &NodePath) {
        self.json.retain(|key, _| !path.starts_with(key));
    }

    /// Element `index` of `collection` is gone: drop its state and shift later rows down
    pub fn after_removal(&mut self, collection: &NodePath, index: usize) {
        shift(&mut self.selectors, collection, index);
        shift(&mut self.rows, collection, index);
        shift(&mut self.choices, collection, index);
        shift(&mut self.multi_values, collection, index);
        shift(&mut self.json, collection, index);
        shift(&mut self.key_values, collection, index);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn shift<V>(map: &mut BTreeMap<NodePath, V>, collection: &NodePath, index: usize) {
    *map = std::mem::take(map)
        .into_iter()
        .filter_map(|(key, value)| key.after_removal(collection, index).map(|key| (key, value)))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(text: &str) -> NodePath {
        text.parse().unwrap()
    }

    #[test]
    fn test_removal_drops_and_shifts() {
        let mut view = ViewState::default();
        view.selector_mut(&path("filter.fields[0]"), Category::Filter, &json!({"type": "true"}));
        view.selector_mut(&path("filter.fields[1]"), Category::Filter, &json!({"type": "regex"}));
        view.selector_mut(&path("filter.fields[1].extractionFn"), Category::ExtractionFn, &json!(null));
        view.rows_mut(&path("filter.fields"), 2);

        view.after_removal(&path("filter.fields"), 0);

        let moved = view.selector(&path("filter.fields[0]")).and_then(KindSelector::current);
        assert_eq!(moved, Some("regex"));
        assert!(view.selector(&path("filter.fields[0].extractionFn")).is_some());
        assert!(view.selector(&path("filter.fields[1]")).is_none());
        assert!(view.rows.contains_key(&path("filter.fields")));
    }

    #[test]
    fn test_forget_below_keeps_own_selector() {
        let mut view = ViewState::default();
        view.selector_mut(&path("filter"), Category::Filter, &json!({"type": "not"}));
        view.selector_mut(&path("filter.field"), Category::Filter, &json!(null));
        view.forget_below(&path("filter"));
        assert!(view.selector(&path("filter")).is_some());
        assert!(view.selector(&path("filter.field")).is_none());
    }

    #[test]
    fn test_rows_rehydrate_when_length_changes() {
        let mut view = ViewState::default();
        let first = view.rows_mut(&path("intervals"), 1).keys().to_vec();
        assert_eq!(view.rows_mut(&path("intervals"), 1).keys(), first.as_slice());
        assert_eq!(view.rows_mut(&path("intervals"), 3).len(), 3);
    }
}
