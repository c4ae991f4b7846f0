//! The (builder, settings) pair every editor receives

use super::value::NodeValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat string-keyed bag of editor settings, shared down the tree
pub type SettingsBag = Map<String, Value>;

/// What an editor renders and reports back: its slice of the tree plus the shared settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderOptions {
    #[serde(default)]
    pub builder: NodeValue,
    #[serde(default)]
    pub settings: SettingsBag,
}

impl BuilderOptions {
    pub fn new(builder: NodeValue, settings: SettingsBag) -> Self {
        Self { builder, settings }
    }

    /// Options handed to the editor of child field `field`
    pub fn child(&self, field: &str) -> BuilderOptions {
        let builder = self
            .builder
            .as_node()
            .and_then(|node| node.get(field))
            .cloned()
            .map(NodeValue::from)
            .unwrap_or_else(|| NodeValue::Structured(Default::default()));
        BuilderOptions::new(builder, self.settings.clone())
    }

    /// Options handed to the editor of element `index` of collection `field`
    pub fn element(&self, field: &str, index: usize) -> BuilderOptions {
        let builder = self
            .builder
            .as_node()
            .and_then(|node| node.get(field))
            .and_then(Value::as_array)
            .and_then(|items| items.get(index))
            .cloned()
            .map(NodeValue::from)
            .unwrap_or_else(|| NodeValue::Structured(Default::default()));
        BuilderOptions::new(builder, self.settings.clone())
    }

    /// Fold a child's reported settings into ours; the child's keys win
    pub fn absorb_settings(&mut self, child: &SettingsBag) {
        shallow_merge(&mut self.settings, child);
    }
}

/// Copy every key of `patch` into `base`, overwriting
pub fn shallow_merge(base: &mut SettingsBag, patch: &SettingsBag) {
    for (key, value) in patch {
        base.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(builder: Value, settings: Value) -> BuilderOptions {
        serde_json::from_value(json!({"builder": builder, "settings": settings})).unwrap()
    }

    #[test]
    fn test_child_slice_defaults_to_empty_object() {
        let opts = options(json!({"type": "not"}), json!({"a": 1}));
        let child = opts.child("field");
        assert_eq!(child.builder, NodeValue::Structured(Default::default()));
        assert_eq!(child.settings, opts.settings);
    }

    #[test]
    fn test_element_slice() {
        let opts = options(
            json!({"type": "and", "fields": [{"type": "true"}, {"type": "false"}]}),
            json!({}),
        );
        assert_eq!(opts.element("fields", 1).builder.discriminant(), Some("false"));
        assert_eq!(
            opts.element("fields", 5).builder,
            NodeValue::Structured(Default::default())
        );
    }

    #[test]
    fn test_absorb_settings_child_wins() {
        let mut parent = options(json!({}), json!({"a": 1, "b": 1}));
        let child: SettingsBag = serde_json::from_value(json!({"b": 2, "c": 3})).unwrap();
        parent.absorb_settings(&child);
        assert_eq!(Value::Object(parent.settings), json!({"a": 1, "b": 2, "c": 3}));
    }
}
