//! A structured node: one JSON object in the builder tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Discriminant keys, in lookup order
pub const DISCRIMINANT_KEYS: [&str; 2] = ["type", "queryType"];

/// Discriminant of a raw JSON object, see [`Node::discriminant`]
pub fn discriminant_of(map: &Map<String, Value>) -> Option<&str> {
    DISCRIMINANT_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
}

/// JSON object holding a node's discriminant and fields, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Map<String, Value>);

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Value of `type`, falling back to `queryType`, when it is a string
    pub fn discriminant(&self) -> Option<&str> {
        discriminant_of(&self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// Remove a key, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.0.get(key).cloned();
        self.0.retain(|k, _| k != key);
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Delete every key not in `allowed`; returns the deleted keys
    pub fn strip_to(&mut self, allowed: &[&str]) -> Vec<String> {
        let stripped: Vec<String> = self
            .0
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .cloned()
            .collect();
        if !stripped.is_empty() {
            self.0.retain(|k, _| allowed.contains(&k.as_str()));
        }
        stripped
    }

    /// Set `key` only when absent. An explicit `null` counts as present.
    pub fn set_default(&mut self, key: &str, value: Value) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value);
        true
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Object(node.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Node {
        match value {
            Value::Object(map) => Node::from_map(map),
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_discriminant_prefers_type() {
        assert_eq!(node(json!({"type": "selector"})).discriminant(), Some("selector"));
        assert_eq!(node(json!({"queryType": "scan"})).discriminant(), Some("scan"));
        assert_eq!(
            node(json!({"queryType": "scan", "type": "table"})).discriminant(),
            Some("table")
        );
        assert_eq!(node(json!({"type": 3})).discriminant(), None);
    }

    #[test]
    fn test_strip_keeps_order_of_survivors() {
        let mut n = node(json!({"type": "regex", "dimension": "d", "value": "v", "pattern": "p"}));
        let stripped = n.strip_to(&["type", "dimension", "pattern"]);
        assert_eq!(stripped, vec!["value".to_string()]);
        let keys: Vec<&str> = n.keys().collect();
        assert_eq!(keys, vec!["type", "dimension", "pattern"]);
    }

    #[test]
    fn test_set_default_respects_explicit_null() {
        let mut n = node(json!({"fields": null}));
        assert!(!n.set_default("fields", json!([])));
        assert_eq!(n.get("fields"), Some(&Value::Null));
        assert!(n.set_default("other", json!([])));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut n = node(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(n.remove("a"), Some(json!(1)));
        let keys: Vec<&str> = n.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }
}
