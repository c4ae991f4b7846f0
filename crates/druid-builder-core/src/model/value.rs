//! The value stored in a node slot

use super::node::Node;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A slot holds nothing, a bare scalar (simple granularity), or a structured node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum NodeValue {
    #[default]
    Empty,
    Scalar(String),
    Structured(Node),
}

impl NodeValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, NodeValue::Empty)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            NodeValue::Structured(node) => Some(node),
            _ => None,
        }
    }

    pub fn discriminant(&self) -> Option<&str> {
        self.as_node().and_then(Node::discriminant)
    }
}

impl From<Value> for NodeValue {
    /// Numbers, booleans and arrays have no place in a node slot and read as empty
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => NodeValue::Structured(Node::from_map(map)),
            Value::String(s) => NodeValue::Scalar(s),
            _ => NodeValue::Empty,
        }
    }
}

impl From<NodeValue> for Value {
    fn from(value: NodeValue) -> Self {
        match value {
            NodeValue::Empty => Value::Null,
            NodeValue::Scalar(s) => Value::String(s),
            NodeValue::Structured(node) => node.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(NodeValue::from(json!(null)), NodeValue::Empty);
        assert_eq!(NodeValue::from(json!("day")), NodeValue::Scalar("day".to_string()));
        assert_eq!(NodeValue::from(json!([1, 2])), NodeValue::Empty);
        let structured = NodeValue::from(json!({"type": "period", "period": "P1D"}));
        assert_eq!(structured.discriminant(), Some("period"));
    }

    #[test]
    fn test_serde_goes_through_plain_json() {
        let value: NodeValue = serde_json::from_str(r#"{"type":"true"}"#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"type":"true"}"#);
        assert_eq!(serde_json::to_string(&NodeValue::Empty).unwrap(), "null");
    }
}
