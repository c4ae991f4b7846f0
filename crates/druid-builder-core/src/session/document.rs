//! The query document a host stores and hands back

use crate::errors::Result;
use crate::model::{BuilderOptions, NodeValue, SettingsBag};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Host query object: the builder tree, shared settings, and their string mirror
///
/// `expr` is always the compact JSON of `{"builder": .., "settings": ..}` and
/// is recomputed after every change. Host-owned keys (`refId`, `datasource`,
/// ...) pass through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDocument {
    #[serde(default)]
    pub builder: Value,
    #[serde(default)]
    pub settings: SettingsBag,
    #[serde(default)]
    pub expr: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryDocument {
    /// Document holding `builder` with empty settings
    pub fn from_builder(builder: Value) -> Self {
        let mut doc = Self {
            builder,
            ..Self::default()
        };
        doc.refresh_expr();
        doc
    }

    /// Read a host query object. Missing or malformed parts start empty.
    pub fn from_host(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => {
                tracing::warn!(found = %other, "host query is not an object, starting empty");
                Map::new()
            }
        };

        let mut doc = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "builder" => doc.builder = value,
                "settings" => match value {
                    Value::Object(settings) => doc.settings = settings,
                    Value::Null => {}
                    other => {
                        tracing::warn!(found = %other, "query settings are not an object, ignoring")
                    }
                },
                "expr" => {}
                _ => {
                    doc.extra.insert(key, value);
                }
            }
        }
        doc.refresh_expr();
        doc
    }

    /// Serialize for the host
    pub fn to_host(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Recompute the string mirror
    pub fn refresh_expr(&mut self) {
        self.expr = json!({"builder": self.builder, "settings": self.settings}).to_string();
    }

    /// The (builder, settings) pair the root editor receives
    pub fn options(&self) -> BuilderOptions {
        BuilderOptions::new(NodeValue::from(self.builder.clone()), self.settings.clone())
    }
}
