//! Projection between the flat host settings bag and per-tab local objects
//!
//! The host persists one flat bag with keys such as `connection.url` and
//! `query.format`. Each config tab edits a local object without the prefix.

use crate::model::SettingsBag;

pub const CONNECTION_NAMESPACE: &str = "connection";
pub const QUERY_NAMESPACE: &str = "query";
pub const ADHOC_NAMESPACE: &str = "adhoc";

/// Project keys into or out of `namespace`.
///
/// With `namespaced` set, `data` is a local object: keys without a `.` are
/// re-keyed as `namespace.key` and dotted keys are dropped. Otherwise `data`
/// is the flat bag: keys starting with `namespace.` are kept with the prefix
/// stripped. The input is never modified and no match yields an empty bag.
///
/// ```
/// use druid_builder_core::settings::normalize;
/// use serde_json::json;
///
/// let flat = json!({"connection.url": "http://druid:8082", "query.format": "long"});
/// let local = normalize(flat.as_object().unwrap(), false, "connection");
/// assert_eq!(serde_json::Value::Object(local), json!({"url": "http://druid:8082"}));
/// ```
pub fn normalize(data: &SettingsBag, namespaced: bool, namespace: &str) -> SettingsBag {
    let prefix = format!("{}.", namespace);
    data.iter()
        .filter_map(|(key, value)| {
            let key = if namespaced {
                (!key.contains('.')).then(|| format!("{}{}", prefix, key))
            } else {
                key.strip_prefix(&prefix).map(str::to_string)
            };
            key.map(|key| (key, value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn bag(value: Value) -> SettingsBag {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_into_namespace_drops_dotted_keys() {
        let local = bag(json!({"url": "u", "a.b": 1, "skipTls": true}));
        let flat = normalize(&local, true, CONNECTION_NAMESPACE);
        assert_eq!(
            Value::Object(flat),
            json!({"connection.url": "u", "connection.skipTls": true})
        );
    }

    #[test]
    fn test_out_of_namespace_strips_prefix() {
        let flat = bag(json!({
            "connection.url": "u",
            "connectionx.url": "no",
            "query.format": "wide",
            "connection.tls.ca": "nested"
        }));
        let local = normalize(&flat, false, CONNECTION_NAMESPACE);
        assert_eq!(Value::Object(local), json!({"url": "u", "tls.ca": "nested"}));
    }

    #[test]
    fn test_no_match_is_empty() {
        let flat = bag(json!({"query.format": "log"}));
        assert!(normalize(&flat, false, ADHOC_NAMESPACE).is_empty());
        assert!(normalize(&SettingsBag::new(), true, QUERY_NAMESPACE).is_empty());
    }

    #[test]
    fn test_input_is_not_modified() {
        let flat = bag(json!({"query.format": "log"}));
        let copy = flat.clone();
        let _ = normalize(&flat, false, QUERY_NAMESPACE);
        assert_eq!(flat, copy);
    }
}
