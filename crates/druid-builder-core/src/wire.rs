//! The query handed to the backend
//!
//! The builder tree is sent as the Druid query with a `context` object built
//! from context parameters: the instance defaults first, then the query's own,
//! so a name set in both takes the query's value. The effective settings are
//! the instance defaults shallow-merged with the query's.

use crate::model::{shallow_merge, SettingsBag};
use crate::session::QueryDocument;
use crate::settings::{context_from_parameters, QuerySettings};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizedQuery {
    pub query: Value,
    pub settings: SettingsBag,
}

/// Build the backend query, or `None` while there is nothing to run
///
/// A document whose builder is not an object (nothing selected yet, or a
/// bare string) is not a query.
pub fn finalize_query(document: &QueryDocument, defaults: &SettingsBag) -> Option<FinalizedQuery> {
    let Value::Object(builder) = &document.builder else {
        tracing::debug!(builder = %document.builder, "no query to finalize");
        return None;
    };

    let mut context = context_from_parameters(QuerySettings::from_bag(defaults).parameters());
    let own = context_from_parameters(QuerySettings::from_bag(&document.settings).parameters());
    shallow_merge(&mut context, &own);

    let mut query = builder.clone();
    query.insert("context".to_string(), Value::Object(context));

    let mut settings = defaults.clone();
    shallow_merge(&mut settings, &document.settings);

    Some(FinalizedQuery {
        query: Value::Object(query),
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> SettingsBag {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_nothing_selected_is_no_query() {
        assert!(finalize_query(&QueryDocument::default(), &SettingsBag::new()).is_none());
        let doc = QueryDocument::from_builder(json!("day"));
        assert!(finalize_query(&doc, &SettingsBag::new()).is_none());
    }

    #[test]
    fn test_context_defaults_then_query() {
        let mut doc = QueryDocument::from_builder(json!({"queryType": "timeBoundary", "context": {"stale": 1}}));
        doc.settings = bag(json!({
            "format": "wide",
            "contextParameters": [{"name": "timeout", "value": "500"}, {"name": "useCache", "value": "false"}]
        }));
        let defaults = bag(json!({
            "format": "long",
            "hideEmptyColumns": true,
            "contextParameters": [{"name": "timeout", "value": "10000"}, {"name": "priority", "value": "1"}]
        }));

        let finalized = finalize_query(&doc, &defaults).unwrap();
        assert_eq!(
            finalized.query["context"],
            json!({"timeout": "500", "priority": "1", "useCache": "false"})
        );
        assert_eq!(finalized.settings["format"], "wide");
        assert_eq!(finalized.settings["hideEmptyColumns"], true);
    }

    #[test]
    fn test_context_always_present() {
        let doc = QueryDocument::from_builder(json!({"queryType": "sql", "query": "SELECT 1"}));
        let finalized = finalize_query(&doc, &SettingsBag::new()).unwrap();
        assert_eq!(finalized.query["context"], json!({}));
        assert!(finalized.settings.is_empty());
    }
}
