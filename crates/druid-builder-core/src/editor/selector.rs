//! Kind selector: the dropdown that picks which kind occupies a slot

use super::fields::SelectOption;
use crate::registry::{Category, NodeKind};
use serde_json::Value;

/// Result of picking an entry in a selector
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Selection cleared; the slot becomes empty
    Cleared,
    /// A registered kind; its editor mounts on the slot
    Kind(&'static NodeKind),
    /// A user-created entry with no editor; the slot is left as is
    Custom(String),
}

/// Selector state for one slot
///
/// Custom entries live only here. They are never written into the registry
/// and vanish with the selector.
#[derive(Debug, Clone, PartialEq)]
pub struct KindSelector {
    category: Category,
    custom: Vec<SelectOption>,
    current: Option<String>,
    unrecognized: Option<String>,
}

impl KindSelector {
    /// Selector for a slot currently holding `value`
    pub fn hydrate(category: Category, value: &Value) -> Self {
        let resolved = category.catalog().resolve(value);
        let unrecognized = match resolved {
            Some(_) => None,
            None => value
                .get(category.discriminant_key())
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        Self {
            category,
            custom: Vec::new(),
            current: resolved.map(NodeKind::key),
            unrecognized,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Registered kinds in catalog order, then custom entries
    pub fn options(&self) -> Vec<SelectOption> {
        self.category
            .catalog()
            .kinds()
            .iter()
            .map(|kind| SelectOption {
                label: kind.label.to_string(),
                value: kind.key(),
            })
            .chain(self.custom.iter().cloned())
            .collect()
    }

    /// Key of the selected entry
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Discriminant present in the document that no kind recognises
    pub fn unrecognized(&self) -> Option<&str> {
        self.unrecognized.as_deref()
    }

    /// The registered kind whose editor is mounted, if any
    pub fn mounted_kind(&self) -> Option<&'static NodeKind> {
        self.current
            .as_deref()
            .and_then(|key| self.category.catalog().get(key))
    }

    /// Pick an entry by key, or clear with `None`
    pub fn select(&mut self, key: Option<&str>) -> Selection {
        let Some(key) = key else {
            self.current = None;
            self.unrecognized = None;
            return Selection::Cleared;
        };
        let key = key.to_lowercase();
        match self.category.catalog().get(&key) {
            Some(kind) => {
                self.current = Some(key);
                self.unrecognized = None;
                Selection::Kind(kind)
            }
            None => {
                if !self.custom.iter().any(|o| o.value == key) {
                    self.custom.push(SelectOption {
                        label: key.clone(),
                        value: key.clone(),
                    });
                }
                self.current = Some(key.clone());
                Selection::Custom(key)
            }
        }
    }

    /// Add a typed-in entry and select it; the key is the lower-cased label
    pub fn create_custom(&mut self, label: &str) -> Selection {
        let key = label.to_lowercase();
        if self.category.catalog().get(&key).is_none() && !self.custom.iter().any(|o| o.value == key) {
            self.custom.push(SelectOption {
                label: label.to_string(),
                value: key.clone(),
            });
        }
        self.select(Some(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrate_resolves_current_kind() {
        let selector = KindSelector::hydrate(Category::Filter, &json!({"type": "columnComparison"}));
        assert_eq!(selector.current(), Some("columncomparison"));
        assert_eq!(selector.mounted_kind().map(|k| k.label), Some("ColumnComparison"));
        assert_eq!(selector.unrecognized(), None);
    }

    #[test]
    fn test_hydrate_keeps_unknown_discriminant() {
        let selector = KindSelector::hydrate(Category::Query, &json!({"queryType": "movingAverage"}));
        assert_eq!(selector.current(), None);
        assert_eq!(selector.unrecognized(), Some("movingAverage"));
    }

    #[test]
    fn test_options_list_catalog_then_custom() {
        let mut selector = KindSelector::hydrate(Category::ToInclude, &json!(null));
        let labels: Vec<String> = selector.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["All", "List", "None"]);

        let picked = selector.create_custom("Everything Else");
        assert_eq!(picked, Selection::Custom("everything else".to_string()));
        let options = selector.options();
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("Everything Else"));
        assert_eq!(selector.mounted_kind(), None);

        // no leak into a fresh selector
        let other = KindSelector::hydrate(Category::ToInclude, &json!(null));
        assert_eq!(other.options().len(), 3);
    }

    #[test]
    fn test_select_and_clear() {
        let mut selector = KindSelector::hydrate(Category::Granularity, &json!(null));
        match selector.select(Some("Simple")) {
            Selection::Kind(kind) => assert_eq!(kind.label, "Simple"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(selector.current(), Some("simple"));
        assert_eq!(selector.select(None), Selection::Cleared);
        assert_eq!(selector.current(), None);
    }
}
