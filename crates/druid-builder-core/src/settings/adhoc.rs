//! Ad hoc filter behaviour flags

use super::{from_bag, to_bag};
use crate::model::SettingsBag;
use serde::{Deserialize, Serialize};

/// Ad hoc filter settings, stored under `adhoc.*`
///
/// Both flags are stored negated: the toggles read "autocomplete values" and
/// "limit autocomplete values", and an absent flag means the feature is on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_not_autocomplete_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_not_limit_autocomplete_value: Option<bool>,
    #[serde(flatten)]
    pub extra: SettingsBag,
}

/// A toggle flipped in the ad hoc tab; the payload is the toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdhocEdit {
    Autocomplete(bool),
    LimitAutocomplete(bool),
}

impl AdhocSettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        from_bag(bag, "adhoc")
    }

    pub fn to_bag(&self) -> SettingsBag {
        to_bag(self, "adhoc")
    }

    pub fn autocomplete(&self) -> bool {
        !self.should_not_autocomplete_value.unwrap_or(false)
    }

    pub fn limit_autocomplete(&self) -> bool {
        !self.should_not_limit_autocomplete_value.unwrap_or(false)
    }

    pub fn apply(&mut self, edit: AdhocEdit) {
        match edit {
            AdhocEdit::Autocomplete(on) => self.should_not_autocomplete_value = Some(!on),
            AdhocEdit::LimitAutocomplete(on) => self.should_not_limit_autocomplete_value = Some(!on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_absent_flags_mean_enabled() {
        let settings = AdhocSettings::from_bag(&SettingsBag::new());
        assert!(settings.autocomplete());
        assert!(settings.limit_autocomplete());
        assert!(settings.to_bag().is_empty());
    }

    #[test]
    fn test_toggle_stores_negation() {
        let mut settings = AdhocSettings::default();
        settings.apply(AdhocEdit::Autocomplete(false));
        settings.apply(AdhocEdit::LimitAutocomplete(true));
        assert_eq!(
            Value::Object(settings.to_bag()),
            json!({"shouldNotAutocompleteValue": true, "shouldNotLimitAutocompleteValue": false})
        );
        assert!(!settings.autocomplete());
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let bag = json!({"shouldNotAutocompleteValue": "yes"}).as_object().cloned().unwrap();
        assert_eq!(AdhocSettings::from_bag(&bag), AdhocSettings::default());
    }
}
