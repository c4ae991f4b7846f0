//! Data-source instance settings
//!
//! The host stores instance settings as flat bags (`jsonData`,
//! `secureJsonData`, `secureJsonFields`) with namespaced keys. The config
//! editor projects them into typed per-tab views with [`normalize`], edits
//! those, and projects them back.
//!
//! Typed views are lenient: a key whose value has the wrong type is left
//! out of the view with a warning, never an error. Write-back only touches
//! keys the view holds, so such a key stays in the host bag as it was.

pub mod adhoc;
pub mod config_editor;
pub mod connection;
pub mod normalize;
pub mod query;

pub use adhoc::{AdhocEdit, AdhocSettings};
pub use config_editor::{ConfigEditor, ConfigHost, ConfigTab, DataSourceSettings, NoopConfigHost};
pub use connection::{
    ConnectionEdit, ConnectionSecretSettings, ConnectionSettings, ConnectionSettingsOptions, SecretField,
};
pub use normalize::{normalize, ADHOC_NAMESPACE, CONNECTION_NAMESPACE, QUERY_NAMESPACE};
pub use query::{
    context_from_parameters, LogColumn, QueryContextParameter, QuerySettings, QuerySettingsEdit,
    QuerySettingsEditor, ResultFormat,
};

use crate::model::{shallow_merge, SettingsBag};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Read a typed view from a bag, leaving out keys whose values do not fit
pub(crate) fn from_bag<T: DeserializeOwned + Default>(bag: &SettingsBag, view: &'static str) -> T {
    match serde_json::from_value(Value::Object(bag.clone())) {
        Ok(typed) => typed,
        Err(err) => {
            tracing::warn!(view, error = %err, "settings do not match their typed view");
            let fitting: SettingsBag = bag
                .iter()
                .filter(|(key, value)| {
                    let single: SettingsBag = std::iter::once(((*key).clone(), (*value).clone())).collect();
                    let fits = serde_json::from_value::<T>(Value::Object(single)).is_ok();
                    if !fits {
                        tracing::warn!(view, key = key.as_str(), "setting has the wrong type, left out");
                    }
                    fits
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            serde_json::from_value(Value::Object(fitting)).unwrap_or_else(|err| {
                tracing::warn!(view, error = %err, "settings still do not fit, using defaults");
                T::default()
            })
        }
    }
}

/// Write the `namespace.*` projection of an edited view back into `bag`.
///
/// `before` and `after` are the projections of the view before and after
/// the edit. Keys the edit cleared are dropped, the rest are merged over.
/// Keys the view never held are left alone.
pub(crate) fn write_back(bag: &mut SettingsBag, before: &SettingsBag, after: &SettingsBag) {
    bag.retain(|key, _| !before.contains_key(key) || after.contains_key(key));
    shallow_merge(bag, after);
}

/// Write a typed view back into a bag
pub(crate) fn to_bag<T: Serialize>(typed: &T, view: &'static str) -> SettingsBag {
    match serde_json::to_value(typed) {
        Ok(Value::Object(bag)) => bag,
        Ok(other) => {
            tracing::warn!(view, found = %other, "typed settings did not serialize to an object");
            SettingsBag::new()
        }
        Err(err) => {
            tracing::warn!(view, error = %err, "typed settings failed to serialize");
            SettingsBag::new()
        }
    }
}
