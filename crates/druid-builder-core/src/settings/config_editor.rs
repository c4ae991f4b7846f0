//! Data-source config editor
//!
//! Owns the host's instance settings for one editing session. Each tab reads
//! its typed view out of the flat bags, edits it, and writes it back under
//! its namespace; the host is notified with the full settings after every
//! change.

use super::adhoc::{AdhocEdit, AdhocSettings};
use super::connection::{ConnectionEdit, ConnectionSecretSettings, ConnectionSettings, ConnectionSettingsOptions};
use super::normalize::{normalize, ADHOC_NAMESPACE, CONNECTION_NAMESPACE, QUERY_NAMESPACE};
use super::query::{QuerySettings, QuerySettingsEdit, QuerySettingsEditor};
use super::write_back;
use crate::errors::Result;
use crate::model::{shallow_merge, SettingsBag};
use crate::{log_op_end, log_op_error, log_op_start};
use druid_builder_core_types::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Instant;

/// Instance settings as the host stores them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSettings {
    #[serde(default)]
    pub json_data: SettingsBag,
    #[serde(default)]
    pub secure_json_data: SettingsBag,
    #[serde(default)]
    pub secure_json_fields: SettingsBag,
    /// Host-owned keys (`id`, `name`, `url`, ...), passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Receives the instance settings after every change
pub trait ConfigHost {
    fn on_options_change(&mut self, settings: &DataSourceSettings);
}

/// Host that ignores changes
#[derive(Debug, Default)]
pub struct NoopConfigHost;

impl ConfigHost for NoopConfigHost {
    fn on_options_change(&mut self, _settings: &DataSourceSettings) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigTab {
    #[default]
    Connection,
    QueryDefaults,
    Adhoc,
}

impl ConfigTab {
    pub const ALL: [ConfigTab; 3] = [ConfigTab::Connection, ConfigTab::QueryDefaults, ConfigTab::Adhoc];

    pub fn label(&self) -> &'static str {
        match self {
            ConfigTab::Connection => "Connection",
            ConfigTab::QueryDefaults => "Query defaults",
            ConfigTab::Adhoc => "Adhoc",
        }
    }
}

pub struct ConfigEditor<H: ConfigHost> {
    session_id: SessionId,
    settings: DataSourceSettings,
    query_defaults: QuerySettingsEditor,
    tab: ConfigTab,
    host: H,
}

impl<H: ConfigHost> ConfigEditor<H> {
    pub fn new(settings: DataSourceSettings, host: H) -> Self {
        let query_defaults = QuerySettingsEditor::hydrate(&normalize(&settings.json_data, false, QUERY_NAMESPACE));
        let session_id = SessionId::new();
        tracing::debug!(session_id = %session_id, "config editor opened");
        Self {
            session_id,
            settings,
            query_defaults,
            tab: ConfigTab::default(),
            host,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn settings(&self) -> &DataSourceSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tab(&self) -> ConfigTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ConfigTab) {
        self.tab = tab;
    }

    /// Connection view projected out of the host bags
    pub fn connection_options(&self) -> ConnectionSettingsOptions {
        ConnectionSettingsOptions {
            settings: ConnectionSettings::from_bag(&normalize(&self.settings.json_data, false, CONNECTION_NAMESPACE)),
            secret_settings: ConnectionSecretSettings::from_bag(&normalize(
                &self.settings.secure_json_data,
                false,
                CONNECTION_NAMESPACE,
            )),
            secret_settings_fields: normalize(&self.settings.secure_json_fields, false, CONNECTION_NAMESPACE),
        }
    }

    /// Write a connection view back and notify the host
    pub fn apply_connection_options(&mut self, options: &ConnectionSettingsOptions) {
        let before = normalize(&self.connection_options().settings.to_bag(), true, CONNECTION_NAMESPACE);
        write_back(
            &mut self.settings.json_data,
            &before,
            &normalize(&options.settings.to_bag(), true, CONNECTION_NAMESPACE),
        );
        shallow_merge(
            &mut self.settings.secure_json_data,
            &normalize(&options.secret_settings.to_bag(), true, CONNECTION_NAMESPACE),
        );
        shallow_merge(
            &mut self.settings.secure_json_fields,
            &normalize(&options.secret_settings_fields, true, CONNECTION_NAMESPACE),
        );
        self.host.on_options_change(&self.settings);
    }

    pub fn edit_connection(&mut self, edit: ConnectionEdit) {
        let op = "edit_connection";
        let setting = edit.name();
        log_op_start!(op, session_id = %self.session_id, setting);
        let start = Instant::now();

        let mut options = self.connection_options();
        options.apply(edit);
        self.apply_connection_options(&options);

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64, setting);
    }

    /// Instance-wide query defaults, with form defaults applied
    pub fn query_options(&self) -> &QuerySettings {
        self.query_defaults.settings()
    }

    pub fn query_row_keys(&self) -> &[String] {
        self.query_defaults.row_keys()
    }

    /// Write query defaults back and notify the host
    pub fn apply_query_options(&mut self, settings: &QuerySettings) {
        let stored = QuerySettings::from_bag(&normalize(&self.settings.json_data, false, QUERY_NAMESPACE));
        write_back(
            &mut self.settings.json_data,
            &normalize(&stored.to_bag(), true, QUERY_NAMESPACE),
            &normalize(&settings.to_bag(), true, QUERY_NAMESPACE),
        );
        self.host.on_options_change(&self.settings);
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for a context parameter row that does not exist.
    pub fn edit_query_defaults(&mut self, edit: QuerySettingsEdit) -> Result<()> {
        let op = "edit_query_defaults";
        let setting = edit.name();
        log_op_start!(op, session_id = %self.session_id, setting);
        let start = Instant::now();

        self.query_defaults.apply(edit).map_err(|e| {
            log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64, setting);
            e
        })?;
        let settings = self.query_defaults.settings().clone();
        self.apply_query_options(&settings);

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64, setting);
        Ok(())
    }

    pub fn adhoc_options(&self) -> AdhocSettings {
        AdhocSettings::from_bag(&normalize(&self.settings.json_data, false, ADHOC_NAMESPACE))
    }

    pub fn apply_adhoc_options(&mut self, settings: &AdhocSettings) {
        let before = normalize(&self.adhoc_options().to_bag(), true, ADHOC_NAMESPACE);
        write_back(
            &mut self.settings.json_data,
            &before,
            &normalize(&settings.to_bag(), true, ADHOC_NAMESPACE),
        );
        self.host.on_options_change(&self.settings);
    }

    pub fn edit_adhoc(&mut self, edit: AdhocEdit) {
        let op = "edit_adhoc";
        log_op_start!(op, session_id = %self.session_id, edit = ?edit);
        let start = Instant::now();

        let mut settings = self.adhoc_options();
        settings.apply(edit);
        self.apply_adhoc_options(&settings);

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
    }
}
