//! Query settings: context parameters and response shaping
//!
//! Used in two places with the same shape: per query (the document's
//! `settings`) and as instance defaults (`jsonData` under `query.*`).

use super::{from_bag, to_bag};
use crate::editor::RowKeys;
use crate::errors::{BuilderError, Result};
use crate::model::SettingsBag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_LOG_COLUMN_TIME: &str = "__time";
pub const DEFAULT_LOG_COLUMN_LEVEL: &str = "level";
pub const DEFAULT_LOG_COLUMN_MESSAGE: &str = "message";

/// One `name = value` entry of the Druid query context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryContextParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFormat {
    #[default]
    Long,
    Wide,
    Log,
}

impl ResultFormat {
    pub const ALL: [ResultFormat; 3] = [ResultFormat::Long, ResultFormat::Wide, ResultFormat::Log];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFormat::Long => "long",
            ResultFormat::Wide => "wide",
            ResultFormat::Log => "log",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultFormat::Long => "Long",
            ResultFormat::Wide => "Wide",
            ResultFormat::Log => "Log",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColumn {
    Time,
    Level,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_parameters: Option<Vec<QueryContextParameter>>,
    /// Kept as text so an unknown format does not discard the other settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_empty_columns: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_column_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_column_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_column_message: Option<String>,
    #[serde(flatten)]
    pub extra: SettingsBag,
}

impl QuerySettings {
    pub fn from_bag(bag: &SettingsBag) -> Self {
        from_bag(bag, "query")
    }

    pub fn to_bag(&self) -> SettingsBag {
        to_bag(self, "query")
    }

    /// Effective format; unknown or absent values read as long
    pub fn result_format(&self) -> ResultFormat {
        self.format
            .as_deref()
            .and_then(ResultFormat::parse)
            .unwrap_or_default()
    }

    /// Fill absent settings with their defaults. Log columns are only
    /// defaulted for the log format.
    pub fn apply_defaults(&mut self) {
        self.context_parameters.get_or_insert_with(Vec::new);
        self.format
            .get_or_insert_with(|| ResultFormat::Long.as_str().to_string());
        self.hide_empty_columns.get_or_insert(false);
        if self.result_format() == ResultFormat::Log {
            self.log_column_time
                .get_or_insert_with(|| DEFAULT_LOG_COLUMN_TIME.to_string());
            self.log_column_level
                .get_or_insert_with(|| DEFAULT_LOG_COLUMN_LEVEL.to_string());
            self.log_column_message
                .get_or_insert_with(|| DEFAULT_LOG_COLUMN_MESSAGE.to_string());
        }
    }

    pub fn parameters(&self) -> &[QueryContextParameter] {
        self.context_parameters.as_deref().unwrap_or_default()
    }
}

/// Build a Druid `context` object from parameters; later names win
pub fn context_from_parameters(parameters: &[QueryContextParameter]) -> Map<String, Value> {
    let mut context = Map::new();
    for parameter in parameters {
        context.insert(parameter.name.clone(), parameter.value.clone());
    }
    context
}

/// One change made in a query settings form
#[derive(Debug, Clone, PartialEq)]
pub enum QuerySettingsEdit {
    AddParameter,
    RemoveParameter(usize),
    /// Text typed into the name and value inputs of a row
    EditParameter { index: usize, name: String, value: String },
    Format(ResultFormat),
    HideEmptyColumns(bool),
    LogColumn { column: LogColumn, name: String },
}

impl QuerySettingsEdit {
    pub fn name(&self) -> &'static str {
        match self {
            QuerySettingsEdit::AddParameter => "add_parameter",
            QuerySettingsEdit::RemoveParameter(_) => "remove_parameter",
            QuerySettingsEdit::EditParameter { .. } => "edit_parameter",
            QuerySettingsEdit::Format(_) => "format",
            QuerySettingsEdit::HideEmptyColumns(_) => "hide_empty_columns",
            QuerySettingsEdit::LogColumn { .. } => "log_column",
        }
    }
}

/// Query settings form state: the settings plus one row key per context parameter
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettingsEditor {
    settings: QuerySettings,
    rows: RowKeys,
}

impl QuerySettingsEditor {
    /// Open the form on `bag`, applying defaults the way the form does on mount
    pub fn hydrate(bag: &SettingsBag) -> Self {
        let mut settings = QuerySettings::from_bag(bag);
        settings.apply_defaults();
        let rows = RowKeys::hydrate(settings.parameters().len());
        Self { settings, rows }
    }

    pub fn settings(&self) -> &QuerySettings {
        &self.settings
    }

    pub fn row_keys(&self) -> &[String] {
        self.rows.keys()
    }

    /// # Errors
    ///
    /// `IndexOutOfRange` for a parameter row that does not exist; the form is unchanged.
    pub fn apply(&mut self, edit: QuerySettingsEdit) -> Result<()> {
        match edit {
            QuerySettingsEdit::AddParameter => {
                self.parameters_mut().push(QueryContextParameter {
                    name: String::new(),
                    value: Value::String(String::new()),
                });
                self.rows.push();
            }
            QuerySettingsEdit::RemoveParameter(index) => {
                self.check_row(index)?;
                self.parameters_mut().remove(index);
                self.rows.remove(index);
            }
            QuerySettingsEdit::EditParameter { index, name, value } => {
                self.check_row(index)?;
                if let Some(parameter) = self.parameters_mut().get_mut(index) {
                    parameter.name = name;
                    parameter.value = Value::String(value);
                }
            }
            QuerySettingsEdit::Format(format) => {
                self.settings.format = Some(format.as_str().to_string());
                self.settings.apply_defaults();
            }
            QuerySettingsEdit::HideEmptyColumns(on) => self.settings.hide_empty_columns = Some(on),
            QuerySettingsEdit::LogColumn { column, name } => {
                let target = match column {
                    LogColumn::Time => &mut self.settings.log_column_time,
                    LogColumn::Level => &mut self.settings.log_column_level,
                    LogColumn::Message => &mut self.settings.log_column_message,
                };
                *target = Some(name);
            }
        }
        Ok(())
    }

    pub fn to_bag(&self) -> SettingsBag {
        self.settings.to_bag()
    }

    fn parameters_mut(&mut self) -> &mut Vec<QueryContextParameter> {
        self.settings.context_parameters.get_or_insert_with(Vec::new)
    }

    fn check_row(&self, index: usize) -> Result<()> {
        let len = self.settings.parameters().len();
        if index >= len {
            return Err(BuilderError::IndexOutOfRange {
                path: "contextParameters".to_string(),
                index,
                len,
            });
        }
        Ok(())
    }
}
