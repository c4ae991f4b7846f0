//! Leaf field editors
//!
//! Each edit is turned into an [`EditOutcome`] against the field's current
//! value: set a new JSON value, remove the key, or leave it alone. Stateful
//! helpers (choice options, multi-value options, raw JSON text, key/value
//! rows) live here too; the session keeps one per mounted field.

use crate::registry::{ChoiceOption, FieldShape};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// A user edit of one leaf field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Text(String),
    /// Raw text typed into a numeric input
    Number(String),
    Boolean(bool),
    /// `None` clears the selection
    Choice(Option<String>),
    MultiValue(Vec<String>),
    DateTime(DateTimeInput),
    Interval {
        bound: IntervalBound,
        input: DateTimeInput,
    },
    /// Raw JSON text
    Json(String),
    /// Key/value rows in display order
    KeyValue(Vec<(String, String)>),
}

impl FieldEdit {
    pub fn name(&self) -> &'static str {
        match self {
            FieldEdit::Text(_) => "text",
            FieldEdit::Number(_) => "number",
            FieldEdit::Boolean(_) => "boolean",
            FieldEdit::Choice(_) => "choice",
            FieldEdit::MultiValue(_) => "multi-value",
            FieldEdit::DateTime(_) => "date-time",
            FieldEdit::Interval { .. } => "interval",
            FieldEdit::Json(_) => "json",
            FieldEdit::KeyValue(_) => "key/value",
        }
    }
}

/// Input from a date-time picker
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeInput {
    /// A date chosen with the picker
    Picked(DateTime<Utc>),
    /// Text typed into the input box
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalBound {
    Start,
    Stop,
}

/// What an edit does to the stored value
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Set(Value),
    Remove,
    Skip,
}

/// Apply `edit` to a field of `shape` whose current value is `current`.
///
/// Returns `None` when the edit does not fit the shape.
pub fn apply_edit(shape: &FieldShape, current: Option<&Value>, edit: FieldEdit) -> Option<EditOutcome> {
    let outcome = match (shape, edit) {
        (FieldShape::Text, FieldEdit::Text(text)) => EditOutcome::Set(Value::String(text)),
        (FieldShape::Number, FieldEdit::Number(raw)) => match coerce_number(&raw) {
            NumberInput::Empty => EditOutcome::Remove,
            NumberInput::Valid(n) => EditOutcome::Set(Value::Number(n)),
            NumberInput::Invalid => EditOutcome::Skip,
        },
        (FieldShape::Boolean, FieldEdit::Boolean(flag)) => EditOutcome::Set(Value::Bool(flag)),
        (FieldShape::Choice(_), FieldEdit::Choice(Some(value))) => EditOutcome::Set(Value::String(value)),
        (FieldShape::Choice(_), FieldEdit::Choice(None)) => EditOutcome::Remove,
        (FieldShape::MultiValue(_), FieldEdit::MultiValue(items)) => {
            EditOutcome::Set(Value::Array(items.into_iter().map(Value::String).collect()))
        }
        (FieldShape::NumberList, FieldEdit::MultiValue(items)) => EditOutcome::Set(Value::Array(
            items
                .iter()
                .filter_map(|raw| match coerce_number(raw) {
                    NumberInput::Valid(n) => Some(Value::Number(n)),
                    _ => None,
                })
                .collect(),
        )),
        (FieldShape::DateTime, FieldEdit::DateTime(input)) => match commit_date_time(input) {
            Some(text) => EditOutcome::Set(Value::String(text)),
            None => EditOutcome::Skip,
        },
        (FieldShape::Interval, FieldEdit::Interval { bound, input }) => match commit_date_time(input) {
            Some(text) => {
                let existing = current.and_then(Value::as_str).unwrap_or_default();
                EditOutcome::Set(Value::String(set_interval_bound(existing, bound, &text)))
            }
            None => EditOutcome::Skip,
        },
        (FieldShape::Json, FieldEdit::Json(text)) => match serde_json::from_str(&text) {
            Ok(value) => EditOutcome::Set(value),
            Err(_) => EditOutcome::Skip,
        },
        (FieldShape::KeyValueMap, FieldEdit::KeyValue(rows)) => EditOutcome::Set(Value::Object(rows_to_map(&rows))),
        _ => return None,
    };
    Some(outcome)
}

/// Result of reading a numeric input
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInput {
    Empty,
    Valid(Number),
    Invalid,
}

/// Coerce numeric input text.
///
/// Blank text is `Empty`; integral values are stored as JSON integers so
/// `10` does not become `10.0`.
pub fn coerce_number(raw: &str) -> NumberInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumberInput::Empty;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return NumberInput::Valid(Number::from(int));
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => {
            if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
                NumberInput::Valid(Number::from(float as i64))
            } else {
                Number::from_f64(float).map_or(NumberInput::Invalid, NumberInput::Valid)
            }
        }
        _ => NumberInput::Invalid,
    }
}

/// A stored date-time as the picker shows it
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    Literal(DateTime<Utc>),
    /// Unparseable text, typically a template variable such as `$__from`
    Placeholder(String),
}

/// Read a stored date-time string
pub fn parse_date_time(text: &str) -> DateTimeValue {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return DateTimeValue::Literal(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return DateTimeValue::Literal(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return DateTimeValue::Literal(midnight.and_utc());
    }
    DateTimeValue::Placeholder(text.to_string())
}

/// UTC ISO-8601 with milliseconds, e.g. `2020-01-01T00:00:00.000Z`
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Text to store for a date-time input, or `None` to keep the current value.
///
/// Typed text is only committed when it holds a template variable.
pub fn commit_date_time(input: DateTimeInput) -> Option<String> {
    match input {
        DateTimeInput::Picked(value) => Some(format_date_time(&value)),
        DateTimeInput::Raw(text) if text.contains('$') => Some(text),
        DateTimeInput::Raw(_) => None,
    }
}

/// Split a `start/stop` interval; missing parts are empty
pub fn split_interval(interval: &str) -> (String, String) {
    let mut parts = interval.splitn(2, '/');
    let start = parts.next().unwrap_or_default().to_string();
    let stop = parts.next().unwrap_or_default().to_string();
    (start, stop)
}

/// Replace one bound of `interval`
pub fn set_interval_bound(interval: &str, bound: IntervalBound, text: &str) -> String {
    let (start, stop) = split_interval(interval);
    match bound {
        IntervalBound::Start => format!("{}/{}", text, stop),
        IntervalBound::Stop => format!("{}/{}", start, text),
    }
}

fn rows_to_map(rows: &[(String, String)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in rows.iter().filter(|(key, _)| !key.is_empty()) {
        map.insert(key.clone(), Value::String(value.clone()));
    }
    map
}

/// An option shown by a select input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl From<&ChoiceOption> for SelectOption {
    fn from(option: &ChoiceOption) -> Self {
        Self {
            label: option.label.to_string(),
            value: option.value.to_string(),
        }
    }
}

/// Options of a single-choice field, seeded from the registry plus user-created ones
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceField {
    options: Vec<SelectOption>,
}

impl ChoiceField {
    pub fn new(seed: &[ChoiceOption]) -> Self {
        Self {
            options: seed.iter().map(SelectOption::from).collect(),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The option to show for a stored value
    pub fn selected(&self, value: Option<&Value>) -> Option<&SelectOption> {
        let value = value.and_then(Value::as_str)?;
        self.options.iter().find(|o| o.value == value)
    }

    /// Add a typed-in option. Its value is the lower-cased label.
    pub fn create(&mut self, label: &str) -> String {
        let value = label.to_lowercase();
        if !self.options.iter().any(|o| o.value == value) {
            self.options.push(SelectOption {
                label: label.to_string(),
                value: value.clone(),
            });
        }
        value
    }
}

/// Options of a multi-value field: the registry seed, then the selected
/// values the seed does not already offer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiValueField {
    seed: Vec<SelectOption>,
    numeric: bool,
    selected: Vec<String>,
    options: Vec<SelectOption>,
}

impl MultiValueField {
    /// State for a field of `shape` currently holding `value`
    pub fn for_shape(shape: &FieldShape, value: Option<&Value>) -> Self {
        let mut field = Self {
            seed: match shape {
                FieldShape::MultiValue(seed) => seed.iter().map(SelectOption::from).collect(),
                _ => Vec::new(),
            },
            numeric: matches!(shape, FieldShape::NumberList),
            ..Self::default()
        };
        field.sync(value);
        field
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Rebuild from the value stored after the selection changed
    pub fn sync(&mut self, value: Option<&Value>) {
        self.selected = Vec::new();
        for text in value.and_then(Value::as_array).into_iter().flatten().map(value_text) {
            if !self.selected.contains(&text) {
                self.selected.push(text);
            }
        }
        self.options = self.seed.clone();
        for text in &self.selected {
            if !self.options.iter().any(|o| &o.value == text) {
                self.options.push(SelectOption {
                    label: text.clone(),
                    value: text.clone(),
                });
            }
        }
    }

    /// Add a typed-in value, kept verbatim, and select it; returns the new
    /// selection. A value already selected is not added twice, and a number
    /// list ignores text that is not a number.
    pub fn create(&mut self, value: &str) -> Vec<String> {
        if self.numeric && !matches!(coerce_number(value), NumberInput::Valid(_)) {
            tracing::debug!(input = value, "number list entry does not parse, ignored");
            return self.selected.clone();
        }
        if !self.options.iter().any(|o| o.value == value) {
            self.options.push(SelectOption {
                label: value.to_string(),
                value: value.to_string(),
            });
        }
        if !self.selected.iter().any(|v| v == value) {
            self.selected.push(value.to_string());
        }
        self.selected.clone()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Raw JSON text editor that keeps the last value that parsed
#[derive(Debug, Clone, PartialEq)]
pub struct JsonField {
    text: String,
    last_valid: Value,
}

impl JsonField {
    /// Start from a stored value, pretty-printed with two-space indent
    pub fn from_value(value: &Value) -> Self {
        Self {
            text: serde_json::to_string_pretty(value).unwrap_or_default(),
            last_valid: value.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_valid(&self) -> &Value {
        &self.last_valid
    }

    /// Record typed text; returns the parsed value when it is valid JSON
    pub fn input(&mut self, text: &str) -> Option<Value> {
        self.text = text.to_string();
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                self.last_valid = value.clone();
                Some(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "json input does not parse, keeping last valid value");
                None
            }
        }
    }
}

/// One row of a key/value editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueEntry {
    pub id: String,
    pub key: String,
    pub value: String,
}

/// Rows behind a key/value map field. Rows with an empty key are not stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyValueMapField {
    entries: Vec<KeyValueEntry>,
}

impl KeyValueMapField {
    pub fn from_value(value: Option<&Value>) -> Self {
        let entries = value
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(key, value)| KeyValueEntry {
                        id: Uuid::now_v7().to_string(),
                        key: key.clone(),
                        value: value_text(value),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn entries(&self) -> &[KeyValueEntry] {
        &self.entries
    }

    pub fn add(&mut self) {
        self.entries.push(KeyValueEntry {
            id: Uuid::now_v7().to_string(),
            key: String::new(),
            value: String::new(),
        });
    }

    /// Remove by row id; returns whether a row went away
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Overwrite key and value of row `index`; returns whether it existed
    pub fn set(&mut self, index: usize, key: &str, value: &str) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.key = key.to_string();
                entry.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// The edit that stores the current rows
    pub fn to_edit(&self) -> FieldEdit {
        FieldEdit::KeyValue(
            self.entries
                .iter()
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect(),
        )
    }
}
