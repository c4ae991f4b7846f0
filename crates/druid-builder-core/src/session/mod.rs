//! Query editor session
//!
//! A session owns one query document for as long as its editor is open. UI
//! actions come in as typed operations, turn into [`Command`]s, and are
//! committed through [`apply`]: the document is replaced as a whole, the host
//! is notified, and the UI-local [`ViewState`] is kept in step.
//!
//! ```
//! use druid_builder_core::session::{NoopQueryHost, QueryEditorSession};
//! use druid_builder_core::{NodePath, QueryDocument};
//!
//! let mut session = QueryEditorSession::new(QueryDocument::default(), NoopQueryHost);
//! session.select_kind(&NodePath::root(), Some("timeseries")).unwrap();
//! session.select_kind(&"filter".parse().unwrap(), Some("and")).unwrap();
//! session.add_child(&"filter".parse().unwrap(), "fields").unwrap();
//! assert_eq!(session.document().builder["filter"]["fields"].as_array().map(Vec::len), Some(1));
//! ```

pub mod document;
pub mod host;
pub mod view_state;

pub use document::QueryDocument;
pub use host::{NoopQueryHost, QueryHost};
pub use view_state::ViewState;

use crate::apply::{apply, resolve_kind, slot_ref};
use crate::commands::Command;
use crate::editor::fields::KeyValueEntry;
use crate::editor::node::field_spec;
use crate::editor::{FieldEdit, KeyValueMapField, KindSelector, SelectOption, Selection};
use crate::errors::{BuilderError, Result};
use crate::model::{BuilderOptions, NodePath, NodeValue};
use crate::registry::{category_at, FieldShape, FieldSpec, KindMode, NodeKind};
use crate::settings::{QuerySettingsEdit, QuerySettingsEditor};
use crate::{log_op_end, log_op_error, log_op_start};
use druid_builder_core_types::{RequestContext, SessionId};
use serde_json::{json, Value};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    #[default]
    Builder,
    Settings,
}

pub struct QueryEditorSession<H: QueryHost> {
    session_id: SessionId,
    document: QueryDocument,
    view: ViewState,
    settings: QuerySettingsEditor,
    tab: EditorTab,
    host: H,
}

impl<H: QueryHost> QueryEditorSession<H> {
    pub fn new(document: QueryDocument, host: H) -> Self {
        let session_id = SessionId::new();
        tracing::debug!(session_id = %session_id, "query editor opened");
        Self {
            session_id,
            settings: QuerySettingsEditor::hydrate(&document.settings),
            document,
            view: ViewState::default(),
            tab: EditorTab::default(),
            host,
        }
    }

    /// Open on a host query object; see [`QueryDocument::from_host`]
    pub fn from_host(value: Value, host: H) -> Self {
        Self::new(QueryDocument::from_host(value), host)
    }

    /// Swap in a document from outside; all view state is dropped
    pub fn load(&mut self, document: QueryDocument) {
        self.settings = QuerySettingsEditor::hydrate(&document.settings);
        self.document = document;
        self.view.clear();
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn document(&self) -> &QueryDocument {
        &self.document
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Apply one command to the document and hand the result to the host
    ///
    /// # Errors
    ///
    /// Whatever [`apply`] reports; the document and host are untouched then.
    pub fn commit(&mut self, cmd: Command) -> Result<()> {
        let ctx = RequestContext::for_session(&self.session_id);
        let op = cmd.op();
        let path = cmd.path();
        log_op_start!(op, session_id = %ctx.session_id, request_id = %ctx.request_id, path = %path);
        let start = Instant::now();

        let touches_builder = !matches!(cmd, Command::MergeSettings { .. });
        let next = apply(&self.document, cmd).map_err(|e| {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id,
                path = %path
            );
            e
        })?;
        self.document = next;
        if touches_builder {
            self.view.forget_json_over(&path);
        }
        self.host.on_change(&self.document);
        self.host.run_query();

        log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64, request_id = %ctx.request_id);
        Ok(())
    }

    /// The selector of the slot at `path`
    ///
    /// # Errors
    ///
    /// The path does not address a node slot.
    pub fn selector(&mut self, path: &NodePath) -> Result<&KindSelector> {
        let category = category_at(&self.document.builder, path)?;
        let slot = self.slot(path);
        Ok(self.view.selector_mut(path, category, &slot))
    }

    /// Pick the kind of the slot at `path`, or clear it with `None`
    ///
    /// A key no kind answers to is added to the selector and selected, but
    /// the document is not changed.
    ///
    /// # Errors
    ///
    /// The path does not address a node slot.
    pub fn select_kind(&mut self, path: &NodePath, key: Option<&str>) -> Result<Selection> {
        self.choose(path, |selector| selector.select(key))
    }

    /// Type a new entry into the selector at `path` and select it
    ///
    /// # Errors
    ///
    /// The path does not address a node slot.
    pub fn create_custom_kind(&mut self, path: &NodePath, label: &str) -> Result<Selection> {
        self.choose(path, |selector| selector.create_custom(label))
    }

    fn choose(&mut self, path: &NodePath, pick: impl FnOnce(&mut KindSelector) -> Selection) -> Result<Selection> {
        let category = category_at(&self.document.builder, path)?;
        let slot = self.slot(path);
        let mut selector = self.view.selector_mut(path, category, &slot).clone();
        let before = selector.mounted_kind();
        let selection = pick(&mut selector);

        match &selection {
            Selection::Cleared => self.commit(Command::SelectKind {
                path: path.clone(),
                key: None,
            })?,
            Selection::Kind(kind) => self.commit(Command::SelectKind {
                path: path.clone(),
                key: Some(kind.key()),
            })?,
            Selection::Custom(key) => {
                tracing::debug!(%path, key = %key, "custom kind selected, no editor to mount");
            }
        }

        let kept = matches!((&selection, before), (Selection::Kind(now), Some(was)) if std::ptr::eq(*now, was));
        if !kept {
            self.view.forget_below(path);
        }
        self.view.set_selector(path, selector);
        Ok(selection)
    }

    /// The kind whose editor is mounted at `path`
    ///
    /// # Errors
    ///
    /// Bad path, or a slot no registered kind answers to.
    pub fn mounted_kind(&self, path: &NodePath) -> Result<&'static NodeKind> {
        let category = category_at(&self.document.builder, path)?;
        let hint = self.kind_hint(path);
        resolve_kind(category, &self.slot(path), hint.as_deref())
    }

    /// What the editor at `path` renders: its slice of the tree plus the settings
    ///
    /// # Errors
    ///
    /// The path does not address a node slot.
    pub fn options_at(&self, path: &NodePath) -> Result<BuilderOptions> {
        category_at(&self.document.builder, path)?;
        let builder = match slot_ref(&self.document.builder, path) {
            Some(value) => value.clone(),
            None if path.is_root() => Value::Null,
            None => json!({}),
        };
        Ok(BuilderOptions::new(NodeValue::from(builder), self.document.settings.clone()))
    }

    /// # Errors
    ///
    /// Addressing errors, or an edit that does not fit the field.
    pub fn edit_field(&mut self, path: &NodePath, field: &str, edit: FieldEdit) -> Result<()> {
        let synced = matches!(edit, FieldEdit::MultiValue(_));
        self.commit(Command::EditField {
            path: path.clone(),
            kind: self.kind_hint(path),
            field: field.to_string(),
            edit,
        })?;
        if synced {
            if let Ok((_, spec)) = self.multi_value_spec(path, field) {
                let field_path = path.field(field);
                let stored = slot_ref(&self.document.builder, &field_path).cloned();
                self.view
                    .multi_value_mut(&field_path, &spec.shape, None)
                    .sync(stored.as_ref());
            }
        }
        Ok(())
    }

    /// Edit a scalar kind (e.g. a simple granularity) stored directly in the slot
    ///
    /// # Errors
    ///
    /// Addressing errors, or a slot whose kind is not scalar.
    pub fn edit_scalar(&mut self, path: &NodePath, edit: FieldEdit) -> Result<()> {
        self.commit(Command::EditScalar {
            path: path.clone(),
            kind: self.kind_hint(path),
            edit,
        })
    }

    /// Options of a choice input: registry options plus ones created in this session
    ///
    /// `field` is `None` for a scalar kind edited in place.
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not a choice.
    pub fn choice_options(&self, path: &NodePath, field: Option<&str>) -> Result<Vec<SelectOption>> {
        let (seed, field_path) = self.choice_field(path, field)?;
        Ok(match self.view.choice(&field_path) {
            Some(choice) => choice.options().to_vec(),
            None => seed.iter().map(SelectOption::from).collect(),
        })
    }

    /// Add a typed-in option to a choice input and select it
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not a choice.
    pub fn create_choice_option(&mut self, path: &NodePath, field: Option<&str>, label: &str) -> Result<String> {
        let (seed, field_path) = self.choice_field(path, field)?;
        let mut choice = self.view.choice_mut(&field_path, seed).clone();
        let value = choice.create(label);

        let edit = FieldEdit::Choice(Some(value.clone()));
        match field {
            Some(name) => self.edit_field(path, name, edit)?,
            None => self.edit_scalar(path, edit)?,
        }
        *self.view.choice_mut(&field_path, seed) = choice;
        Ok(value)
    }

    fn choice_field(
        &self,
        path: &NodePath,
        field: Option<&str>,
    ) -> Result<(&'static [crate::registry::ChoiceOption], NodePath)> {
        let kind = self.mounted_kind(path)?;
        let (shape, field_path) = match field {
            Some(name) => (field_spec(kind, name)?.shape, path.field(name)),
            None => match kind.mode {
                KindMode::Scalar(shape) => (shape, path.clone()),
                _ => (FieldShape::Json, path.clone()),
            },
        };
        match shape {
            FieldShape::Choice(seed) => Ok((seed, field_path)),
            other => Err(BuilderError::ShapeMismatch {
                kind: kind.label.to_string(),
                field: field.unwrap_or_default().to_string(),
                expected: other.name().to_string(),
                edit: "choice".to_string(),
            }),
        }
    }

    fn multi_value_spec(&self, path: &NodePath, field: &str) -> Result<(&'static NodeKind, &'static FieldSpec)> {
        let kind = self.mounted_kind(path)?;
        let spec = field_spec(kind, field)?;
        if !matches!(spec.shape, FieldShape::MultiValue(_) | FieldShape::NumberList) {
            return Err(BuilderError::ShapeMismatch {
                kind: kind.label.to_string(),
                field: field.to_string(),
                expected: spec.shape.name().to_string(),
                edit: "multi-value".to_string(),
            });
        }
        Ok((kind, spec))
    }

    /// Add a typed-in value to a multi-value field; returns the new selection
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not multi-valued.
    pub fn create_multi_value(&mut self, path: &NodePath, field: &str, value: &str) -> Result<Vec<String>> {
        let (kind, spec) = self.multi_value_spec(path, field)?;
        let field_path = path.field(field);
        let current = slot_ref(&self.document.builder, &field_path).cloned();
        let mut multi = self
            .view
            .multi_value_mut(&field_path, &spec.shape, current.as_ref())
            .clone();
        let before = multi.selected().to_vec();
        let values = multi.create(value);
        if values == before {
            *self.view.multi_value_mut(&field_path, &spec.shape, None) = multi;
            return Ok(values);
        }
        self.commit(Command::EditField {
            path: path.clone(),
            kind: Some(kind.key()),
            field: field.to_string(),
            edit: FieldEdit::MultiValue(values.clone()),
        })?;
        *self.view.multi_value_mut(&field_path, &spec.shape, None) = multi;
        Ok(values)
    }

    /// Options shown by a multi-value field: registry suggestions, then the
    /// other selected values
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not multi-valued.
    pub fn multi_value_options(&mut self, path: &NodePath, field: &str) -> Result<Vec<SelectOption>> {
        let (_, spec) = self.multi_value_spec(path, field)?;
        let field_path = path.field(field);
        let current = slot_ref(&self.document.builder, &field_path).cloned();
        Ok(self
            .view
            .multi_value_mut(&field_path, &spec.shape, current.as_ref())
            .options()
            .to_vec())
    }

    /// Append an empty element to collection `field`; returns its row key
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not a collection.
    pub fn add_child(&mut self, path: &NodePath, field: &str) -> Result<String> {
        let collection = path.field(field);
        let len = self.collection_len(&collection);
        self.view.rows_mut(&collection, len);
        self.commit(Command::AddChild {
            path: path.clone(),
            kind: self.kind_hint(path),
            field: field.to_string(),
        })?;
        Ok(self.view.rows_mut(&collection, len).push())
    }

    /// Remove element `index` of collection `field`
    ///
    /// Rows are addressed by position, as rendered.
    ///
    /// # Errors
    ///
    /// Addressing errors, including an index past the end.
    pub fn remove_child(&mut self, path: &NodePath, field: &str, index: usize) -> Result<()> {
        let collection = path.field(field);
        let len = self.collection_len(&collection);
        self.view.rows_mut(&collection, len);
        self.commit(Command::RemoveChild {
            path: path.clone(),
            kind: self.kind_hint(path),
            field: field.to_string(),
            index,
        })?;
        self.view.rows_mut(&collection, len).remove(index);
        self.view.after_removal(&collection, index);
        Ok(())
    }

    /// Edit element `index` of a collection of plain values
    ///
    /// # Errors
    ///
    /// Addressing errors, or an element edit that does not fit.
    pub fn edit_element(&mut self, path: &NodePath, field: &str, index: usize, edit: FieldEdit) -> Result<()> {
        self.commit(Command::EditElement {
            path: path.clone(),
            kind: self.kind_hint(path),
            field: field.to_string(),
            index,
            edit,
        })
    }

    /// Row keys of collection `field` at `path`, one per stored element
    pub fn row_keys(&mut self, path: &NodePath, field: &str) -> Vec<String> {
        let collection = path.field(field);
        let len = self.collection_len(&collection);
        self.view.rows_mut(&collection, len).keys().to_vec()
    }

    /// Text of the raw JSON editor at `path`
    pub fn json_text(&mut self, path: &NodePath) -> String {
        let current = self.slot(path);
        self.view.json_mut(path, &current).text().to_string()
    }

    /// Type into the raw JSON editor at `path`
    ///
    /// Valid JSON replaces the slot; anything else is kept as text only and
    /// the document keeps its last valid value. Returns whether the document
    /// changed.
    ///
    /// # Errors
    ///
    /// The path does not address a node slot.
    pub fn set_raw_json(&mut self, path: &NodePath, text: &str) -> Result<bool> {
        let current = self.slot(path);
        let mut editor = self.view.json_mut(path, &current).clone();
        let Some(value) = editor.input(text) else {
            *self.view.json_mut(path, &current) = editor;
            return Ok(false);
        };

        self.commit(Command::ReplaceNode {
            path: path.clone(),
            value,
        })?;
        self.view.forget_slot(path);
        *self.view.json_mut(path, &Value::Null) = editor;
        Ok(true)
    }

    pub fn map_entries(&mut self, path: &NodePath, field: &str) -> Vec<KeyValueEntry> {
        let field_path = path.field(field);
        let current = slot_ref(&self.document.builder, &field_path).cloned();
        self.view
            .key_values_mut(&field_path, current.as_ref())
            .entries()
            .to_vec()
    }

    /// # Errors
    ///
    /// Addressing errors, or a field that is not a key/value map.
    pub fn add_map_entry(&mut self, path: &NodePath, field: &str) -> Result<()> {
        self.edit_map(path, field, |map| {
            map.add();
            true
        })
        .map(|_| ())
    }

    /// Remove a row by its id; returns whether it existed
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not a key/value map.
    pub fn remove_map_entry(&mut self, path: &NodePath, field: &str, id: &str) -> Result<bool> {
        self.edit_map(path, field, |map| map.remove(id))
    }

    /// Overwrite row `index`; returns whether it existed
    ///
    /// # Errors
    ///
    /// Addressing errors, or a field that is not a key/value map.
    pub fn set_map_entry(&mut self, path: &NodePath, field: &str, index: usize, key: &str, value: &str) -> Result<bool> {
        self.edit_map(path, field, |map| map.set(index, key, value))
    }

    fn edit_map(
        &mut self,
        path: &NodePath,
        field: &str,
        change: impl FnOnce(&mut KeyValueMapField) -> bool,
    ) -> Result<bool> {
        let field_path = path.field(field);
        let current = slot_ref(&self.document.builder, &field_path).cloned();
        let mut map = self.view.key_values_mut(&field_path, current.as_ref()).clone();
        if !change(&mut map) {
            return Ok(false);
        }
        self.edit_field(path, field, map.to_edit())?;
        *self.view.key_values_mut(&field_path, None) = map;
        Ok(true)
    }

    /// Settings form state, defaults applied
    pub fn settings_editor(&self) -> &QuerySettingsEditor {
        &self.settings
    }

    /// Edit the query's settings and merge them into the document
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for a context parameter row that does not exist.
    pub fn edit_settings(&mut self, edit: QuerySettingsEdit) -> Result<()> {
        let setting = edit.name();
        let start = Instant::now();
        let mut editor = self.settings.clone();
        editor.apply(edit).map_err(|e| {
            log_op_error!(
                "edit_settings",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                session_id = %self.session_id,
                setting
            );
            e
        })?;
        self.commit(Command::MergeSettings {
            settings: editor.to_bag(),
        })?;
        self.settings = editor;
        Ok(())
    }

    fn kind_hint(&self, path: &NodePath) -> Option<String> {
        self.view
            .selector(path)
            .and_then(KindSelector::mounted_kind)
            .map(NodeKind::key)
    }

    fn slot(&self, path: &NodePath) -> Value {
        slot_ref(&self.document.builder, path)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn collection_len(&self, collection: &NodePath) -> usize {
        slot_ref(&self.document.builder, collection)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::fields::{DateTimeInput, IntervalBound};
    use crate::settings::ResultFormat;
    use serde_json::json;

    #[derive(Default)]
    struct Counting {
        changes: usize,
        runs: usize,
        last: Option<QueryDocument>,
    }

    impl QueryHost for Counting {
        fn on_change(&mut self, document: &QueryDocument) {
            self.changes += 1;
            self.last = Some(document.clone());
        }

        fn run_query(&mut self) {
            self.runs += 1;
        }
    }

    fn path(text: &str) -> NodePath {
        text.parse().unwrap()
    }

    fn session(builder: Value) -> QueryEditorSession<Counting> {
        QueryEditorSession::new(QueryDocument::from_builder(builder), Counting::default())
    }

    #[test]
    fn test_every_commit_reaches_host() {
        let mut s = session(json!(null));
        s.select_kind(&NodePath::root(), Some("scan")).unwrap();
        s.edit_field(&NodePath::root(), "limit", FieldEdit::Number("100".into()))
            .unwrap();
        assert_eq!(s.host().changes, 2);
        assert_eq!(s.host().runs, 2);
        assert_eq!(s.host().last.as_ref(), Some(s.document()));
    }

    #[test]
    fn test_failed_command_leaves_document_and_host() {
        let mut s = session(json!({"queryType": "timeseries"}));
        let before = s.document().clone();
        assert!(s.remove_child(&NodePath::root(), "intervals", 3).is_err());
        assert_eq!(s.document(), &before);
        assert_eq!(s.host().changes, 0);
    }

    #[test]
    fn test_custom_kind_does_not_touch_document() {
        let mut s = session(json!({"queryType": "timeseries", "filter": {"type": "true"}}));
        let selection = s.create_custom_kind(&path("filter"), "Bloom").unwrap();
        assert_eq!(selection, Selection::Custom("bloom".into()));
        assert_eq!(s.document().builder["filter"], json!({"type": "true"}));
        assert_eq!(s.host().changes, 0);
        let labels: Vec<String> = s
            .selector(&path("filter"))
            .unwrap()
            .options()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels.last().map(String::as_str), Some("Bloom"));
    }

    #[test]
    fn test_switching_kind_drops_child_view_state() {
        let mut s = session(json!({"queryType": "timeseries"}));
        s.select_kind(&path("filter"), Some("not")).unwrap();
        s.select_kind(&path("filter.field"), Some("true")).unwrap();
        assert!(s.view().selector(&path("filter.field")).is_some());

        s.select_kind(&path("filter"), Some("not")).unwrap();
        assert!(s.view().selector(&path("filter.field")).is_some());

        s.select_kind(&path("filter"), Some("selector")).unwrap();
        assert!(s.view().selector(&path("filter.field")).is_none());
        assert_eq!(s.document().builder["filter"], json!({"type": "selector"}));
    }

    #[test]
    fn test_created_choice_option_persists() {
        let mut s = session(json!({"queryType": "timeseries"}));
        s.select_kind(&path("granularity"), Some("simple")).unwrap();
        let value = s.create_choice_option(&path("granularity"), None, "Fifteen_Minute").unwrap();
        assert_eq!(value, "fifteen_minute");
        assert_eq!(s.document().builder["granularity"], json!("fifteen_minute"));

        s.edit_scalar(&path("granularity"), FieldEdit::Choice(Some("day".into())))
            .unwrap();
        let options = s.choice_options(&path("granularity"), None).unwrap();
        assert!(options.iter().any(|o| o.value == "fifteen_minute"));
    }

    #[test]
    fn test_interval_rows() {
        let mut s = session(json!({"queryType": "timeseries", "intervals": ["a/b"]}));
        let key = s.add_child(&NodePath::root(), "intervals").unwrap();
        let keys = s.row_keys(&NodePath::root(), "intervals");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1], key);

        s.edit_element(
            &NodePath::root(),
            "intervals",
            1,
            FieldEdit::Interval {
                bound: IntervalBound::Stop,
                input: DateTimeInput::Raw("$__to".into()),
            },
        )
        .unwrap();
        s.remove_child(&NodePath::root(), "intervals", 0).unwrap();
        assert_eq!(s.document().builder["intervals"], json!(["/$__to"]));
        assert_eq!(s.row_keys(&NodePath::root(), "intervals"), vec![key]);
    }

    #[test]
    fn test_raw_json_keeps_last_valid() {
        let mut s = session(json!({"queryType": "sql", "query": "SELECT 1"}));
        assert!(!s.set_raw_json(&NodePath::root(), "{\"queryType\": ").unwrap());
        assert_eq!(s.document().builder["query"], "SELECT 1");
        assert_eq!(s.json_text(&NodePath::root()), "{\"queryType\": ");

        assert!(s
            .set_raw_json(&NodePath::root(), r#"{"queryType": "timeBoundary", "bound": "maxTime"}"#)
            .unwrap());
        assert_eq!(s.document().builder["bound"], "maxTime");
    }

    #[test]
    fn test_map_entries_build_lookup_map() {
        let mut s = session(json!({"queryType": "groupBy"}));
        let lookup = path("dimensions[0]");
        s.add_child(&NodePath::root(), "dimensions").unwrap();
        s.select_kind(&lookup, Some("lookup")).unwrap();
        s.select_kind(&lookup.field("lookup"), Some("map")).unwrap();

        let map = lookup.field("lookup");
        s.add_map_entry(&map, "map").unwrap();
        s.set_map_entry(&map, "map", 0, "fr", "France").unwrap();
        s.add_map_entry(&map, "map").unwrap();
        s.set_map_entry(&map, "map", 1, "de", "Germany").unwrap();
        let id = s.map_entries(&map, "map")[0].id.clone();
        assert!(s.remove_map_entry(&map, "map", &id).unwrap());

        assert_eq!(
            s.document().builder["dimensions"][0]["lookup"]["map"],
            json!({"de": "Germany"})
        );
    }

    #[test]
    fn test_settings_edits_merge_into_document() {
        let mut s = session(json!({"queryType": "scan"}));
        s.edit_settings(QuerySettingsEdit::Format(ResultFormat::Wide)).unwrap();
        assert_eq!(s.document().settings["format"], "wide");
        assert_eq!(s.document().settings["hideEmptyColumns"], false);
        assert!(s.document().expr.contains("\"format\":\"wide\""));
        assert!(s.edit_settings(QuerySettingsEdit::RemoveParameter(0)).is_err());
    }

    #[test]
    fn test_options_at_child_defaults_to_empty_object() {
        let s = session(json!({"queryType": "timeseries"}));
        let options = s.options_at(&path("filter")).unwrap();
        assert_eq!(options.builder, NodeValue::Structured(Default::default()));
        assert_eq!(s.options_at(&NodePath::root()).unwrap().builder.discriminant(), Some("timeseries"));
    }
}
