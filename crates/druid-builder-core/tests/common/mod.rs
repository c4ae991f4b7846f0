use druid_builder_core::session::{QueryEditorSession, QueryHost};
use druid_builder_core::settings::{ConfigHost, DataSourceSettings};
use druid_builder_core::{NodePath, QueryDocument, SettingsBag};
use serde_json::Value;

/// Query host that keeps every document it is handed
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub documents: Vec<QueryDocument>,
    pub runs: usize,
}

impl QueryHost for RecordingHost {
    fn on_change(&mut self, document: &QueryDocument) {
        self.documents.push(document.clone());
    }

    fn run_query(&mut self) {
        self.runs += 1;
    }
}

/// Config host that keeps every settings snapshot it is handed
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingConfigHost {
    pub snapshots: Vec<DataSourceSettings>,
}

impl ConfigHost for RecordingConfigHost {
    fn on_options_change(&mut self, settings: &DataSourceSettings) {
        self.snapshots.push(settings.clone());
    }
}

/// Parse a dotted path, e.g. `filter.fields[0]`
#[allow(dead_code)]
pub fn path(text: &str) -> NodePath {
    text.parse().unwrap()
}

/// Object literal as a settings bag
#[allow(dead_code)]
pub fn bag(value: Value) -> SettingsBag {
    value.as_object().cloned().unwrap()
}

/// Session over a document holding `builder`
#[allow(dead_code)]
pub fn session(builder: Value) -> QueryEditorSession<RecordingHost> {
    QueryEditorSession::new(QueryDocument::from_builder(builder), RecordingHost::default())
}
