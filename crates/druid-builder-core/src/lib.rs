//! Druid query builder core
//!
//! The document model behind a visual Druid query editor:
//! - A recursive builder tree whose nodes pick their kind with `type` or `queryType`
//! - A static registry of node kinds per category, with field sets and defaults
//! - Field, node, collection and selector editors that keep the tree consistent
//! - A command/apply boundary producing a new document per change
//! - Query editor and data-source config sessions that notify their host
//! - The flat/namespaced settings bridge and backend query finalization

pub mod apply;
pub mod commands;
pub mod editor;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod session;
pub mod settings;
pub mod wire;

pub use druid_builder_core_types::schema;

// Re-export commonly used types
pub use apply::apply;
pub use commands::Command;
pub use editor::{FieldEdit, KindSelector, Selection};
pub use errors::{BuilderError, ExError, ExErrorKind, Result};
pub use model::{BuilderOptions, Node, NodePath, NodeValue, SettingsBag};
pub use registry::{Catalog, Category, NodeKind};
pub use session::{QueryDocument, QueryEditorSession, QueryHost};
pub use settings::{normalize, ConfigEditor, ConfigHost, DataSourceSettings};
pub use wire::{finalize_query, FinalizedQuery};
