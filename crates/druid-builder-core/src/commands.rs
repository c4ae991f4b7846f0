//! Document edit commands
//!
//! Every change an editor makes to a query document is one `Command`,
//! processed by [`crate::apply::apply`]. Paths address node slots from the
//! query root; `kind` hints name the registry key the editor at that slot
//! has mounted, and fall back to the stored discriminant when absent.

use crate::editor::FieldEdit;
use crate::model::{NodePath, SettingsBag};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Mount kind `key` on the slot, or clear it to `null` with `None`
    SelectKind { path: NodePath, key: Option<String> },

    /// Edit one leaf field of the node at `path`
    EditField {
        path: NodePath,
        kind: Option<String>,
        field: String,
        edit: FieldEdit,
    },

    /// Edit a scalar kind stored directly in the slot
    EditScalar {
        path: NodePath,
        kind: Option<String>,
        edit: FieldEdit,
    },

    /// Append an empty element to collection `field`
    AddChild {
        path: NodePath,
        kind: Option<String>,
        field: String,
    },

    /// Remove element `index` of collection `field`
    RemoveChild {
        path: NodePath,
        kind: Option<String>,
        field: String,
        index: usize,
    },

    /// Edit element `index` of a collection of plain values
    EditElement {
        path: NodePath,
        kind: Option<String>,
        field: String,
        index: usize,
        edit: FieldEdit,
    },

    /// Overwrite the slot with a raw value (JSON editor)
    ReplaceNode { path: NodePath, value: Value },

    /// Shallow-merge reported settings into the document settings
    MergeSettings { settings: SettingsBag },
}

impl Command {
    /// Operation name used in log events
    pub fn op(&self) -> &'static str {
        match self {
            Command::SelectKind { .. } => "select_kind",
            Command::EditField { .. } => "edit_field",
            Command::EditScalar { .. } => "edit_scalar",
            Command::AddChild { .. } => "add_child",
            Command::RemoveChild { .. } => "remove_child",
            Command::EditElement { .. } => "edit_element",
            Command::ReplaceNode { .. } => "replace_node",
            Command::MergeSettings { .. } => "merge_settings",
        }
    }

    /// Slot the command addresses; settings merges address the root
    pub fn path(&self) -> NodePath {
        match self {
            Command::SelectKind { path, .. }
            | Command::EditField { path, .. }
            | Command::EditScalar { path, .. }
            | Command::AddChild { path, .. }
            | Command::RemoveChild { path, .. }
            | Command::EditElement { path, .. }
            | Command::ReplaceNode { path, .. } => path.clone(),
            Command::MergeSettings { .. } => NodePath::root(),
        }
    }
}
