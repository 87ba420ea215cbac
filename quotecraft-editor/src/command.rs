//! Editor commands: user intents as data.
//!
//! Hosts that replay interactions (scripts, tests, remote UIs) describe each
//! intent as an [`EditorCommand`] and feed it to [`Editor::apply`].
//!
//! ```yaml
//! - op: add_field
//!   kind: number
//! - op: update_field
//!   field: 0
//!   change: { set: label, value: Square Feet }
//! - op: keyboard_move
//!   index: 0
//!   direction: down
//! ```
//!
//! [`Editor::apply`]: crate::Editor::apply

use serde::{Deserialize, Serialize};

use quotecraft_fields::{FieldChange, FieldId, FieldKind};
use quotecraft_reorder::Direction;

use crate::error::Result;
use crate::session::EditorSession;

/// A reference to a field: its id, or its current zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Index(usize),
    Id(FieldId),
}

impl FieldRef {
    /// Resolve against `session`. Stale references resolve to `None`.
    pub fn resolve(&self, session: &EditorSession) -> Option<FieldId> {
        match self {
            FieldRef::Index(index) => session.fields().get(*index).map(|f| f.id().clone()),
            FieldRef::Id(id) => session.contains(id).then(|| id.clone()),
        }
    }
}

impl From<FieldId> for FieldRef {
    fn from(id: FieldId) -> Self {
        FieldRef::Id(id)
    }
}

impl From<usize> for FieldRef {
    fn from(index: usize) -> Self {
        FieldRef::Index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    AddField { kind: FieldKind },
    UpdateField { field: FieldRef, change: FieldChange },
    Select { field: FieldRef },
    RequestDelete { field: FieldRef },
    CancelDelete,
    ConfirmDelete,
    DragStart { index: usize },
    DragOver { index: usize },
    Drop { index: usize },
    DragEnd,
    KeyboardMove { index: usize, direction: Direction },
}

impl EditorCommand {
    /// Canonical op string, for logs.
    pub fn op(&self) -> &'static str {
        match self {
            EditorCommand::AddField { .. } => "add field",
            EditorCommand::UpdateField { .. } => "update field",
            EditorCommand::Select { .. } => "select field",
            EditorCommand::RequestDelete { .. } => "request delete",
            EditorCommand::CancelDelete => "cancel delete",
            EditorCommand::ConfirmDelete => "confirm delete",
            EditorCommand::DragStart { .. } => "drag start",
            EditorCommand::DragOver { .. } => "drag over",
            EditorCommand::Drop { .. } => "drop",
            EditorCommand::DragEnd => "drag end",
            EditorCommand::KeyboardMove { .. } => "keyboard move",
        }
    }
}

/// Parse a YAML (or JSON, which YAML accepts) list of commands.
pub fn parse_script(text: &str) -> Result<Vec<EditorCommand>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml_ng::from_str(text)?)
}
