//! The host-facing editor around an [`EditorSession`].
//!
//! Owns the durable session, the transient drag session, the field factory,
//! and the optional save sink. Every mutation of the field list bumps the
//! revision and, with autosave on, queues a snapshot. Saves never block
//! edits: a queued snapshot is replaced by newer ones until the host flushes
//! it or spawns it onto the runtime. Snapshots reach the sink in revision
//! order and a failed one is queued again.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use quotecraft_fields::{
    FieldChange, FieldConfig, FieldFactory, FieldId, FieldKind, IdGenerator, UlidIds,
};
use quotecraft_reorder::{reorder_by_keyboard, Direction, DragSession};

use crate::command::{EditorCommand, FieldRef};
use crate::config::EditorConfig;
use crate::document::CalculatorDocument;
use crate::error::Result;
use crate::save_queue::{SaveQueue, Snapshot};
use crate::session::EditorSession;
use crate::sink::FieldSink;

/// Builder for [`Editor`]. Created by [`Editor::open`].
pub struct EditorBuilder {
    document: CalculatorDocument,
    config: EditorConfig,
    ids: Option<Box<dyn IdGenerator>>,
    sink: Option<Arc<dyn FieldSink>>,
}

impl EditorBuilder {
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Id source for new fields and options. Defaults to ULIDs.
    pub fn with_ids(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn FieldSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Editor {
        let ids = self.ids.unwrap_or_else(|| Box::new(UlidIds::new()));
        let CalculatorDocument { id, title, fields } = self.document;
        let session = EditorSession::from_fields(fields);
        debug!(calculator = %id, fields = session.len(), "editor opened");
        Editor {
            calculator_id: id,
            title,
            session,
            drag: DragSession::new(),
            factory: FieldFactory::new(self.config.kind_labels, ids),
            autosave: self.config.autosave,
            sink: self.sink,
            revision: 0,
            saves: Arc::default(),
        }
    }
}

/// One calculator open for editing.
pub struct Editor {
    calculator_id: String,
    title: String,
    session: EditorSession,
    drag: DragSession<FieldId>,
    factory: FieldFactory,
    autosave: bool,
    sink: Option<Arc<dyn FieldSink>>,
    revision: u64,
    saves: Arc<SaveQueue>,
}

impl Editor {
    /// Open `document` for editing.
    ///
    /// ```rust,ignore
    /// let mut editor = Editor::open(doc)
    ///     .with_config(config)
    ///     .with_sink(Arc::new(FileSink::for_path("calc.yaml")?))
    ///     .build();
    /// ```
    pub fn open(document: CalculatorDocument) -> EditorBuilder {
        EditorBuilder {
            document,
            config: EditorConfig::default(),
            ids: None,
            sink: None,
        }
    }

    // --- State ---

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn fields(&self) -> &[FieldConfig] {
        self.session.fields()
    }

    pub fn calculator_id(&self) -> &str {
        &self.calculator_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of committed changes to the field list since opening.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Id of the field the "being dragged" marker follows.
    pub fn dragging_id(&self) -> Option<&FieldId> {
        self.drag.dragging_key()
    }

    /// Current state as a document.
    pub fn snapshot(&self) -> CalculatorDocument {
        CalculatorDocument::new(self.calculator_id.clone(), self.title.clone())
            .with_fields(self.session.fields().to_vec())
    }

    pub fn has_unsaved_snapshot(&self) -> bool {
        self.saves.is_pending()
    }

    // --- Field operations ---

    /// Append a field of `kind`, select it, and return its id.
    pub fn add_field(&mut self, kind: FieldKind) -> FieldId {
        self.mutate(|session, factory| session.add_field(kind, factory));
        self.session.fields()[self.session.len() - 1].id().clone()
    }

    pub fn update_field(&mut self, id: &FieldId, change: &FieldChange) -> bool {
        self.mutate(|session, factory| session.update_field(id, change, factory.ids()))
    }

    pub fn select(&mut self, id: &FieldId) {
        self.session = std::mem::take(&mut self.session).select(id);
    }

    pub fn request_delete(&mut self, id: &FieldId) {
        self.session = std::mem::take(&mut self.session).request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.session = std::mem::take(&mut self.session).cancel_delete();
    }

    pub fn confirm_delete(&mut self) -> bool {
        self.mutate(|session, _| session.confirm_delete())
    }

    /// Adopt a full replacement order produced elsewhere.
    pub fn reorder(&mut self, new_order: Vec<FieldConfig>) -> bool {
        self.mutate(|session, _| session.reorder(new_order))
    }

    // --- Pointer and keyboard reordering ---

    pub fn drag_start(&mut self, index: usize) {
        self.drag.start(self.session.fields(), index);
    }

    /// Returns true when the drag moved a field.
    pub fn drag_over(&mut self, index: usize) -> bool {
        match self.drag.over(self.session.fields(), index) {
            Some(next) => self.reorder(next),
            None => false,
        }
    }

    pub fn drop_at(&self, index: usize) {
        self.drag.drop_at(index);
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// Returns true when the key press moved a field.
    pub fn keyboard_move(&mut self, index: usize, direction: Direction) -> bool {
        match reorder_by_keyboard(self.session.fields(), index, direction) {
            Some(next) => self.reorder(next),
            None => false,
        }
    }

    // --- Commands ---

    /// Apply one command. Returns true when the field list changed.
    pub fn apply(&mut self, command: &EditorCommand) -> bool {
        trace!(op = command.op(), "applying command");
        match command {
            EditorCommand::AddField { kind } => {
                self.add_field(*kind);
                true
            }
            EditorCommand::UpdateField { field, change } => match self.resolve(field) {
                Some(id) => self.update_field(&id, change),
                None => false,
            },
            EditorCommand::Select { field } => {
                if let Some(id) = self.resolve(field) {
                    self.select(&id);
                }
                false
            }
            EditorCommand::RequestDelete { field } => {
                if let Some(id) = self.resolve(field) {
                    self.request_delete(&id);
                }
                false
            }
            EditorCommand::CancelDelete => {
                self.cancel_delete();
                false
            }
            EditorCommand::ConfirmDelete => self.confirm_delete(),
            EditorCommand::DragStart { index } => {
                self.drag_start(*index);
                false
            }
            EditorCommand::DragOver { index } => self.drag_over(*index),
            EditorCommand::Drop { index } => {
                self.drop_at(*index);
                false
            }
            EditorCommand::DragEnd => {
                self.drag_end();
                false
            }
            EditorCommand::KeyboardMove { index, direction } => {
                self.keyboard_move(*index, *direction)
            }
        }
    }

    /// Apply commands in order. Returns how many changed the field list.
    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a EditorCommand>) -> usize {
        commands
            .into_iter()
            .map(|command| self.apply(command))
            .filter(|changed| *changed)
            .count()
    }

    fn resolve(&self, field: &FieldRef) -> Option<FieldId> {
        let id = field.resolve(&self.session);
        if id.is_none() {
            trace!(?field, "stale field reference ignored");
        }
        id
    }

    // --- Saving ---

    /// Take the queued snapshot, if any, leaving nothing queued.
    pub fn take_snapshot(&mut self) -> Option<CalculatorDocument> {
        self.saves.take().map(|snapshot| snapshot.document)
    }

    /// Save the queued snapshot through the sink and wait for it.
    ///
    /// Returns false when there was nothing to save, or when a newer snapshot
    /// already reached the sink. On failure the snapshot is queued again so a
    /// later flush retries it.
    pub async fn flush(&self) -> Result<bool> {
        let Some(sink) = self.sink.clone() else {
            return Ok(false);
        };
        let Some(snapshot) = self.saves.take() else {
            return Ok(false);
        };
        self.saves.save(sink.as_ref(), snapshot).await
    }

    /// Hand the queued snapshot to the sink on the runtime and return
    /// immediately. Edits may continue while the save runs.
    ///
    /// The task resolves like [`Editor::flush`]. A failed snapshot is queued
    /// again unless a newer one has been queued since.
    pub fn spawn_save(&self) -> Option<JoinHandle<Result<bool>>> {
        let sink = self.sink.clone()?;
        let snapshot = self.saves.take()?;
        let saves = Arc::clone(&self.saves);
        Some(tokio::spawn(async move {
            saves.save(sink.as_ref(), snapshot).await
        }))
    }

    /// Run a field-list operation and commit it if the list changed.
    fn mutate(&mut self, op: impl FnOnce(EditorSession, &FieldFactory) -> EditorSession) -> bool {
        let before = self.session.fields().to_vec();
        self.session = op(std::mem::take(&mut self.session), &self.factory);
        let changed = self.session.fields() != before.as_slice();
        if changed {
            self.commit();
        }
        changed
    }

    fn commit(&mut self) {
        self.revision += 1;
        trace!(revision = self.revision, "committed");
        if self.autosave && self.sink.is_some() {
            self.saves.put(Snapshot {
                revision: self.revision,
                document: self.snapshot(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use quotecraft_fields::SequentialIds;

    fn editor_with(sink: Arc<dyn FieldSink>) -> Editor {
        Editor::open(CalculatorDocument::new("calc-1", "Fence Quote"))
            .with_ids(Box::new(SequentialIds::new("f")))
            .with_sink(sink)
            .build()
    }

    fn labels(editor: &Editor) -> Vec<&str> {
        editor.fields().iter().map(|f| f.label()).collect()
    }

    #[test]
    fn add_field_returns_selected_id() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        let id = editor.add_field(FieldKind::Radio);
        assert_eq!(id.as_str(), "f-1");
        assert_eq!(editor.session().selected_field_id(), Some(&id));
        assert_eq!(editor.revision(), 1);
    }

    #[test]
    fn selection_changes_do_not_commit() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        let a = editor.add_field(FieldKind::Text);
        editor.add_field(FieldKind::Number);
        let _ = editor.take_snapshot();

        editor.select(&a);
        editor.request_delete(&a);
        editor.cancel_delete();
        assert_eq!(editor.revision(), 2);
        assert!(!editor.has_unsaved_snapshot());
    }

    #[test]
    fn drag_over_reorders_live_and_marker_follows() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        editor.add_field(FieldKind::Text);
        editor.add_field(FieldKind::Number);
        editor.add_field(FieldKind::Slider);

        editor.drag_start(0);
        assert_eq!(editor.dragging_id().unwrap().as_str(), "f-1");
        assert!(editor.drag_over(1));
        assert!(editor.drag_over(2));
        assert!(!editor.drag_over(2));
        editor.drop_at(2);
        assert_eq!(labels(&editor), vec!["Number Input", "Slider", "Text Input"]);
        assert_eq!(editor.dragging_id().unwrap().as_str(), "f-1");

        editor.drag_end();
        assert!(editor.dragging_id().is_none());
        assert!(!editor.drag_over(0));
        assert_eq!(editor.revision(), 5);
    }

    #[test]
    fn keyboard_move_at_edges_is_noop() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        editor.add_field(FieldKind::Text);
        editor.add_field(FieldKind::Number);

        assert!(!editor.keyboard_move(0, Direction::Up));
        assert!(!editor.keyboard_move(1, Direction::Down));
        assert!(editor.keyboard_move(1, Direction::Up));
        assert_eq!(labels(&editor), vec!["Number Input", "Text Input"]);
    }

    #[test]
    fn deleting_a_field_mid_drag_stops_the_drag_moving() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        let a = editor.add_field(FieldKind::Text);
        editor.add_field(FieldKind::Number);

        editor.drag_start(0);
        editor.request_delete(&a);
        assert!(editor.confirm_delete());
        assert!(!editor.drag_over(0));
        assert_eq!(editor.fields().len(), 1);
    }

    #[test]
    fn apply_resolves_index_references() {
        let mut editor = editor_with(Arc::new(MemorySink::new()));
        let script = crate::command::parse_script(
            r#"
- op: add_field
  kind: dropdown
- op: update_field
  field: 0
  change: { set: add_option }
- op: update_field
  field: 0
  change: { set: option_label, index: 0, value: Cedar }
- op: update_field
  field: 7
  change: { set: required, value: true }
"#,
        )
        .unwrap();

        let changed = editor.apply_all(&script);
        assert_eq!(changed, 3);
        let options = editor.fields()[0].options().unwrap();
        assert_eq!(options[0].label, "Cedar");
        assert!(!editor.fields()[0].is_required());
    }

    #[tokio::test]
    async fn flush_saves_latest_snapshot_only() {
        let sink = Arc::new(MemorySink::new());
        let mut editor = editor_with(sink.clone());
        editor.add_field(FieldKind::Text);
        editor.add_field(FieldKind::Number);

        assert!(editor.flush().await.unwrap());
        assert!(!editor.flush().await.unwrap());

        let saved = sink.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].fields.len(), 2);
        assert_eq!(saved[0].title, "Fence Quote");
    }

    #[tokio::test]
    async fn edits_continue_while_save_runs() {
        let sink = Arc::new(MemorySink::new());
        let mut editor = editor_with(sink.clone());
        editor.add_field(FieldKind::Text);

        let handle = editor.spawn_save().unwrap();
        editor.add_field(FieldKind::Slider);
        handle.await.unwrap().unwrap();

        assert_eq!(sink.latest().unwrap().fields.len(), 1);
        assert!(editor.has_unsaved_snapshot());
        assert!(editor.flush().await.unwrap());
        assert_eq!(sink.latest().unwrap().fields.len(), 2);
    }

    #[tokio::test]
    async fn autosave_off_queues_nothing() {
        let sink = Arc::new(MemorySink::new());
        let mut editor = Editor::open(CalculatorDocument::new("c", "T"))
            .with_config(EditorConfig {
                autosave: false,
                ..EditorConfig::default()
            })
            .with_sink(sink.clone())
            .build();
        editor.add_field(FieldKind::Text);
        assert!(!editor.flush().await.unwrap());
        assert!(sink.saved().is_empty());
    }

    struct FailingSink;

    #[async_trait]
    impl FieldSink for FailingSink {
        async fn save(&self, document: &CalculatorDocument) -> Result<()> {
            Err(EditorError::save_failed(document.id.clone(), "offline"))
        }
    }

    #[tokio::test]
    async fn failed_flush_requeues_snapshot() {
        let mut editor = editor_with(Arc::new(FailingSink));
        editor.add_field(FieldKind::Text);

        assert!(editor.flush().await.is_err());
        assert!(editor.has_unsaved_snapshot());
        assert_eq!(editor.fields().len(), 1);
    }

    #[tokio::test]
    async fn failed_background_save_requeues_snapshot() {
        let mut editor = editor_with(Arc::new(FailingSink));
        editor.add_field(FieldKind::Text);

        let handle = editor.spawn_save().unwrap();
        assert!(!editor.has_unsaved_snapshot());
        assert!(handle.await.unwrap().is_err());

        assert!(editor.has_unsaved_snapshot());
        assert_eq!(editor.take_snapshot().unwrap().fields.len(), 1);
    }

    #[tokio::test]
    async fn failed_background_save_does_not_displace_newer_snapshot() {
        let mut editor = editor_with(Arc::new(FailingSink));
        editor.add_field(FieldKind::Text);
        let handle = editor.spawn_save().unwrap();
        editor.add_field(FieldKind::Number);

        assert!(handle.await.unwrap().is_err());
        assert_eq!(editor.take_snapshot().unwrap().fields.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn overlapping_background_saves_keep_newest() {
        let sink = Arc::new(MemorySink::new());
        let mut editor = editor_with(sink.clone());

        let mut handles = Vec::new();
        for _ in 0..50 {
            editor.add_field(FieldKind::Text);
            handles.push(editor.spawn_save().unwrap());
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let saved = sink.saved();
        assert_eq!(saved.last().unwrap().fields.len(), 50);
        let sizes: Vec<_> = saved.iter().map(|d| d.fields.len()).collect();
        assert!(sizes.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!editor.has_unsaved_snapshot());
    }
}
