//! The authoritative field list and its selection state.
//!
//! Every operation takes the session by value and returns the next one.
//! Nothing here fails: references to ids that are no longer present are
//! ignored, and the only invariant check (reorders must be permutations) is
//! a debug assertion.
//!
//! Invariants kept across every operation:
//! - field ids are unique
//! - `selected_field_id`, when set, names a field in `fields`
//! - `pending_delete`, when set, names a field in `fields`

use std::collections::HashSet;

use quotecraft_fields::{FieldChange, FieldConfig, FieldFactory, FieldId, FieldKind, IdGenerator};
use quotecraft_reorder::is_permutation;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    fields: Vec<FieldConfig>,
    selected_field_id: Option<FieldId>,
    pending_delete: Option<FieldId>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over an existing field list.
    ///
    /// Later fields whose id repeats an earlier one are dropped.
    pub fn from_fields(fields: Vec<FieldConfig>) -> Self {
        let mut seen = HashSet::with_capacity(fields.len());
        let fields = fields
            .into_iter()
            .filter(|field| {
                let fresh = seen.insert(field.id().clone());
                if !fresh {
                    warn!(field_id = %field.id(), "dropping field with duplicate id");
                }
                fresh
            })
            .collect();
        Self {
            fields,
            selected_field_id: None,
            pending_delete: None,
        }
    }

    // --- Queries ---

    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldConfig> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.id() == id)
    }

    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id() == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    pub fn selected_field_id(&self) -> Option<&FieldId> {
        self.selected_field_id.as_ref()
    }

    pub fn selected_field(&self) -> Option<&FieldConfig> {
        self.selected_field_id.as_ref().and_then(|id| self.field(id))
    }

    /// Id awaiting delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<&FieldId> {
        self.pending_delete.as_ref()
    }

    // --- Operations ---

    /// Append a new field of `kind` and select it.
    pub fn add_field(mut self, kind: FieldKind, factory: &FieldFactory) -> Self {
        let field = factory.create(kind);
        debug!(field_id = %field.id(), %kind, position = self.fields.len(), "field added");
        self.selected_field_id = Some(field.id().clone());
        self.fields.push(field);
        self
    }

    /// Replace the field `id` with the result of `change`, in place.
    pub fn update_field(mut self, id: &FieldId, change: &FieldChange, ids: &dyn IdGenerator) -> Self {
        let Some(index) = self.position(id) else {
            trace!(field_id = %id, "update for unknown field ignored");
            return self;
        };
        let updated = self.fields[index].with_change(change, ids);
        debug!(field_id = %id, ?change, "field updated");
        self.fields[index] = updated;
        self
    }

    /// Adopt `new_order` as the field list.
    ///
    /// `new_order` must be a permutation of the current fields. Anything else
    /// is a programming error: it panics in debug builds and is ignored in
    /// release builds.
    pub fn reorder(mut self, new_order: Vec<FieldConfig>) -> Self {
        let valid = is_permutation(&self.fields, &new_order);
        debug_assert!(valid, "reorder must be a permutation of the current fields");
        if !valid {
            warn!(
                current = self.fields.len(),
                proposed = new_order.len(),
                "rejected reorder that is not a permutation"
            );
            return self;
        }
        debug!(fields = new_order.len(), "fields reordered");
        self.fields = new_order;
        self
    }

    /// Mark `id` for deletion, pending confirmation.
    pub fn request_delete(mut self, id: &FieldId) -> Self {
        if !self.contains(id) {
            trace!(field_id = %id, "delete request for unknown field ignored");
            return self;
        }
        debug!(field_id = %id, "delete requested");
        self.pending_delete = Some(id.clone());
        self
    }

    pub fn cancel_delete(mut self) -> Self {
        if let Some(id) = self.pending_delete.take() {
            debug!(field_id = %id, "delete cancelled");
        }
        self
    }

    /// Delete the pending field. Clears the selection if it pointed at it.
    pub fn confirm_delete(mut self) -> Self {
        let Some(id) = self.pending_delete.take() else {
            trace!("delete confirmation without pending request ignored");
            return self;
        };
        self.fields.retain(|field| field.id() != &id);
        if self.selected_field_id.as_ref() == Some(&id) {
            self.selected_field_id = None;
        }
        debug!(field_id = %id, remaining = self.fields.len(), "field deleted");
        self
    }

    pub fn select(mut self, id: &FieldId) -> Self {
        if !self.contains(id) {
            trace!(field_id = %id, "selection of unknown field ignored");
            return self;
        }
        self.selected_field_id = Some(id.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotecraft_fields::{KindLabels, SequentialIds};

    fn factory() -> FieldFactory {
        FieldFactory::new(KindLabels::default(), Box::new(SequentialIds::new("f")))
    }

    fn id(s: &str) -> FieldId {
        FieldId::parse(s).unwrap()
    }

    fn three_fields(factory: &FieldFactory) -> EditorSession {
        EditorSession::new()
            .add_field(FieldKind::Text, factory)
            .add_field(FieldKind::Number, factory)
            .add_field(FieldKind::Dropdown, factory)
    }

    fn order(session: &EditorSession) -> Vec<&str> {
        session.fields().iter().map(|f| f.id().as_str()).collect()
    }

    #[test]
    fn add_field_appends_and_selects() {
        let factory = factory();
        let session = EditorSession::new().add_field(FieldKind::Slider, &factory);
        assert_eq!(session.len(), 1);
        assert_eq!(session.selected_field_id(), Some(&id("f-1")));
        assert_eq!(session.selected_field().unwrap().label(), "Slider");

        let session = session.add_field(FieldKind::Text, &factory);
        assert_eq!(order(&session), vec!["f-1", "f-2"]);
        assert_eq!(session.selected_field_id(), Some(&id("f-2")));
    }

    #[test]
    fn update_field_preserves_position() {
        let factory = factory();
        let session = three_fields(&factory).update_field(
            &id("f-2"),
            &FieldChange::Label {
                value: "Square Feet".into(),
            },
            factory.ids(),
        );
        assert_eq!(order(&session), vec!["f-1", "f-2", "f-3"]);
        let field = session.field(&id("f-2")).unwrap();
        assert_eq!(field.label(), "Square Feet");
        assert_eq!(field.variable_name(), "square_feet");
    }

    #[test]
    fn update_unknown_field_is_noop() {
        let factory = factory();
        let session = three_fields(&factory);
        let after = session.clone().update_field(
            &id("gone"),
            &FieldChange::Required { value: true },
            factory.ids(),
        );
        assert_eq!(after, session);
    }

    #[test]
    fn reorder_adopts_permutation() {
        let factory = factory();
        let session = three_fields(&factory);
        let mut reversed = session.fields().to_vec();
        reversed.reverse();
        let session = session.reorder(reversed);
        assert_eq!(order(&session), vec!["f-3", "f-2", "f-1"]);
        assert_eq!(session.selected_field_id(), Some(&id("f-3")));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "permutation")]
    fn reorder_with_missing_field_panics_in_debug() {
        let factory = factory();
        let session = three_fields(&factory);
        let short = session.fields()[..2].to_vec();
        let _ = session.reorder(short);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn reorder_with_missing_field_is_ignored_in_release() {
        let factory = factory();
        let session = three_fields(&factory);
        let short = session.fields()[..2].to_vec();
        assert_eq!(session.clone().reorder(short), session);
    }

    #[test]
    fn confirm_without_request_is_noop() {
        let factory = factory();
        let session = three_fields(&factory);
        assert_eq!(session.clone().confirm_delete(), session);
    }

    #[test]
    fn cancel_clears_pending_only() {
        let factory = factory();
        let session = three_fields(&factory).request_delete(&id("f-1"));
        assert_eq!(session.pending_delete(), Some(&id("f-1")));
        let session = session.cancel_delete();
        assert_eq!(session.pending_delete(), None);
        assert_eq!(session.len(), 3);
        let session = session.confirm_delete();
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn deleting_selected_field_clears_selection() {
        let factory = factory();
        let session = three_fields(&factory)
            .request_delete(&id("f-3"))
            .confirm_delete();
        assert_eq!(order(&session), vec!["f-1", "f-2"]);
        assert_eq!(session.selected_field_id(), None);
        assert_eq!(session.pending_delete(), None);
    }

    #[test]
    fn deleting_other_field_keeps_selection() {
        let factory = factory();
        let session = three_fields(&factory)
            .request_delete(&id("f-1"))
            .confirm_delete();
        assert_eq!(order(&session), vec!["f-2", "f-3"]);
        assert_eq!(session.selected_field_id(), Some(&id("f-3")));
    }

    #[test]
    fn request_delete_for_unknown_id_is_noop() {
        let factory = factory();
        let session = three_fields(&factory).request_delete(&id("nope"));
        assert_eq!(session.pending_delete(), None);
    }

    #[test]
    fn select_only_known_ids() {
        let factory = factory();
        let session = three_fields(&factory).select(&id("f-1"));
        assert_eq!(session.selected_field_id(), Some(&id("f-1")));
        let session = session.select(&id("nope"));
        assert_eq!(session.selected_field_id(), Some(&id("f-1")));
    }

    #[test]
    fn from_fields_drops_duplicate_ids() {
        let factory = factory();
        let a = factory.create(FieldKind::Text);
        let b = factory.create(FieldKind::Number);
        let session = EditorSession::from_fields(vec![a.clone(), b, a]);
        assert_eq!(order(&session), vec!["f-1", "f-2"]);
    }
}
