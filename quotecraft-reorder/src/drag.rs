//! Pointer-drag reordering.
//!
//! A drag is a short-lived state machine:
//!
//! ```text
//! Idle --start(i)--> Dragging(key) --over(j)--> Dragging(key) --end--> Idle
//! ```
//!
//! Every drag-over commits a single-element move against the *current* list,
//! so a burst of drag-over events composes correctly no matter how many fire
//! before the host re-renders. Drop is inert: by the time it fires every move
//! has already been applied. End always returns to `Idle`, including when the
//! pointer is released outside a valid target, and never reverts a move.
//!
//! The dragged element is tracked by key. Its index is recomputed from the
//! list handed to each event, never cached across a mutation.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::permutation::{move_item, position_of};
use crate::Keyed;

/// Where a drag session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState<K> {
    Idle,
    Dragging { key: K },
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::Idle
    }
}

/// A raw pointer event, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    Start { index: usize },
    Over { index: usize },
    Drop { index: usize },
    End,
}

/// Transient drag state, owned by whatever layer receives pointer events.
///
/// Holds nothing but the key of the element being dragged. It never holds
/// the list itself and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<K> {
    state: DragState<K>,
}

impl<K> Default for DragSession<K> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<K: Clone + Eq + std::fmt::Debug> DragSession<K> {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState<K> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Key of the element the "being dragged" marker should follow.
    pub fn dragging_key(&self) -> Option<&K> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { key } => Some(key),
        }
    }

    /// Begin dragging the element currently at `index`.
    ///
    /// An index outside the list leaves the session untouched. Starting while
    /// already dragging replaces the previous drag (its end event was lost).
    pub fn start<T: Keyed<Key = K>>(&mut self, items: &[T], index: usize) {
        let Some(item) = items.get(index) else {
            trace!(index, len = items.len(), "drag start on missing index ignored");
            return;
        };
        let key = item.key().clone();
        debug!(?key, index, "drag started");
        self.state = DragState::Dragging { key };
    }

    /// The dragged element passed over `target`.
    ///
    /// Returns the new order when the element moved, `None` when nothing is
    /// emitted: no drag in progress, the element is already at `target`, the
    /// target is out of range, or the dragged element is gone from the list.
    pub fn over<T: Keyed<Key = K> + Clone>(&mut self, items: &[T], target: usize) -> Option<Vec<T>> {
        let DragState::Dragging { key } = &self.state else {
            trace!(target, "drag over without drag start ignored");
            return None;
        };
        let Some(current) = position_of(items, key) else {
            trace!(?key, "dragged element no longer present");
            return None;
        };
        if current == target {
            return None;
        }
        let next = move_item(items, current, target);
        match &next {
            Some(_) => debug!(?key, from = current, to = target, "drag moved element"),
            None => trace!(target, len = items.len(), "drag over missing index ignored"),
        }
        next
    }

    /// Drop on `target`. Ordering was already committed by drag-over events.
    pub fn drop_at(&self, target: usize) {
        trace!(target, dragging = self.is_dragging(), "drop");
    }

    /// Finish the drag unconditionally. Applied moves are kept.
    pub fn end(&mut self) {
        if let DragState::Dragging { key } = &self.state {
            debug!(?key, "drag ended");
        }
        self.state = DragState::Idle;
    }

    /// Feed one event to the session. Returns the new order if the event
    /// produced one.
    pub fn handle<T: Keyed<Key = K> + Clone>(&mut self, items: &[T], event: DragEvent) -> Option<Vec<T>> {
        match event {
            DragEvent::Start { index } => {
                self.start(items, index);
                None
            }
            DragEvent::Over { index } => self.over(items, index),
            DragEvent::Drop { index } => {
                self.drop_at(index);
                None
            }
            DragEvent::End => {
                self.end();
                None
            }
        }
    }
}

/// Value-in, value-out form of [`DragSession::handle`].
///
/// Returns the new order (if any) alongside the session to use for the next
/// event.
pub fn reorder_by_drag<T>(
    items: &[T],
    session: DragSession<T::Key>,
    event: DragEvent,
) -> (Option<Vec<T>>, DragSession<T::Key>)
where
    T: Keyed + Clone,
{
    let mut session = session;
    let next = session.handle(items, event);
    (next, session)
}
