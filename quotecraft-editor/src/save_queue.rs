//! Snapshots on their way to a save sink.
//!
//! Each snapshot carries the revision it was taken at. Saves through one
//! queue run one at a time, a snapshot older than the last saved one is
//! skipped, and a failed snapshot goes back into the queue unless something
//! newer has been queued since.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use quotecraft_fields::diagnose;

use crate::document::CalculatorDocument;
use crate::error::Result;
use crate::sink::FieldSink;

#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub revision: u64,
    pub document: CalculatorDocument,
}

#[derive(Default)]
pub(crate) struct SaveQueue {
    pending: Mutex<Option<Snapshot>>,
    /// Revision of the newest snapshot the sink accepted. Held for the
    /// duration of a save.
    saved: tokio::sync::Mutex<u64>,
}

impl SaveQueue {
    fn pending(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, snapshot: Snapshot) {
        *self.pending() = Some(snapshot);
    }

    pub fn take(&self) -> Option<Snapshot> {
        self.pending().take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    fn requeue(&self, snapshot: Snapshot) {
        let mut pending = self.pending();
        match pending.as_ref() {
            Some(newer) if newer.revision >= snapshot.revision => {
                trace!(revision = snapshot.revision, "failed snapshot superseded");
            }
            _ => *pending = Some(snapshot),
        }
    }

    /// Save `snapshot` through `sink`.
    ///
    /// Returns `Ok(false)` when a snapshot at least as new was already saved.
    pub async fn save(&self, sink: &dyn FieldSink, snapshot: Snapshot) -> Result<bool> {
        let mut saved = self.saved.lock().await;
        if snapshot.revision <= *saved {
            trace!(revision = snapshot.revision, saved = *saved, "stale snapshot skipped");
            return Ok(false);
        }

        let document = &snapshot.document;
        for problem in diagnose(&document.fields) {
            warn!(calculator = %document.id, %problem, "field problem");
        }

        match sink.save(document).await {
            Ok(()) => {
                *saved = snapshot.revision;
                debug!(calculator = %document.id, revision = snapshot.revision, "snapshot saved");
                Ok(true)
            }
            Err(e) => {
                warn!(calculator = %document.id, revision = snapshot.revision, error = %e, "save failed");
                self.requeue(snapshot);
                Err(e)
            }
        }
    }
}
