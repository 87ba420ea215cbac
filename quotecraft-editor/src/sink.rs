//! Save sinks: where finished field lists go.
//!
//! The editor never blocks on a save. It hands snapshots to a [`FieldSink`]
//! and keeps accepting edits while the sink works.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::document::{CalculatorDocument, DocumentFormat};
use crate::error::Result;

/// Receives calculator snapshots for persistence.
#[async_trait]
pub trait FieldSink: Send + Sync {
    async fn save(&self, document: &CalculatorDocument) -> Result<()>;
}

/// Writes each snapshot to a single file, replacing the previous one.
pub struct FileSink {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Sink whose format follows the file extension.
    pub fn for_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl FieldSink for FileSink {
    async fn save(&self, document: &CalculatorDocument) -> Result<()> {
        document.save(&self.path, self.format).await
    }
}

/// Keeps every snapshot in memory, oldest first.
#[derive(Default)]
pub struct MemorySink {
    saved: Mutex<Vec<CalculatorDocument>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<CalculatorDocument> {
        match self.saved.lock() {
            Ok(saved) => saved.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn latest(&self) -> Option<CalculatorDocument> {
        self.saved().pop()
    }
}

#[async_trait]
impl FieldSink for MemorySink {
    async fn save(&self, document: &CalculatorDocument) -> Result<()> {
        let mut saved = match self.saved.lock() {
            Ok(saved) => saved,
            Err(poisoned) => poisoned.into_inner(),
        };
        saved.push(document.clone());
        debug!(calculator = %document.id, snapshots = saved.len(), "snapshot recorded");
        Ok(())
    }
}
