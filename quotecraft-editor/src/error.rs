//! Error types for the editor
//!
//! Editing itself never fails. These errors come from the edges: loading
//! configuration, reading and writing calculator documents, and handing
//! snapshots to a save sink.

use std::path::PathBuf;
use thiserror::Error;

use quotecraft_fields::FieldsError;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    /// Explicitly requested configuration file does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration could not be extracted
    #[error("failed to parse configuration: {source}")]
    Config { source: figment::Error },

    /// File extension is not one of the supported document formats
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A save sink rejected a snapshot
    #[error("failed to save calculator '{calculator}': {message}")]
    SaveFailed { calculator: String, message: String },

    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    /// Create a save failure error
    pub fn save_failed(calculator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SaveFailed {
            calculator: calculator.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }
}

impl From<figment::Error> for EditorError {
    fn from(source: figment::Error) -> Self {
        Self::Config { source }
    }
}
