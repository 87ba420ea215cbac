//! Error types for the field model

use thiserror::Error;

/// Result type for field model operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur at the edges of the field model.
///
/// Editing operations themselves never fail; these only arise when text from
/// outside (scripts, config files) is turned into model values.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Kind name not in the closed set of field kinds
    #[error("unknown field kind: {name}")]
    UnknownKind { name: String },

    /// Id text that cannot be used as a field or option id
    #[error("invalid id: {message}")]
    InvalidId { message: String },
}

impl FieldsError {
    /// Create an unknown kind error
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }

    /// Create an invalid id error
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }
}
