//! Error types for the school closures library.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for registry operations.
#[derive(Debug, Error)]
pub enum ClosureError {
    /// A submitted form was rejected by the validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing the backing key-value storage failed.
    #[error("Persistence error for '{key}': {message}")]
    Persistence { key: String, message: String },

    /// An export was requested for an empty record sequence.
    #[error("No records to export")]
    EmptyExport,

    /// A filter parameter could not be interpreted.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClosureError {
    /// Build a persistence error for a storage key.
    pub fn persistence(key: impl Into<String>, message: impl Into<String>) -> Self {
        ClosureError::Persistence {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClosureError::Validation(_))
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, ClosureError>;
