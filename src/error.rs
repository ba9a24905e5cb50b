//! Error types for the employee grid.

use crate::types::{Field, RecordId};
use thiserror::Error;

/// Main error type for grid operations.
#[derive(Debug, Error)]
pub enum GridError {
    /// The data source was unreachable or did not return a JSON array.
    #[error("Failed to load records: {0}")]
    Fetch(String),

    /// A raw record is missing a required field (or it is empty).
    #[error("Record {index} is missing required field '{field}'")]
    DataShape { index: usize, field: Field },

    /// An operation referenced an id that is not in the store or session.
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// A reorder request did not cover exactly the rows of the session.
    #[error("Row order mismatch: expected {expected} ids, got {got}")]
    OrderMismatch { expected: usize, got: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        GridError::Serialization(e.to_string())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
