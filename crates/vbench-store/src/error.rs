//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or loading score collections.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file '{file}' is not a JSON array")]
    NotAnArray { file: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
