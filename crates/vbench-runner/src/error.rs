//! Runner error types.

use thiserror::Error;

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while driving a benchmark run.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    InvalidConfiguration(#[from] vbench_models::InvalidConfiguration),

    #[error(transparent)]
    Media(#[from] vbench_media::MediaError),

    #[error(transparent)]
    Store(#[from] vbench_store::StoreError),

    /// Fatal for the affected source: the acquisition step aborts rather
    /// than silently serving a tampered or corrupt reference.
    #[error("reference '{name}' hashes to {actual}, expected {expected}")]
    SourceIntegrity {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("failed to prepare reference '{name}' from '{url}': {message}")]
    SourcePrepareFailed {
        name: String,
        url: String,
        message: String,
    },

    #[error("unknown profile '{name}' (known profiles: {known})")]
    UnknownProfile { name: String, known: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
