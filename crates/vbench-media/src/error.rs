//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving the external transcoder.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("command failed: {message}")]
    CommandFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    /// Fatal per reference: no configuration can run without a decoded
    /// reference.
    #[error("failed to decode '{input}': {message}")]
    DecodeFailed { input: PathBuf, message: String },

    /// Per-configuration: callers skip the configuration and continue.
    #[error("encode failed for '{descriptor}': {message}")]
    EncodeFailed { descriptor: String, message: String },

    /// Per-configuration: callers skip the configuration and continue.
    #[error("failed to compute score for '{descriptor}': {message}")]
    ScoreFailed { descriptor: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a command failure error.
    pub fn command_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::CommandFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }
}
