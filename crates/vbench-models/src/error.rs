//! Profile definition errors.

use thiserror::Error;

/// Errors raised while validating profile definitions.
///
/// These surface at construction time, before any external process is
/// started, so a broken profile never wastes transcode time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfiguration {
    #[error("configuration '{configuration}': no value for declared dimension '{dimension}'")]
    MissingDimension {
        configuration: String,
        dimension: String,
    },

    #[error("configuration '{configuration}': option template has no '{placeholder}' reference placeholder")]
    MissingPlaceholder {
        configuration: String,
        placeholder: &'static str,
    },
}
