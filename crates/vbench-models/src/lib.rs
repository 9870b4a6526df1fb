//! Shared data models for encoder quality benchmarking.
//!
//! This crate provides Serde-serializable types for:
//! - Encoding configurations and their option templates
//! - Comparison profiles with declared dimension schemas
//! - Transcode results and score aggregates
//! - Persisted score entries
//! - Benchmark source descriptions

pub mod configuration;
pub mod entry;
pub mod error;
pub mod profile;
pub mod result;
pub mod source;
pub mod template;

// Re-export common types
pub use configuration::Configuration;
pub use entry::ScoreEntry;
pub use error::InvalidConfiguration;
pub use profile::{Profile, BASE_DIMENSIONS};
pub use result::{AggregateKind, TranscodeResult};
pub use source::SourceSpec;
pub use template::{OptionTemplate, TemplateError, REF_PLACEHOLDER};
