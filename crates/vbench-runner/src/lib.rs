//! Encoder quality benchmark runner.
//!
//! Drives the full pipeline: reference acquisition, per-reference sanity
//! validation, profile execution with incremental score persistence, and
//! the plot-phase score summary.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod profiles;
pub mod report;
pub mod sources;

pub use config::RunEnv;
pub use error::{RunnerError, RunnerResult};
pub use pipeline::{compare, process_profile};
pub use profiles::{builtin_profiles, select_profiles};
pub use report::render_summary;
pub use sources::{ensure_references, hash_file, load_sources};
