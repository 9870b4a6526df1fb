//! Benchmark source descriptions.

use serde::{Deserialize, Serialize};

/// One named benchmark source as listed in the source description file.
///
/// Sources are resolved into prepared reference files by the acquisition
/// step before the pipeline runs; the pipeline itself consumes them
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Reference name; the prepared file becomes `<name>.nut`
    pub name: String,
    /// Download URL or local path of the original footage
    pub url: String,
    /// Expected SHA-256 of the prepared reference, lowercase hex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Trim start offset (ffmpeg time syntax)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Trim duration bound (ffmpeg time syntax)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}
