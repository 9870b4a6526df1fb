//! Persisted score entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::TranscodeResult;

/// One annotated transcode result as persisted in the score store.
///
/// Dimension values and result fields are flattened into a single flat
/// record so downstream consumers can group on any dimension without
/// knowing the profile's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Reference name (file stem of the source video)
    pub reference: String,
    /// Profile the configuration belongs to
    pub profile: String,
    /// Run tag identifying the platform under test
    pub tag: String,
    #[serde(flatten)]
    pub result: TranscodeResult,
    /// Profile-declared dimension values
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, Value>,
}
