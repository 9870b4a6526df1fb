//! Reference sanity validation.

use std::path::Path;
use tracing::warn;

use vbench_models::{OptionTemplate, TranscodeResult};

use crate::decode::decode;
use crate::transcode::transcode;

/// Floor for the minimum per-frame score of an identity re-encode.
pub const SANITY_MIN_SCORE: f64 = 95.0;

/// Floor for the harmonic-mean score of an identity re-encode.
pub const SANITY_MIN_HARM_MEAN: f64 = 98.0;

/// Identity configuration used for the round-trip check.
const COPY_OPTS: &str = "-i $ref -c:v copy";

/// Check the identity-encode thresholds against a transcode result.
pub fn sanity_thresholds_met(result: &TranscodeResult) -> bool {
    result.score_min >= SANITY_MIN_SCORE && result.score_harm_mean >= SANITY_MIN_HARM_MEAN
}

/// Test the scoring of a reference file.
///
/// A copy encode of a correctly prepared, losslessly decoded reference
/// should score effectively 100; anything less points at muxing,
/// color-space, or frame-rate problems upstream that would invisibly
/// deflate every comparative score for this reference. This is a soft
/// gate: failures log a warning and return `false` so batch runs
/// continue with the remaining references.
pub async fn validate_reference(reference: &Path, workdir: &Path) -> bool {
    let raw = workdir.join("ref.nut");
    if let Err(err) = decode(reference, &raw).await {
        warn!("Reference decode failed: {}", err);
        return false;
    }

    let options =
        OptionTemplate::new(COPY_OPTS).expect("copy template contains the reference placeholder");

    let result = match transcode(&raw, "sanity", &options, None, workdir).await {
        Ok(result) => result,
        Err(err) => {
            warn!("Sanity encode failed: {}", err);
            return false;
        }
    };

    if !sanity_thresholds_met(&result) {
        warn!(
            "Sanity score for reference '{}' not close to 100 (min {:.2}, harmonic mean {:.2}); \
             fix the reference",
            reference.display(),
            result.score_min,
            result.score_harm_mean
        );
        return false;
    }

    true
}
