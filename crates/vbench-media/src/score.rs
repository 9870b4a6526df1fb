//! Perceptual quality scoring.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::command::{FfmpegCommand, FfmpegRunner};

/// Frame subsampling factor passed to the scorer: every 3rd frame.
pub const SCORE_SUBSAMPLE: u32 = 3;

/// Offset added to each raw frame score before aggregation, so a
/// zero-valued frame cannot collapse the harmonic mean.
const SCORE_OFFSET: f64 = 1.0;

/// VMAF JSON log structure (partial - only the per-frame metric).
#[derive(Debug, Deserialize)]
struct VmafLog {
    frames: Vec<VmafFrame>,
}

#[derive(Debug, Deserialize)]
struct VmafFrame {
    metrics: VmafMetrics,
}

#[derive(Debug, Deserialize)]
struct VmafMetrics {
    vmaf: f64,
}

/// Compute offset per-frame perceptual scores for encoded content.
///
/// Compares `coded` against the decoded `reference` frame-aligned,
/// subsampled every [`SCORE_SUBSAMPLE`]th frame; the per-frame log is
/// written to `log_path`. Returns `None` when the scorer process fails or
/// its log cannot be read or parsed; the caller decides whether that is
/// fatal.
pub async fn score_frames(
    reference: &Path,
    coded: &Path,
    scale: Option<&str>,
    log_path: &Path,
) -> Option<Vec<f64>> {
    let cmd = FfmpegCommand::new()
        .input(coded)
        .input(reference)
        .filter_complex(score_filter(scale, log_path))
        .null_output();

    if let Err(err) = FfmpegRunner::new().run(&cmd).await {
        warn!("Scorer failed for {}: {}", coded.display(), err);
        return None;
    }

    let log = match tokio::fs::read_to_string(log_path).await {
        Ok(log) => log,
        Err(err) => {
            warn!("Failed to read score log {}: {}", log_path.display(), err);
            return None;
        }
    };

    let parsed: VmafLog = match serde_json::from_str(&log) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Failed to parse score log {}: {}", log_path.display(), err);
            return None;
        }
    };

    Some(
        parsed
            .frames
            .iter()
            .map(|frame| frame.metrics.vmaf + SCORE_OFFSET)
            .collect(),
    )
}

/// Build the libvmaf filter graph, optionally scaling both inputs first.
///
/// Encoded output and reference must reach the metric at the same
/// dimensions or the score is wrong.
fn score_filter(scale: Option<&str>, log_path: &Path) -> String {
    let vmaf = format!(
        "libvmaf=log_fmt=json:log_path={}:n_subsample={}",
        log_path.display(),
        SCORE_SUBSAMPLE
    );

    match scale {
        Some(scale) => format!(
            "[0:v]scale={scale}:flags=bicubic[dist];[1:v]scale={scale}:flags=bicubic[ref];[dist][ref]{vmaf}"
        ),
        None => format!("[0:v][1:v]{vmaf}"),
    }
}
