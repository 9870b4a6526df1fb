//! Transcode-and-score engine.

use std::path::Path;
use tracing::info;

use vbench_models::{OptionTemplate, TranscodeResult};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_bitrate;
use crate::progress::read_final_speed;
use crate::score::score_frames;

/// Transcode a decoded reference under one configuration and score the
/// perceptual quality of the result.
///
/// The encoded output and the progress report land in `workdir` under
/// names derived from `descriptor`. Encoding and scoring failures carry
/// the descriptor so batch callers can correlate them with the option
/// string that produced them; missing throughput or bitrate telemetry is
/// tolerated and leaves the corresponding field absent.
pub async fn transcode(
    raw_reference: &Path,
    descriptor: &str,
    options: &OptionTemplate,
    scale: Option<&str>,
    workdir: &Path,
) -> MediaResult<TranscodeResult> {
    info!("Transcoding descriptor: {}", descriptor);

    let coded = workdir.join(format!("{descriptor}.nut"));
    let progress = workdir.join("progress");

    // encode input
    let cmd = FfmpegCommand::new()
        .progress_to(&progress)
        .args(options.substitute(raw_reference))
        .no_audio()
        .output(&coded);

    FfmpegRunner::new()
        .run(&cmd)
        .await
        .map_err(|err| MediaError::EncodeFailed {
            descriptor: descriptor.to_string(),
            message: err.to_string(),
        })?;

    // read final speed from the progress report
    let speed = read_final_speed(&progress).await;

    // probe real coded bitrate
    let rate = probe_bitrate(&coded).await;

    // calculate per-frame perceptual scores
    let score_log = workdir.join(format!("{descriptor}.nut.json"));
    let scores = score_frames(raw_reference, &coded, scale, &score_log)
        .await
        .unwrap_or_default();

    TranscodeResult::from_frame_scores(&scores, rate, speed).ok_or_else(|| {
        MediaError::ScoreFailed {
            descriptor: descriptor.to_string(),
            message: "scorer produced no parseable frames".to_string(),
        }
    })
}
