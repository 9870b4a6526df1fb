//! Encoder progress-report parsing.
//!
//! ffmpeg's `-progress` output is a stream of key=value blocks, each
//! terminated by a `progress=continue` line (the final block ends with
//! `progress=end`). The engine only needs the last reported encoding
//! speed.

use std::path::Path;
use tracing::debug;

/// Extract the final reported encoding speed from a progress report.
///
/// Only the text after the last `progress=continue` marker is considered;
/// the last `speed=<float>x` line within it wins. `N/A` values and absent
/// speed lines yield `None` — encoders do not always report throughput.
pub fn final_speed(report: &str) -> Option<f64> {
    let tail = report.rsplit("progress=continue").next().unwrap_or(report);

    let mut speed = None;
    for line in tail.lines() {
        if let Some((key, value)) = line.trim().split_once('=') {
            if key == "speed" && value != "N/A" {
                if let Some(stripped) = value.trim().strip_suffix('x') {
                    if let Ok(parsed) = stripped.parse::<f64>() {
                        speed = Some(parsed);
                    }
                }
            }
        }
    }

    speed
}

/// Read the progress report written during an encode, if any.
pub async fn read_final_speed(path: impl AsRef<Path>) -> Option<f64> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(report) => final_speed(&report),
        Err(err) => {
            debug!("No readable progress report at {}: {}", path.display(), err);
            None
        }
    }
}
