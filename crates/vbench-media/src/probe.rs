//! FFprobe container metadata.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    bit_rate: Option<String>,
}

/// Probe a media file's container metadata.
async fn ffprobe(path: &Path) -> MediaResult<FfprobeOutput> {
    check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args([
            "-hide_banner",
            "-show_format",
            "-show_streams",
            "-loglevel",
            "quiet",
            "-print_format",
            "json",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::command_failed(
            "ffprobe exited with non-zero status",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
            output.status.code(),
        ));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Probe a file's container-level average bitrate in kbps.
///
/// Best-effort telemetry: a missing file, a failing ffprobe, or an absent
/// `bit_rate` field all yield `None`, never an error.
pub async fn probe_bitrate(path: impl AsRef<Path>) -> Option<f64> {
    let path = path.as_ref();

    let probe = match ffprobe(path).await {
        Ok(probe) => probe,
        Err(err) => {
            debug!("Failed to probe {}: {}", path.display(), err);
            return None;
        }
    };

    parse_kbps(probe.format.bit_rate.as_deref()?)
}

/// Parse ffprobe's stringified bits/s field into kbps.
fn parse_kbps(bit_rate: &str) -> Option<f64> {
    bit_rate.parse::<u64>().ok().map(|bits| bits as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kbps() {
        assert_eq!(parse_kbps("1000000"), Some(1000.0));
        assert_eq!(parse_kbps("1234567"), Some(1234.567));
        assert_eq!(parse_kbps("N/A"), None);
        assert_eq!(parse_kbps(""), None);
    }

    #[test]
    fn test_format_deserialization() {
        let raw = r#"{"format": {"filename": "a.nut", "bit_rate": "224868"}, "streams": []}"#;
        let probe: FfprobeOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(probe.format.bit_rate.as_deref(), Some("224868"));
    }

    #[test]
    fn test_bit_rate_absent() {
        let raw = r#"{"format": {"filename": "a.nut"}}"#;
        let probe: FfprobeOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(probe.format.bit_rate, None);
    }
}
