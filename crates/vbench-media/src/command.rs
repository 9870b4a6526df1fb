//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg command lines.
///
/// Arguments accumulate in call order after a fixed prologue
/// (`-y -hide_banner -v <level>` plus optional `-progress <file>`), so
/// input-positioned flags like `-ss` stay where the caller puts them.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Arguments after the fixed prologue
    args: Vec<String>,
    /// Log level
    log_level: String,
    /// Whether to overwrite output
    overwrite: bool,
    /// Progress report destination
    progress_file: Option<PathBuf>,
}

impl Default for FfmpegCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            log_level: "warning".to_string(),
            overwrite: true,
            progress_file: None,
        }
    }

    /// Append a raw argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple raw arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an input file.
    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy())
    }

    /// Set seek position (place before the input it applies to).
    pub fn seek(self, position: impl Into<String>) -> Self {
        self.arg("-ss").arg(position)
    }

    /// Stop writing output at the given position.
    pub fn until(self, position: impl Into<String>) -> Self {
        self.arg("-to").arg(position)
    }

    /// Set video codec.
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Drop audio streams.
    pub fn no_audio(self) -> Self {
        self.arg("-an")
    }

    /// Set output frame rate.
    pub fn frame_rate(self, fps: u32) -> Self {
        self.arg("-r").arg(fps.to_string())
    }

    /// Set output frame size (`WxH`).
    pub fn size(self, size: impl Into<String>) -> Self {
        self.arg("-s").arg(size)
    }

    /// Set output pixel format.
    pub fn pix_fmt(self, format: impl Into<String>) -> Self {
        self.arg("-pix_fmt").arg(format)
    }

    /// Set software scaler flags.
    pub fn sws_flags(self, flags: impl Into<String>) -> Self {
        self.arg("-sws_flags").arg(flags)
    }

    /// Set filter complex.
    pub fn filter_complex(self, filter: impl Into<String>) -> Self {
        self.arg("-filter_complex").arg(filter)
    }

    /// Discard output (scoring runs need no encoded artifact).
    pub fn null_output(self) -> Self {
        self.arg("-f").arg("null").arg("-")
    }

    /// Add the output file (last argument).
    pub fn output(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().to_string_lossy().to_string();
        self.arg(rendered)
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Route progress reporting to a file.
    pub fn progress_to(mut self, path: impl AsRef<Path>) -> Self {
        self.progress_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Overwrite flag
        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-hide_banner".to_string());

        // Log level
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        // Progress report destination
        if let Some(ref progress) = self.progress_file {
            args.push("-progress".to_string());
            args.push(progress.to_string_lossy().to_string());
        }

        args.extend(self.args.clone());

        args
    }
}

/// Runner for FFmpeg commands.
///
/// Executes a command synchronously to completion and maps a non-zero
/// exit to a typed failure carrying the captured stderr. No retries:
/// every failure is surfaced to the caller, which decides whether to
/// skip, abort, or continue.
#[derive(Debug, Default)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self
    }

    /// Run an FFmpeg command to completion.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        check_ffmpeg()?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::command_failed(
                "ffmpeg exited with non-zero status",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ))
        }
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check if FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prologue_precedes_caller_args() {
        let cmd = FfmpegCommand::new()
            .input("ref.nut")
            .video_codec("rawvideo")
            .no_audio()
            .output("out.nut");

        let args = cmd.build_args();
        assert_eq!(
            args,
            vec![
                "-y",
                "-hide_banner",
                "-v",
                "warning",
                "-i",
                "ref.nut",
                "-c:v",
                "rawvideo",
                "-an",
                "out.nut"
            ]
        );
    }

    #[test]
    fn test_progress_file_in_prologue() {
        let cmd = FfmpegCommand::new().progress_to("/tmp/progress").arg("-i");
        let args = cmd.build_args();
        let pos = args.iter().position(|a| a == "-progress").unwrap();
        assert_eq!(args[pos + 1], "/tmp/progress");
        assert!(pos < args.iter().position(|a| a == "-i").unwrap());
    }

    #[test]
    fn test_seek_stays_where_placed() {
        // input seeking requires -ss before -i
        let cmd = FfmpegCommand::new().seek("00:00:10").input("src.mkv");
        let args = cmd.build_args();
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input);
    }
}
