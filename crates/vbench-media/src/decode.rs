//! Reference decoding.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Decode a media file into a raw, lossless intermediate.
///
/// Every configuration's transcode step consumes the decoded rendition so
/// the scorer compares against identical frames. Decode failure is fatal
/// for the reference: no configuration can run without it.
pub async fn decode(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    info!("Decoding reference: {} -> {}", src.display(), dst.display());

    let cmd = FfmpegCommand::new()
        .arg("-nostats")
        .input(src)
        .video_codec("rawvideo")
        .no_audio()
        .output(dst);

    FfmpegRunner::new()
        .run(&cmd)
        .await
        .map_err(|err| MediaError::DecodeFailed {
            input: src.to_path_buf(),
            message: err.to_string(),
        })
}
