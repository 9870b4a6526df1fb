//! Reference acquisition.
//!
//! Resolves the named sources in a source description file into prepared
//! reference files: lossless intermediates at a fixed frame rate,
//! resolution and pixel format, optionally trimmed, and integrity-checked
//! when the source declares a hash. The pipeline consumes the prepared
//! files read-only.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::info;

use vbench_media::{FfmpegCommand, FfmpegRunner};
use vbench_models::SourceSpec;

use crate::error::{RunnerError, RunnerResult};

/// Prepared reference frame rate.
const REFERENCE_FPS: u32 = 25;
/// Prepared reference frame size.
const REFERENCE_SIZE: &str = "1920x1080";
/// Prepared reference pixel format.
const REFERENCE_PIX_FMT: &str = "yuv420p";

/// Compute the SHA-256 digest of a file, lowercase hex.
pub fn hash_file(path: &Path) -> RunnerResult<String> {
    use std::io::Read;

    const BLOCK_SIZE: usize = 16 * 1024;

    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify a prepared reference against its source declaration.
fn check_reference(source: &SourceSpec, reference: &Path) -> RunnerResult<()> {
    let digest = hash_file(reference)?;
    match &source.hash {
        Some(expected) if *expected != digest => Err(RunnerError::SourceIntegrity {
            name: source.name.clone(),
            expected: expected.clone(),
            actual: digest,
        }),
        Some(_) => Ok(()),
        None => {
            info!("Reference {} sha256 is {}", source.name, digest);
            Ok(())
        }
    }
}

/// Prepare a reference from its source footage.
async fn prepare_reference(source: &SourceSpec, dst: &Path) -> RunnerResult<()> {
    let mut cmd = FfmpegCommand::new().log_level("error");
    if let Some(from) = &source.from {
        cmd = cmd.seek(from.clone());
    }
    cmd = cmd
        .arg("-i")
        .arg(&source.url)
        .video_codec("ffvhuff")
        .no_audio();
    if let Some(duration) = &source.duration {
        cmd = cmd.until(duration.clone());
    }
    let cmd = cmd
        .frame_rate(REFERENCE_FPS)
        .size(REFERENCE_SIZE)
        .sws_flags("bicubic")
        .pix_fmt(REFERENCE_PIX_FMT)
        .output(dst);

    FfmpegRunner::new()
        .run(&cmd)
        .await
        .map_err(|err| RunnerError::SourcePrepareFailed {
            name: source.name.clone(),
            url: source.url.clone(),
            message: err.to_string(),
        })
}

/// Load the source description file.
pub async fn load_sources(path: &Path) -> RunnerResult<Vec<SourceSpec>> {
    let body = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Make sure all sources and derived references are present.
///
/// Returns the prepared reference paths in declaration order. Prepared
/// files are written to a temp name and renamed into place only after
/// their integrity check passes.
pub async fn ensure_references(sourcefile: &Path, refdir: &Path) -> RunnerResult<Vec<PathBuf>> {
    let sources = load_sources(sourcefile).await?;
    fs::create_dir_all(refdir).await?;

    let mut references = Vec::with_capacity(sources.len());
    for source in &sources {
        let reference = refdir.join(format!("{}.nut", source.name));

        if fs::try_exists(&reference).await? {
            check_reference(source, &reference)?;
        } else {
            info!("Preparing reference: {}", source.name);
            let tmp = refdir.join(format!("{}.tmp.nut", source.name));
            prepare_reference(source, &tmp).await?;
            check_reference(source, &tmp)?;
            fs::rename(&tmp, &reference).await?;
        }

        references.push(reference);
    }

    Ok(references)
}
