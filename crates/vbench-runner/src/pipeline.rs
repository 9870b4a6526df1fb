//! Profile execution pipeline.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info, warn};

use vbench_media::{decode, transcode, validate_reference, MediaError};
use vbench_models::Profile;
use vbench_store::ScoreStore;

use crate::config::RunEnv;
use crate::error::{RunnerError, RunnerResult};

/// Compute scores from a reference for every configuration in a profile.
///
/// Decodes the reference once into `workdir`, then runs the
/// transcode-and-score engine per configuration in declared order. Each
/// successful result is annotated and appended to the store before the
/// next configuration starts, so interrupting a long batch loses at most
/// the in-flight configuration. A configuration whose encode or scoring
/// fails is logged with its descriptor and skipped; decode failure
/// aborts the reference.
///
/// Returns the number of entries appended.
pub async fn process_profile(
    profile: &Profile,
    reference: &Path,
    tag: &str,
    workdir: &Path,
    store: &mut ScoreStore,
) -> RunnerResult<usize> {
    fs::create_dir_all(workdir).await?;

    let raw = workdir.join("ref.nut");
    decode(reference, &raw).await?;

    let refname = reference_name(reference);
    let total = profile.configurations().len();
    let mut appended = 0;

    for (index, config) in profile.configurations().iter().enumerate() {
        let descriptor = profile.descriptor(config, &refname, tag);

        match transcode(&raw, &descriptor, config.options(), profile.scale(), workdir).await {
            Ok(result) => {
                let entry = profile.annotate(result, config, &refname, tag);
                store.append(tag, profile.name(), entry).await?;
                appended += 1;
            }
            Err(err @ (MediaError::EncodeFailed { .. } | MediaError::ScoreFailed { .. })) => {
                error!("{}", err);
            }
            Err(err) => return Err(err.into()),
        }

        let done = index + 1;
        let percentage = done as f64 / total as f64 * 100.0;
        info!("{}/{} configurations complete ({:.2}%)", done, total, percentage);
    }

    Ok(appended)
}

/// Run every profile against every reference, persisting each result as
/// soon as it is computed.
///
/// Every reference is sanity-validated once per profile run before any
/// of its configurations are attempted; a failing reference is skipped
/// with a warning and the batch continues. Per-reference decode failures
/// likewise skip only the affected reference.
pub async fn compare(
    references: &[PathBuf],
    profiles: &[Profile],
    tag: &str,
    env: &RunEnv,
    store: &mut ScoreStore,
) -> RunnerResult<()> {
    for profile in profiles {
        info!("Processing profile: {}", profile.name());

        for reference in references {
            info!("Processing reference: {}", reference.display());

            fs::create_dir_all(&env.tmpdir).await?;
            if !validate_reference(reference, &env.tmpdir).await {
                warn!(
                    "Skipping reference '{}': sanity validation failed",
                    reference.display()
                );
                continue;
            }

            match process_profile(profile, reference, tag, &env.tmpdir, store).await {
                Ok(_) => {}
                Err(RunnerError::Media(err @ MediaError::DecodeFailed { .. })) => {
                    error!("{}", err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(())
}

/// Reference name used in descriptors and entries: the file stem.
fn reference_name(reference: &Path) -> String {
    reference
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| reference.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_name_strips_directory_and_extension() {
        assert_eq!(reference_name(Path::new("/data/refs/park_joy.nut")), "park_joy");
        assert_eq!(reference_name(Path::new("crowd_run.y4m")), "crowd_run");
    }
}
