//! Built-in comparison profiles.

use vbench_models::{Configuration, InvalidConfiguration, Profile};

use crate::error::{RunnerError, RunnerResult};

/// All built-in profiles.
pub fn builtin_profiles() -> Result<Vec<Profile>, InvalidConfiguration> {
    Ok(vec![simple()?, voc_streaming()?])
}

/// Look up the requested profiles by name, preserving request order.
pub fn select_profiles(names: &[String]) -> RunnerResult<Vec<Profile>> {
    let all = builtin_profiles()?;

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let profile = all
            .iter()
            .find(|profile| profile.name() == name)
            .cloned()
            .ok_or_else(|| RunnerError::UnknownProfile {
                name: name.clone(),
                known: all
                    .iter()
                    .map(|profile| profile.name().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        selected.push(profile);
    }

    Ok(selected)
}

/// Example profile for testing and demonstration.
fn simple() -> Result<Profile, InvalidConfiguration> {
    let mut configurations = Vec::new();
    for codec in ["copy", "libvpx-vp9", "libx264", "libx265"] {
        configurations.push(
            Configuration::new(codec, format!("-i $ref -c:v {codec}"))?
                .with_dimension("codec", codec),
        );
    }

    Profile::new("simple", None, vec!["codec".to_string()], configurations)
}

/// Streaming comparison: VAAPI/NVENC hardware encoders against x264 and
/// libvpx software baselines across target bitrates.
fn voc_streaming() -> Result<Profile, InvalidConfiguration> {
    let mut configurations = Vec::new();

    for rate in [1000u32, 1400, 2000, 2800, 4000, 5200] {
        for codec in ["vp9", "h264", "hevc"] {
            configurations.push(
                Configuration::new(
                    format!("vaapi-{codec}-{rate}"),
                    format!(
                        "-vaapi_device /dev/dri/renderD128 \
                         -hwaccel vaapi -hwaccel_output_format vaapi \
                         -i $ref \
                         -vf 'format=nv12|vaapi,hwupload' \
                         -c:v {codec}_vaapi \
                         -keyint_min:v 75 -g:v 75 \
                         -b:v {rate}k -maxrate:v {rate}k -bufsize {rate}k"
                    ),
                )?
                .with_dimension("encoder", "vaapi")
                .with_dimension("codec", codec)
                .with_dimension("target_rate", rate),
            );
        }

        for codec in ["h264", "hevc"] {
            configurations.push(
                Configuration::new(
                    format!("nvenc-{codec}-{rate}"),
                    format!(
                        "-i $ref \
                         -c:v {codec}_nvenc \
                         -keyint_min:v 75 -g:v 75 \
                         -no-scenecut:v 1 \
                         -pixel_format yuv420p \
                         -b:v {rate}k -maxrate:v {rate}k -bufsize {rate}k"
                    ),
                )?
                .with_dimension("encoder", "nvenc")
                .with_dimension("codec", codec)
                .with_dimension("target_rate", rate),
            );
        }

        configurations.push(
            Configuration::new(
                format!("x264-{rate}"),
                format!(
                    "-i $ref \
                     -c:v libx264 -preset:v veryfast \
                     -profile:v main -flags +cgop \
                     -threads:v 0 -g:v 75 \
                     -crf:v 21 \
                     -maxrate:v {rate}k -bufsize {rate}k"
                ),
            )?
            .with_dimension("encoder", "x264")
            .with_dimension("codec", "h264")
            .with_dimension("target_rate", rate),
        );

        configurations.push(
            Configuration::new(
                format!("libvpx-{rate}"),
                format!(
                    "-i $ref \
                     -c:v libvpx-vp9 \
                     -deadline:v realtime -cpu-used:v 8 \
                     -threads:v 8 \
                     -frame-parallel:v 1 -tile-columns:v 2 \
                     -keyint_min:v 75 -g:v 75 \
                     -crf:v 23 \
                     -b:v {rate}k -maxrate:v {rate}k -bufsize {rate}k"
                ),
            )?
            .with_dimension("encoder", "libvpx")
            .with_dimension("codec", "vp9")
            .with_dimension("target_rate", rate),
        );
    }

    Profile::new(
        "voc-streaming",
        None,
        vec![
            "encoder".to_string(),
            "codec".to_string(),
            "target_rate".to_string(),
        ],
        configurations,
    )
}
