//! Comparison profiles.

use serde_json::Value;

use crate::configuration::Configuration;
use crate::entry::ScoreEntry;
use crate::error::InvalidConfiguration;
use crate::result::TranscodeResult;

/// Dimensions present on every score entry regardless of profile.
pub const BASE_DIMENSIONS: [&str; 3] = ["tag", "profile", "reference"];

/// A named, ordered collection of configurations sharing a declared
/// dimension schema.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    scale: Option<String>,
    dimensions: Vec<String>,
    configurations: Vec<Configuration>,
}

impl Profile {
    /// Create a profile, validating every configuration eagerly.
    ///
    /// Every declared dimension must be present in every configuration;
    /// absence is a definition error raised here, before any external
    /// process runs.
    pub fn new(
        name: impl Into<String>,
        scale: Option<String>,
        dimensions: Vec<String>,
        configurations: Vec<Configuration>,
    ) -> Result<Self, InvalidConfiguration> {
        for config in &configurations {
            for dimension in &dimensions {
                if config.dimension(dimension).is_none() {
                    return Err(InvalidConfiguration::MissingDimension {
                        configuration: config.name().to_string(),
                        dimension: dimension.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.into(),
            scale,
            dimensions,
            configurations,
        })
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional `W:H` dimensions both scoring inputs are scaled to.
    pub fn scale(&self) -> Option<&str> {
        self.scale.as_deref()
    }

    /// Profile-declared dimension names (beyond [`BASE_DIMENSIONS`]).
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Configurations in declared order.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Build the unique descriptor for one (reference, profile, tag,
    /// configuration) tuple.
    ///
    /// Dimension values are concatenated in fixed order: the base
    /// dimensions, then each declared dimension. Injectivity over a
    /// profile's configurations is the profile author's responsibility.
    pub fn descriptor(&self, config: &Configuration, reference: &str, tag: &str) -> String {
        let mut parts = vec![tag.to_string(), self.name.clone(), reference.to_string()];
        for dimension in &self.dimensions {
            let value = config
                .dimension(dimension)
                .expect("dimension presence validated at construction");
            parts.push(value_display(value));
        }
        parts.join("_")
    }

    /// Merge a transcode result with the configuration's dimension values
    /// and the run identity into a persistable score entry.
    pub fn annotate(
        &self,
        result: TranscodeResult,
        config: &Configuration,
        reference: &str,
        tag: &str,
    ) -> ScoreEntry {
        ScoreEntry {
            reference: reference.to_string(),
            profile: self.name.clone(),
            tag: tag.to_string(),
            result,
            dimensions: config.dimensions().clone(),
        }
    }
}

/// String form of a dimension value as used in descriptors.
fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str) -> Configuration {
        Configuration::new(name, format!("-i $ref -c:v {name}"))
            .unwrap()
            .with_dimension("codec", name)
    }

    #[test]
    fn test_missing_dimension_is_rejected_eagerly() {
        let incomplete = Configuration::new("x264", "-i $ref -c:v libx264")
            .unwrap()
            .with_dimension("codec", "h264");

        let err = Profile::new(
            "streaming",
            None,
            vec!["codec".to_string(), "target_rate".to_string()],
            vec![incomplete],
        )
        .unwrap_err();

        assert_eq!(
            err,
            InvalidConfiguration::MissingDimension {
                configuration: "x264".to_string(),
                dimension: "target_rate".to_string(),
            }
        );
    }

    #[test]
    fn test_descriptor_order() {
        let config = Configuration::new("x264-1000", "-i $ref -c:v libx264")
            .unwrap()
            .with_dimension("encoder", "x264")
            .with_dimension("codec", "h264")
            .with_dimension("target_rate", 1000);

        let profile = Profile::new(
            "streaming",
            None,
            vec![
                "encoder".to_string(),
                "codec".to_string(),
                "target_rate".to_string(),
            ],
            vec![config],
        )
        .unwrap();

        let descriptor = profile.descriptor(&profile.configurations()[0], "park_joy", "ci");
        assert_eq!(descriptor, "ci_streaming_park_joy_x264_h264_1000");
    }

    #[test]
    fn test_undeclared_dimensions_collide() {
        // two configurations differing only in an undeclared field build
        // the same descriptor; this is deterministic, documented behavior
        let a = config("copy").with_dimension("preset", "fast");
        let b = config("copy").with_dimension("preset", "slow");

        let profile =
            Profile::new("simple", None, vec!["codec".to_string()], vec![a, b]).unwrap();

        let configs = profile.configurations();
        assert_eq!(
            profile.descriptor(&configs[0], "ref", "ci"),
            profile.descriptor(&configs[1], "ref", "ci"),
        );
    }

    #[test]
    fn test_annotate_merges_identity_and_dimensions() {
        let profile = Profile::new(
            "simple",
            None,
            vec!["codec".to_string()],
            vec![config("libx264")],
        )
        .unwrap();

        let result = TranscodeResult::from_frame_scores(&[99.0, 98.0], Some(500.0), Some(4.0))
            .unwrap();
        let entry = profile.annotate(result, &profile.configurations()[0], "park_joy", "ci");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["reference"], "park_joy");
        assert_eq!(json["profile"], "simple");
        assert_eq!(json["tag"], "ci");
        assert_eq!(json["codec"], "libx264");
        assert_eq!(json["rate"], 500.0);
        assert_eq!(json["speed"], 4.0);
        assert!(json["score_mean"].is_number());
        assert!(json["score_harm_mean"].is_number());
        assert!(json["score_10th_pct"].is_number());
        assert!(json["score_min"].is_number());
    }
}
