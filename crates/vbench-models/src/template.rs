//! Encoder option templates.
//!
//! A configuration's encoder options are an opaque ffmpeg option string
//! containing exactly one substitution placeholder for the decoded
//! reference path. Templates are validated when loaded, not when invoked.

use std::path::Path;

use thiserror::Error;

/// Placeholder substituted with the decoded reference path.
pub const REF_PLACEHOLDER: &str = "$ref";

/// Errors raised while parsing an option template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("option template has no '{REF_PLACEHOLDER}' reference placeholder")]
    MissingReferencePlaceholder,
}

/// A validated encoder option template.
///
/// Guaranteed to contain the [`REF_PLACEHOLDER`] marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTemplate(String);

impl OptionTemplate {
    /// Validate a raw option string into a template.
    pub fn new(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();
        if !raw.contains(REF_PLACEHOLDER) {
            return Err(TemplateError::MissingReferencePlaceholder);
        }
        Ok(Self(raw))
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the decoded reference path and split into arguments.
    pub fn substitute(&self, reference: impl AsRef<Path>) -> Vec<String> {
        let filled = self
            .0
            .replace(REF_PLACEHOLDER, &reference.as_ref().to_string_lossy());
        split_args(&filled)
    }
}

/// Split an option string into arguments, honoring single and double quotes.
///
/// Quotes group whitespace-containing arguments (filter expressions) and
/// are stripped from the resulting argument.
fn split_args(raw: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in raw.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                } else {
                    current.push(c);
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                    in_arg = true;
                } else if c.is_whitespace() {
                    if in_arg {
                        args.push(std::mem::take(&mut current));
                        in_arg = false;
                    }
                } else {
                    current.push(c);
                    in_arg = true;
                }
            }
        }
    }
    if in_arg {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = OptionTemplate::new("-c:v libx264").unwrap_err();
        assert_eq!(err, TemplateError::MissingReferencePlaceholder);
    }

    #[test]
    fn test_substitutes_reference_path() {
        let template = OptionTemplate::new("-i $ref -c:v copy").unwrap();
        let args = template.substitute("/tmp/ref.nut");
        assert_eq!(args, vec!["-i", "/tmp/ref.nut", "-c:v", "copy"]);
    }

    #[test]
    fn test_split_collapses_whitespace() {
        let template = OptionTemplate::new("\n    -i $ref\n    -c:v libx264 -crf:v 21\n").unwrap();
        let args = template.substitute("ref.nut");
        assert_eq!(args, vec!["-i", "ref.nut", "-c:v", "libx264", "-crf:v", "21"]);
    }

    #[test]
    fn test_quoted_arguments_survive_splitting() {
        let template =
            OptionTemplate::new("-i $ref -vf 'format=nv12|vaapi,hwupload' -c:v h264_vaapi")
                .unwrap();
        let args = template.substitute("ref.nut");
        assert_eq!(
            args,
            vec![
                "-i",
                "ref.nut",
                "-vf",
                "format=nv12|vaapi,hwupload",
                "-c:v",
                "h264_vaapi"
            ]
        );
    }

    #[test]
    fn test_double_quotes() {
        assert_eq!(
            split_args(r#"-metadata title="two words""#),
            vec!["-metadata", "title=two words"]
        );
    }
}
