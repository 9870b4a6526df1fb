//! Encoding configurations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::InvalidConfiguration;
use crate::template::{OptionTemplate, REF_PLACEHOLDER};

/// One named encoder/option combination to benchmark.
///
/// A configuration carries a well-known identity plus an open mapping of
/// profile-declared dimension values; the profile validates at
/// construction that every declared dimension is present.
#[derive(Debug, Clone)]
pub struct Configuration {
    name: String,
    dimensions: BTreeMap<String, Value>,
    options: OptionTemplate,
}

impl Configuration {
    /// Create a configuration from a name and a raw option string.
    ///
    /// The option string must contain the reference placeholder; its
    /// absence is a definition error detected here, before any
    /// transcoding starts.
    pub fn new(
        name: impl Into<String>,
        options: impl Into<String>,
    ) -> Result<Self, InvalidConfiguration> {
        let name = name.into();
        let options = OptionTemplate::new(options).map_err(|_| {
            InvalidConfiguration::MissingPlaceholder {
                configuration: name.clone(),
                placeholder: REF_PLACEHOLDER,
            }
        })?;

        Ok(Self {
            name,
            dimensions: BTreeMap::new(),
            options,
        })
    }

    /// Attach a dimension value.
    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }

    /// Configuration identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared dimension values.
    pub fn dimensions(&self) -> &BTreeMap<String, Value> {
        &self.dimensions
    }

    /// Look up a single dimension value.
    pub fn dimension(&self, name: &str) -> Option<&Value> {
        self.dimensions.get(name)
    }

    /// The validated encoder option template.
    pub fn options(&self) -> &OptionTemplate {
        &self.options
    }
}
