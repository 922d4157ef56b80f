//! Configuration for a registry manager.
//!
//! Configuration files may be JSON or YAML; the extension decides.  Every field has a default,
//! so an empty object is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::accumulator::ConverterOptions;
use crate::errors::RegistryError;
use crate::registry::read_file;

/// The self-resolver used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://bioregistry.io";

/// Provider keys tried, in order, when picking a single IRI.
pub const LINK_PRIORITY: &[&str] = &[
    "custom",
    "default",
    "miriam",
    "ols",
    "obofoundry",
    "n2t",
    "bioportal",
    "scholia",
    "bioregistry",
];

/// Manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the self-resolver, without a trailing slash.
    pub base_url: String,
    /// Provider keys tried, in order, by `get_iri`.
    pub link_priority: Vec<String>,
    /// Whether `get_iri` may fall back to the self-resolver.
    pub use_bioregistry_io: bool,
    /// Fail at construction when the synonym index has conflicts.
    pub strict: bool,
    /// Options for the cached converter records.
    pub converter: ConverterOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            link_priority: LINK_PRIORITY.iter().map(|s| s.to_string()).collect(),
            use_bioregistry_io: true,
            strict: false,
            converter: ConverterOptions::default(),
        }
    }
}

impl Config {
    /// Loads a configuration file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        read_file(path.as_ref())
    }

    /// The base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FileFormat, parse_str};

    #[test]
    fn empty_object_is_default() {
        let config: Config = parse_str("{}", FileFormat::Json).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.use_bioregistry_io);
        assert_eq!(config.link_priority[0], "custom");
    }

    #[test]
    fn yaml_overrides() {
        let config: Config = parse_str(
            "base_url: https://resolver.example/\nstrict: true\nconverter:\n  strict: true\n",
            FileFormat::Yaml,
        )
        .unwrap();
        assert!(config.strict);
        assert!(config.converter.strict);
        assert_eq!(config.base_url(), "https://resolver.example");
        assert!(config.use_bioregistry_io);
    }
}
