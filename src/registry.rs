//! The in-memory resource collection and its persistence boundary.
//!
//! On disk a registry is a single JSON (or YAML) object mapping canonical prefixes to resource
//! fields.  The map key is authoritative: whatever `prefix` a resource carries in memory is
//! overwritten by its key on load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::resource::Resource;

/// Serialization format chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.json`, and anything unrecognized.
    Json,
    /// `.yaml` or `.yml`.
    Yaml,
}

impl FileFormat {
    /// Picks a format from the path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

/// Reads `path` and deserializes it in the format its extension names.
pub fn read_file<T>(path: &Path) -> Result<T, RegistryError>
where
    T: for<'de> Deserialize<'de>,
{
    let content = std::fs::read_to_string(path)
        .map_err(|e| RegistryError::Io(format!("{}: {}", path.display(), e)))?;
    parse_str(&content, FileFormat::from_path(path))
}

/// Deserializes `content` in `format`.
pub fn parse_str<T>(content: &str, format: FileFormat) -> Result<T, RegistryError>
where
    T: for<'de> Deserialize<'de>,
{
    match format {
        FileFormat::Json => Ok(serde_json::from_str(content)?),
        FileFormat::Yaml => Ok(serde_yml::from_str(content)?),
    }
}

/// Serializes `value` pretty-printed in `format`.
pub fn to_string<T: Serialize>(value: &T, format: FileFormat) -> Result<String, RegistryError> {
    match format {
        FileFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        FileFormat::Yaml => Ok(serde_yml::to_string(value)?),
    }
}

////////////////////////////////////////////// Registry ////////////////////////////////////////////////

/// The `prefix → Resource` collection, iterated in sorted prefix order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    resources: BTreeMap<String, Resource>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from resources, keyed by their own prefix.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut registry = Self::new();
        for resource in resources {
            registry.insert(resource);
        }
        registry
    }

    /// Parses a registry from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        Self::from_str_as(content, FileFormat::Json)
    }

    /// Parses a registry from a string in the given format.
    pub fn from_str_as(content: &str, format: FileFormat) -> Result<Self, RegistryError> {
        let mut registry: Registry = parse_str(content, format)?;
        registry.fill_prefixes();
        Ok(registry)
    }

    /// Loads a registry file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let mut registry: Registry = read_file(path.as_ref())?;
        registry.fill_prefixes();
        Ok(registry)
    }

    /// Writes the registry in the format the path's extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let mut content = to_string(self, FileFormat::from_path(path))?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(path, content)
            .map_err(|e| RegistryError::Io(format!("{}: {}", path.display(), e)))
    }

    fn fill_prefixes(&mut self) {
        for (prefix, resource) in self.resources.iter_mut() {
            resource.prefix = prefix.clone();
        }
    }

    /// Looks up a resource by its exact canonical prefix.
    pub fn get(&self, prefix: &str) -> Option<&Resource> {
        self.resources.get(prefix)
    }

    /// Whether `prefix` is literally a canonical prefix.
    pub fn contains(&self, prefix: &str) -> bool {
        self.resources.contains_key(prefix)
    }

    /// Inserts or replaces a resource, returning the one it replaced.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.prefix.clone(), resource)
    }

    /// Removes a resource by its canonical prefix.
    pub fn remove(&mut self, prefix: &str) -> Option<Resource> {
        self.resources.remove(prefix)
    }

    /// Resources in sorted prefix order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Canonical prefixes in sorted order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the registry holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "pubmed": {"name": "PubMed", "pattern": "^\\d+$", "synonyms": ["pmid"]},
        "go": {"obofoundry": {"prefix": "go", "preferredPrefix": "GO"}, "custom_field": 1}
    }"#;

    #[test]
    fn prefix_comes_from_key() {
        let registry = Registry::from_json(SMALL).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("pubmed").unwrap().prefix, "pubmed");
        assert_eq!(registry.get("go").unwrap().prefix, "go");
    }

    #[test]
    fn iteration_is_sorted() {
        let registry = Registry::from_json(SMALL).unwrap();
        let prefixes: Vec<&str> = registry.prefixes().collect();
        assert_eq!(prefixes, vec!["go", "pubmed"]);
    }

    #[test]
    fn unknown_keys_round_trip() {
        let registry = Registry::from_json(SMALL).unwrap();
        let json = to_string(&registry, FileFormat::Json).unwrap();
        assert!(json.contains("custom_field"));
        assert!(json.contains("preferredPrefix"));
        let again = Registry::from_json(&json).unwrap();
        assert_eq!(registry, again);
    }

    #[test]
    fn yaml_round_trip() {
        let registry = Registry::from_json(SMALL).unwrap();
        let yaml = to_string(&registry, FileFormat::Yaml).unwrap();
        let again = Registry::from_str_as(&yaml, FileFormat::Yaml).unwrap();
        assert_eq!(registry, again);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("r.yml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("r.yaml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("r.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("r")), FileFormat::Json);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Registry::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }

    #[test]
    fn insert_and_remove() {
        let mut registry = Registry::new();
        assert!(registry.insert(Resource::new("a")).is_none());
        assert!(registry.contains("a"));
        assert!(registry.remove("a").is_some());
        assert!(registry.is_empty());
    }
}
