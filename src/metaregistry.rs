//! # Metaregistry
//!
//! Descriptors of external registries: how to link to a prefix's landing page inside that
//! registry (the *provider* capability) and how to redirect a CURIE through it (the *resolver*
//! capability).  Capabilities are declared explicitly on each descriptor rather than inferred
//! from which URL templates happen to be filled in.
//!
//! Provider formats take one token, `$1`, the external prefix.  Resolver formats take two:
//! `$1` for the external prefix and `$2` for the local identifier.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::registry::read_file;

/// What an external registry can do for a prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// It has a landing page per prefix.
    pub provider: bool,
    /// It redirects CURIEs to a provider.
    pub resolver: bool,
}

/// One external registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalRegistry {
    /// The metaprefix.  Filled from the map key on load.
    #[serde(skip)]
    pub prefix: String,
    /// Display name.
    pub name: String,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Landing page format, `$1` is the external prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_uri_format: Option<String>,
    /// Redirect format, `$1` is the external prefix and `$2` the identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_uri_format: Option<String>,
    /// Declared capabilities.
    pub capabilities: Capabilities,
}

impl ExternalRegistry {
    fn builtin(
        prefix: &str,
        name: &str,
        homepage: &str,
        provider: Option<&str>,
        resolver: Option<&str>,
    ) -> Self {
        Self {
            prefix: prefix.to_string(),
            name: name.to_string(),
            homepage: Some(homepage.to_string()),
            provider_uri_format: provider.map(str::to_string),
            resolver_uri_format: resolver.map(str::to_string),
            capabilities: Capabilities {
                provider: provider.is_some(),
                resolver: resolver.is_some(),
            },
        }
    }

    /// The landing page for `external_prefix`, if this registry is a provider.
    pub fn get_provider_uri(&self, external_prefix: &str) -> Option<String> {
        if !self.capabilities.provider {
            return None;
        }
        let format = self.provider_uri_format.as_deref()?;
        Some(format.replacen("$1", external_prefix, 1))
    }

    /// The redirect URI for `external_prefix:identifier`, if this registry is a resolver.
    pub fn get_resolver_uri(&self, external_prefix: &str, identifier: &str) -> Option<String> {
        if !self.capabilities.resolver {
            return None;
        }
        let format = self.resolver_uri_format.as_deref()?;
        let (head, tail) = format.split_once("$2")?;
        Some(format!(
            "{}{}{}",
            head.replacen("$1", external_prefix, 1),
            identifier,
            tail.replacen("$1", external_prefix, 1)
        ))
    }
}

//////////////////////////////////////////// Metaregistry //////////////////////////////////////////////

/// The set of known external registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metaregistry {
    registries: BTreeMap<String, ExternalRegistry>,
}

impl Default for Metaregistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Metaregistry {
    /// A metaregistry with no entries.
    pub fn empty() -> Self {
        Self {
            registries: BTreeMap::new(),
        }
    }

    /// The built-in descriptors for the registries the resolver links through.
    pub fn builtin() -> Self {
        let mut metaregistry = Self::empty();
        for registry in [
            ExternalRegistry::builtin(
                "miriam",
                "Identifiers.org",
                "https://identifiers.org",
                Some("https://registry.identifiers.org/registry/$1"),
                Some("https://identifiers.org/$1:$2"),
            ),
            ExternalRegistry::builtin(
                "n2t",
                "Name-to-Thing",
                "https://n2t.net",
                None,
                Some("https://n2t.net/$1:$2"),
            ),
            ExternalRegistry::builtin(
                "obofoundry",
                "Open Biological and Biomedical Ontologies",
                "http://www.obofoundry.org",
                Some("http://www.obofoundry.org/ontology/$1"),
                Some("http://purl.obolibrary.org/obo/$1_$2"),
            ),
            ExternalRegistry::builtin(
                "ols",
                "Ontology Lookup Service",
                "https://www.ebi.ac.uk/ols4",
                Some("https://www.ebi.ac.uk/ols4/ontologies/$1"),
                Some("https://www.ebi.ac.uk/ols4/ontologies/$1/terms?iri=$2"),
            ),
            ExternalRegistry::builtin(
                "bioportal",
                "BioPortal",
                "https://bioportal.bioontology.org",
                Some("https://bioportal.bioontology.org/ontologies/$1"),
                Some("https://bioportal.bioontology.org/ontologies/$1/?p=classes&conceptid=$2"),
            ),
            ExternalRegistry::builtin(
                "scholia",
                "Scholia",
                "https://scholia.toolforge.org",
                None,
                Some("https://scholia.toolforge.org/$1/$2"),
            ),
            ExternalRegistry::builtin(
                "bioregistry",
                "Bioregistry",
                "https://bioregistry.io",
                Some("https://bioregistry.io/registry/$1"),
                Some("https://bioregistry.io/$1:$2"),
            ),
        ] {
            metaregistry.insert(registry);
        }
        metaregistry
    }

    /// Parses descriptors from JSON and merges them over the built-ins.
    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        let parsed: BTreeMap<String, ExternalRegistry> = serde_json::from_str(content)?;
        let mut metaregistry = Self::builtin();
        metaregistry.merge(parsed);
        Ok(metaregistry)
    }

    /// Loads descriptors from a JSON or YAML file and merges them over the built-ins.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let parsed: BTreeMap<String, ExternalRegistry> = read_file(path.as_ref())?;
        let mut metaregistry = Self::builtin();
        metaregistry.merge(parsed);
        Ok(metaregistry)
    }

    fn merge(&mut self, entries: BTreeMap<String, ExternalRegistry>) {
        for (prefix, mut registry) in entries {
            registry.prefix = prefix;
            self.insert(registry);
        }
    }

    /// Inserts or replaces a descriptor.
    pub fn insert(&mut self, registry: ExternalRegistry) {
        self.registries.insert(registry.prefix.clone(), registry);
    }

    /// Looks up a descriptor by metaprefix.
    pub fn get(&self, metaprefix: &str) -> Option<&ExternalRegistry> {
        self.registries.get(metaprefix)
    }

    /// Descriptors in sorted metaprefix order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalRegistry> {
        self.registries.values()
    }

    fn require(&self, metaprefix: &str) -> Result<&ExternalRegistry, RegistryError> {
        self.get(metaprefix)
            .ok_or_else(|| RegistryError::UnknownMetaprefix(metaprefix.to_string()))
    }

    /// Landing page of `external_prefix` inside `metaprefix`.
    ///
    /// An unknown metaprefix is a programmer error; a registry without the provider capability
    /// is `Ok(None)`.
    pub fn get_provider_uri(
        &self,
        metaprefix: &str,
        external_prefix: &str,
    ) -> Result<Option<String>, RegistryError> {
        Ok(self.require(metaprefix)?.get_provider_uri(external_prefix))
    }

    /// Redirect URI for `external_prefix:identifier` through `metaprefix`.
    pub fn get_resolver_uri(
        &self,
        metaprefix: &str,
        external_prefix: &str,
        identifier: &str,
    ) -> Result<Option<String>, RegistryError> {
        Ok(self
            .require(metaprefix)?
            .get_resolver_uri(external_prefix, identifier))
    }
}
