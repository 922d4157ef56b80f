//! # Provider resolution
//!
//! Turns a CURIE into URIs.  Each provider is tried in a fixed order:
//!
//! | code | URI |
//! |---|---|
//! | `default` | the resource's own URI format |
//! | `miriam` | Identifiers.org |
//! | `obofoundry` | OBO PURL built from the preferred prefix |
//! | `ols` | OLS term page for the OBO PURL |
//! | `n2t` | Name-to-Thing |
//! | `bioportal` | BioPortal class page for the OBO PURL |
//! | `scholia` | Scholia, for resources mapped to it |
//! | *extra* | providers declared on the resource, unless their code is already taken |
//!
//! When at least one of these succeeds the self-resolver link (`bioregistry`) is inserted right
//! after `default` if that came first, or at the front otherwise.  A CURIE no provider can
//! handle gets no links at all.

use std::collections::BTreeMap;

use crate::errors::RegistryError;
use crate::manager::Manager;
use crate::reference::Reference;
use crate::resource::Resource;

/// Provider code for the self-resolver.
pub const BIOREGISTRY_PROVIDER: &str = "bioregistry";

/// Provider code for a caller-supplied prefix map.
pub const CUSTOM_PROVIDER: &str = "custom";

/// Options for [`Manager::get_iri`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriOptions {
    /// Provider codes to try in order; `None` uses the configured link priority.
    pub priority: Option<Vec<String>>,
    /// Canonical prefix to URI prefix, offered under the `custom` code.
    pub prefix_map: Option<BTreeMap<String, String>>,
    /// Whether the self-resolver may be chosen.
    pub use_bioregistry_io: bool,
    /// Return exactly this provider's URI, ignoring priority.
    pub provider: Option<String>,
}

impl Default for IriOptions {
    fn default() -> Self {
        Self {
            priority: None,
            prefix_map: None,
            use_bioregistry_io: true,
            provider: None,
        }
    }
}

fn encode(iri: &str) -> String {
    url::form_urlencoded::byte_serialize(iri.as_bytes()).collect()
}

impl Manager {
    fn resolver_link(
        &self,
        metaprefix: &str,
        external_prefix: &str,
        identifier: &str,
    ) -> Option<String> {
        match self
            .metaregistry()
            .get_resolver_uri(metaprefix, external_prefix, identifier)
        {
            Ok(uri) => uri,
            Err(err) => {
                tracing::debug!("{}", err);
                None
            }
        }
    }

    /// The resource's own URI for `identifier`.
    pub fn get_default_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        resource.get_default_uri(identifier)
    }

    /// The Identifiers.org URI.
    ///
    /// Namespaces embedded in local identifiers are written with the banana (or the uppercased
    /// prefix) in front, the way Identifiers.org expects them.
    pub fn get_miriam_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let miriam = resource.get_mapped_prefix("miriam")?;
        let external = if resource.get_namespace_in_lui() == Some(true) {
            resource
                .get_banana()
                .unwrap_or_else(|| miriam.to_uppercase())
        } else {
            miriam.to_string()
        };
        self.resolver_link("miriam", &external, identifier)
    }

    /// The OBO PURL.
    pub fn get_obofoundry_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let preferred = resource.get_obo_preferred_prefix()?;
        self.resolver_link("obofoundry", &preferred, identifier)
    }

    /// The OLS term page, which embeds the percent-encoded OBO PURL.
    pub fn get_ols_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let ols = resource.get_mapped_prefix("ols")?;
        let purl = self.get_obofoundry_iri(resource, identifier)?;
        self.resolver_link("ols", ols, &encode(&purl))
    }

    /// The Name-to-Thing URI.
    pub fn get_n2t_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let n2t = resource.get_mapped_prefix("n2t")?;
        self.resolver_link("n2t", n2t, identifier)
    }

    /// The BioPortal class page, which embeds the percent-encoded OBO PURL.
    pub fn get_bioportal_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let bioportal = resource.get_mapped_prefix("bioportal")?;
        let purl = self.get_obofoundry_iri(resource, identifier)?;
        self.resolver_link("bioportal", bioportal, &encode(&purl))
    }

    /// The Scholia page, for resources mapped to a Wikidata property in Scholia.
    pub fn get_scholia_iri(&self, resource: &Resource, identifier: &str) -> Option<String> {
        let scholia = resource.get_mapped_prefix("scholia")?;
        self.resolver_link("scholia", scholia, identifier)
    }

    /// The self-resolver URI, `{base_url}/{prefix}:{identifier}`.
    pub fn get_bioregistry_iri(&self, prefix: &str, identifier: &str) -> Option<String> {
        let reference = self.normalize_parsed_curie(prefix, identifier)?;
        Some(format!("{}/{}", self.config().base_url(), reference.curie()))
    }

    /// Every `(provider code, URI)` pair for a CURIE, in presentation order.
    pub fn get_providers_list(&self, prefix: &str, identifier: &str) -> Vec<(String, String)> {
        let Some(reference) = self.normalize_parsed_curie(prefix, identifier) else {
            return Vec::new();
        };
        let Some(resource) = self.registry().get(&reference.prefix) else {
            return Vec::new();
        };
        let identifier = reference.identifier.as_str();

        type ProviderFn = fn(&Manager, &Resource, &str) -> Option<String>;
        let builtins: [(&str, ProviderFn); 7] = [
            ("default", Manager::get_default_iri),
            ("miriam", Manager::get_miriam_iri),
            ("obofoundry", Manager::get_obofoundry_iri),
            ("ols", Manager::get_ols_iri),
            ("n2t", Manager::get_n2t_iri),
            ("bioportal", Manager::get_bioportal_iri),
            ("scholia", Manager::get_scholia_iri),
        ];
        let mut providers: Vec<(String, String)> = builtins
            .iter()
            .filter_map(|(code, provider)| {
                provider(self, resource, identifier).map(|uri| (code.to_string(), uri))
            })
            .collect();
        for extra in &resource.providers {
            let reserved = builtins.iter().any(|(code, _)| *code == extra.code)
                || extra.code == BIOREGISTRY_PROVIDER
                || extra.code == CUSTOM_PROVIDER
                || providers.iter().any(|(code, _)| *code == extra.code);
            if reserved {
                tracing::debug!(
                    prefix = %resource.prefix,
                    code = %extra.code,
                    "provider code already taken; skipping"
                );
                continue;
            }
            if let Some(uri) = extra.resolve(identifier) {
                providers.push((extra.code.clone(), uri));
            }
        }

        if providers.is_empty() {
            return providers;
        }
        let self_link = format!("{}/{}", self.config().base_url(), reference.curie());
        let position = if providers[0].0 == "default" { 1 } else { 0 };
        providers.insert(position, (BIOREGISTRY_PROVIDER.to_string(), self_link));
        providers
    }

    /// Every provider URI for a CURIE, keyed by provider code.
    pub fn get_providers(&self, prefix: &str, identifier: &str) -> BTreeMap<String, String> {
        let mut providers = BTreeMap::new();
        for (code, uri) in self.get_providers_list(prefix, identifier) {
            providers.entry(code).or_insert(uri);
        }
        providers
    }

    /// The link to `prefix` inside the external registry `metaprefix`.
    pub fn get_registry_uri(
        &self,
        metaprefix: &str,
        prefix: &str,
    ) -> Result<Option<String>, RegistryError> {
        let Some(resource) = self.get_resource(prefix) else {
            return Ok(None);
        };
        let Some(external) = resource.get_mapped_prefix(metaprefix) else {
            // Still report unknown metaprefixes.
            self.metaregistry().get_provider_uri(metaprefix, "")?;
            return Ok(None);
        };
        self.metaregistry().get_provider_uri(metaprefix, external)
    }

    /// [`IriOptions`] reflecting the configuration.
    pub fn default_iri_options(&self) -> IriOptions {
        IriOptions {
            priority: Some(self.config().link_priority.clone()),
            use_bioregistry_io: self.config().use_bioregistry_io,
            ..Default::default()
        }
    }

    /// The single best IRI for a CURIE.
    ///
    /// With `identifier` set, `prefix_or_curie` is a prefix; otherwise it is parsed as a CURIE.
    ///
    /// ```rust
    /// use bioregistry::{IriOptions, Manager, Registry};
    ///
    /// let registry = Registry::from_json(r#"{
    ///     "pubmed": {"uri_format": "https://pubmed.ncbi.nlm.nih.gov/$1"}
    /// }"#).unwrap();
    /// let manager = Manager::new(registry);
    /// assert_eq!(
    ///     manager.get_iri("pubmed:1234", None, &IriOptions::default()).as_deref(),
    ///     Some("https://pubmed.ncbi.nlm.nih.gov/1234"),
    /// );
    /// ```
    pub fn get_iri(
        &self,
        prefix_or_curie: &str,
        identifier: Option<&str>,
        options: &IriOptions,
    ) -> Option<String> {
        let reference = match identifier {
            Some(identifier) => self.normalize_parsed_curie(prefix_or_curie, identifier)?,
            None => self.parse_curie(prefix_or_curie)?,
        };
        let Reference { prefix, identifier } = reference;

        let mut providers = self.get_providers(&prefix, &identifier);
        if let Some(uri_prefix) = options
            .prefix_map
            .as_ref()
            .and_then(|prefix_map| prefix_map.get(&prefix))
        {
            providers.insert(
                CUSTOM_PROVIDER.to_string(),
                format!("{}{}", uri_prefix, identifier),
            );
        }

        if let Some(provider) = options.provider.as_deref() {
            return providers.remove(provider);
        }

        let priority = options
            .priority
            .as_deref()
            .unwrap_or(&self.config().link_priority);
        for key in priority {
            if key == BIOREGISTRY_PROVIDER && !options.use_bioregistry_io {
                continue;
            }
            if let Some(uri) = providers.remove(key.as_str()) {
                return Some(uri);
            }
        }
        None
    }
}
