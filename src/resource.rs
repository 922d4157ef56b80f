//! # Resources
//!
//! A [`Resource`] is one namespace: its canonical prefix, the fields curated directly on it, and
//! one optional block per external registry that also describes it (see
//! [`mirror`](crate::mirror)).
//!
//! ## Priority merge
//!
//! Every logical value (name, pattern, URI format, ...) is answered by checking the curated field
//! first and then the mirror blocks in a fixed, per-field order.  The orders differ per field
//! because registries differ in what they are good at: the OBO Foundry has the best ontology
//! names, MIRIAM the best identifier patterns.  The orders are part of the public contract and are
//! exported as constants so that downstream code can reproduce an answer.
//!
//! | accessor | order after the curated field |
//! |---|---|
//! | [`Resource::get_name`] | [`NAME_PRIORITY`] |
//! | [`Resource::get_description`] | [`DESCRIPTION_PRIORITY`] |
//! | [`Resource::get_homepage`] | [`HOMEPAGE_PRIORITY`] |
//! | [`Resource::get_pattern`] | [`PATTERN_PRIORITY`] |
//! | [`Resource::get_example`] | [`EXAMPLE_PRIORITY`] |
//! | [`Resource::get_license`] | [`LICENSE_PRIORITY`] |
//! | [`Resource::get_version`] | [`VERSION_PRIORITY`] |
//! | [`Resource::get_repository`] | [`REPOSITORY_PRIORITY`] |
//! | [`Resource::get_contact`] | [`CONTACT_PRIORITY`] |
//! | [`Resource::get_uri_format`] | [`URI_FORMAT_PRIORITY`] |

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metaprefix::{Metaprefix, MirrorField};
use crate::mirror::{
    BiocontextRecord, BioportalRecord, CellosaurusRecord, FairsharingRecord, GoRecord,
    MiriamRecord, MirrorRef, N2tRecord, NcbiRecord, OboFoundryRecord, OlsRecord,
    PrefixCommonsRecord, Re3dataRecord, WikidataRecord,
};

/// The token in a URI format that is replaced by the local identifier.
pub const URI_TOKEN: &str = "$1";

/// The separator between a banana and the rest of a local identifier, unless overridden.
pub const DEFAULT_BANANA_PEEL: &str = ":";

/// Base of OBO Foundry term PURLs.
pub const OBO_PURL_BASE: &str = "http://purl.obolibrary.org/obo/";

/// URI formats pointing at any of these hosts are resolvers, not providers.
pub const RESOLVER_HOSTS: [&str; 3] = ["identifiers.org", "n2t.net", "purl.bioontology.org"];

/// Name lookup order.
pub const NAME_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Obofoundry,
    Metaprefix::Ols,
    Metaprefix::Wikidata,
    Metaprefix::Go,
    Metaprefix::Ncbi,
    Metaprefix::Bioportal,
    Metaprefix::Miriam,
    Metaprefix::N2t,
    Metaprefix::Cellosaurus,
    Metaprefix::Fairsharing,
    Metaprefix::Re3data,
    Metaprefix::Prefixcommons,
];

/// Description lookup order.
pub const DESCRIPTION_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Miriam,
    Metaprefix::Ols,
    Metaprefix::Obofoundry,
    Metaprefix::Wikidata,
    Metaprefix::Fairsharing,
    Metaprefix::Bioportal,
    Metaprefix::Re3data,
    Metaprefix::Prefixcommons,
    Metaprefix::N2t,
    Metaprefix::Go,
];

/// Homepage lookup order.
pub const HOMEPAGE_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Obofoundry,
    Metaprefix::Ols,
    Metaprefix::Miriam,
    Metaprefix::N2t,
    Metaprefix::Wikidata,
    Metaprefix::Go,
    Metaprefix::Ncbi,
    Metaprefix::Cellosaurus,
    Metaprefix::Prefixcommons,
    Metaprefix::Fairsharing,
    Metaprefix::Re3data,
    Metaprefix::Bioportal,
];

/// Pattern lookup order.
pub const PATTERN_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Miriam,
    Metaprefix::Wikidata,
    Metaprefix::Go,
    Metaprefix::N2t,
    Metaprefix::Prefixcommons,
    Metaprefix::Cellosaurus,
];

/// Example identifier lookup order.
pub const EXAMPLE_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Miriam,
    Metaprefix::N2t,
    Metaprefix::Ncbi,
    Metaprefix::Cellosaurus,
    Metaprefix::Go,
    Metaprefix::Wikidata,
    Metaprefix::Prefixcommons,
];

/// License lookup order.
pub const LICENSE_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Obofoundry,
    Metaprefix::Ols,
    Metaprefix::Fairsharing,
    Metaprefix::Re3data,
    Metaprefix::Bioportal,
];

/// Version lookup order.
pub const VERSION_PRIORITY: &[Metaprefix] = &[Metaprefix::Ols, Metaprefix::Bioportal];

/// Repository lookup order.
pub const REPOSITORY_PRIORITY: &[Metaprefix] = &[Metaprefix::Obofoundry, Metaprefix::Fairsharing];

/// Contact email lookup order.
pub const CONTACT_PRIORITY: &[Metaprefix] = &[
    Metaprefix::Obofoundry,
    Metaprefix::Ols,
    Metaprefix::Fairsharing,
    Metaprefix::Bioportal,
];

/// Contact name lookup order.
pub const CONTACT_NAME_PRIORITY: &[Metaprefix] = &[Metaprefix::Obofoundry];

/// URI format lookup order.
///
/// Besides metaprefixes, two keys are special: `default` is the curated `uri_format` and `rdf`
/// the curated `rdf_uri_format`.  `obofoundry` builds the OBO PURL format from the preferred
/// prefix.
pub const URI_FORMAT_PRIORITY: &[&str] = &[
    "default",
    "miriam",
    "n2t",
    "go",
    "obofoundry",
    "prefixcommons",
    "wikidata",
    "biocontext",
    "cellosaurus",
];

/// Prefix selection order used when no other order is given.
pub const PREFIX_PRIORITY: &[&str] = &["default"];

/////////////////////////////////////////////// Contact ////////////////////////////////////////////////

/// A person responsible for a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ORCID identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    /// GitHub handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/////////////////////////////////////////////// Provider ///////////////////////////////////////////////

/// An additional provider declared directly on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Short code identifying the provider in link listings.
    pub code: String,
    /// Display name.
    pub name: String,
    /// URI format with a single `$1` token.
    pub uri_format: String,
    /// What the provider offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provider homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl Provider {
    /// Substitutes `identifier` into the provider's URI format.
    pub fn resolve(&self, identifier: &str) -> Option<String> {
        format_uri(&self.uri_format, identifier)
    }
}

/////////////////////////////////////////////// Resource ///////////////////////////////////////////////

/// One namespace in the registry: curated fields plus external-registry mirror blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// The canonical prefix.  Filled from the registry key on load.
    #[serde(skip)]
    pub prefix: String,
    /// Curated name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Curated description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Curated homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Curated license.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Curated version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Curated source repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Curated contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// Curated local identifier pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Curated first-party URI format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Curated URI format for RDF serializations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdf_uri_format: Option<String>,
    /// Namespace text redundantly embedded at the start of local identifiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banana: Option<String>,
    /// Separator following the banana.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banana_peel: Option<String>,
    /// Whether the uppercased prefix is embedded in local identifiers upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_in_lui: Option<bool>,
    /// Stylized prefix (e.g. `ChEBI`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_prefix: Option<String>,
    /// Alternate prefixes that normalize to this resource.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub synonyms: BTreeSet<String>,
    /// Free-text keywords.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub keywords: BTreeSet<String>,
    /// Metaprefix to the prefix used by that external registry.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mappings: BTreeMap<String, String>,
    /// Additional providers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
    /// The resource this one is a sub-vocabulary of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<String>,
    /// The resource whose identifiers this one provides an alternative view of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provides: Option<String>,
    /// The canonical resource for the same namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_canonical: Option<String>,
    /// Curated deprecation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Curated example local identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// More example local identifiers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub example_extras: Vec<String>,
    /// MIRIAM mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miriam: Option<MiriamRecord>,
    /// N2T mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n2t: Option<N2tRecord>,
    /// OBO Foundry mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obofoundry: Option<OboFoundryRecord>,
    /// OLS mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ols: Option<OlsRecord>,
    /// Wikidata mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<WikidataRecord>,
    /// GO mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go: Option<GoRecord>,
    /// NCBI mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncbi: Option<NcbiRecord>,
    /// BioPortal mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bioportal: Option<BioportalRecord>,
    /// Prefix Commons mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefixcommons: Option<PrefixCommonsRecord>,
    /// Cellosaurus mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cellosaurus: Option<CellosaurusRecord>,
    /// FAIRsharing mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fairsharing: Option<FairsharingRecord>,
    /// re3data mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re3data: Option<Re3dataRecord>,
    /// BioContext mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biocontext: Option<BiocontextRecord>,
    /// Keys this type does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Resource {
    /// Creates an otherwise empty resource with the given canonical prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// The mirror block for `metaprefix`, if the resource has one.
    pub fn mirror(&self, metaprefix: Metaprefix) -> Option<MirrorRef<'_>> {
        match metaprefix {
            Metaprefix::Miriam => self.miriam.as_ref().map(MirrorRef::Miriam),
            Metaprefix::N2t => self.n2t.as_ref().map(MirrorRef::N2t),
            Metaprefix::Obofoundry => self.obofoundry.as_ref().map(MirrorRef::Obofoundry),
            Metaprefix::Ols => self.ols.as_ref().map(MirrorRef::Ols),
            Metaprefix::Wikidata => self.wikidata.as_ref().map(MirrorRef::Wikidata),
            Metaprefix::Go => self.go.as_ref().map(MirrorRef::Go),
            Metaprefix::Ncbi => self.ncbi.as_ref().map(MirrorRef::Ncbi),
            Metaprefix::Bioportal => self.bioportal.as_ref().map(MirrorRef::Bioportal),
            Metaprefix::Prefixcommons => self.prefixcommons.as_ref().map(MirrorRef::Prefixcommons),
            Metaprefix::Cellosaurus => self.cellosaurus.as_ref().map(MirrorRef::Cellosaurus),
            Metaprefix::Fairsharing => self.fairsharing.as_ref().map(MirrorRef::Fairsharing),
            Metaprefix::Re3data => self.re3data.as_ref().map(MirrorRef::Re3data),
            Metaprefix::Biocontext => self.biocontext.as_ref().map(MirrorRef::Biocontext),
        }
    }

    /// Every mirror block the resource carries, in [`Metaprefix::ALL`] order.
    pub fn mirrors(&self) -> impl Iterator<Item = MirrorRef<'_>> {
        Metaprefix::ALL.into_iter().filter_map(|m| self.mirror(m))
    }

    fn curated(&self, field: MirrorField) -> Option<&str> {
        let value = match field {
            MirrorField::Prefix => Some(self.prefix.as_str()),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            MirrorField::License => self.license.as_deref(),
            MirrorField::Version => self.version.as_deref(),
            MirrorField::Repository => self.repository.as_deref(),
            MirrorField::ContactEmail => self.contact.as_ref().and_then(|c| c.email.as_deref()),
            MirrorField::ContactName => self.contact.as_ref().and_then(|c| c.name.as_deref()),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Returns the first value of `field` from the curated record, then from each mirror in
    /// `metaprefixes` order.
    pub fn get_prefix_key(&self, field: MirrorField, metaprefixes: &[Metaprefix]) -> Option<&str> {
        if let Some(value) = self.curated(field) {
            return Some(value);
        }
        metaprefixes
            .iter()
            .filter_map(|m| self.mirror(*m))
            .find_map(|mirror| mirror.field(field))
    }

    /// The name, per [`NAME_PRIORITY`].
    pub fn get_name(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Name, NAME_PRIORITY)
    }

    /// The description, per [`DESCRIPTION_PRIORITY`].
    pub fn get_description(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Description, DESCRIPTION_PRIORITY)
    }

    /// The homepage, per [`HOMEPAGE_PRIORITY`].
    ///
    /// This does not follow `provides`; the manager's `get_homepage` does.
    pub fn get_homepage(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Homepage, HOMEPAGE_PRIORITY)
    }

    /// The license, per [`LICENSE_PRIORITY`].
    pub fn get_license(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::License, LICENSE_PRIORITY)
    }

    /// The version, per [`VERSION_PRIORITY`].
    pub fn get_version(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Version, VERSION_PRIORITY)
    }

    /// The source repository, per [`REPOSITORY_PRIORITY`].
    pub fn get_repository(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Repository, REPOSITORY_PRIORITY)
    }

    /// The contact email, per [`CONTACT_PRIORITY`].
    pub fn get_contact(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::ContactEmail, CONTACT_PRIORITY)
    }

    /// The contact's name, per [`CONTACT_NAME_PRIORITY`].
    pub fn get_contact_name(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::ContactName, CONTACT_NAME_PRIORITY)
    }

    /// An example local identifier, per [`EXAMPLE_PRIORITY`].
    pub fn get_example(&self) -> Option<&str> {
        self.get_prefix_key(MirrorField::Example, EXAMPLE_PRIORITY)
    }

    /// The primary example followed by the curated extras, without duplicates.
    pub fn get_examples(&self) -> Vec<&str> {
        let mut examples: Vec<&str> = Vec::new();
        for example in self
            .get_example()
            .into_iter()
            .chain(self.example_extras.iter().map(String::as_str))
        {
            if !examples.contains(&example) {
                examples.push(example);
            }
        }
        examples
    }

    /// The cleaned local identifier pattern, per [`PATTERN_PRIORITY`].
    ///
    /// ```rust
    /// use bioregistry::Resource;
    ///
    /// let mut resource = Resource::new("fbbt");
    /// resource.pattern = Some(r"\d{7}?".to_string());
    /// assert_eq!(resource.get_pattern().as_deref(), Some(r"^\d{7}$"));
    /// ```
    pub fn get_pattern(&self) -> Option<String> {
        self.get_prefix_key(MirrorField::Pattern, PATTERN_PRIORITY)
            .map(clean_pattern)
    }

    /// The prefix that `metaprefix` uses for this resource.
    ///
    /// Curated mappings win; otherwise the mirror block's own `prefix` is used.
    pub fn get_mapped_prefix(&self, metaprefix: &str) -> Option<&str> {
        if let Some(mapped) = self.mappings.get(metaprefix) {
            return Some(mapped.as_str());
        }
        let metaprefix: Metaprefix = metaprefix.parse().ok()?;
        self.mirror(metaprefix)?.field(MirrorField::Prefix)
    }

    /// The stylized prefix used in OBO PURLs (e.g. `FBbt`), if the resource is in the OBO
    /// Foundry.
    pub fn get_obo_preferred_prefix(&self) -> Option<String> {
        if let Some(obo) = &self.obofoundry
            && let Some(preferred) = obo.preferred_prefix.as_deref()
            && !preferred.is_empty()
        {
            return Some(preferred.to_string());
        }
        if self.obofoundry.is_none() && !self.mappings.contains_key(Metaprefix::Obofoundry.as_str())
        {
            return None;
        }
        self.get_mapped_prefix(Metaprefix::Obofoundry.as_str())
            .map(str::to_uppercase)
    }

    /// The curated stylized prefix, falling back to the OBO preferred prefix.
    pub fn get_preferred_prefix(&self) -> Option<String> {
        match self.preferred_prefix.as_deref() {
            Some(preferred) if !preferred.is_empty() => Some(preferred.to_string()),
            _ => self.get_obo_preferred_prefix(),
        }
    }

    /// Whether local identifiers embed the uppercased namespace upstream.
    pub fn get_namespace_in_lui(&self) -> Option<bool> {
        self.namespace_in_lui
            .or_else(|| self.miriam.as_ref().and_then(|m| m.namespace_embedded))
    }

    /// The namespace text redundantly embedded at the start of local identifiers.
    ///
    /// An explicit `banana` wins.  An explicit `namespace_in_lui: false` means there is none.
    /// Otherwise OBO Foundry ontologies use their preferred prefix (e.g. `GO` in `GO:0032571`).
    pub fn get_banana(&self) -> Option<String> {
        if let Some(banana) = self.banana.as_deref() {
            return Some(banana.to_string());
        }
        if self.namespace_in_lui == Some(false) {
            return None;
        }
        self.get_obo_preferred_prefix()
    }

    /// The separator following the banana.
    pub fn get_banana_peel(&self) -> &str {
        self.banana_peel.as_deref().unwrap_or(DEFAULT_BANANA_PEEL)
    }

    /// Whether the resource is deprecated.
    ///
    /// A curated flag is authoritative in either direction.  Without one, any mirror marking
    /// the resource deprecated is enough.
    pub fn is_deprecated(&self) -> bool {
        match self.deprecated {
            Some(deprecated) => deprecated,
            None => self.mirrors().any(|mirror| mirror.is_deprecated()),
        }
    }

    /// The prefix chosen by walking `priority`.
    ///
    /// Keys: `default` (the canonical prefix), `preferred` ([`Resource::get_preferred_prefix`]),
    /// `obofoundry` ([`Resource::get_obo_preferred_prefix`]), `upper` (the uppercased canonical
    /// prefix), or any metaprefix (its mapped prefix).  Falls back to the canonical prefix.
    pub fn get_priority_prefix<S: AsRef<str>>(&self, priority: &[S]) -> String {
        for key in priority {
            let candidate = match key.as_ref() {
                "default" => Some(self.prefix.clone()),
                "preferred" => self.get_preferred_prefix(),
                "obofoundry" => self.get_obo_preferred_prefix(),
                "upper" => Some(self.prefix.to_uppercase()),
                metaprefix => self.get_mapped_prefix(metaprefix).map(str::to_string),
            };
            if let Some(candidate) = candidate {
                return candidate;
            }
        }
        self.prefix.clone()
    }

    /// The OBO PURL URI format, e.g. `http://purl.obolibrary.org/obo/GO_$1`.
    pub fn get_obo_uri_format(&self) -> Option<String> {
        let preferred = self.get_obo_preferred_prefix()?;
        Some(format!("{}{}_{}", OBO_PURL_BASE, preferred, URI_TOKEN))
    }

    fn uri_format_candidate(&self, key: &str) -> Option<String> {
        match key {
            "default" => self.uri_format.clone(),
            "rdf" => self.rdf_uri_format.clone(),
            "obofoundry" => self.get_obo_uri_format(),
            other => {
                let metaprefix: Metaprefix = other.parse().ok()?;
                self.mirror(metaprefix)?
                    .field(MirrorField::UriFormat)
                    .map(str::to_string)
            }
        }
    }

    /// The URI format chosen by walking `priority` (default [`URI_FORMAT_PRIORITY`]).
    ///
    /// Candidates that point at a resolver ([`RESOLVER_HOSTS`]) are skipped so that resolving
    /// through this format never loops back through a meta-resolver.  Candidates without
    /// exactly one `$1` token are skipped as unusable.
    pub fn get_uri_format<S: AsRef<str>>(&self, priority: Option<&[S]>) -> Option<String> {
        match priority {
            Some(priority) => self.first_uri_format(priority.iter().map(AsRef::as_ref)),
            None => self.first_uri_format(URI_FORMAT_PRIORITY.iter().copied()),
        }
    }

    fn first_uri_format<'a>(&self, keys: impl Iterator<Item = &'a str>) -> Option<String> {
        for key in keys {
            let Some(candidate) = self.uri_format_candidate(key) else {
                continue;
            };
            if let Some(host) = RESOLVER_HOSTS.iter().find(|h| candidate.contains(*h)) {
                tracing::debug!(
                    prefix = %self.prefix,
                    source = key,
                    uri_format = %candidate,
                    "skipping URI format that points at resolver {}",
                    host
                );
                continue;
            }
            let tokens = candidate.matches(URI_TOKEN).count();
            if tokens != 1 {
                tracing::debug!(
                    prefix = %self.prefix,
                    source = key,
                    uri_format = %candidate,
                    "skipping URI format with {} substitution tokens",
                    tokens
                );
                continue;
            }
            return Some(candidate);
        }
        None
    }

    /// The URI format from [`URI_FORMAT_PRIORITY`].
    pub fn get_default_format(&self) -> Option<String> {
        self.get_uri_format::<&str>(None)
    }

    /// The default URI for `identifier`.
    pub fn get_default_uri(&self, identifier: &str) -> Option<String> {
        format_uri(&self.get_default_format()?, identifier)
    }

    /// The URI prefix derived from [`Resource::get_uri_format`].
    ///
    /// Only formats ending in their single `$1` token can be truncated into a prefix usable for
    /// reverse lookup; for anything else this is `None` even though forward resolution works.
    pub fn get_uri_prefix<S: AsRef<str>>(&self, priority: Option<&[S]>) -> Option<String> {
        let uri_format = self.get_uri_format(priority)?;
        let uri_prefix = uri_prefix_of(&uri_format);
        if uri_prefix.is_none() {
            tracing::debug!(
                prefix = %self.prefix,
                uri_format = %uri_format,
                "URI format does not end with its substitution token"
            );
        }
        uri_prefix
    }

    /// Every URI prefix this resource's identifiers are known under.
    ///
    /// Unlike [`Resource::get_uri_format`] this includes resolver-hosted forms
    /// (Identifiers.org, N2T) because a URI minted there still denotes the same entity.
    pub fn get_uri_prefixes(&self) -> BTreeSet<String> {
        let mut formats: Vec<String> = Vec::new();
        formats.extend(self.uri_format.clone());
        formats.extend(self.rdf_uri_format.clone());
        formats.extend(self.get_obo_uri_format());
        for mirror in self.mirrors() {
            formats.extend(mirror.field(MirrorField::UriFormat).map(str::to_string));
        }
        if let Some(wikidata) = &self.wikidata {
            formats.extend(wikidata.uri_format_rdf.clone());
        }
        for provider in &self.providers {
            formats.push(provider.uri_format.clone());
        }
        if let Some(miriam) = self.get_mapped_prefix(Metaprefix::Miriam.as_str()) {
            formats.push(format!("https://identifiers.org/{}:{}", miriam, URI_TOKEN));
            if self.get_namespace_in_lui() == Some(true) {
                formats.push(format!(
                    "https://identifiers.org/{}:{}",
                    miriam.to_uppercase(),
                    URI_TOKEN
                ));
            }
        }
        if let Some(n2t) = self.get_mapped_prefix(Metaprefix::N2t.as_str()) {
            formats.push(format!("https://n2t.net/{}:{}", n2t, URI_TOKEN));
        }
        formats.iter().filter_map(|f| uri_prefix_of(f)).collect()
    }

    /// Renders a CURIE with the canonical prefix.
    pub fn get_curie(&self, identifier: &str) -> String {
        format!("{}:{}", self.prefix, identifier)
    }

    /// The resource this one folds into for converter construction, with the relation name.
    ///
    /// `has_canonical` outranks `provides`, which outranks `part_of`.
    pub fn parent(&self) -> Option<(&'static str, &str)> {
        if let Some(target) = self.has_canonical.as_deref() {
            return Some(("has_canonical", target));
        }
        if let Some(target) = self.provides.as_deref() {
            return Some(("provides", target));
        }
        self.part_of.as_deref().map(|target| ("part_of", target))
    }
}

////////////////////////////////////////////// Utilities ///////////////////////////////////////////////

/// Cleans a raw regular expression: drops trailing `?` and anchors both ends.
pub fn clean_pattern(raw: &str) -> String {
    let mut pattern = raw.trim().trim_end_matches('?').to_string();
    if !pattern.starts_with('^') {
        pattern.insert(0, '^');
    }
    if !pattern.ends_with('$') {
        pattern.push('$');
    }
    pattern
}

/// Substitutes `identifier` for the single `$1` token of `uri_format`.
pub fn format_uri(uri_format: &str, identifier: &str) -> Option<String> {
    if uri_format.matches(URI_TOKEN).count() != 1 {
        return None;
    }
    Some(uri_format.replacen(URI_TOKEN, identifier, 1))
}

/// Truncates a URI format to its URI prefix when it ends with its only `$1` token.
pub fn uri_prefix_of(uri_format: &str) -> Option<String> {
    if uri_format.matches(URI_TOKEN).count() != 1 {
        return None;
    }
    uri_format
        .strip_suffix(URI_TOKEN)
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go() -> Resource {
        let mut resource = Resource::new("go");
        resource.obofoundry = Some(OboFoundryRecord {
            prefix: Some("go".to_string()),
            preferred_prefix: Some("GO".to_string()),
            name: Some("Gene Ontology".to_string()),
            ..Default::default()
        });
        resource.miriam = Some(MiriamRecord {
            prefix: Some("go".to_string()),
            name: Some("Gene Ontology (MIRIAM)".to_string()),
            pattern: Some(r"^GO:\d{7}$".to_string()),
            uri_format: Some("http://amigo.geneontology.org/amigo/term/GO:$1".to_string()),
            namespace_embedded: Some(true),
            ..Default::default()
        });
        resource
    }

    #[test]
    fn curated_field_wins() {
        let mut resource = go();
        resource.name = Some("GO".to_string());
        assert_eq!(resource.get_name(), Some("GO"));
    }

    #[test]
    fn name_prefers_obofoundry_over_miriam() {
        assert_eq!(go().get_name(), Some("Gene Ontology"));
    }

    #[test]
    fn get_prefix_key_respects_given_order() {
        let resource = go();
        assert_eq!(
            resource.get_prefix_key(MirrorField::Name, &[Metaprefix::Miriam, Metaprefix::Obofoundry]),
            Some("Gene Ontology (MIRIAM)")
        );
        assert_eq!(
            resource.get_prefix_key(MirrorField::Name, &[Metaprefix::Wikidata]),
            None
        );
    }

    #[test]
    fn pattern_prefers_miriam_over_wikidata() {
        let mut resource = go();
        resource.wikidata = Some(WikidataRecord {
            pattern: Some(r"\d{7}".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_pattern().as_deref(), Some(r"^GO:\d{7}$"));
    }

    #[test]
    fn clean_pattern_anchors() {
        assert_eq!(clean_pattern(r"\d+"), r"^\d+$");
        assert_eq!(clean_pattern(r"^\d+$"), r"^\d+$");
        assert_eq!(clean_pattern(r"^\d+??"), r"^\d+$");
    }

    #[test]
    fn banana_from_obo_preferred_prefix() {
        assert_eq!(go().get_banana().as_deref(), Some("GO"));
    }

    #[test]
    fn banana_from_uppercased_obo_prefix() {
        let mut resource = Resource::new("uberon");
        resource.obofoundry = Some(OboFoundryRecord {
            prefix: Some("uberon".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_banana().as_deref(), Some("UBERON"));
    }

    #[test]
    fn explicit_banana_wins() {
        let mut resource = go();
        resource.banana = Some("GOBANANA".to_string());
        assert_eq!(resource.get_banana().as_deref(), Some("GOBANANA"));
    }

    #[test]
    fn namespace_not_in_lui_means_no_banana() {
        let mut resource = go();
        resource.namespace_in_lui = Some(false);
        assert_eq!(resource.get_banana(), None);
    }

    #[test]
    fn no_obo_no_banana() {
        assert_eq!(Resource::new("pubmed").get_banana(), None);
    }

    #[test]
    fn uri_format_skips_resolvers() {
        let mut resource = Resource::new("example");
        resource.miriam = Some(MiriamRecord {
            uri_format: Some("https://identifiers.org/example:$1".to_string()),
            ..Default::default()
        });
        resource.wikidata = Some(WikidataRecord {
            uri_format: Some("https://example.org/entry/$1".to_string()),
            ..Default::default()
        });
        assert_eq!(
            resource.get_default_format().as_deref(),
            Some("https://example.org/entry/$1")
        );
    }

    #[test]
    fn uri_format_skips_every_resolver_host() {
        for resolver in [
            "https://identifiers.org/example:$1",
            "https://n2t.net/example:$1",
            "http://purl.bioontology.org/ontology/EXAMPLE/$1",
        ] {
            let mut resource = Resource::new("example");
            resource.miriam = Some(MiriamRecord {
                uri_format: Some(resolver.to_string()),
                ..Default::default()
            });
            resource.wikidata = Some(WikidataRecord {
                uri_format: Some("https://example.org/entry/$1".to_string()),
                ..Default::default()
            });
            assert_eq!(
                resource.get_default_format().as_deref(),
                Some("https://example.org/entry/$1"),
                "{}",
                resolver
            );
            resource.wikidata = None;
            assert_eq!(resource.get_default_format(), None, "{}", resolver);
        }
    }

    #[test]
    fn description_order() {
        let mut resource = Resource::new("example");
        resource.obofoundry = Some(OboFoundryRecord {
            description: Some("from obofoundry".to_string()),
            ..Default::default()
        });
        resource.ols = Some(OlsRecord {
            description: Some("from ols".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_description(), Some("from ols"));
        resource.miriam = Some(MiriamRecord {
            description: Some("from miriam".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_description(), Some("from miriam"));
    }

    #[test]
    fn license_order() {
        let mut resource = Resource::new("example");
        resource.bioportal = Some(BioportalRecord {
            license: Some("from bioportal".to_string()),
            ..Default::default()
        });
        resource.re3data = Some(Re3dataRecord {
            license: Some("from re3data".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_license(), Some("from re3data"));
        resource.fairsharing = Some(FairsharingRecord {
            license: Some("from fairsharing".to_string()),
            ..Default::default()
        });
        resource.ols = Some(OlsRecord {
            license: Some("from ols".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_license(), Some("from ols"));
        resource.obofoundry = Some(OboFoundryRecord {
            license: Some("from obofoundry".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_license(), Some("from obofoundry"));
    }

    #[test]
    fn version_order() {
        let mut resource = Resource::new("example");
        resource.bioportal = Some(BioportalRecord {
            version: Some("2.0".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_version(), Some("2.0"));
        resource.ols = Some(OlsRecord {
            version: Some("1.0".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_version(), Some("1.0"));
    }

    #[test]
    fn repository_order() {
        let mut resource = Resource::new("example");
        resource.fairsharing = Some(FairsharingRecord {
            repository: Some("https://fairsharing.example/repo".to_string()),
            ..Default::default()
        });
        assert_eq!(
            resource.get_repository(),
            Some("https://fairsharing.example/repo")
        );
        resource.obofoundry = Some(OboFoundryRecord {
            repository: Some("https://github.com/example/example".to_string()),
            ..Default::default()
        });
        assert_eq!(
            resource.get_repository(),
            Some("https://github.com/example/example")
        );
    }

    #[test]
    fn contact_order() {
        let mut resource = Resource::new("example");
        resource.bioportal = Some(BioportalRecord {
            contact: Some("bioportal@example.org".to_string()),
            ..Default::default()
        });
        resource.fairsharing = Some(FairsharingRecord {
            contact: Some("fairsharing@example.org".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_contact(), Some("fairsharing@example.org"));
        resource.ols = Some(OlsRecord {
            contact: Some("ols@example.org".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_contact(), Some("ols@example.org"));
        resource.obofoundry = Some(OboFoundryRecord {
            contact: Some("obo@example.org".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_contact(), Some("obo@example.org"));
    }

    #[test]
    fn contact_name_only_from_obofoundry() {
        let mut resource = Resource::new("example");
        resource.ols = Some(OlsRecord {
            contact: Some("ols@example.org".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_contact_name(), None);
        resource.obofoundry = Some(OboFoundryRecord {
            contact: Some("obo@example.org".to_string()),
            contact_label: Some("Jo Example".to_string()),
            ..Default::default()
        });
        assert_eq!(resource.get_contact_name(), Some("Jo Example"));
        assert_eq!(resource.get_contact(), Some("obo@example.org"));
    }

    #[test]
    fn uri_format_skips_multiple_tokens() {
        let mut resource = Resource::new("example");
        resource.uri_format = Some("https://example.org/$1/$1".to_string());
        assert_eq!(resource.get_default_format(), None);
    }

    #[test]
    fn uri_format_custom_priority() {
        let resource = go();
        assert_eq!(
            resource.get_uri_format(Some(&["obofoundry", "miriam"])).as_deref(),
            Some("http://purl.obolibrary.org/obo/GO_$1")
        );
        assert_eq!(
            resource.get_default_format().as_deref(),
            Some("http://amigo.geneontology.org/amigo/term/GO:$1")
        );
    }

    #[test]
    fn uri_prefix_requires_trailing_token() {
        let mut resource = Resource::new("example");
        resource.uri_format = Some("https://example.org/$1/view".to_string());
        assert_eq!(resource.get_uri_prefix::<&str>(None), None);
        resource.uri_format = Some("https://example.org/$1".to_string());
        assert_eq!(
            resource.get_uri_prefix::<&str>(None).as_deref(),
            Some("https://example.org/")
        );
    }

    #[test]
    fn uri_prefixes_cover_all_sources() {
        let prefixes = go().get_uri_prefixes();
        assert!(prefixes.contains("http://purl.obolibrary.org/obo/GO_"));
        assert!(prefixes.contains("http://amigo.geneontology.org/amigo/term/GO:"));
        assert!(prefixes.contains("https://identifiers.org/go:"));
        assert!(prefixes.contains("https://identifiers.org/GO:"));
    }

    #[test]
    fn deprecation_curated_overrides_mirrors() {
        let mut resource = go();
        resource.ols = Some(OlsRecord {
            deprecated: Some(true),
            ..Default::default()
        });
        assert!(resource.is_deprecated());
        resource.deprecated = Some(false);
        assert!(!resource.is_deprecated());
    }

    #[test]
    fn priority_prefix() {
        let mut resource = go();
        resource.preferred_prefix = Some("GeneOntology".to_string());
        assert_eq!(resource.get_priority_prefix(&["default"]), "go");
        assert_eq!(resource.get_priority_prefix(&["preferred"]), "GeneOntology");
        assert_eq!(resource.get_priority_prefix(&["obofoundry"]), "GO");
        assert_eq!(resource.get_priority_prefix(&["wikidata", "upper"]), "GO");
        assert_eq!(resource.get_priority_prefix::<&str>(&[]), "go");
    }

    #[test]
    fn examples_are_deduplicated() {
        let mut resource = Resource::new("example");
        resource.example = Some("1".to_string());
        resource.example_extras = vec!["2".to_string(), "1".to_string()];
        assert_eq!(resource.get_examples(), vec!["1", "2"]);
    }

    #[test]
    fn mapped_prefix_falls_back_to_mirror() {
        let mut resource = go();
        assert_eq!(resource.get_mapped_prefix("miriam"), Some("go"));
        resource
            .mappings
            .insert("miriam".to_string(), "GO".to_string());
        assert_eq!(resource.get_mapped_prefix("miriam"), Some("GO"));
        assert_eq!(resource.get_mapped_prefix("scholia"), None);
    }

    #[test]
    fn parent_relation_order() {
        let mut resource = Resource::new("child");
        resource.part_of = Some("a".to_string());
        resource.provides = Some("b".to_string());
        assert_eq!(resource.parent(), Some(("provides", "b")));
        resource.has_canonical = Some("c".to_string());
        assert_eq!(resource.parent(), Some(("has_canonical", "c")));
    }

    #[test]
    fn format_helpers() {
        assert_eq!(
            format_uri("https://example.org/$1", "42").as_deref(),
            Some("https://example.org/42")
        );
        assert_eq!(format_uri("https://example.org/", "42"), None);
        assert_eq!(uri_prefix_of("$1"), None);
    }
}
