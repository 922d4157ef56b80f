//! # Bioregistry: Prefix and CURIE Resolution for the Life Sciences
//!
//! Biomedical data names things with compact identifiers (CURIEs) such as `CHEBI:24867` or
//! `GO:0032571`.  Every community writes the prefix a little differently (`chebi`, `ChEBI`,
//! `CHEBI`, `ChEBIID`), some repeat the prefix inside the identifier (`GO:GO:0032571`), and
//! every external registry has its own idea of where an identifier resolves to.
//!
//! This crate implements a registry of those namespaces and the operations built over it:
//!
//! - **Prefix normalization**: any synonym, in any case or punctuation, maps to one canonical
//!   prefix through a single synonym index
//! - **CURIE normalization**: redundant namespace embeddings ("bananas") are stripped from
//!   identifiers, so every spelling of a CURIE collapses to one form
//! - **Validation**: identifiers are checked against each resource's regular expression
//! - **Resolution**: a CURIE is turned into URIs at the resource's own site and at every external
//!   resolver that knows the resource, ordered by a configurable priority
//! - **Conversion**: the registry is flattened into non-overlapping prefix/URI-prefix records for
//!   bulk CURIE/IRI expansion and compression
//!
//! ## Core Concepts
//!
//! ### Resources
//! A [`Resource`] is one namespace.  It carries curated fields and one optional mirror block per
//! external registry (MIRIAM, OBO Foundry, OLS, ...).  Every logical value is answered by the
//! curated field first and then the mirrors in a fixed per-field order.
//!
//! ### Registry and Manager
//! A [`Registry`] is the keyed collection of resources as loaded from disk.  A [`Manager`] owns a
//! registry together with its [`Metaregistry`] and [`Config`], and lazily derives the synonym
//! index, compiled patterns, and converter records.  Every mutation drops the derived state.
//!
//! ### Providers
//! A provider is a URI template that resolves identifiers of a resource: the resource's own
//! format, an external resolver such as identifiers.org, or the self-resolver.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ CLI (commands, bioregistry binary)      │
//! ├─────────────────────────────────────────┤
//! │ Manager (normalize, validate, resolve)  │
//! ├─────────────────────────────────────────┤
//! │ Derived state (index, records)          │
//! ├─────────────────────────────────────────┤
//! │ Registry, Metaregistry, Config          │
//! ├─────────────────────────────────────────┤
//! │ Persistence (JSON or YAML files)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ### Normalizing CURIEs
//!
//! ```rust
//! # use bioregistry::{Manager, Registry};
//! let registry = Registry::from_json(r#"{
//!     "go": {
//!         "pattern": "^\\d{7}$",
//!         "uri_format": "http://purl.obolibrary.org/obo/GO_$1",
//!         "obofoundry": {"preferredPrefix": "GO"}
//!     }
//! }"#).unwrap();
//! let manager = Manager::new(registry);
//!
//! assert_eq!(manager.normalize_prefix("GO"), Some("go"));
//! assert_eq!(
//!     manager.normalize_curie_string("GO:GO:0032571").as_deref(),
//!     Some("go:0032571"),
//! );
//! assert!(manager.is_standardizable_curie("GO:0032571"));
//! ```
//!
//! ### Resolving CURIEs
//!
//! ```rust
//! # use bioregistry::{IriOptions, Manager, Registry};
//! let registry = Registry::from_json(r#"{
//!     "pubmed": {
//!         "uri_format": "https://pubmed.ncbi.nlm.nih.gov/$1",
//!         "synonyms": ["pmid"]
//!     }
//! }"#).unwrap();
//! let manager = Manager::new(registry);
//!
//! let providers = manager.get_providers("PMID", "1234");
//! assert_eq!(providers["default"], "https://pubmed.ncbi.nlm.nih.gov/1234");
//! assert_eq!(providers["bioregistry"], "https://bioregistry.io/pubmed:1234");
//!
//! let iri = manager.get_iri("pmid:1234", None, &IriOptions::default());
//! assert_eq!(iri.as_deref(), Some("https://pubmed.ncbi.nlm.nih.gov/1234"));
//! ```
//!
//! ### Bulk Conversion
//!
//! ```rust
//! # use bioregistry::{Manager, Registry};
//! let registry = Registry::from_json(r#"{
//!     "pubmed": {"uri_format": "https://pubmed.ncbi.nlm.nih.gov/$1"}
//! }"#).unwrap();
//! let manager = Manager::new(registry);
//! let converter = manager.get_converter().unwrap();
//!
//! assert_eq!(
//!     converter.compress("http://pubmed.ncbi.nlm.nih.gov/1234").as_deref(),
//!     Some("pubmed:1234"),
//! );
//! ```

mod accumulator;
mod config;
mod converter;
mod errors;
mod index;
mod manager;
mod metaprefix;
mod metaregistry;
mod norm;
mod normalize;
mod reference;
mod registry;
mod resolve;
mod resource;
mod test_utils;
mod validate;

/// Typed records for the external registries mirrored inside each resource.
pub mod mirror;

// CLI utility modules

/// Command-line interface utilities for program termination and output formatting.
///
/// This module provides common CLI utilities for the bioregistry binary, including
/// error handling, formatted output, and program termination functions.
pub mod cli_utils;

/// Command-line interface command handlers.
///
/// This module contains organized command handlers for the bioregistry CLI application,
/// with each command group implemented in a dedicated submodule.
pub mod commands;

pub use accumulator::{ConverterOptions, Record, build_records, swap_scheme};
pub use config::{Config, DEFAULT_BASE_URL, LINK_PRIORITY};
pub use converter::Converter;
pub use errors::RegistryError;
pub use index::{MAPPED_PREFIX_SOURCES, RegistryIndex};
pub use manager::Manager;
pub use metaprefix::{Metaprefix, MirrorField, UnknownMetaprefix};
pub use metaregistry::{Capabilities, ExternalRegistry, Metaregistry};
pub use norm::{IGNORED_CHARACTERS, NormMap, norm};
pub use normalize::strip_identifier;
pub use reference::{CURIE_SEPARATOR, Reference};
pub use registry::{FileFormat, Registry, parse_str, read_file, to_string};
pub use resolve::{BIOREGISTRY_PROVIDER, CUSTOM_PROVIDER, IriOptions};
pub use resource::{
    Contact, DEFAULT_BANANA_PEEL, OBO_PURL_BASE, PREFIX_PRIORITY, Provider, RESOLVER_HOSTS,
    Resource, URI_FORMAT_PRIORITY, URI_TOKEN, clean_pattern, format_uri, uri_prefix_of,
};
pub use validate::LintIssue;
