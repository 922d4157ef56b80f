//! # Converter
//!
//! Bulk CURIE/IRI conversion over accumulated [`Record`]s, without per-call registry lookups.
//!
//! Prefix lookup is exact (converters are case-sensitive, unlike the registry's synonym index).
//! Compression picks the longest matching URI prefix.
//!
//! ```rust
//! use bioregistry::{Converter, Record};
//!
//! let converter = Converter::new(vec![Record {
//!     prefix: "go".to_string(),
//!     prefix_synonyms: ["GO".to_string()].into_iter().collect(),
//!     uri_prefix: "http://purl.obolibrary.org/obo/GO_".to_string(),
//!     uri_prefix_synonyms: Default::default(),
//!     pattern: None,
//! }]);
//! assert_eq!(
//!     converter.expand("GO:0032571").as_deref(),
//!     Some("http://purl.obolibrary.org/obo/GO_0032571"),
//! );
//! assert_eq!(
//!     converter.compress("http://purl.obolibrary.org/obo/GO_0032571").as_deref(),
//!     Some("go:0032571"),
//! );
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::accumulator::{ConverterOptions, Record, build_records};
use crate::errors::RegistryError;
use crate::manager::Manager;
use crate::reference::{CURIE_SEPARATOR, Reference};

/// A CURIE/IRI converter.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    records: Vec<Record>,
    prefixes: HashMap<String, usize>,
    uri_prefixes: Vec<(String, usize)>,
}

impl Converter {
    /// Indexes `records`.  When two records claim the same string, the earlier one wins.
    pub fn new(records: Vec<Record>) -> Self {
        let mut prefixes: HashMap<String, usize> = HashMap::new();
        let mut uri_prefixes: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            for prefix in std::iter::once(&record.prefix).chain(&record.prefix_synonyms) {
                prefixes.entry(prefix.clone()).or_insert(idx);
            }
            for uri_prefix in std::iter::once(&record.uri_prefix).chain(&record.uri_prefix_synonyms)
            {
                uri_prefixes.entry(uri_prefix.clone()).or_insert(idx);
            }
        }
        let mut uri_prefixes: Vec<(String, usize)> = uri_prefixes.into_iter().collect();
        uri_prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self {
            records,
            prefixes,
            uri_prefixes,
        }
    }

    /// The records, in the order given.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn record_for_prefix(&self, prefix: &str) -> Option<&Record> {
        self.prefixes.get(prefix).map(|idx| &self.records[*idx])
    }

    /// The primary prefix for any prefix or prefix synonym.
    pub fn standardize_prefix(&self, prefix: &str) -> Option<&str> {
        self.record_for_prefix(prefix).map(|r| r.prefix.as_str())
    }

    /// Rewrites a CURIE with its primary prefix.
    pub fn standardize_curie(&self, curie: &str) -> Option<String> {
        let reference = Reference::split(curie, CURIE_SEPARATOR)?;
        let prefix = self.standardize_prefix(&reference.prefix)?;
        Some(format!("{}{}{}", prefix, CURIE_SEPARATOR, reference.identifier))
    }

    /// Expands a CURIE into an IRI using the primary URI prefix.
    pub fn expand(&self, curie: &str) -> Option<String> {
        let reference = Reference::split(curie, CURIE_SEPARATOR)?;
        let record = self.record_for_prefix(&reference.prefix)?;
        Some(format!("{}{}", record.uri_prefix, reference.identifier))
    }

    /// Compresses an IRI into a CURIE using the longest matching URI prefix.
    ///
    /// An IRI that is exactly a URI prefix has no local identifier and does not compress.
    pub fn compress(&self, iri: &str) -> Option<String> {
        let (identifier, idx) = self.uri_prefixes.iter().find_map(|(uri_prefix, idx)| {
            iri.strip_prefix(uri_prefix.as_str())
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest, *idx))
        })?;
        let record = &self.records[idx];
        Some(format!("{}{}{}", record.prefix, CURIE_SEPARATOR, identifier))
    }

    /// Rewrites an IRI with its record's primary URI prefix.
    pub fn standardize_uri(&self, iri: &str) -> Option<String> {
        self.expand(&self.compress(iri)?)
    }

    /// Primary prefix to primary URI prefix.
    pub fn prefix_map(&self) -> BTreeMap<String, String> {
        self.records
            .iter()
            .map(|r| (r.prefix.clone(), r.uri_prefix.clone()))
            .collect()
    }

    /// Every URI prefix, primary or synonym, to its record's primary prefix.
    pub fn reverse_prefix_map(&self) -> BTreeMap<String, String> {
        self.uri_prefixes
            .iter()
            .map(|(uri_prefix, idx)| (uri_prefix.clone(), self.records[*idx].prefix.clone()))
            .collect()
    }
}

impl Manager {
    /// Builds converter records with explicit options.
    pub fn build_converter(
        &self,
        options: &ConverterOptions,
    ) -> Result<Vec<Record>, RegistryError> {
        build_records(self.registry(), options)
    }

    /// Converter records for the configured options, built on first use.
    pub fn records(&self) -> Result<&[Record], RegistryError> {
        if let Some(records) = self.records.get() {
            return Ok(records.as_slice());
        }
        let built = build_records(self.registry(), &self.config().converter)?;
        Ok(self.records.get_or_init(|| built).as_slice())
    }

    /// A converter over [`Manager::records`].
    pub fn get_converter(&self) -> Result<Converter, RegistryError> {
        Ok(Converter::new(self.records()?.to_vec()))
    }
}
