//! # Registry index
//!
//! Derived lookup structures over a [`Registry`]:
//!
//! - the synonym table, mapping every canonical prefix, synonym, preferred prefix, and selected
//!   external-registry prefix to its owning canonical prefix;
//! - reverse indices over the `has_canonical`, `provides`, and `part_of` relations.
//!
//! The synonym table is built in passes so that precedence never depends on iteration order
//! across passes: every canonical prefix is claimed before any synonym, and every curated synonym
//! before any external-registry prefix.  Within a pass, resources are visited in sorted prefix
//! order and the first claim wins.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::RegistryError;
use crate::metaprefix::Metaprefix;
use crate::norm::NormMap;
use crate::registry::Registry;

/// External registries whose prefixes are accepted as synonyms when nothing else claims them.
pub const MAPPED_PREFIX_SOURCES: [Metaprefix; 4] = [
    Metaprefix::Miriam,
    Metaprefix::Ols,
    Metaprefix::Obofoundry,
    Metaprefix::Go,
];

/// The synonym table and relation indices for one registry snapshot.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    synonyms: NormMap,
    canonical_for: BTreeMap<String, BTreeSet<String>>,
    provided_by: BTreeMap<String, BTreeSet<String>>,
    has_parts: BTreeMap<String, BTreeSet<String>>,
    conflicts: Vec<RegistryError>,
}

impl RegistryIndex {
    /// Builds the index.
    ///
    /// In strict mode the first conflict is returned as an error.  Otherwise conflicts are logged,
    /// the first claim is kept, and the conflicts are retained for [`RegistryIndex::conflicts`].
    pub fn build(registry: &Registry, strict: bool) -> Result<Self, RegistryError> {
        let mut index = RegistryIndex::default();

        for resource in registry.iter() {
            if let Err(err) = index.synonyms.insert(&resource.prefix, &resource.prefix) {
                let err = match err {
                    RegistryError::SynonymConflict { key, existing, .. } => {
                        RegistryError::DuplicatePrefix {
                            prefix: key,
                            existing,
                        }
                    }
                    other => other,
                };
                index.conflict(err, strict)?;
            }
        }

        for resource in registry.iter() {
            let mut keys: BTreeSet<String> = resource.synonyms.iter().cloned().collect();
            keys.extend(resource.get_preferred_prefix());
            keys.extend(resource.get_obo_preferred_prefix());
            for key in keys {
                if let Err(err) = index.synonyms.insert(&key, &resource.prefix) {
                    index.conflict(err, strict)?;
                }
            }
        }

        for resource in registry.iter() {
            for metaprefix in MAPPED_PREFIX_SOURCES {
                if let Some(mapped) = resource.get_mapped_prefix(metaprefix.as_str())
                    && !index.synonyms.insert_if_absent(mapped, &resource.prefix)
                {
                    tracing::debug!(
                        prefix = %resource.prefix,
                        metaprefix = %metaprefix,
                        mapped,
                        "external prefix already claimed"
                    );
                }
            }
        }

        for resource in registry.iter() {
            if let Some(target) = resource.has_canonical.as_deref() {
                index
                    .canonical_for
                    .entry(target.to_string())
                    .or_default()
                    .insert(resource.prefix.clone());
            }
            if let Some(target) = resource.provides.as_deref() {
                index
                    .provided_by
                    .entry(target.to_string())
                    .or_default()
                    .insert(resource.prefix.clone());
            }
            if let Some(target) = resource.part_of.as_deref() {
                index
                    .has_parts
                    .entry(target.to_string())
                    .or_default()
                    .insert(resource.prefix.clone());
            }
        }

        Ok(index)
    }

    fn conflict(&mut self, err: RegistryError, strict: bool) -> Result<(), RegistryError> {
        if strict {
            return Err(err);
        }
        tracing::warn!("{}; keeping the first mapping", err);
        self.conflicts.push(err);
        Ok(())
    }

    /// The canonical prefix for any prefix-like string, or `None` if nothing claims it.
    pub fn normalize_prefix(&self, raw: &str) -> Option<&str> {
        self.synonyms.get(raw)
    }

    /// The synonym table.
    pub fn synonyms(&self) -> &NormMap {
        &self.synonyms
    }

    /// Resources whose `has_canonical` points at `prefix`.
    pub fn canonical_for(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.canonical_for.get(prefix)
    }

    /// Resources whose `provides` points at `prefix`.
    pub fn provided_by(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.provided_by.get(prefix)
    }

    /// Resources whose `part_of` points at `prefix`.
    pub fn has_parts(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.has_parts.get(prefix)
    }

    /// Conflicts tolerated during a non-strict build, in the order they were found.
    pub fn conflicts(&self) -> &[RegistryError] {
        &self.conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::{MiriamRecord, OboFoundryRecord};
    use crate::resource::Resource;

    fn resource(prefix: &str, synonyms: &[&str]) -> Resource {
        let mut resource = Resource::new(prefix);
        resource.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        resource
    }

    #[test]
    fn synonyms_resolve() {
        let registry = Registry::from_resources([
            resource("ncbitaxon", &["taxonomy", "NCBI_Taxon"]),
            resource("pubmed", &["pmid"]),
        ]);
        let index = RegistryIndex::build(&registry, true).unwrap();
        assert_eq!(index.normalize_prefix("taxonomy"), Some("ncbitaxon"));
        assert_eq!(index.normalize_prefix("NCBITaxon"), Some("ncbitaxon"));
        assert_eq!(index.normalize_prefix("PMID"), Some("pubmed"));
        assert_eq!(index.normalize_prefix("nope"), None);
    }

    #[test]
    fn empty_prefix_never_resolves() {
        let registry = Registry::from_resources([resource("x", &["-", " "])]);
        let index = RegistryIndex::build(&registry, true).unwrap();
        assert_eq!(index.normalize_prefix(""), None);
        assert_eq!(index.normalize_prefix("-"), None);
        assert_eq!(index.normalize_prefix("x"), Some("x"));
    }

    #[test]
    fn canonical_prefix_beats_synonym() {
        // "zzz" sorts after "pubmed" but its canonical prefix is claimed in the first pass.
        let registry = Registry::from_resources([resource("pubmed", &["zzz"]), resource("zzz", &[])]);
        let index = RegistryIndex::build(&registry, false).unwrap();
        assert_eq!(index.normalize_prefix("zzz"), Some("zzz"));
        assert_eq!(index.conflicts().len(), 1);
    }

    #[test]
    fn strict_build_raises_on_conflict() {
        let registry = Registry::from_resources([
            resource("a", &["shared"]),
            resource("b", &["SHARED"]),
        ]);
        let err = RegistryIndex::build(&registry, true).unwrap_err();
        assert_eq!(
            err,
            RegistryError::SynonymConflict {
                key: "SHARED".to_string(),
                existing: "a".to_string(),
                incoming: "b".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_canonical_prefixes() {
        let registry = Registry::from_resources([resource("ec-code", &[]), resource("eccode", &[])]);
        let err = RegistryIndex::build(&registry, true).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePrefix {
                prefix: "eccode".to_string(),
                existing: "ec-code".to_string(),
            }
        );
        let index = RegistryIndex::build(&registry, false).unwrap();
        assert_eq!(index.normalize_prefix("eccode"), Some("ec-code"));
    }

    #[test]
    fn mapped_prefixes_fill_gaps() {
        let mut chebi = Resource::new("chebi");
        chebi.miriam = Some(MiriamRecord {
            prefix: Some("chebi".to_string()),
            ..Default::default()
        });
        chebi.obofoundry = Some(OboFoundryRecord {
            prefix: Some("chebi".to_string()),
            preferred_prefix: Some("CHEBI".to_string()),
            ..Default::default()
        });
        let mut go = Resource::new("go");
        go.mappings.insert("ols".to_string(), "gene_ontology".to_string());
        let registry = Registry::from_resources([chebi, go]);
        let index = RegistryIndex::build(&registry, true).unwrap();
        assert_eq!(index.normalize_prefix("CHEBI"), Some("chebi"));
        assert_eq!(index.normalize_prefix("gene-ontology"), Some("go"));
    }

    #[test]
    fn relation_indices() {
        let mut child = Resource::new("child");
        child.part_of = Some("parent".to_string());
        let mut view = Resource::new("view");
        view.provides = Some("parent".to_string());
        let mut alias = Resource::new("alias");
        alias.has_canonical = Some("parent".to_string());
        let registry = Registry::from_resources([child, view, alias, Resource::new("parent")]);
        let index = RegistryIndex::build(&registry, true).unwrap();
        assert!(index.has_parts("parent").unwrap().contains("child"));
        assert!(index.provided_by("parent").unwrap().contains("view"));
        assert!(index.canonical_for("parent").unwrap().contains("alias"));
        assert!(index.has_parts("child").is_none());
    }
}
