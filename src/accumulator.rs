//! # Record accumulator
//!
//! Flattens the whole registry into one collision-checked list of converter [`Record`]s.
//!
//! Resources without a `part_of`, `provides`, or `has_canonical` relation are *primary*.  Each
//! primary claims a prefix and a URI prefix; a claim that collides with an earlier one is
//! skipped, so in sorted prefix order the first resource wins.  Once every primary has its
//! identity, a second pass registers synonyms (alternate prefixes, alternate URI prefixes,
//! http/https swaps) for each, again first-come first-served.
//!
//! *Secondary* resources fold into their target instead of producing their own record:
//!
//! - `provides` and `has_canonical` fold into their target, and are dropped when the target has
//!   no record;
//! - `part_of` folds only when the child shares URI space with the parent, otherwise the child
//!   is claimed alongside the primaries in sorted order.
//!
//! In strict mode every collision is an error instead of a warning.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::registry::Registry;
use crate::resource::{PREFIX_PRIORITY, Resource};

/// Options for building converter records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Keys for [`Resource::get_priority_prefix`] when choosing each record's prefix.
    pub prefix_priority: Vec<String>,
    /// Keys for [`Resource::get_uri_prefix`]; `None` uses the resource default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_prefix_priority: Option<Vec<String>>,
    /// Fail on the first collision instead of skipping it.
    pub strict: bool,
    /// URI prefixes that are never registered.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub blacklist: BTreeSet<String>,
    /// Register `prefix:` for every prefix as a URI prefix synonym.
    pub include_prefixes: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            prefix_priority: PREFIX_PRIORITY.iter().map(|s| s.to_string()).collect(),
            uri_prefix_priority: None,
            strict: false,
            blacklist: BTreeSet::new(),
            include_prefixes: false,
        }
    }
}

/// One namespace in a converter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Record {
    /// Primary prefix.
    pub prefix: String,
    /// Other prefixes that expand the same way.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub prefix_synonyms: BTreeSet<String>,
    /// Primary URI prefix.
    pub uri_prefix: String,
    /// Other URI prefixes that compress to this record.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub uri_prefix_synonyms: BTreeSet<String>,
    /// Local identifier pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Swaps `http://` and `https://`.
pub fn swap_scheme(uri_prefix: &str) -> Option<String> {
    if let Some(rest) = uri_prefix.strip_prefix("https://") {
        Some(format!("http://{}", rest))
    } else {
        uri_prefix
            .strip_prefix("http://")
            .map(|rest| format!("https://{}", rest))
    }
}

fn relation_rank(relation: &str) -> u8 {
    match relation {
        "part_of" => 0,
        "provides" => 1,
        _ => 2,
    }
}

struct Accumulator<'a> {
    options: &'a ConverterOptions,
    records: BTreeMap<String, Record>,
    prefix_owner: HashMap<String, String>,
    uri_owner: HashMap<String, String>,
    folded_into: HashMap<String, String>,
}

impl<'a> Accumulator<'a> {
    fn new(options: &'a ConverterOptions) -> Self {
        Self {
            options,
            records: BTreeMap::new(),
            prefix_owner: HashMap::new(),
            uri_owner: HashMap::new(),
            folded_into: HashMap::new(),
        }
    }

    fn collision(&self, err: RegistryError) -> Result<(), RegistryError> {
        if self.options.strict {
            return Err(err);
        }
        tracing::warn!("{}; keeping the first claim", err);
        Ok(())
    }

    /// Claims the resource's primary identity.  Returns whether it now owns a record.
    fn claim_primary(&mut self, resource: &Resource) -> Result<bool, RegistryError> {
        let prefix = resource.get_priority_prefix(&self.options.prefix_priority);
        let Some(uri_prefix) = resource.get_uri_prefix(self.options.uri_prefix_priority.as_deref())
        else {
            tracing::debug!(prefix = %resource.prefix, "no URI prefix; no converter record");
            return Ok(false);
        };
        if self.options.blacklist.contains(&uri_prefix) {
            tracing::debug!(
                prefix = %resource.prefix,
                uri_prefix = %uri_prefix,
                "URI prefix is blacklisted"
            );
            return Ok(false);
        }
        if let Some(existing) = self.prefix_owner.get(&prefix) {
            let err = RegistryError::PrefixCollision {
                prefix,
                existing: existing.clone(),
                incoming: resource.prefix.clone(),
            };
            self.collision(err)?;
            return Ok(false);
        }
        if let Some(existing) = self.uri_owner.get(&uri_prefix) {
            let err = RegistryError::UriPrefixCollision {
                uri_prefix,
                existing: existing.clone(),
                incoming: resource.prefix.clone(),
            };
            self.collision(err)?;
            return Ok(false);
        }
        self.prefix_owner
            .insert(prefix.clone(), resource.prefix.clone());
        self.uri_owner
            .insert(uri_prefix.clone(), resource.prefix.clone());
        self.records.insert(
            resource.prefix.clone(),
            Record {
                prefix,
                prefix_synonyms: BTreeSet::new(),
                uri_prefix,
                uri_prefix_synonyms: BTreeSet::new(),
                pattern: resource.get_pattern(),
            },
        );
        Ok(true)
    }

    /// Adds `resource`'s prefixes and URI prefixes as synonyms of the record owned by `owner`.
    fn register_synonyms(&mut self, owner: &str, resource: &Resource) -> Result<(), RegistryError> {
        let mut prefixes: BTreeSet<String> = BTreeSet::new();
        prefixes.insert(resource.prefix.clone());
        prefixes.extend(resource.get_preferred_prefix());
        prefixes.extend(resource.get_obo_preferred_prefix());
        prefixes.extend(resource.synonyms.iter().cloned());

        let mut uri_prefixes = resource.get_uri_prefixes();
        uri_prefixes.extend(resource.get_uri_prefix(self.options.uri_prefix_priority.as_deref()));
        let swapped: Vec<String> = uri_prefixes.iter().filter_map(|u| swap_scheme(u)).collect();
        uri_prefixes.extend(swapped);
        if self.options.include_prefixes {
            let compact: Vec<String> = prefixes.iter().map(|p| format!("{}:", p)).collect();
            uri_prefixes.extend(compact);
        }

        for prefix in prefixes {
            match self.prefix_owner.get(&prefix) {
                Some(existing) if existing == owner => {}
                Some(existing) => {
                    let err = RegistryError::PrefixCollision {
                        prefix,
                        existing: existing.clone(),
                        incoming: resource.prefix.clone(),
                    };
                    self.collision(err)?;
                }
                None => {
                    self.prefix_owner.insert(prefix.clone(), owner.to_string());
                    if let Some(record) = self.records.get_mut(owner) {
                        record.prefix_synonyms.insert(prefix);
                    }
                }
            }
        }

        for uri_prefix in uri_prefixes {
            if self.options.blacklist.contains(&uri_prefix) {
                continue;
            }
            match self.uri_owner.get(&uri_prefix) {
                Some(existing) if existing == owner => {}
                Some(existing) => {
                    let err = RegistryError::UriPrefixCollision {
                        uri_prefix,
                        existing: existing.clone(),
                        incoming: resource.prefix.clone(),
                    };
                    self.collision(err)?;
                }
                None => {
                    self.uri_owner.insert(uri_prefix.clone(), owner.to_string());
                    if let Some(record) = self.records.get_mut(owner) {
                        record.uri_prefix_synonyms.insert(uri_prefix);
                    }
                }
            }
        }
        Ok(())
    }

    /// The record owner a resource's identifiers currently live under.
    fn owner_of(&self, prefix: &str) -> Option<String> {
        if self.records.contains_key(prefix) {
            return Some(prefix.to_string());
        }
        self.folded_into.get(prefix).cloned()
    }

    fn shares_uri_space(&self, owner: &str, child: &Resource) -> bool {
        let Some(record) = self.records.get(owner) else {
            return false;
        };
        child.get_uri_prefixes().iter().any(|uri_prefix| {
            uri_prefix == &record.uri_prefix
                || record.uri_prefix_synonyms.contains(uri_prefix)
                || uri_prefix.starts_with(&record.uri_prefix)
        })
    }

    fn add_secondary(
        &mut self,
        relation: &str,
        target: &str,
        resource: &Resource,
    ) -> Result<(), RegistryError> {
        match self.owner_of(target) {
            Some(owner) if relation != "part_of" || self.shares_uri_space(&owner, resource) => {
                self.folded_into
                    .insert(resource.prefix.clone(), owner.clone());
                self.register_synonyms(&owner, resource)
            }
            _ if relation == "part_of" => {
                tracing::debug!(
                    prefix = %resource.prefix,
                    target,
                    "not folding into parent; treating as primary"
                );
                if self.claim_primary(resource)? {
                    let owner = resource.prefix.clone();
                    self.register_synonyms(&owner, resource)?;
                }
                Ok(())
            }
            _ => {
                tracing::debug!(
                    prefix = %resource.prefix,
                    relation,
                    target,
                    "target has no converter record; dropping"
                );
                Ok(())
            }
        }
    }

    fn finish(self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.into_values().collect();
        records.sort();
        records
    }
}

/// Whether a `part_of` child could fold into `target`.  Children that cannot are claimed with the
/// primaries so they take part in sorted first-seen-wins.
fn may_fold_into(
    registry: &Registry,
    target: &str,
    child: &Resource,
    options: &ConverterOptions,
) -> bool {
    let Some(parent) = registry.get(target) else {
        return false;
    };
    if parent.parent().is_some() {
        return true;
    }
    let Some(parent_uri_prefix) = parent.get_uri_prefix(options.uri_prefix_priority.as_deref())
    else {
        return false;
    };
    let mut parent_uri_prefixes = parent.get_uri_prefixes();
    let swapped: Vec<String> = parent_uri_prefixes
        .iter()
        .filter_map(|u| swap_scheme(u))
        .collect();
    parent_uri_prefixes.extend(swapped);
    child.get_uri_prefixes().iter().any(|uri_prefix| {
        uri_prefix.starts_with(&parent_uri_prefix) || parent_uri_prefixes.contains(uri_prefix)
    })
}

/// Builds converter records for every resource in `registry`.
pub fn build_records(
    registry: &Registry,
    options: &ConverterOptions,
) -> Result<Vec<Record>, RegistryError> {
    let mut acc = Accumulator::new(options);
    let (primaries, mut secondaries): (Vec<&Resource>, Vec<&Resource>) = registry
        .iter()
        .partition(|r| match r.parent() {
            None => true,
            Some(("part_of", target)) => !may_fold_into(registry, target, r, options),
            Some(_) => false,
        });

    let mut claimed: Vec<&Resource> = Vec::new();
    for resource in primaries {
        if acc.claim_primary(resource)? {
            claimed.push(resource);
        }
    }
    for resource in claimed {
        acc.register_synonyms(&resource.prefix, resource)?;
    }

    secondaries.sort_by_key(|r| {
        let rank = r.parent().map(|(rel, _)| relation_rank(rel)).unwrap_or(u8::MAX);
        (rank, r.prefix.clone())
    });
    for resource in secondaries {
        if let Some((relation, target)) = resource.parent() {
            acc.add_secondary(relation, target, resource)?;
        }
    }
    Ok(acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(prefix: &str, uri_format: &str) -> Resource {
        let mut resource = Resource::new(prefix);
        resource.uri_format = Some(uri_format.to_string());
        resource
    }

    #[test]
    fn swap_scheme_both_ways() {
        assert_eq!(swap_scheme("http://a/").as_deref(), Some("https://a/"));
        assert_eq!(swap_scheme("https://a/").as_deref(), Some("http://a/"));
        assert_eq!(swap_scheme("ftp://a/"), None);
    }

    #[test]
    fn primaries_get_records() {
        let mut pubmed = resource("pubmed", "https://pubmed.ncbi.nlm.nih.gov/$1");
        pubmed.synonyms.insert("pmid".to_string());
        pubmed.pattern = Some(r"^\d+$".to_string());
        let registry = Registry::from_resources([pubmed]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.prefix, "pubmed");
        assert_eq!(record.uri_prefix, "https://pubmed.ncbi.nlm.nih.gov/");
        assert!(record.prefix_synonyms.contains("pmid"));
        assert!(!record.prefix_synonyms.contains("pubmed"));
        assert!(record
            .uri_prefix_synonyms
            .contains("http://pubmed.ncbi.nlm.nih.gov/"));
        assert_eq!(record.pattern.as_deref(), Some(r"^\d+$"));
    }

    #[test]
    fn first_seen_uri_prefix_wins() {
        let registry = Registry::from_resources([
            resource("aaa", "https://shared.example/$1"),
            resource("bbb", "https://shared.example/$1"),
        ]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefix, "aaa");

        let strict = ConverterOptions {
            strict: true,
            ..Default::default()
        };
        let err = build_records(&registry, &strict).unwrap_err();
        assert_eq!(
            err,
            RegistryError::UriPrefixCollision {
                uri_prefix: "https://shared.example/".to_string(),
                existing: "aaa".to_string(),
                incoming: "bbb".to_string(),
            }
        );
    }

    #[test]
    fn provides_folds_into_target() {
        let mut view = resource("view", "https://view.example/$1");
        view.provides = Some("target".to_string());
        let registry =
            Registry::from_resources([view, resource("target", "https://target.example/$1")]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].prefix_synonyms.contains("view"));
        assert!(records[0].uri_prefix_synonyms.contains("https://view.example/"));
    }

    #[test]
    fn part_of_without_shared_space_stays_primary() {
        let mut child = resource("child", "https://elsewhere.example/$1");
        child.part_of = Some("parent".to_string());
        let registry =
            Registry::from_resources([child, resource("parent", "https://parent.example/$1")]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        let prefixes: Vec<&str> = records.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["child", "parent"]);
    }

    #[test]
    fn part_of_child_claims_in_sorted_order() {
        let mut aaa = resource("aaa", "https://shared.example/$1");
        aaa.part_of = Some("zzz".to_string());
        let registry = Registry::from_resources([
            aaa,
            resource("bbb", "https://shared.example/$1"),
            resource("zzz", "https://zzz.example/$1"),
        ]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        let prefixes: Vec<&str> = records.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["aaa", "zzz"]);
    }

    #[test]
    fn provides_without_target_record_is_dropped() {
        let mut view = resource("view", "https://view.example/$1");
        view.provides = Some("target".to_string());
        let registry = Registry::from_resources([view, Resource::new("target")]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert!(records.is_empty(), "{:?}", records);

        let mut alias = resource("alias", "https://alias.example/$1");
        alias.has_canonical = Some("missing".to_string());
        let registry = Registry::from_resources([alias]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert!(records.is_empty(), "{:?}", records);
    }

    #[test]
    fn part_of_with_shared_space_folds() {
        let mut child = resource("child", "https://parent.example/child/$1");
        child.part_of = Some("parent".to_string());
        let registry =
            Registry::from_resources([child, resource("parent", "https://parent.example/$1")]);
        let records = build_records(&registry, &ConverterOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].prefix_synonyms.contains("child"));
    }

    #[test]
    fn blacklist_and_include_prefixes() {
        let registry = Registry::from_resources([
            resource("aaa", "https://a.example/$1"),
            resource("bbb", "https://b.example/$1"),
        ]);
        let options = ConverterOptions {
            blacklist: ["https://b.example/".to_string()].into_iter().collect(),
            include_prefixes: true,
            ..Default::default()
        };
        let records = build_records(&registry, &options).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].uri_prefix_synonyms.contains("aaa:"));
    }

    #[test]
    fn build_is_deterministic() {
        let registry = Registry::from_resources([
            resource("b", "https://x.example/$1"),
            resource("a", "https://x.example/$1"),
            resource("c", "http://c.example/$1"),
        ]);
        let first = serde_json::to_string(
            &build_records(&registry, &ConverterOptions::default()).unwrap(),
        )
        .unwrap();
        let second = serde_json::to_string(
            &build_records(&registry, &ConverterOptions::default()).unwrap(),
        )
        .unwrap();
        assert_eq!(first, second);
    }
}
