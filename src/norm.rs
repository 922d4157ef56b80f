//! Case- and punctuation-insensitive keys.
//!
//! Prefixes are compared after removing spaces, periods, hyphens, underscores, and slashes and
//! lowercasing, so `NCBITaxon`, `ncbi.taxon`, and `ncbi_taxon` are the same key.  The key space is
//! loose, so a [`NormMap`] refuses to remap a key to a different value.

use std::collections::BTreeMap;

use crate::errors::RegistryError;

/// Characters ignored when comparing prefixes.
pub const IGNORED_CHARACTERS: [char; 5] = [' ', '.', '-', '_', '/'];

/// Normalizes a prefix-like string into its comparison key.
///
/// ```rust
/// use bioregistry::norm;
///
/// assert_eq!(norm("NCBI_Taxon"), "ncbitaxon");
/// assert_eq!(norm("ec-code"), "eccode");
/// ```
pub fn norm(raw: &str) -> String {
    raw.chars()
        .filter(|c| !IGNORED_CHARACTERS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

////////////////////////////////////////////// NormMap /////////////////////////////////////////////////

/// A map from normalized keys to canonical prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormMap {
    inner: BTreeMap<String, String>,
}

impl NormMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `key` to `value`.
    ///
    /// Inserting a key that already maps to the same value is a no-op.  Inserting a key that
    /// maps to a different value is a [`RegistryError::SynonymConflict`] and leaves the map
    /// unchanged.  Keys that normalize to nothing are never stored.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), RegistryError> {
        let normed = norm(key);
        if normed.is_empty() {
            return Ok(());
        }
        match self.inner.get(&normed) {
            Some(existing) if existing == value => Ok(()),
            Some(existing) => Err(RegistryError::SynonymConflict {
                key: key.to_string(),
                existing: existing.clone(),
                incoming: value.to_string(),
            }),
            None => {
                self.inner.insert(normed, value.to_string());
                Ok(())
            }
        }
    }

    /// Maps `key` to `value` unless the key is already taken; returns whether it inserted.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        let normed = norm(key);
        if normed.is_empty() || self.inner.contains_key(&normed) {
            return false;
        }
        self.inner.insert(normed, value.to_string());
        true
    }

    /// Looks up the value for `key` after normalizing it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(&norm(key)).map(String::as_str)
    }

    /// Whether the normalized form of `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&norm(key))
    }

    /// Number of distinct normalized keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Normalized keys and their values, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
