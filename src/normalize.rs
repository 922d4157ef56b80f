//! # Identifier normalization
//!
//! Turns loosely written prefixes and CURIEs into canonical `(prefix, identifier)` pairs.
//!
//! The prefix is looked up case- and punctuation-insensitively in the synonym index.  The
//! identifier then has redundant namespace text removed from its front:
//!
//! 1. the resource's banana followed by its peel (`GO:` in `GO:0032571`), matched exactly;
//! 2. the prefix as the caller wrote it, followed by `:`, matched case-insensitively;
//! 3. the canonical prefix followed by `:`, matched case-insensitively.
//!
//! Stripping repeats until nothing more matches, which makes normalization idempotent.  It
//! never strips an identifier down to nothing.

use crate::manager::Manager;
use crate::reference::{CURIE_SEPARATOR, Reference};
use crate::resource::Resource;

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}

/// Removes redundant namespace text from the front of `identifier`.
pub fn strip_identifier<'a>(resource: &Resource, raw_prefix: &str, identifier: &'a str) -> &'a str {
    let banana = resource
        .get_banana()
        .map(|banana| format!("{}{}", banana, resource.get_banana_peel()));
    let raw = format!("{}{}", raw_prefix, CURIE_SEPARATOR);
    let canonical = format!("{}{}", resource.prefix, CURIE_SEPARATOR);

    let mut current = identifier;
    loop {
        let next = banana
            .as_deref()
            .and_then(|banana| current.strip_prefix(banana))
            .or_else(|| strip_prefix_ignore_case(current, &raw))
            .or_else(|| strip_prefix_ignore_case(current, &canonical));
        match next {
            Some(rest) if !rest.is_empty() => current = rest,
            _ => return current,
        }
    }
}

impl Manager {
    /// The canonical prefix for a prefix, synonym, or external-registry prefix.
    ///
    /// ```rust
    /// use bioregistry::{Manager, Registry};
    ///
    /// let registry = Registry::from_json(r#"{"ncbitaxon": {"synonyms": ["taxonomy"]}}"#).unwrap();
    /// let manager = Manager::new(registry);
    /// assert_eq!(manager.normalize_prefix("taxonomy"), Some("ncbitaxon"));
    /// assert_eq!(manager.normalize_prefix("NCBI-Taxon"), Some("ncbitaxon"));
    /// assert_eq!(manager.normalize_prefix("nope"), None);
    /// ```
    pub fn normalize_prefix(&self, raw: &str) -> Option<&str> {
        self.index().normalize_prefix(raw)
    }

    /// Normalizes an already split `(prefix, identifier)` pair.
    ///
    /// Returns `None` when the prefix is unknown.
    pub fn normalize_parsed_curie(&self, prefix: &str, identifier: &str) -> Option<Reference> {
        let resource = self.get_resource(prefix)?;
        let identifier = strip_identifier(resource, prefix, identifier);
        Some(Reference::new(resource.prefix.clone(), identifier))
    }

    /// Splits `curie` on the first `:` and normalizes both parts.
    pub fn parse_curie(&self, curie: &str) -> Option<Reference> {
        self.parse_curie_with_sep(curie, CURIE_SEPARATOR)
    }

    /// Splits `curie` on the first `sep` and normalizes both parts.
    pub fn parse_curie_with_sep(&self, curie: &str, sep: &str) -> Option<Reference> {
        let reference = Reference::split(curie, sep)?;
        self.normalize_parsed_curie(&reference.prefix, &reference.identifier)
    }

    /// Normalizes a CURIE and renders it back as `prefix:identifier`.
    pub fn normalize_curie_string(&self, curie: &str) -> Option<String> {
        self.parse_curie(curie).map(|reference| reference.curie())
    }
}
