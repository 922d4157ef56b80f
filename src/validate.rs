//! # Identifier validation
//!
//! Checks local identifiers against their namespace's regular expression, and lints the
//! registry itself for data-integrity problems.
//!
//! There are deliberately two families of identifier checks:
//!
//! - *valid* / *canonical* checks take the prefix literally (it must be a canonical prefix) and
//!   match the identifier exactly as given.  They answer "is this already in canonical form?".
//! - *standardizable* checks normalize the pair first (synonym prefixes, bananas, redundant
//!   prefixes).  They answer "can this be made canonical?".
//!
//! A resource without a pattern places no constraint on identifiers.  A pattern that does not
//! compile is logged once and also treated as no constraint.
//!
//! ## Usage Examples
//!
//! ```rust
//! use bioregistry::{Manager, Registry};
//!
//! let registry = Registry::from_json(r#"{
//!     "chebi": {"pattern": "^\\d+$", "obofoundry": {"prefix": "chebi", "preferredPrefix": "CHEBI"}}
//! }"#).unwrap();
//! let manager = Manager::new(registry);
//!
//! assert!(manager.is_valid_identifier("chebi", "24867"));
//! assert!(!manager.is_valid_identifier("chebi", "CHEBI:24867"));
//! assert!(manager.is_standardizable_identifier("chebi", "CHEBI:24867"));
//! assert!(!manager.is_valid_curie("CHEBI:24867"));
//! assert!(manager.is_standardizable_curie("CHEBI:24867"));
//! ```

use regex::Regex;
use serde::Serialize;

use crate::errors::RegistryError;
use crate::manager::Manager;
use crate::reference::{CURIE_SEPARATOR, Reference};
use crate::resource::{Resource, URI_TOKEN, clean_pattern};

impl Manager {
    /// The compiled pattern for a canonical prefix, or `None` when there is no usable pattern.
    pub fn compiled_pattern(&self, resource: &Resource) -> Option<Regex> {
        if let Some(cached) = self.patterns.borrow().get(&resource.prefix) {
            return cached.clone();
        }
        let compiled = resource
            .get_pattern()
            .and_then(|pattern| match Regex::new(&pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::warn!(
                        prefix = %resource.prefix,
                        pattern = %pattern,
                        "pattern does not compile, treating as unconstrained: {}",
                        err
                    );
                    None
                }
            });
        self.patterns
            .borrow_mut()
            .insert(resource.prefix.clone(), compiled.clone());
        compiled
    }

    fn matches_pattern(&self, resource: &Resource, identifier: &str) -> bool {
        match self.compiled_pattern(resource) {
            Some(regex) => regex.is_match(identifier),
            None => true,
        }
    }

    /// Whether `identifier` matches the pattern of the literal canonical prefix `prefix`,
    /// without any normalization.
    pub fn is_canonical_identifier(&self, prefix: &str, identifier: &str) -> bool {
        match self.registry().get(prefix) {
            Some(resource) => self.matches_pattern(resource, identifier),
            None => false,
        }
    }

    /// Whether `(prefix, identifier)` is valid as written.
    ///
    /// The prefix must literally be a canonical prefix and the identifier is not normalized.
    pub fn is_valid_identifier(&self, prefix: &str, identifier: &str) -> bool {
        self.is_canonical_identifier(prefix, identifier)
    }

    /// Whether `(prefix, identifier)` matches its pattern after normalization.
    pub fn is_standardizable_identifier(&self, prefix: &str, identifier: &str) -> bool {
        self.check_identifier(prefix, identifier).unwrap_or(false)
    }

    /// Like [`Manager::is_standardizable_identifier`], but `None` when the prefix cannot be
    /// mapped at all.
    pub fn check_identifier(&self, prefix: &str, identifier: &str) -> Option<bool> {
        let reference = self.normalize_parsed_curie(prefix, identifier)?;
        let resource = self.registry().get(&reference.prefix)?;
        Some(self.matches_pattern(resource, &reference.identifier))
    }

    /// Whether `curie` has a literal canonical prefix and an identifier that is standardizable
    /// for it.
    pub fn is_valid_curie(&self, curie: &str) -> bool {
        let Some(reference) = Reference::split(curie, CURIE_SEPARATOR) else {
            return false;
        };
        if !self.registry().contains(&reference.prefix) {
            return false;
        }
        self.is_standardizable_identifier(&reference.prefix, &reference.identifier)
    }

    /// Whether `curie` can be normalized into a CURIE whose identifier matches its pattern.
    pub fn is_standardizable_curie(&self, curie: &str) -> bool {
        match self.parse_curie(curie) {
            Some(reference) => match self.registry().get(&reference.prefix) {
                Some(resource) => self.matches_pattern(resource, &reference.identifier),
                None => false,
            },
            None => false,
        }
    }

    /// Checks every resource for data-integrity problems.
    pub fn lint(&self) -> Vec<LintIssue> {
        let mut issues: Vec<LintIssue> = self
            .index()
            .conflicts()
            .iter()
            .map(LintIssue::from)
            .collect();
        for resource in self.registry().iter() {
            lint_resource(self, resource, &mut issues);
        }
        issues
    }
}

fn lint_resource(manager: &Manager, resource: &Resource, issues: &mut Vec<LintIssue>) {
    let prefix = resource.prefix.clone();
    if let Some(banana) = resource.banana.as_deref()
        && banana.contains(CURIE_SEPARATOR)
    {
        issues.push(LintIssue::BananaContainsColon {
            prefix: prefix.clone(),
            banana: banana.to_string(),
        });
    }
    if let Some(pattern) = resource.pattern.as_deref()
        && clean_pattern(pattern) != pattern
    {
        issues.push(LintIssue::UncleanPattern {
            prefix: prefix.clone(),
            pattern: pattern.to_string(),
        });
    }
    if let Some(pattern) = resource.get_pattern()
        && let Err(err) = Regex::new(&pattern)
    {
        issues.push(LintIssue::InvalidPattern {
            prefix: prefix.clone(),
            pattern,
            reason: err.to_string(),
        });
    }
    for uri_format in [&resource.uri_format, &resource.rdf_uri_format]
        .into_iter()
        .flatten()
    {
        let tokens = uri_format.matches(URI_TOKEN).count();
        if tokens != 1 {
            issues.push(LintIssue::UriFormatTokens {
                prefix: prefix.clone(),
                uri_format: uri_format.clone(),
                tokens,
            });
        }
    }
    if resource.get_pattern().is_some() {
        for example in resource.get_examples() {
            if !manager.is_canonical_identifier(&resource.prefix, example) {
                issues.push(LintIssue::ExampleMismatch {
                    prefix: prefix.clone(),
                    example: example.to_string(),
                });
            }
        }
    }
    for (relation, target) in [
        ("part_of", &resource.part_of),
        ("provides", &resource.provides),
        ("has_canonical", &resource.has_canonical),
    ] {
        if let Some(target) = target
            && !manager.registry().contains(target)
        {
            issues.push(LintIssue::DanglingRelation {
                prefix: prefix.clone(),
                relation: relation.to_string(),
                target: target.clone(),
            });
        }
    }
}

////////////////////////////////////////////// LintIssue /////////////////////////////////////////////

/// A data-integrity problem found by [`Manager::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintIssue {
    /// The synonym index had to drop a conflicting mapping.
    IndexConflict {
        /// Description of the conflict.
        message: String,
    },
    /// An explicit banana contains the CURIE separator.
    BananaContainsColon {
        /// The resource.
        prefix: String,
        /// The offending banana.
        banana: String,
    },
    /// A curated pattern is not in cleaned, anchored form.
    UncleanPattern {
        /// The resource.
        prefix: String,
        /// The pattern as curated.
        pattern: String,
    },
    /// A pattern does not compile.
    InvalidPattern {
        /// The resource.
        prefix: String,
        /// The cleaned pattern.
        pattern: String,
        /// Compiler error.
        reason: String,
    },
    /// A curated URI format does not have exactly one substitution token.
    UriFormatTokens {
        /// The resource.
        prefix: String,
        /// The URI format.
        uri_format: String,
        /// How many tokens it has.
        tokens: usize,
    },
    /// An example identifier does not match the resource's pattern.
    ExampleMismatch {
        /// The resource.
        prefix: String,
        /// The example.
        example: String,
    },
    /// A relation points at a prefix that is not in the registry.
    DanglingRelation {
        /// The resource.
        prefix: String,
        /// `part_of`, `provides`, or `has_canonical`.
        relation: String,
        /// The missing target.
        target: String,
    },
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintIssue::IndexConflict { message } => write!(f, "{}", message),
            LintIssue::BananaContainsColon { prefix, banana } => {
                write!(f, "{}: banana '{}' contains ':'", prefix, banana)
            }
            LintIssue::UncleanPattern { prefix, pattern } => {
                write!(f, "{}: pattern '{}' is not anchored or has a trailing '?'", prefix, pattern)
            }
            LintIssue::InvalidPattern {
                prefix,
                pattern,
                reason,
            } => write!(f, "{}: pattern '{}' does not compile: {}", prefix, pattern, reason),
            LintIssue::UriFormatTokens {
                prefix,
                uri_format,
                tokens,
            } => write!(
                f,
                "{}: URI format '{}' has {} substitution tokens",
                prefix, uri_format, tokens
            ),
            LintIssue::ExampleMismatch { prefix, example } => {
                write!(f, "{}: example '{}' does not match the pattern", prefix, example)
            }
            LintIssue::DanglingRelation {
                prefix,
                relation,
                target,
            } => write!(f, "{}: {} target '{}' is not registered", prefix, relation, target),
        }
    }
}

impl From<&RegistryError> for LintIssue {
    fn from(err: &RegistryError) -> Self {
        LintIssue::IndexConflict {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::test_utils::test_helpers::fixture_manager;

    #[test]
    fn valid_identifier_is_literal() {
        let manager = fixture_manager();
        assert!(manager.is_valid_identifier("chebi", "24867"));
        assert!(!manager.is_valid_identifier("chebi", "CHEBI:24867"));
        assert!(!manager.is_valid_identifier("CHEBI", "24867"));
        assert!(!manager.is_valid_identifier("nope", "1"));
    }

    #[test]
    fn standardizable_identifier_normalizes() {
        let manager = fixture_manager();
        assert!(manager.is_standardizable_identifier("chebi", "CHEBI:24867"));
        assert!(manager.is_standardizable_identifier("CHEBI", "24867"));
        assert!(!manager.is_standardizable_identifier("chebi", "abc"));
        assert!(!manager.is_standardizable_identifier("nope", "1"));
    }

    #[test]
    fn check_identifier_distinguishes_unknown() {
        let manager = fixture_manager();
        assert_eq!(manager.check_identifier("nope", "1"), None);
        assert_eq!(manager.check_identifier("chebi", "abc"), Some(false));
        assert_eq!(manager.check_identifier("chebi", "1"), Some(true));
    }

    #[test]
    fn no_pattern_is_unconstrained() {
        let registry = Registry::from_json(r#"{"free": {}}"#).unwrap();
        let manager = Manager::new(registry);
        assert!(manager.is_valid_identifier("free", "anything at all"));
    }

    #[test]
    fn valid_curie_requires_literal_prefix() {
        let manager = fixture_manager();
        assert!(manager.is_valid_curie("go:0032571"));
        assert!(manager.is_valid_curie("go:GO:0032571"));
        assert!(!manager.is_valid_curie("GO:0032571"));
        assert!(!manager.is_valid_curie("go0032571"));
        assert!(manager.is_standardizable_curie("GO:0032571"));
    }

    #[test]
    fn uncompilable_pattern_is_unconstrained() {
        let registry = Registry::from_json(r#"{"broken": {"pattern": "^(unclosed$"}}"#).unwrap();
        let manager = Manager::new(registry);
        assert!(manager.is_valid_identifier("broken", "whatever"));
        assert!(manager
            .lint()
            .iter()
            .any(|issue| matches!(issue, LintIssue::InvalidPattern { .. })));
    }

    #[test]
    fn lint_reports_problems() {
        let registry = Registry::from_json(
            r#"{
                "a": {"banana": "A:", "pattern": "\\d+", "example": "x",
                      "uri_format": "https://a.example/$1/$1", "part_of": "ghost"},
                "b": {"synonyms": ["A"]}
            }"#,
        )
        .unwrap();
        let manager = Manager::new(registry);
        let issues = manager.lint();
        let kinds: Vec<String> = issues
            .iter()
            .map(|issue| {
                serde_json::to_value(issue).unwrap()["kind"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        for expected in [
            "index_conflict",
            "banana_contains_colon",
            "unclean_pattern",
            "uri_format_tokens",
            "example_mismatch",
            "dangling_relation",
        ] {
            assert!(kinds.iter().any(|k| k == expected), "missing {}", expected);
        }
    }

    #[test]
    fn fixture_is_clean() {
        let manager = fixture_manager();
        assert_eq!(manager.lint(), Vec::<LintIssue>::new());
    }
}
