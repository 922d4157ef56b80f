//! # Prefix Command Handler
//!
//! This module handles prefix-related CLI commands: normalizing prefixes, showing the merged
//! view of one resource, and listing the registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    Manager, cli_utils,
    commands::shared::{dispatch_command, resource_or_exit, validate_args_count_or_exit},
};

const PREFIX_USAGE: &str = "Usage: bioregistry prefix <normalize|get|list> [args...]";

/// The merged view of a resource, as printed by `prefix get`.
#[derive(Debug, Serialize)]
pub struct PrefixSummary {
    /// Canonical prefix
    pub prefix: String,
    /// Stylized prefix, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_prefix: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage, possibly inherited from the provided resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Cleaned identifier pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Default URI format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Curated synonyms
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub synonyms: BTreeSet<String>,
    /// Prefixes in external registries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub mappings: BTreeMap<String, String>,
    /// Whether the resource is deprecated
    pub deprecated: bool,
}

impl PrefixSummary {
    /// Collects the merged view of the resource named by `prefix`.
    pub fn collect(manager: &Manager, prefix: &str) -> Option<Self> {
        let resource = manager.get_resource(prefix)?;
        let mut mappings = resource.mappings.clone();
        for mirror in resource.mirrors() {
            let metaprefix = mirror.metaprefix().to_string();
            if let Some(mapped) = resource.get_mapped_prefix(&metaprefix) {
                mappings
                    .entry(metaprefix)
                    .or_insert_with(|| mapped.to_string());
            }
        }
        Some(Self {
            prefix: resource.prefix.clone(),
            preferred_prefix: resource.get_preferred_prefix(),
            name: resource.get_name().map(str::to_string),
            description: resource.get_description().map(str::to_string),
            homepage: manager.get_homepage(prefix),
            pattern: resource.get_pattern(),
            uri_format: resource.get_default_format(),
            examples: resource
                .get_examples()
                .into_iter()
                .map(str::to_string)
                .collect(),
            synonyms: resource.synonyms.clone(),
            mappings,
            deprecated: resource.is_deprecated(),
        })
    }
}

/// Handles all prefix-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `manager` - The loaded registry
/// * `output_format` - Output format for structured results
pub fn handle_prefix_command(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("prefix", PREFIX_USAGE, args, manager, output_format, {
        "normalize" => handle_prefix_normalize,
        "get" => handle_prefix_get,
        "list" => handle_prefix_list,
    });
}

/// Prints the canonical prefix of each argument; unknown prefixes map to null.
fn handle_prefix_normalize(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        usize::MAX,
        "normalize",
        "Usage: bioregistry prefix normalize <prefix>...",
    );
    let normalized: BTreeMap<&str, Option<&str>> = args[1..]
        .iter()
        .map(|raw| (raw.as_str(), manager.normalize_prefix(raw)))
        .collect();
    cli_utils::print_formatted_or_exit(&normalized, output_format, "prefixes");
}

/// Prints the merged view of one resource.
fn handle_prefix_get(args: &[String], manager: &Manager, output_format: cli_utils::OutputFormat) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: bioregistry prefix get <prefix>");
    let resource = resource_or_exit(manager, &args[1]);
    if let Some(summary) = PrefixSummary::collect(manager, &resource.prefix) {
        cli_utils::print_formatted_or_exit(&summary, output_format, "resource");
    }
}

/// Prints every canonical prefix with its name.
fn handle_prefix_list(args: &[String], manager: &Manager, output_format: cli_utils::OutputFormat) {
    validate_args_count_or_exit(args, 1, 1, "list", "Usage: bioregistry prefix list");
    let listing: BTreeMap<&str, Option<&str>> = manager
        .registry()
        .iter()
        .map(|resource| (resource.prefix.as_str(), resource.get_name()))
        .collect();
    cli_utils::print_formatted_or_exit(&listing, output_format, "registry");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::fixture_manager;

    #[test]
    fn summary_merges_mirrors() {
        let manager = fixture_manager();
        let summary = PrefixSummary::collect(&manager, "ChEBIID").unwrap();
        assert_eq!(summary.prefix, "chebi");
        assert_eq!(summary.preferred_prefix.as_deref(), Some("CHEBI"));
        assert_eq!(summary.pattern.as_deref(), Some("^\\d+$"));
        assert_eq!(summary.examples, vec!["24867", "138488"]);
        assert_eq!(summary.mappings.get("bioportal").map(String::as_str), Some("CHEBI"));
        assert!(summary.mappings.contains_key("obofoundry"));
        assert!(!summary.deprecated);
    }

    #[test]
    fn summary_of_unknown_prefix() {
        let manager = fixture_manager();
        assert!(PrefixSummary::collect(&manager, "unknown").is_none());
    }
}
