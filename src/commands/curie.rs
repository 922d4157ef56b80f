//! # CURIE Command Handler
//!
//! This module handles CURIE-level CLI commands: normalization, validation, and resolution to
//! provider URIs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    IriOptions, Manager, cli_utils,
    commands::errors::LookupError,
    commands::shared::{curie_or_exit, dispatch_command, or_exit, validate_args_count_or_exit},
};

const CURIE_USAGE: &str =
    "Usage: bioregistry curie <normalize|validate|resolve|providers> [args...]";

/// Validation outcome for one CURIE, as printed by `curie validate`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CurieCheck {
    /// The CURIE as given
    pub curie: String,
    /// The normalized CURIE, if the prefix is known
    pub normalized: Option<String>,
    /// Whether the CURIE is already in canonical form and matches the pattern
    pub valid: bool,
    /// Whether the CURIE matches the pattern after normalization
    pub standardizable: bool,
}

impl CurieCheck {
    /// Checks `curie` against the registry.
    pub fn check(manager: &Manager, curie: &str) -> Self {
        Self {
            curie: curie.to_string(),
            normalized: manager.normalize_curie_string(curie),
            valid: manager.is_valid_curie(curie),
            standardizable: manager.is_standardizable_curie(curie),
        }
    }
}

/// Handles all CURIE-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `manager` - The loaded registry
/// * `output_format` - Output format for structured results
pub fn handle_curie_command(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("curie", CURIE_USAGE, args, manager, output_format, {
        "normalize" => handle_curie_normalize,
        "validate" => handle_curie_validate,
        "resolve" => handle_curie_resolve,
        "providers" => handle_curie_providers,
    });
}

/// Prints the normalized form of each CURIE; unknown prefixes map to null.
fn handle_curie_normalize(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        usize::MAX,
        "normalize",
        "Usage: bioregistry curie normalize <curie>...",
    );
    let normalized: BTreeMap<&str, Option<String>> = args[1..]
        .iter()
        .map(|curie| (curie.as_str(), manager.normalize_curie_string(curie)))
        .collect();
    cli_utils::print_formatted_or_exit(&normalized, output_format, "CURIEs");
}

/// Prints validity and standardizability for each CURIE.
fn handle_curie_validate(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        usize::MAX,
        "validate",
        "Usage: bioregistry curie validate <curie>...",
    );
    let checks: Vec<CurieCheck> = args[1..]
        .iter()
        .map(|curie| CurieCheck::check(manager, curie))
        .collect();
    cli_utils::print_formatted_or_exit(&checks, output_format, "validation results");
}

/// Prints the best IRI for a CURIE, optionally from one named provider.
fn handle_curie_resolve(
    args: &[String],
    manager: &Manager,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        3,
        "resolve",
        "Usage: bioregistry curie resolve <curie> [provider]",
    );
    let options = IriOptions {
        provider: args.get(2).cloned(),
        ..manager.default_iri_options()
    };
    let iri = manager.get_iri(&args[1], None, &options);
    let iri = or_exit(iri.ok_or_else(|| LookupError {
        kind: "IRI for",
        input: args[1..].join(" "),
    }));
    println!("{}", iri);
}

/// Prints every provider URI for a CURIE.
fn handle_curie_providers(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "providers",
        "Usage: bioregistry curie providers <curie>",
    );
    let reference = curie_or_exit(manager, &args[1]);
    let providers: Vec<BTreeMap<&str, String>> = manager
        .get_providers_list(&reference.prefix, &reference.identifier)
        .into_iter()
        .map(|(code, uri)| BTreeMap::from([("code", code), ("uri", uri)]))
        .collect();
    cli_utils::print_formatted_or_exit(&providers, output_format, "providers");
}
