//! # Converter Command Handler
//!
//! This module handles bulk conversion commands backed by the registry's converter records.

use std::collections::BTreeMap;

use crate::{
    Manager, cli_utils,
    commands::shared::{dispatch_command, or_exit, validate_args_count_or_exit},
};

const CONVERTER_USAGE: &str =
    "Usage: bioregistry converter <records|prefix-map|expand|compress> [args...]";

/// Handles all converter-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `manager` - The loaded registry
/// * `output_format` - Output format for structured results
pub fn handle_converter_command(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("converter", CONVERTER_USAGE, args, manager, output_format, {
        "records" => handle_converter_records,
        "prefix-map" => handle_converter_prefix_map,
        "expand" => handle_converter_expand,
        "compress" => handle_converter_compress,
    });
}

/// Prints every converter record.
fn handle_converter_records(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(args, 1, 1, "records", "Usage: bioregistry converter records");
    let records = or_exit(manager.records());
    cli_utils::print_formatted_or_exit(&records, output_format, "records");
}

/// Prints the primary prefix map.
fn handle_converter_prefix_map(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        1,
        1,
        "prefix-map",
        "Usage: bioregistry converter prefix-map",
    );
    let converter = or_exit(manager.get_converter());
    cli_utils::print_formatted_or_exit(&converter.prefix_map(), output_format, "prefix map");
}

/// Expands each CURIE into an IRI; unknown prefixes map to null.
fn handle_converter_expand(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        usize::MAX,
        "expand",
        "Usage: bioregistry converter expand <curie>...",
    );
    let converter = or_exit(manager.get_converter());
    let expanded: BTreeMap<&str, Option<String>> = args[1..]
        .iter()
        .map(|curie| (curie.as_str(), converter.expand(curie)))
        .collect();
    cli_utils::print_formatted_or_exit(&expanded, output_format, "IRIs");
}

/// Compresses each IRI into a CURIE; unmatched IRIs map to null.
fn handle_converter_compress(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        usize::MAX,
        "compress",
        "Usage: bioregistry converter compress <iri>...",
    );
    let converter = or_exit(manager.get_converter());
    let compressed: BTreeMap<&str, Option<String>> = args[1..]
        .iter()
        .map(|iri| (iri.as_str(), converter.compress(iri)))
        .collect();
    cli_utils::print_formatted_or_exit(&compressed, output_format, "CURIEs");
}
