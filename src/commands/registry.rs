//! # Registry Command Handler
//!
//! This module handles whole-registry commands: lint, links into external registries, and
//! re-serializing the registry in another format.

use crate::{
    Manager, cli_utils,
    commands::errors::LookupError,
    commands::shared::{dispatch_command, or_exit, validate_args_count_or_exit},
};

const REGISTRY_USAGE: &str = "Usage: bioregistry registry <lint|uri|export> [args...]";

/// Handles all registry-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `manager` - The loaded registry
/// * `output_format` - Output format for structured results
pub fn handle_registry_command(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("registry", REGISTRY_USAGE, args, manager, output_format, {
        "lint" => handle_registry_lint,
        "uri" => handle_registry_uri,
        "export" => handle_registry_export,
    });
}

/// Prints every lint issue and exits non-zero if there are any.
fn handle_registry_lint(
    args: &[String],
    manager: &Manager,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(args, 1, 1, "lint", "Usage: bioregistry registry lint");
    let issues = manager.lint();
    if issues.is_empty() {
        println!("No issues found");
        return;
    }
    for issue in &issues {
        tracing::warn!("{}", issue);
    }
    cli_utils::print_formatted_or_exit(&issues, output_format, "lint issues");
    std::process::exit(1);
}

/// Prints the link to a prefix inside an external registry.
fn handle_registry_uri(
    args: &[String],
    manager: &Manager,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        3,
        3,
        "uri",
        "Usage: bioregistry registry uri <metaprefix> <prefix>",
    );
    let uri = or_exit(manager.get_registry_uri(&args[1], &args[2]));
    let uri = or_exit(uri.ok_or_else(|| LookupError {
        kind: "registry link for",
        input: format!("{} in {}", args[2], args[1]),
    }));
    println!("{}", uri);
}

/// Writes the registry to a file; the extension picks JSON or YAML.
fn handle_registry_export(
    args: &[String],
    manager: &Manager,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "export",
        "Usage: bioregistry registry export <file.json|file.yaml>",
    );
    or_exit(manager.registry().save(&args[1]));
    println!(
        "Exported {} resources to {}",
        manager.registry().len(),
        args[1]
    );
}
