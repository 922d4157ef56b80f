//! # Shared Command Utilities
//!
//! This module provides shared validation, lookup, and dispatch helpers
//! used across multiple command handlers to reduce code duplication.

use handled::Handle;

use crate::commands::errors::{LookupError, UserError, format_cli_error};
use crate::{Manager, Reference, Resource, cli_utils};

/// Validates both minimum and maximum argument counts.
///
/// # Arguments
/// * `args` - The command arguments array
/// * `min_count` - The minimum number of arguments required (including subcommand)
/// * `max_count` - The maximum number of arguments allowed (including subcommand)
/// * `command` - The command name for error message
/// * `usage` - The usage string to display
pub fn validate_args_count_or_exit(
    args: &[String],
    min_count: usize,
    max_count: usize,
    command: &str,
    usage: &str,
) {
    if args.len() < min_count {
        cli_utils::exit_with_usage_error(
            &format!("{} command requires more arguments", command),
            usage,
        );
    }
    if args.len() > max_count {
        cli_utils::exit_with_usage_error(
            &format!("{} command has too many arguments", command),
            usage,
        );
    }
}

/// Unwraps a result or exits with the error's user-facing message and hint.
pub fn or_exit<T, E>(result: Result<T, E>) -> T
where
    E: Handle<UserError> + std::fmt::Display,
{
    result.unwrap_or_else(|e| {
        eprintln!("{}", format_cli_error(&e));
        std::process::exit(1);
    })
}

/// Looks up a resource by any prefix-like string or exits.
pub fn resource_or_exit<'a>(manager: &'a Manager, prefix: &str) -> &'a Resource {
    or_exit(manager.get_resource(prefix).ok_or_else(|| LookupError {
        kind: "prefix",
        input: prefix.to_string(),
    }))
}

/// Parses and normalizes a CURIE or exits.
pub fn curie_or_exit(manager: &Manager, curie: &str) -> Reference {
    or_exit(manager.parse_curie(curie).ok_or_else(|| LookupError {
        kind: "CURIE",
        input: curie.to_string(),
    }))
}

/// Macro to generate command dispatcher boilerplate.
macro_rules! dispatch_command {
    ($command_name:expr, $usage:expr, $args:expr, $manager:expr, $output_format:expr, {
        $($subcommand:expr => $handler:expr),* $(,)?
    }) => {
        if $args.is_empty() {
            crate::cli_utils::exit_with_usage_error(
                &format!("{} command requires a subcommand", $command_name),
                $usage,
            );
        }

        match $args[0].as_str() {
            $(
                $subcommand => $handler($args, $manager, $output_format),
            )*
            _ => {
                let available_subcommands = vec![$($subcommand),*];
                crate::cli_utils::exit_with_error(&format!(
                    "Unknown {} subcommand '{}'. Available subcommands: {}",
                    $command_name,
                    $args[0],
                    available_subcommands.join(", ")
                ));
            }
        }
    };
}

pub(crate) use dispatch_command;
