use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use tracing::Level;

use bioregistry::{
    Config, Manager, Metaregistry, Registry,
    cli_utils::{self, OutputFormat},
    commands::{
        handle_converter_command, handle_curie_command, handle_prefix_command,
        handle_registry_command, shared::or_exit,
    },
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Path to the registry file, JSON or YAML (default: bioregistry.json)")]
    registry: Option<String>,
    #[arrrg(optional, "Path to a metaregistry file merged over the built-in registries")]
    metaregistry: Option<String>,
    #[arrrg(optional, "Path to a configuration file, JSON or YAML")]
    config: Option<String>,
    #[arrrg(optional, "Output format for structured results: json or yaml (default: json)")]
    output: Option<String>,
    #[arrrg(flag, "Fail on the first prefix or URI prefix conflict")]
    strict: bool,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const DEFAULT_REGISTRY_PATH: &str = "bioregistry.json";

const USAGE: &str = r#"Usage: bioregistry [options] <command> [args...]

Options:
  --registry <path>       Registry file, JSON or YAML (default: bioregistry.json)
  --metaregistry <path>   Metaregistry file merged over the built-in registries
  --config <path>         Configuration file, JSON or YAML
  --output <format>       Output format for structured results: json or yaml (default: json)
  --strict                Fail on the first prefix or URI prefix conflict
  --verbose               Enable verbose logging

Commands:
  prefix normalize <prefix>...          Map prefixes and synonyms to canonical prefixes
  prefix get <prefix>                   Show the merged view of one resource
  prefix list                           List every canonical prefix
  curie normalize <curie>...            Normalize CURIEs
  curie validate <curie>...             Check CURIEs against identifier patterns
  curie resolve <curie> [provider]      Print the best IRI, or one provider's IRI
  curie providers <curie>               List every provider IRI in priority order
  converter records                     Print converter records
  converter prefix-map                  Print the prefix to URI prefix map
  converter expand <curie>...           Expand CURIEs into IRIs
  converter compress <iri>...           Compress IRIs into CURIEs
  registry lint                         Report data-integrity problems
  registry uri <metaprefix> <prefix>    Link to a prefix inside an external registry
  registry export <file.json|file.yaml> Write the registry in another format"#;

fn main() {
    let (options, free) =
        Options::from_command_line_relaxed("USAGE: bioregistry [options] <command> [args...]");

    let level = if options.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No command specified", USAGE);
    }

    let output: OutputFormat = match options.output.as_deref() {
        Some(format) => format
            .parse()
            .unwrap_or_else(|e: String| cli_utils::exit_with_usage_error(&e, USAGE)),
        None => OutputFormat::default(),
    };

    let registry_path = options
        .registry
        .as_deref()
        .unwrap_or(DEFAULT_REGISTRY_PATH);
    let registry = or_exit(Registry::load(registry_path));
    let metaregistry = match options.metaregistry.as_deref() {
        Some(path) => or_exit(Metaregistry::load(path)),
        None => Metaregistry::builtin(),
    };
    let mut config = match options.config.as_deref() {
        Some(path) => or_exit(Config::load(path)),
        None => Config::default(),
    };
    if options.strict {
        config.strict = true;
        config.converter.strict = true;
    }
    tracing::debug!(
        path = registry_path,
        resources = registry.len(),
        strict = config.strict,
        "loaded registry"
    );
    let manager = or_exit(Manager::with_parts(registry, metaregistry, config));

    match free[0].as_str() {
        "prefix" => handle_prefix_command(&free[1..], &manager, output),
        "curie" => handle_curie_command(&free[1..], &manager, output),
        "converter" => handle_converter_command(&free[1..], &manager, output),
        "registry" => handle_registry_command(&free[1..], &manager, output),
        _ => {
            cli_utils::exit_with_error(&format!(
                "Unknown command '{}'. Available commands: prefix, curie, converter, registry",
                free[0]
            ));
        }
    }
}
