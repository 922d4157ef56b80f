use std::fmt::{Display, Formatter, Result as FmtResult};
use std::process;
use std::str::FromStr;

use serde::Serialize;

use crate::{FileFormat, RegistryError, to_string};

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl From<OutputFormat> for FileFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => FileFormat::Json,
            OutputFormat::Yaml => FileFormat::Yaml,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!(
                "unknown output format '{}'; expected json or yaml",
                other
            )),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Exits the program with an error message
pub fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exits the program with an error message and usage information
pub fn exit_with_usage_error(message: &str, usage: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", usage);
    process::exit(1);
}

/// Prints a value in the requested format
pub fn print_formatted<T>(value: &T, format: OutputFormat) -> Result<(), RegistryError>
where
    T: Serialize,
{
    let rendered = to_string(value, format.into())?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Prints a value in the requested format or exits with error
pub fn print_formatted_or_exit<T>(value: &T, format: OutputFormat, context: &str)
where
    T: Serialize,
{
    if let Err(e) = print_formatted(value, format) {
        exit_with_error(&format!("Failed to format {} as {}: {}", context, format, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("YAML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("toml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "json");
    }
}
