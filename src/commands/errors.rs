//! # Command Error Handling
//!
//! This module provides error handling utilities for bioregistry CLI commands
//! using the handled crate for consistent error property extraction.

use handled::Handle;

use crate::RegistryError;

/// User-friendly error information that can be extracted from various error types
#[derive(Debug, Clone)]
pub struct UserError {
    /// The main error message to display to the user
    pub message: String,
    /// Optional usage hint to help the user correct the error
    pub usage_hint: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Implements Handle<UserError> for itself to allow extraction
impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

impl Handle<UserError> for RegistryError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            RegistryError::Io(_) => {
                Some("Check that the registry, metaregistry, and config paths exist.".to_string())
            }
            RegistryError::Serialization(_) => Some(
                "Files ending in .yaml or .yml are read as YAML; everything else as JSON."
                    .to_string(),
            ),
            RegistryError::DuplicatePrefix { .. } | RegistryError::SynonymConflict { .. } => Some(
                "Two resources claim the same normalized prefix. Run `bioregistry registry lint` \
                 without --strict to list every conflict."
                    .to_string(),
            ),
            RegistryError::PrefixCollision { .. } | RegistryError::UriPrefixCollision { .. } => {
                Some(
                    "Blacklist one of the URI prefixes in the converter options or disable strict \
                     mode."
                        .to_string(),
                )
            }
            RegistryError::UnknownMetaprefix(_) => Some(
                "Known registries are listed in the metaregistry; pass --metaregistry to add more."
                    .to_string(),
            ),
            RegistryError::InvalidResource { .. } => None,
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Unknown prefix or unparseable CURIE on the command line
#[derive(Debug)]
pub struct LookupError {
    /// What kind of thing was looked up
    pub kind: &'static str,
    /// The input that could not be resolved
    pub input: String,
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown {} '{}'", self.kind, self.input)
    }
}

impl std::error::Error for LookupError {}

impl Handle<UserError> for LookupError {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self.kind {
            "CURIE" => Some("CURIEs are written prefix:identifier, e.g. chebi:24867".to_string()),
            _ => None,
        };
        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Enhanced error formatting for CLI output
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    if let Some(user_error) = error.handle() {
        let mut output = format!("Error: {}", user_error.message);
        if let Some(hint) = user_error.usage_hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_carry_hints() {
        let err = RegistryError::UnknownMetaprefix("nope".to_string());
        let formatted = format_cli_error(&err);
        assert!(formatted.starts_with("Error: "));
        assert!(formatted.contains("nope"));
        assert!(formatted.contains("\nHint: "));
    }

    #[test]
    fn lookup_errors_name_the_input() {
        let err = LookupError {
            kind: "CURIE",
            input: "chebi".to_string(),
        };
        let user_error = err.handle().unwrap();
        assert_eq!(user_error.message, "Unknown CURIE 'chebi'");
        assert!(user_error.usage_hint.is_some());
    }
}
