use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The default separator between a prefix and a local identifier.
pub const CURIE_SEPARATOR: &str = ":";

////////////////////////////////////////////// Reference /////////////////////////////////////////////

/// A (prefix, local identifier) pair.
///
/// Whether the pair is canonical depends on where it came from: [`Reference::split`] only cuts a
/// string in two, while the manager's normalization returns pairs whose prefix is a registry key
/// and whose identifier has had redundant namespaces stripped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The namespace prefix.
    pub prefix: String,
    /// The local identifier inside the namespace.
    pub identifier: String,
}

impl Reference {
    /// Creates a reference from its two parts.
    pub fn new(prefix: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            identifier: identifier.into(),
        }
    }

    /// Splits `curie` on the first occurrence of `sep`.
    ///
    /// Returns `None` when the separator does not occur.  Later occurrences stay in the
    /// identifier, so `go:GO:0032571` splits into `go` and `GO:0032571`.
    ///
    /// ```rust
    /// use bioregistry::Reference;
    ///
    /// let reference = Reference::split("go:GO:0032571", ":").unwrap();
    /// assert_eq!(reference.prefix, "go");
    /// assert_eq!(reference.identifier, "GO:0032571");
    /// assert!(Reference::split("nocolon", ":").is_none());
    /// ```
    pub fn split(curie: &str, sep: &str) -> Option<Self> {
        let (prefix, identifier) = curie.split_once(sep)?;
        Some(Self::new(prefix, identifier))
    }

    /// Renders the pair as a CURIE with the default separator.
    pub fn curie(&self) -> String {
        self.to_string()
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}", self.prefix, CURIE_SEPARATOR, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_first_separator() {
        let reference = Reference::split("a:b:c", ":").unwrap();
        assert_eq!(reference, Reference::new("a", "b:c"));
    }

    #[test]
    fn split_with_custom_separator() {
        let reference = Reference::split("GO_0032571", "_").unwrap();
        assert_eq!(reference, Reference::new("GO", "0032571"));
    }

    #[test]
    fn missing_separator() {
        assert_eq!(Reference::split("0032571", ":"), None);
    }

    #[test]
    fn display_is_a_curie() {
        assert_eq!(Reference::new("chebi", "24867").curie(), "chebi:24867");
    }
}
