//! Error types for registry operations.
//!
//! Lookup misses (unknown prefix, malformed CURIE, missing URI format) are not errors; they are
//! `None`.  The variants here cover the persistence boundary, data-integrity violations that a
//! caller asked to be strict about, and programmer errors such as asking the metaregistry about
//! a registry it does not know.

/// Errors that can occur while loading, indexing, or accumulating the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An I/O operation on a registry, metaregistry, or config file failed.
    Io(String),
    /// JSON or YAML serialization or deserialization failed.
    Serialization(String),
    /// Two canonical prefixes normalize to the same key.
    DuplicatePrefix {
        /// The prefix that was being inserted.
        prefix: String,
        /// The canonical prefix that already owns the normalized key.
        existing: String,
    },
    /// A synonym normalizes to a key already owned by a different canonical prefix.
    SynonymConflict {
        /// The raw synonym text.
        key: String,
        /// The canonical prefix that already owns the normalized key.
        existing: String,
        /// The canonical prefix that tried to claim it.
        incoming: String,
    },
    /// A prefix (primary or synonym) is claimed by two records during accumulation.
    PrefixCollision {
        /// The contested prefix.
        prefix: String,
        /// The resource that claimed it first.
        existing: String,
        /// The resource that tried to claim it.
        incoming: String,
    },
    /// A URI prefix (primary or synonym) is claimed by two records during accumulation.
    UriPrefixCollision {
        /// The contested URI prefix.
        uri_prefix: String,
        /// The resource that claimed it first.
        existing: String,
        /// The resource that tried to claim it.
        incoming: String,
    },
    /// A metaprefix that the metaregistry does not describe.
    UnknownMetaprefix(String),
    /// A resource that cannot be added to the registry.
    InvalidResource {
        /// The resource's prefix.
        prefix: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::DuplicatePrefix { prefix, existing } => {
                write!(
                    f,
                    "Duplicate prefix '{}' normalizes to existing prefix '{}'",
                    prefix, existing
                )
            }
            Self::SynonymConflict {
                key,
                existing,
                incoming,
            } => write!(
                f,
                "Synonym '{}' of '{}' is already claimed by '{}'",
                key, incoming, existing
            ),
            Self::PrefixCollision {
                prefix,
                existing,
                incoming,
            } => write!(
                f,
                "Prefix '{}' of '{}' collides with the one registered for '{}'",
                prefix, incoming, existing
            ),
            Self::UriPrefixCollision {
                uri_prefix,
                existing,
                incoming,
            } => write!(
                f,
                "URI prefix '{}' of '{}' collides with the one registered for '{}'",
                uri_prefix, incoming, existing
            ),
            Self::UnknownMetaprefix(metaprefix) => {
                write!(f, "Unknown metaprefix: {}", metaprefix)
            }
            Self::InvalidResource { prefix, reason } => {
                write!(f, "Invalid resource '{}': {}", prefix, reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<std::io::Error> for RegistryError {
    fn from(e: std::io::Error) -> Self {
        RegistryError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Serialization(e.to_string())
    }
}

impl From<serde_yml::Error> for RegistryError {
    fn from(e: serde_yml::Error) -> Self {
        RegistryError::Serialization(e.to_string())
    }
}
