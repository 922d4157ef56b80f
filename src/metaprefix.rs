//! # Metaprefixes
//!
//! A metaprefix names an external registry (e.g. `obofoundry`, `miriam`).  The set of external
//! registries whose raw records are mirrored inside a [`Resource`](crate::Resource) is closed:
//! every mirror block has a typed struct in [`mirror`](crate::mirror), and every field priority
//! list on a resource is a slice of [`Metaprefix`] values rather than free strings.
//!
//! Metaprefixes that only appear as mapping keys or resolver codes (`scholia`, `bioregistry`)
//! stay plain strings.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///////////////////////////////////////////// Metaprefix /////////////////////////////////////////////

/// An external registry whose records are mirrored inside resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metaprefix {
    /// Identifiers.org / MIRIAM registry.
    Miriam,
    /// Name-to-Thing resolver.
    N2t,
    /// Open Biological and Biomedical Ontology Foundry.
    Obofoundry,
    /// EBI Ontology Lookup Service.
    Ols,
    /// Wikidata properties.
    Wikidata,
    /// Gene Ontology database cross-reference registry.
    Go,
    /// NCBI GenBank database cross-references.
    Ncbi,
    /// NCBO BioPortal.
    Bioportal,
    /// Prefix Commons.
    Prefixcommons,
    /// Cellosaurus cross-reference registry.
    Cellosaurus,
    /// FAIRsharing.
    Fairsharing,
    /// Registry of Research Data Repositories.
    Re3data,
    /// BioContext JSON-LD contexts.
    Biocontext,
}

impl Metaprefix {
    /// Every mirrored metaprefix in declaration order.
    pub const ALL: [Metaprefix; 13] = [
        Metaprefix::Miriam,
        Metaprefix::N2t,
        Metaprefix::Obofoundry,
        Metaprefix::Ols,
        Metaprefix::Wikidata,
        Metaprefix::Go,
        Metaprefix::Ncbi,
        Metaprefix::Bioportal,
        Metaprefix::Prefixcommons,
        Metaprefix::Cellosaurus,
        Metaprefix::Fairsharing,
        Metaprefix::Re3data,
        Metaprefix::Biocontext,
    ];

    /// The string key under which this registry appears in mappings and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metaprefix::Miriam => "miriam",
            Metaprefix::N2t => "n2t",
            Metaprefix::Obofoundry => "obofoundry",
            Metaprefix::Ols => "ols",
            Metaprefix::Wikidata => "wikidata",
            Metaprefix::Go => "go",
            Metaprefix::Ncbi => "ncbi",
            Metaprefix::Bioportal => "bioportal",
            Metaprefix::Prefixcommons => "prefixcommons",
            Metaprefix::Cellosaurus => "cellosaurus",
            Metaprefix::Fairsharing => "fairsharing",
            Metaprefix::Re3data => "re3data",
            Metaprefix::Biocontext => "biocontext",
        }
    }
}

impl Display for Metaprefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The string was not a known mirrored metaprefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetaprefix(pub String);

impl Display for UnknownMetaprefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Unknown metaprefix '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetaprefix {}

impl FromStr for Metaprefix {
    type Err = UnknownMetaprefix;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metaprefix::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMetaprefix(s.to_string()))
    }
}

///////////////////////////////////////////// MirrorField ////////////////////////////////////////////

/// A logical field that can be read from the curated record or any mirror block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorField {
    /// The registry's own prefix for the resource.
    Prefix,
    /// Human readable name.
    Name,
    /// Free-text description.
    Description,
    /// Homepage URL.
    Homepage,
    /// Local identifier regular expression.
    Pattern,
    /// URI format string with a `$1` token.
    UriFormat,
    /// Example local identifier.
    Example,
    /// License name or URL.
    License,
    /// Version string.
    Version,
    /// Source repository URL.
    Repository,
    /// Contact email address.
    ContactEmail,
    /// Contact person's name.
    ContactName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trip() {
        for metaprefix in Metaprefix::ALL {
            let parsed: Metaprefix = metaprefix.as_str().parse().unwrap();
            assert_eq!(parsed, metaprefix);
        }
    }

    #[test]
    fn unknown_metaprefix() {
        assert_eq!(
            "scholia".parse::<Metaprefix>(),
            Err(UnknownMetaprefix("scholia".to_string()))
        );
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Metaprefix::Obofoundry).unwrap();
        assert_eq!(json, "\"obofoundry\"");
        let back: Metaprefix = serde_json::from_str("\"re3data\"").unwrap();
        assert_eq!(back, Metaprefix::Re3data);
    }
}
