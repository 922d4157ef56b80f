//! # External Registry Mirrors
//!
//! Every resource can carry one block per external registry that also describes it.  The blocks
//! hold that registry's own, denormalized view of the resource: its prefix, name, pattern, URI
//! format, and so on.  Registries disagree with each other, so the blocks are never merged field
//! by field.  Instead the accessors on [`Resource`](crate::Resource) walk an explicit priority
//! list and read one [`MirrorField`] at a time through [`MirrorRef::field`].
//!
//! Each registry has its own record type because each registry exposes a different subset of
//! fields.  Keys a record type does not model are kept in its `extra` map so that a
//! load/save round trip is lossless.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metaprefix::{Metaprefix, MirrorField};

/// Unmodeled keys of a mirror block.
pub type Extra = BTreeMap<String, Value>;

//////////////////////////////////////////////// MIRIAM ////////////////////////////////////////////////

/// A record from the MIRIAM registry behind Identifiers.org.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiriamRecord {
    /// MIRIAM's prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// MIRIAM's accession for the namespace (e.g. `00000002`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage of the primary provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Local identifier pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// URI format of the primary provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example local identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether the uppercased prefix is embedded in local identifiers.
    #[serde(rename = "namespaceEmbedded", skip_serializing_if = "Option::is_none")]
    pub namespace_embedded: Option<bool>,
    /// Whether MIRIAM marks the namespace deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl MiriamRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

///////////////////////////////////////////////// N2T //////////////////////////////////////////////////

/// A record from the Name-to-Thing resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct N2tRecord {
    /// N2T's prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Local identifier pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// URI format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example local identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether the namespace is embedded in local identifiers.
    #[serde(rename = "namespaceEmbedded", skip_serializing_if = "Option::is_none")]
    pub namespace_embedded: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl N2tRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

////////////////////////////////////////////// OBO Foundry /////////////////////////////////////////////

/// A record from the OBO Foundry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OboFoundryRecord {
    /// OBO's lowercase ontology id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// The stylized prefix used in OBO PURLs and CURIEs (e.g. `FBbt`).
    #[serde(rename = "preferredPrefix", skip_serializing_if = "Option::is_none")]
    pub preferred_prefix: Option<String>,
    /// Ontology title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License label or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Source repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Contact name.
    #[serde(rename = "contact.label", skip_serializing_if = "Option::is_none")]
    pub contact_label: Option<String>,
    /// Whether the OBO Foundry marks the ontology obsolete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl OboFoundryRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::License => self.license.as_deref(),
            MirrorField::Repository => self.repository.as_deref(),
            MirrorField::ContactEmail => self.contact.as_deref(),
            MirrorField::ContactName => self.contact_label.as_deref(),
            _ => None,
        }
    }
}

///////////////////////////////////////////////// OLS //////////////////////////////////////////////////

/// A record from the EBI Ontology Lookup Service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OlsRecord {
    /// OLS ontology id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Ontology title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Loaded version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Whether OLS marks the ontology deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl OlsRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::License => self.license.as_deref(),
            MirrorField::Version => self.version.as_deref(),
            MirrorField::ContactEmail => self.contact.as_deref(),
            _ => None,
        }
    }
}

/////////////////////////////////////////////// Wikidata ///////////////////////////////////////////////

/// A Wikidata external-identifier property describing the resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikidataRecord {
    /// The property id (e.g. `P683`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Property label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Property description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Official website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Format constraint regular expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Formatter URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Formatter URI for RDF resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format_rdf: Option<String>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Wikidata item for the database itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl WikidataRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

////////////////////////////////////////////////// GO //////////////////////////////////////////////////

/// A record from the Gene Ontology database cross-reference file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoRecord {
    /// GO's database abbreviation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Database name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Local identifier syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// URL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl GoRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

///////////////////////////////////////////////// NCBI /////////////////////////////////////////////////

/// A record from NCBI's list of GenBank database cross-references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NcbiRecord {
    /// NCBI's db_xref tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Database name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Example identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl NcbiRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

/////////////////////////////////////////////// BioPortal //////////////////////////////////////////////

/// A record from NCBO BioPortal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BioportalRecord {
    /// BioPortal acronym.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Ontology name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Latest submission version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl BioportalRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::License => self.license.as_deref(),
            MirrorField::Version => self.version.as_deref(),
            MirrorField::ContactEmail => self.contact.as_deref(),
            _ => None,
        }
    }
}

///////////////////////////////////////////// Prefix Commons ///////////////////////////////////////////

/// A record from Prefix Commons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixCommonsRecord {
    /// Prefix Commons prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Local identifier pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Provider URI format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether Prefix Commons marks the entry deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl PrefixCommonsRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

////////////////////////////////////////////// Cellosaurus /////////////////////////////////////////////

/// A record from the Cellosaurus cross-reference list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellosaurusRecord {
    /// Cellosaurus abbreviation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Database name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Local identifier pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// URI format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Example identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Cellosaurus category (e.g. "Cell line databases/resources").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl CellosaurusRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::Pattern => self.pattern.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            MirrorField::Example => self.example.as_deref(),
            _ => None,
        }
    }
}

////////////////////////////////////////////// FAIRsharing /////////////////////////////////////////////

/// A record from FAIRsharing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairsharingRecord {
    /// FAIRsharing DOI-suffixed identifier (e.g. `FAIRsharing.62qk8w`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Record name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Source repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Whether FAIRsharing marks the record deprecated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl FairsharingRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::License => self.license.as_deref(),
            MirrorField::Repository => self.repository.as_deref(),
            MirrorField::ContactEmail => self.contact.as_deref(),
            _ => None,
        }
    }
}

//////////////////////////////////////////////// re3data ///////////////////////////////////////////////

/// A record from the Registry of Research Data Repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Re3dataRecord {
    /// re3data identifier (e.g. `r3d100012626`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Repository name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Whether re3data marks the repository offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Re3dataRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::Name => self.name.as_deref(),
            MirrorField::Description => self.description.as_deref(),
            MirrorField::Homepage => self.homepage.as_deref(),
            MirrorField::License => self.license.as_deref(),
            _ => None,
        }
    }
}

/////////////////////////////////////////////// BioContext /////////////////////////////////////////////

/// An entry from the BioContext JSON-LD context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiocontextRecord {
    /// Context prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// URI format derived from the context's URI prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_format: Option<String>,
    /// Unmodeled keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl BiocontextRecord {
    fn field(&self, field: MirrorField) -> Option<&str> {
        match field {
            MirrorField::Prefix => self.prefix.as_deref(),
            MirrorField::UriFormat => self.uri_format.as_deref(),
            _ => None,
        }
    }
}

/////////////////////////////////////////////// MirrorRef //////////////////////////////////////////////

/// A borrowed view of one mirror block, tagged by the registry it came from.
#[derive(Debug, Clone, Copy)]
pub enum MirrorRef<'a> {
    /// MIRIAM block.
    Miriam(&'a MiriamRecord),
    /// N2T block.
    N2t(&'a N2tRecord),
    /// OBO Foundry block.
    Obofoundry(&'a OboFoundryRecord),
    /// OLS block.
    Ols(&'a OlsRecord),
    /// Wikidata block.
    Wikidata(&'a WikidataRecord),
    /// GO block.
    Go(&'a GoRecord),
    /// NCBI block.
    Ncbi(&'a NcbiRecord),
    /// BioPortal block.
    Bioportal(&'a BioportalRecord),
    /// Prefix Commons block.
    Prefixcommons(&'a PrefixCommonsRecord),
    /// Cellosaurus block.
    Cellosaurus(&'a CellosaurusRecord),
    /// FAIRsharing block.
    Fairsharing(&'a FairsharingRecord),
    /// re3data block.
    Re3data(&'a Re3dataRecord),
    /// BioContext block.
    Biocontext(&'a BiocontextRecord),
}

impl<'a> MirrorRef<'a> {
    /// The registry this block came from.
    pub fn metaprefix(&self) -> Metaprefix {
        match self {
            MirrorRef::Miriam(_) => Metaprefix::Miriam,
            MirrorRef::N2t(_) => Metaprefix::N2t,
            MirrorRef::Obofoundry(_) => Metaprefix::Obofoundry,
            MirrorRef::Ols(_) => Metaprefix::Ols,
            MirrorRef::Wikidata(_) => Metaprefix::Wikidata,
            MirrorRef::Go(_) => Metaprefix::Go,
            MirrorRef::Ncbi(_) => Metaprefix::Ncbi,
            MirrorRef::Bioportal(_) => Metaprefix::Bioportal,
            MirrorRef::Prefixcommons(_) => Metaprefix::Prefixcommons,
            MirrorRef::Cellosaurus(_) => Metaprefix::Cellosaurus,
            MirrorRef::Fairsharing(_) => Metaprefix::Fairsharing,
            MirrorRef::Re3data(_) => Metaprefix::Re3data,
            MirrorRef::Biocontext(_) => Metaprefix::Biocontext,
        }
    }

    /// Reads one logical field from the block.
    ///
    /// Registries that never publish a field return `None` for it, as do blocks where the
    /// field is present but empty.
    pub fn field(&self, field: MirrorField) -> Option<&'a str> {
        let value = match *self {
            MirrorRef::Miriam(r) => r.field(field),
            MirrorRef::N2t(r) => r.field(field),
            MirrorRef::Obofoundry(r) => r.field(field),
            MirrorRef::Ols(r) => r.field(field),
            MirrorRef::Wikidata(r) => r.field(field),
            MirrorRef::Go(r) => r.field(field),
            MirrorRef::Ncbi(r) => r.field(field),
            MirrorRef::Bioportal(r) => r.field(field),
            MirrorRef::Prefixcommons(r) => r.field(field),
            MirrorRef::Cellosaurus(r) => r.field(field),
            MirrorRef::Fairsharing(r) => r.field(field),
            MirrorRef::Re3data(r) => r.field(field),
            MirrorRef::Biocontext(r) => r.field(field),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Whether this registry flags the resource as deprecated.
    pub fn is_deprecated(&self) -> bool {
        let flag = match *self {
            MirrorRef::Miriam(r) => r.deprecated,
            MirrorRef::Obofoundry(r) => r.deprecated,
            MirrorRef::Ols(r) => r.deprecated,
            MirrorRef::Prefixcommons(r) => r.deprecated,
            MirrorRef::Fairsharing(r) => r.deprecated,
            MirrorRef::Re3data(r) => r.deprecated,
            _ => None,
        };
        flag.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obofoundry_raw_keys() {
        let record: OboFoundryRecord = serde_json::from_str(
            r#"{"prefix": "fbbt", "preferredPrefix": "FBbt", "contact.label": "Jane", "domain": "anatomy"}"#,
        )
        .unwrap();
        assert_eq!(record.preferred_prefix.as_deref(), Some("FBbt"));
        assert_eq!(record.contact_label.as_deref(), Some("Jane"));
        assert_eq!(record.extra.get("domain"), Some(&Value::from("anatomy")));
    }

    #[test]
    fn unmodeled_keys_survive_round_trip() {
        let raw = r#"{"prefix":"chebi","namespaceEmbedded":true,"sampleId":"36927"}"#;
        let record: MiriamRecord = serde_json::from_str(raw).unwrap();
        let back: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(back["sampleId"], "36927");
        assert_eq!(back["namespaceEmbedded"], true);
    }

    #[test]
    fn field_lookup_is_per_registry() {
        let ncbi = NcbiRecord {
            name: Some("NCBI Taxonomy".to_string()),
            ..Default::default()
        };
        let view = MirrorRef::Ncbi(&ncbi);
        assert_eq!(view.metaprefix(), Metaprefix::Ncbi);
        assert_eq!(view.field(MirrorField::Name), Some("NCBI Taxonomy"));
        assert_eq!(view.field(MirrorField::Pattern), None);
    }

    #[test]
    fn blank_fields_read_as_missing() {
        let go = GoRecord {
            pattern: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(MirrorRef::Go(&go).field(MirrorField::Pattern), None);
    }

    #[test]
    fn deprecation_flags() {
        let ols = OlsRecord {
            deprecated: Some(true),
            ..Default::default()
        };
        assert!(MirrorRef::Ols(&ols).is_deprecated());
        let wikidata = WikidataRecord::default();
        assert!(!MirrorRef::Wikidata(&wikidata).is_deprecated());
    }
}
