//! Index documents: the raw field maps hits are built from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, serde_as};

/// Field names used by the engine.
pub mod fields {
    /// Unique document identifier.
    pub const IDDOC: &str = "IDDOC";
    /// Identifier of the owning document.
    pub const IDDOC_OWNER: &str = "IDDOC_OWNER";
    /// Document type.
    pub const DOCTYPE: &str = "DOCTYPE";
    /// Subtype of grouped metadata documents.
    pub const METADATATYPE: &str = "METADATATYPE";
    /// Subtype of user-generated content documents.
    pub const UGCTYPE: &str = "UGCTYPE";
    /// Display label; for grouped metadata, the name of the grouped field.
    pub const LABEL: &str = "LABEL";
    /// Record identifier.
    pub const PI: &str = "PI";
    /// Identifier of the top-level record a document belongs to.
    pub const PI_TOPSTRUCT: &str = "PI_TOPSTRUCT";
    /// Logical structure identifier.
    pub const LOGID: &str = "LOGID";
    /// Page order.
    pub const ORDER: &str = "ORDER";
    /// Structure type (monograph, chapter, ...).
    pub const DOCSTRCT: &str = "DOCSTRCT";
    /// Title.
    pub const MD_TITLE: &str = "MD_TITLE";
    /// Plain-text transcription file.
    pub const FILENAME_FULLTEXT: &str = "FILENAME_FULLTEXT";
    /// Line-layout (ALTO) transcription file.
    pub const FILENAME_ALTO: &str = "FILENAME_ALTO";
    /// Alternate (TEI) transcription file.
    pub const FILENAME_TEI: &str = "FILENAME_TEI";
    /// Midfix between a field name and an upper-case language code.
    pub const MIDFIX_LANG: &str = "_LANG_";
    /// Suffix of untokenized field copies.
    pub const SUFFIX_UNTOKENIZED: &str = "_UNTOKENIZED";
}

/// The closed vocabulary of the document-type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    /// Structural element.
    Docstrct,
    /// Page.
    Page,
    /// Grouped metadata.
    Metadata,
    /// User-generated content.
    Ugc,
    /// Event.
    Event,
    /// Group of records (series, convolute).
    Group,
}

impl DocType {
    /// Parses an index value.
    pub fn from_index_name(name: &str) -> Option<Self> {
        match name {
            "DOCSTRCT" => Some(Self::Docstrct),
            "PAGE" => Some(Self::Page),
            "METADATA" => Some(Self::Metadata),
            "UGC" => Some(Self::Ugc),
            "EVENT" => Some(Self::Event),
            "GROUP" => Some(Self::Group),
            _ => None,
        }
    }
}

/// One index document: field name to one or more string values.
///
/// In JSON, each field holds either a single string or an array of strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexDocument {
    /// Field values by name.
    #[serde_as(as = "BTreeMap<_, OneOrMany<_>>")]
    fields: BTreeMap<String, Vec<String>>,
}

impl IndexDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style single-value field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    /// Appends a value to a field.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(value.into());
    }

    /// Returns the first value of a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the first value of a field if it is not blank.
    pub fn first_non_blank(&self, field: &str) -> Option<&str> {
        self.first(field).filter(|v| !v.trim().is_empty())
    }

    /// Returns all values of a field.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Checks whether the field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns all field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the metadata-style field names: `MD_*` and `NORM_*`, without untokenized
    /// copies.
    pub fn metadata_field_names(&self) -> impl Iterator<Item = &str> {
        self.field_names().filter(|name| {
            (name.starts_with("MD_") || name.starts_with("NORM_"))
                && !name.ends_with(fields::SUFFIX_UNTOKENIZED)
        })
    }

    /// Returns every value of every metadata-style field.
    pub fn metadata_values(&self) -> impl Iterator<Item = &str> {
        self.metadata_field_names()
            .flat_map(|name| self.values(name))
            .map(String::as_str)
    }

    /// Returns the document identifier.
    pub fn iddoc(&self) -> Option<&str> {
        self.first_non_blank(fields::IDDOC)
    }

    /// Returns the owner identifier.
    pub fn owner_iddoc(&self) -> Option<&str> {
        self.first_non_blank(fields::IDDOC_OWNER)
    }

    /// Returns the record identifier, preferring the top-level record's.
    pub fn pi(&self) -> Option<&str> {
        self.first_non_blank(fields::PI_TOPSTRUCT)
            .or_else(|| self.first_non_blank(fields::PI))
    }

    /// Returns the raw document-type value.
    pub fn doc_type_name(&self) -> Option<&str> {
        self.first_non_blank(fields::DOCTYPE)
    }

    /// Returns the parsed document type.
    pub fn doc_type(&self) -> Option<DocType> {
        self.doc_type_name().and_then(DocType::from_index_name)
    }

    /// Returns the page order, if numeric.
    pub fn order(&self) -> Option<u32> {
        self.first(fields::ORDER).and_then(|v| v.trim().parse().ok())
    }
}

impl<K, V> FromIterator<(K, V)> for IndexDocument
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Self::new();
        for (field, value) in iter {
            doc.push(field, value);
        }
        doc
    }
}
