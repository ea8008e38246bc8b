//! Hit kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitKind {
    /// A structural element (record, chapter, article).
    Structure,
    /// A page.
    Page,
    /// A group of metadata fields.
    GroupedMetadata,
    /// User-generated content.
    UserContent,
    /// A person (metadata or annotation).
    Person,
    /// A corporation (metadata or annotation).
    Corporation,
    /// An address annotation.
    Address,
    /// A comment annotation.
    Comment,
    /// An event.
    Event,
    /// A group of records.
    Group,
    /// A CMS page.
    Cms,
    /// A hit whose text the requester may not read.
    AccessDenied,
}

impl HitKind {
    /// All kinds in display order.
    pub const ALL: [Self; 12] = [
        Self::Structure,
        Self::Page,
        Self::GroupedMetadata,
        Self::UserContent,
        Self::Person,
        Self::Corporation,
        Self::Address,
        Self::Comment,
        Self::Event,
        Self::Group,
        Self::Cms,
        Self::AccessDenied,
    ];

    /// Maps an index value to a kind.
    ///
    /// `OVERVIEWPAGE` is an older name for CMS pages.
    pub fn from_index_name(name: &str) -> Option<Self> {
        if name == "OVERVIEWPAGE" {
            return Some(Self::Cms);
        }
        Self::ALL.into_iter().find(|kind| kind.index_name() == name)
    }

    /// Returns the index vocabulary name.
    pub fn index_name(self) -> &'static str {
        match self {
            Self::Structure => "DOCSTRCT",
            Self::Page => "PAGE",
            Self::GroupedMetadata => "METADATA",
            Self::UserContent => "UGC",
            Self::Person => "PERSON",
            Self::Corporation => "CORPORATION",
            Self::Address => "ADDRESS",
            Self::Comment => "COMMENT",
            Self::Event => "EVENT",
            Self::Group => "GROUP",
            Self::Cms => "CMS",
            Self::AccessDenied => "ACCESSDENIED",
        }
    }

    /// Translation key of the kind's name.
    pub fn label_key(self) -> String {
        format!("doctype_{}", self.index_name())
    }

    /// Translation key of the kind's hit-type label.
    pub fn hit_type_key(self) -> String {
        format!("searchHitType_{}", self.index_name())
    }
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.index_name())
    }
}
