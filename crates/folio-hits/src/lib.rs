//! Hit trees for folio search results.
//!
//! A search over a record yields an ordered batch of index documents: the record's
//! structure elements, pages, grouped metadata, user content and events. This crate
//! turns such a batch into a tree of [`Hit`]s:
//! - [`HitFactory`] builds one hit from one document, highlighting the label and the
//!   matched metadata
//! - [`TreeBuilder`] populates a hit's children incrementally, resolving each document's
//!   owner and attaching it there
//! - [`AuxiliarySynthesizer`] adds hits for matching CMS pages and alternate
//!   transcriptions
//!
//! Collaborators (document fetch, access control, text loading, translation, labels,
//! CMS lookup) are traits bundled in [`Services`]; [`Fixture`] answers all of them from
//! memory.
//!
//! # Example
//!
//! ```
//! use folio_hits::{
//!     Fixture, HitFactory, HitKind, HitOptions, IndexDocument, SearchRequest, TreeBuilder,
//!     fields,
//! };
//! use folio_query::{DEFAULT, SearchTermMap};
//!
//! let record = IndexDocument::new()
//!     .with(fields::IDDOC, "1")
//!     .with(fields::DOCTYPE, "DOCSTRCT")
//!     .with(fields::MD_TITLE, "Atlas");
//! let subject = IndexDocument::new()
//!     .with(fields::IDDOC, "2")
//!     .with(fields::IDDOC_OWNER, "1")
//!     .with(fields::DOCTYPE, "METADATA")
//!     .with(fields::LABEL, "MD_SUBJECT")
//!     .with("MD_SUBJECT", "library science");
//!
//! let mut terms = SearchTermMap::new();
//! terms.insert(DEFAULT, "library");
//! let fixture = Fixture::default();
//! let options = HitOptions::default();
//! let request = SearchRequest::new(Some(terms), "en");
//! let factory = HitFactory::new(&options, fixture.services(), &request);
//! let builder = TreeBuilder::new(&factory);
//!
//! let mut tree = builder.build_root(&record, vec![subject]);
//! let root = tree.root();
//! assert_eq!(builder.populate_children(&mut tree, root, 10, 0), 1);
//! assert_eq!(tree.hit(root).populated_count(), 1);
//!
//! let wrapper = tree.hit(root).children()[0];
//! assert_eq!(tree.hit(wrapper).metadata_count(), 1);
//! assert_eq!(tree.hit(wrapper).kind(), Some(HitKind::Structure));
//! ```

#![warn(missing_docs)]

mod auxiliary;
mod collaborators;
mod document;
mod error;
mod export;
mod factory;
mod hit;
mod kind;
mod memory;
mod options;
mod populate;
mod transcription;
mod tree;

#[cfg(test)]
mod tests;

pub use auxiliary::AuxiliarySynthesizer;
pub use collaborators::{
    AccessControl, AccessDecision, BrowseLabel, CmsPage, CmsPageSource, DocumentFetcher,
    IndexLabels, LabelProvider, RequestContext, ResourceKind, TextLoader, Translator,
};
pub use document::{DocType, IndexDocument, fields};
pub use error::HitError;
pub use export::{ExportRow, export_columns, export_rows};
pub use factory::{HitFactory, HitSource, OwnerDisplay, determine_kind};
pub use hit::{Hit, HitId, MetadataPair, PopulationState};
pub use kind::HitKind;
pub use memory::Fixture;
pub use options::{DEFAULT_FRAGMENT_LENGTH, HitOptions, SearchRequest, Services};
pub use populate::{PageText, Route, TreeBuilder, resolve_effective_kind_for_owner_attachment};
pub use transcription::{
    DirectoryTexts, TranscriptionFormat, alto_text, html_text, tei_text, to_plain_text,
};
pub use tree::{HitNode, HitTree, OwnerIndex};
