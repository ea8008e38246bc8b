//! Interfaces to the services the engine depends on.

use serde::{Deserialize, Serialize};

use crate::{HitError, IndexDocument, document::fields};

/// Per-request information passed through to access checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user, if any.
    pub user: Option<String>,
    /// Client address, if known.
    pub client_ip: Option<String>,
}

/// Resource classes an access check distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Transcription text.
    Text,
}

/// Result of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The resource may be read.
    Granted,
    /// The resource may not be read.
    Denied,
}

impl AccessDecision {
    /// Whether access was granted.
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Fetches single raw documents by identifier.
pub trait DocumentFetcher {
    /// Returns the document with `iddoc`, or `None` if the index has none.
    fn document_by_id(&self, iddoc: &str) -> Result<Option<IndexDocument>, HitError>;
}

/// Decides whether a request may read a resource.
pub trait AccessControl {
    /// Checks access to `filename` of record `record`.
    fn check(
        &self,
        ctx: &RequestContext,
        kind: ResourceKind,
        record: &str,
        filename: &str,
    ) -> AccessDecision;
}

/// Loads transcription files.
pub trait TextLoader {
    /// Returns the contents of `filename`.
    ///
    /// A missing file is [`HitError::TranscriptionUnavailable`]; other failures are
    /// [`HitError::Io`].
    fn load(&self, filename: &str) -> Result<String, HitError>;
}

/// Looks up localized strings.
pub trait Translator {
    /// Returns the translation of `key` in `locale`, or `key` itself when there is none.
    fn translate(&self, key: &str, locale: &str) -> String;
}

/// A hit's display label and link target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseLabel {
    /// Plain label.
    pub label: String,
    /// Navigable target, empty when there is none.
    pub url: String,
}

/// Builds labels and links for documents.
pub trait LabelProvider {
    /// Returns the label and url of `doc`, owned by `owner` if given.
    fn browse_label(
        &self,
        doc: &IndexDocument,
        owner: Option<&IndexDocument>,
        locale: &str,
    ) -> BrowseLabel;
}

/// A CMS page associated with a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsPage {
    /// Page identifier.
    pub id: String,
    /// Menu title; a translation key.
    pub menu_title: String,
    /// Relative url of the page.
    pub url: String,
    /// Textual content blocks as HTML, in page order.
    pub texts: Vec<String>,
}

/// Looks up the CMS pages attached to a record.
pub trait CmsPageSource {
    /// Returns the pages attached to record `pi`.
    fn pages_for_record(&self, pi: &str) -> Vec<CmsPage>;
}

/// Labels from the index fields themselves.
///
/// The label is the document's `LABEL`, else its title, else its owner's title, else
/// its identifier. Urls point at `/object/{PI}/{ORDER}/{LOGID}/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexLabels;

impl LabelProvider for IndexLabels {
    fn browse_label(
        &self,
        doc: &IndexDocument,
        owner: Option<&IndexDocument>,
        _locale: &str,
    ) -> BrowseLabel {
        let label = doc
            .first_non_blank(fields::LABEL)
            .or_else(|| doc.first_non_blank(fields::MD_TITLE))
            .or_else(|| owner.and_then(|o| o.first_non_blank(fields::MD_TITLE)))
            .or_else(|| doc.pi())
            .or_else(|| doc.iddoc())
            .unwrap_or_default()
            .to_string();

        let pi = doc.pi().or_else(|| owner.and_then(IndexDocument::pi));
        let url = pi.map_or_else(String::new, |pi| {
            let order = doc
                .order()
                .or_else(|| owner.and_then(IndexDocument::order))
                .unwrap_or(1);
            let logid = doc
                .first_non_blank(fields::LOGID)
                .or_else(|| owner.and_then(|o| o.first_non_blank(fields::LOGID)))
                .unwrap_or("-");
            format!("/object/{pi}/{order}/{logid}/")
        });

        BrowseLabel { label, url }
    }
}
