//! Hits: the nodes of a result tree.

use std::{cmp::Ordering, collections::BTreeMap};

use folio_highlight::escape_html;
use serde::{Deserialize, Serialize};

use crate::{HitKind, IndexDocument, document::fields};

/// Stable index of a hit inside its [`HitTree`](crate::HitTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HitId(pub(crate) usize);

/// A labelled, highlighted metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataPair {
    /// Translated field label.
    pub label: String,
    /// HTML-escaped value with highlight marks.
    pub value: String,
}

impl MetadataPair {
    /// Creates a pair.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How far a hit's child documents have been turned into child hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationState {
    /// No child document has produced a hit yet.
    Unpopulated,
    /// Some, but not all, child documents produced hits.
    PartiallyPopulated,
    /// Every child document produced a hit.
    FullyPopulated,
}

/// One node of a result tree.
#[derive(Debug, Clone, Default)]
pub struct Hit {
    /// Kind; `None` for documents of unrecognized type.
    pub(crate) kind: Option<HitKind>,
    /// Localized name of the kind.
    pub(crate) translated_kind: Option<String>,
    /// Plain label.
    pub(crate) label: String,
    /// Escaped label with highlight marks.
    pub(crate) short_label: String,
    /// Plain label by locale.
    pub(crate) labels: BTreeMap<String, String>,
    /// Highlighted label by locale.
    pub(crate) short_labels: BTreeMap<String, String>,
    /// Navigable target.
    pub(crate) url: String,
    /// Highlighted text preview.
    pub(crate) fragment: Option<String>,
    /// Matched metadata, unique per (label, value).
    pub(crate) found_metadata: Vec<MetadataPair>,
    /// Raw values of the configured export fields.
    pub(crate) export_metadata: BTreeMap<String, String>,
    /// Owned child hits, in attachment order.
    pub(crate) children: Vec<HitId>,
    /// Number of direct children per kind.
    pub(crate) hit_type_counts: BTreeMap<HitKind, usize>,
    /// Index documents still to be turned into children.
    pub(crate) child_documents: Vec<IndexDocument>,
    /// Number of child documents turned into hits.
    pub(crate) populated_count: usize,
    /// Source document, absent for synthetic hits.
    pub(crate) document: Option<IndexDocument>,
}

impl Hit {
    /// Returns the kind.
    pub fn kind(&self) -> Option<HitKind> {
        self.kind
    }

    /// Returns the localized hit-type label.
    pub fn translated_kind(&self) -> Option<&str> {
        self.translated_kind.as_deref()
    }

    /// Returns the plain label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the escaped, highlighted label.
    pub fn short_label(&self) -> &str {
        &self.short_label
    }

    /// Returns the plain label in `locale`.
    pub fn label_in(&self, locale: &str) -> Option<&str> {
        self.labels.get(locale).map(String::as_str)
    }

    /// Returns the highlighted label in `locale`.
    pub fn short_label_in(&self, locale: &str) -> Option<&str> {
        self.short_labels.get(locale).map(String::as_str)
    }

    /// Returns the highlighted labels by locale.
    pub fn short_labels(&self) -> &BTreeMap<String, String> {
        &self.short_labels
    }

    /// Returns the link target; empty for most synthetic hits.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the highlighted text preview.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the matched metadata.
    pub fn found_metadata(&self) -> &[MetadataPair] {
        &self.found_metadata
    }

    /// Returns the export metadata.
    pub fn export_metadata(&self) -> &BTreeMap<String, String> {
        &self.export_metadata
    }

    /// Returns the child hit ids.
    pub fn children(&self) -> &[HitId] {
        &self.children
    }

    /// Whether any child hit exists.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the per-kind child counts.
    pub fn hit_type_counts(&self) -> &BTreeMap<HitKind, usize> {
        &self.hit_type_counts
    }

    /// Returns the number of direct children of `kind`.
    pub fn count(&self, kind: HitKind) -> usize {
        self.hit_type_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Whether any kind has a nonzero count.
    pub fn has_hit_count(&self) -> bool {
        self.hit_type_counts.values().any(|&n| n > 0)
    }

    /// Number of CMS page children.
    pub fn cms_page_count(&self) -> usize {
        self.count(HitKind::Cms)
    }

    /// Number of structure children.
    pub fn structure_count(&self) -> usize {
        self.count(HitKind::Structure)
    }

    /// Number of page children.
    pub fn page_count(&self) -> usize {
        self.count(HitKind::Page)
    }

    /// Number of grouped-metadata children.
    pub fn metadata_count(&self) -> usize {
        self.count(HitKind::GroupedMetadata)
    }

    /// Number of event children.
    pub fn event_count(&self) -> usize {
        self.count(HitKind::Event)
    }

    /// Number of user-content children.
    pub fn user_content_count(&self) -> usize {
        self.count(HitKind::UserContent)
    }

    /// Returns the documents this hit is populated from.
    pub fn child_documents(&self) -> &[IndexDocument] {
        &self.child_documents
    }

    /// Returns how many child documents became hits.
    pub fn populated_count(&self) -> usize {
        self.populated_count
    }

    /// Whether child documents remain that have not produced hits.
    pub fn has_more_children(&self) -> bool {
        self.populated_count < self.child_documents.len()
    }

    /// Returns the population state.
    pub fn population_state(&self) -> PopulationState {
        if self.populated_count == 0 && !self.child_documents.is_empty() {
            PopulationState::Unpopulated
        } else if self.has_more_children() {
            PopulationState::PartiallyPopulated
        } else {
            PopulationState::FullyPopulated
        }
    }

    /// Returns the source document.
    pub fn document(&self) -> Option<&IndexDocument> {
        self.document.as_ref()
    }

    /// Returns the source document's identifier.
    pub fn iddoc(&self) -> Option<&str> {
        self.document.as_ref().and_then(IndexDocument::iddoc)
    }

    /// Returns the page order of the source document.
    pub fn order(&self) -> Option<u32> {
        self.document.as_ref().and_then(IndexDocument::order)
    }

    /// Compares hits by page order; hits without one sort first.
    pub fn cmp_page_order(&self, other: &Self) -> Ordering {
        self.order().cmp(&other.order())
    }

    /// CSS class for the structure type, empty when unknown.
    pub fn css_class(&self) -> String {
        self.document
            .as_ref()
            .and_then(|doc| doc.first_non_blank(fields::DOCSTRCT))
            .map_or_else(String::new, |t| format!("docstructtype__{t}"))
    }

    /// Renders the table row used in saved-search notification mails.
    pub fn notification_fragment(&self, count: usize) -> String {
        format!(
            "<tr><td>{count}.</td><td>{}</td></tr>",
            escape_html(&self.label)
        )
    }

    /// Adds a pair unless an identical one is present.
    pub(crate) fn add_found_metadata(&mut self, pair: MetadataPair) -> bool {
        if self.found_metadata.contains(&pair) {
            return false;
        }
        self.found_metadata.push(pair);
        true
    }
}
