//! Incremental tree population and owner resolution.
//!
//! [`TreeBuilder::populate_children`] turns a window of a hit's child documents into
//! hits. Finer-grained documents (pages, grouped metadata, user content, events) hang
//! under the hit of their owner, which is created on first reference. Structure
//! documents become direct children of the root.

use tracing::{debug, error, trace, warn};

use crate::{
    HitError, HitKind, IndexDocument,
    collaborators::ResourceKind,
    document::{DocType, fields},
    factory::{HitFactory, HitSource, OwnerDisplay},
    hit::HitId,
    transcription::{TranscriptionFormat, to_plain_text},
    tree::HitTree,
};

/// Outcome of loading a page's transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// The plain text of the page.
    Loaded(String),
    /// A transcription exists but the requester may not read it.
    Denied,
    /// No transcription could be loaded.
    Unavailable,
}

/// Where a child document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Under the hit of its owner, optionally with a replacement kind.
    Owner {
        /// Kind to give the child instead of its declared one.
        override_kind: Option<HitKind>,
    },
    /// Directly under the root, keyed by its own identifier.
    Structure,
    /// Nowhere; the document produces no hit.
    Skip,
}

/// Routes a document of `doc_type`, given the outcome of loading its page text.
///
/// Pages with text join the owner-attached kinds unchanged; pages the requester may
/// not read join them as [`HitKind::AccessDenied`]; pages without text are skipped.
/// Groups are skipped.
pub fn resolve_effective_kind_for_owner_attachment(
    doc_type: DocType,
    page: Option<&PageText>,
) -> Route {
    match doc_type {
        DocType::Page => match page {
            Some(PageText::Loaded(_)) => Route::Owner {
                override_kind: None,
            },
            Some(PageText::Denied) => Route::Owner {
                override_kind: Some(HitKind::AccessDenied),
            },
            Some(PageText::Unavailable) | None => Route::Skip,
        },
        DocType::Metadata | DocType::Ugc | DocType::Event => Route::Owner {
            override_kind: None,
        },
        DocType::Docstrct => Route::Structure,
        DocType::Group => Route::Skip,
    }
}

/// Identifies a child document for attachment bookkeeping: its identifier, or its
/// position among the child documents when it has none.
fn attachment_key(doc: &IndexDocument, position: usize) -> String {
    match doc.iddoc().filter(|iddoc| !iddoc.trim().is_empty()) {
        Some(iddoc) => iddoc.to_string(),
        None => format!("#{position}"),
    }
}

/// Builds and incrementally populates hit trees.
pub struct TreeBuilder<'a> {
    /// Hit construction for the request.
    factory: &'a HitFactory<'a>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder using `factory`.
    pub fn new(factory: &'a HitFactory<'a>) -> Self {
        Self { factory }
    }

    /// Creates a tree rooted at the hit for `root`, to be populated from `children`.
    pub fn build_root(&self, root: &IndexDocument, children: Vec<IndexDocument>) -> HitTree {
        let hit = self.factory.create_hit(HitSource::new(root));
        let mut tree = HitTree::new(hit);
        let root_id = tree.root();
        tree.set_child_documents(root_id, children);
        tree
    }

    /// Turns up to `count` child documents of `id`, starting at offset `skip`, into
    /// hits, and returns how many were added.
    ///
    /// The window is clamped to the available documents. Documents already turned into
    /// hits by an earlier call are not processed again. Failures affect only the
    /// document they occur on.
    pub fn populate_children(
        &self,
        tree: &mut HitTree,
        id: HitId,
        count: usize,
        skip: usize,
    ) -> usize {
        let documents = tree.hit(id).child_documents();
        let start = skip.min(documents.len());
        let end = skip.saturating_add(count).min(documents.len());
        let window = documents[start..end].to_vec();

        let mut added = 0;
        for (position, doc) in (start..end).zip(&window) {
            let key = attachment_key(doc, position);
            match self.process_document(tree, id, doc, &key) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(err @ (HitError::UnknownDocumentType { .. } | HitError::OwnerNotFound { .. })) => {
                    warn!(%err, "skipping child document");
                }
                Err(err) => error!(%err, "failed to process child document"),
            }
        }

        let hit = tree.hit_mut(id);
        hit.populated_count = (hit.populated_count + added).min(hit.child_documents.len());
        debug!(
            start,
            end,
            added,
            populated = hit.populated_count,
            total = hit.child_documents.len(),
            "populated children"
        );
        added
    }

    /// Turns every remaining child document of `id` into hits.
    pub fn populate_all(&self, tree: &mut HitTree, id: HitId) -> usize {
        let total = tree.hit(id).child_documents().len();
        self.populate_children(tree, id, total, 0)
    }

    /// Processes one child document, returning whether it produced a new hit.
    ///
    /// `key` identifies the document among the child documents of `id`.
    fn process_document(
        &self,
        tree: &mut HitTree,
        id: HitId,
        doc: &IndexDocument,
        key: &str,
    ) -> Result<bool, HitError> {
        if tree.population_mut(id).attached.contains(key) {
            trace!(key, "child document already attached");
            return Ok(false);
        }

        let doc_type = doc.doc_type().ok_or_else(|| HitError::UnknownDocumentType {
            iddoc: key.to_string(),
            doc_type: doc.doc_type_name().map(String::from),
        })?;
        let page = (doc_type == DocType::Page).then(|| self.load_page_text(doc));

        match resolve_effective_kind_for_owner_attachment(doc_type, page.as_ref()) {
            Route::Skip => {
                debug!(key, ?doc_type, "no hit for child document");
                Ok(false)
            }
            Route::Structure => Ok(self.attach_structure(tree, id, doc, key)),
            Route::Owner { override_kind } => {
                let fulltext = match &page {
                    Some(PageText::Loaded(text)) => Some(text.as_str()),
                    _ => None,
                };
                self.attach_to_owner(tree, id, doc, key, doc_type, override_kind, fulltext)
            }
        }
    }

    /// Attaches a structure document under the root unless its identifier is known.
    ///
    /// Only structures with an identifier are registered as owners.
    fn attach_structure(
        &self,
        tree: &mut HitTree,
        id: HitId,
        doc: &IndexDocument,
        key: &str,
    ) -> bool {
        let iddoc = doc.iddoc().filter(|iddoc| !iddoc.trim().is_empty());
        if let Some(iddoc) = iddoc
            && tree.population_mut(id).owners.contains(iddoc)
        {
            trace!(iddoc, "structure already present");
            return false;
        }

        let hit = self.factory.create_hit(HitSource::new(doc));
        let root = tree.root();
        let child = tree.add_child(root, hit);
        let population = tree.population_mut(id);
        if let Some(iddoc) = iddoc {
            population.owners.insert(iddoc, child, doc.clone());
        }
        population.attached.insert(key.to_string());
        true
    }

    /// Attaches a document under the hit of its owner.
    #[allow(clippy::too_many_arguments)]
    fn attach_to_owner(
        &self,
        tree: &mut HitTree,
        id: HitId,
        doc: &IndexDocument,
        key: &str,
        doc_type: DocType,
        override_kind: Option<HitKind>,
        fulltext: Option<&str>,
    ) -> Result<bool, HitError> {
        let owner_iddoc = doc.owner_iddoc().ok_or_else(|| HitError::OwnerNotFound {
            iddoc: key.to_string(),
            owner: String::new(),
        })?;
        let owner = self.resolve_owner(tree, id, key, owner_iddoc)?;

        let owner_doc = tree
            .owner_index(id)
            .and_then(|owners| owners.document(owner_iddoc))
            .cloned();
        let display = OwnerDisplay::of(tree.hit(owner), &self.factory.options().hit_metadata);
        let hit = self.factory.create_hit(
            HitSource::new(doc)
                .with_owner(owner_doc.as_ref())
                .with_owner_display(Some(&display))
                .with_fulltext(fulltext)
                .with_kind(override_kind),
        );

        if hit.kind == Some(HitKind::GroupedMetadata) && hit.found_metadata.is_empty() {
            trace!(key, "grouped metadata adds nothing to its owner");
            return Ok(false);
        }
        if doc_type != DocType::Ugc {
            let pairs = hit.found_metadata.clone();
            let owner_hit = tree.hit_mut(owner);
            for pair in pairs {
                owner_hit.add_found_metadata(pair);
            }
        }

        tree.add_child(owner, hit);
        tree.population_mut(id).attached.insert(key.to_string());
        Ok(true)
    }

    /// Returns the hit of owner `owner_iddoc`, creating it on first reference.
    ///
    /// An owner that resolves to `id` itself gets a separate wrapper hit under `id`,
    /// which later references resolve to. `child` names the referencing document in
    /// errors.
    fn resolve_owner(
        &self,
        tree: &mut HitTree,
        id: HitId,
        child: &str,
        owner_iddoc: &str,
    ) -> Result<HitId, HitError> {
        let owner = match tree.population_mut(id).owners.hit(owner_iddoc) {
            Some(owner) => owner,
            None => {
                let owner_doc = self
                    .factory
                    .services()
                    .fetcher
                    .document_by_id(owner_iddoc)?
                    .ok_or_else(|| HitError::OwnerNotFound {
                        iddoc: child.to_string(),
                        owner: owner_iddoc.to_string(),
                    })?;
                let hit = self.factory.create_hit(HitSource::new(&owner_doc));
                let owner = tree.add_child(id, hit);
                tree.population_mut(id)
                    .owners
                    .insert(owner_iddoc, owner, owner_doc);
                debug!(owner = owner_iddoc, "resolved owner");
                return Ok(owner);
            }
        };
        if owner != id {
            return Ok(owner);
        }

        let owner_doc = tree
            .population_mut(id)
            .owners
            .document(owner_iddoc)
            .cloned()
            .ok_or_else(|| HitError::OwnerNotFound {
                iddoc: child.to_string(),
                owner: owner_iddoc.to_string(),
            })?;
        let wrapper = self.factory.create_hit(HitSource::new(&owner_doc));
        let wrapper = tree.add_child(id, wrapper);
        tree.population_mut(id).owners.repoint(owner_iddoc, wrapper);
        debug!(owner = owner_iddoc, "wrapped owner that is the populated hit");
        Ok(wrapper)
    }

    /// Loads a page's transcription, preferring plain text over ALTO.
    ///
    /// Each file is access-checked before it is read.
    fn load_page_text(&self, doc: &IndexDocument) -> PageText {
        let services = self.factory.services();
        let context = &self.factory.request().context;
        let record = doc.pi().unwrap_or_default();
        let mut denied = false;

        for (field, format) in [
            (fields::FILENAME_FULLTEXT, TranscriptionFormat::PlainText),
            (fields::FILENAME_ALTO, TranscriptionFormat::Alto),
        ] {
            let Some(filename) = doc.first_non_blank(field) else {
                continue;
            };
            if !services
                .access
                .check(context, ResourceKind::Text, record, filename)
                .is_granted()
            {
                let err = HitError::AccessDenied {
                    record: record.to_string(),
                    filename: filename.to_string(),
                };
                debug!(%err, "page text withheld");
                denied = true;
                continue;
            }
            match services
                .texts
                .load(filename)
                .and_then(|raw| to_plain_text(format, &raw, filename))
            {
                Ok(text) if !text.trim().is_empty() => return PageText::Loaded(text),
                Ok(_) => debug!(filename, "transcription is empty"),
                Err(err @ HitError::TranscriptionUnavailable { .. }) => debug!(%err),
                Err(err) => error!(%err, "failed to load transcription"),
            }
        }

        if denied {
            PageText::Denied
        } else {
            PageText::Unavailable
        }
    }
}
