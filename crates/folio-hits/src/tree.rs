//! The hit arena and per-hit population bookkeeping.
//!
//! Hits live in one `Vec` and refer to their children by [`HitId`]. The owner index of a
//! populated hit maps owner identifiers to hit ids without owning anything, so a hit is
//! only ever reachable from one parent's child list.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::{
    HitKind, IndexDocument,
    hit::{Hit, HitId, MetadataPair, PopulationState},
};

/// Owner lookup for one populated hit.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    /// Owner identifier to the hit that represents it.
    hits: HashMap<String, HitId>,
    /// Owner identifier to its raw document.
    documents: HashMap<String, IndexDocument>,
}

impl OwnerIndex {
    /// Returns the hit registered for `iddoc`.
    pub fn hit(&self, iddoc: &str) -> Option<HitId> {
        self.hits.get(iddoc).copied()
    }

    /// Returns the raw document registered for `iddoc`.
    pub fn document(&self, iddoc: &str) -> Option<&IndexDocument> {
        self.documents.get(iddoc)
    }

    /// Whether `iddoc` is registered.
    pub fn contains(&self, iddoc: &str) -> bool {
        self.hits.contains_key(iddoc)
    }

    /// Registers `hit` and its document under `iddoc`.
    pub fn insert(&mut self, iddoc: &str, hit: HitId, document: IndexDocument) {
        self.hits.insert(iddoc.to_string(), hit);
        self.documents.insert(iddoc.to_string(), document);
    }

    /// Points `iddoc` at a different hit, keeping its document.
    pub fn repoint(&mut self, iddoc: &str, hit: HitId) {
        self.hits.insert(iddoc.to_string(), hit);
    }
}

/// Mutable state of one hit's incremental population.
#[derive(Debug, Clone, Default)]
pub struct Population {
    /// Owner lookup.
    pub(crate) owners: OwnerIndex,
    /// Identifiers of child documents already turned into hits.
    pub(crate) attached: HashSet<String>,
}

/// A result tree: an arena of hits with a single root.
#[derive(Debug, Clone)]
pub struct HitTree {
    /// All hits, indexed by [`HitId`].
    hits: Vec<Hit>,
    /// The root hit.
    root: HitId,
    /// Population state of hits that have been populated.
    populations: HashMap<HitId, Population>,
}

impl HitTree {
    /// Creates a tree rooted at `root`.
    pub fn new(root: Hit) -> Self {
        Self {
            hits: vec![root],
            root: HitId(0),
            populations: HashMap::new(),
        }
    }

    /// Returns the root id.
    pub fn root(&self) -> HitId {
        self.root
    }

    /// Returns the hit with `id`.
    pub fn get(&self, id: HitId) -> Option<&Hit> {
        self.hits.get(id.0)
    }

    /// Returns the hit with `id`.
    ///
    /// Ids come from this tree, so the lookup cannot miss.
    pub fn hit(&self, id: HitId) -> &Hit {
        &self.hits[id.0]
    }

    /// Returns the hit with `id` mutably.
    pub(crate) fn hit_mut(&mut self, id: HitId) -> &mut Hit {
        &mut self.hits[id.0]
    }

    /// Number of hits in the tree.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the tree holds only its root.
    pub fn is_empty(&self) -> bool {
        self.hits.len() <= 1
    }

    /// Returns the direct children of `id`.
    pub fn children(&self, id: HitId) -> impl Iterator<Item = &Hit> {
        self.hit(id).children.iter().map(|&child| self.hit(child))
    }

    /// Returns all hit ids in pre-order, starting at the root.
    pub fn preorder(&self) -> Vec<HitId> {
        let mut order = Vec::with_capacity(self.hits.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.hit(id).children.iter().rev().copied());
        }
        order
    }

    /// Sets the documents `id` will be populated from.
    ///
    /// Replacing the documents resets the population bookkeeping of `id`.
    pub fn set_child_documents(&mut self, id: HitId, documents: Vec<IndexDocument>) {
        let hit = self.hit_mut(id);
        hit.child_documents = documents;
        hit.populated_count = 0;
        self.populations.remove(&id);
    }

    /// Adds a hit without attaching it.
    pub(crate) fn push(&mut self, hit: Hit) -> HitId {
        self.hits.push(hit);
        HitId(self.hits.len() - 1)
    }

    /// Appends `child` to `parent`'s children and counts it under its kind.
    pub(crate) fn attach_child(&mut self, parent: HitId, child: HitId) {
        let kind = self.hit(child).kind;
        let parent = self.hit_mut(parent);
        parent.children.push(child);
        if let Some(kind) = kind {
            *parent.hit_type_counts.entry(kind).or_insert(0) += 1;
        }
    }

    /// Adds `hit` as a new child of `parent`.
    pub(crate) fn add_child(&mut self, parent: HitId, hit: Hit) -> HitId {
        let id = self.push(hit);
        self.attach_child(parent, id);
        id
    }

    /// Returns the population state of `id`, registering the hit in its own owner index
    /// the first time.
    pub(crate) fn population_mut(&mut self, id: HitId) -> &mut Population {
        if !self.populations.contains_key(&id) {
            let mut population = Population::default();
            if let Some(doc) = &self.hits[id.0].document
                && let Some(iddoc) = doc.iddoc()
            {
                population.owners.insert(iddoc, id, doc.clone());
            }
            self.populations.insert(id, population);
        }
        self.populations.entry(id).or_default()
    }

    /// Returns the owner index of a populated hit.
    pub fn owner_index(&self, id: HitId) -> Option<&OwnerIndex> {
        self.populations.get(&id).map(|p| &p.owners)
    }

    /// Builds a nested, serializable view of the subtree at `id`.
    pub fn node(&self, id: HitId) -> HitNode {
        let hit = self.hit(id);
        HitNode {
            kind: hit.kind,
            translated_kind: hit.translated_kind.clone(),
            label: hit.label.clone(),
            short_label: hit.short_label.clone(),
            short_labels: hit.short_labels.clone(),
            url: hit.url.clone(),
            css_class: hit.css_class(),
            fragment: hit.fragment.clone(),
            found_metadata: hit.found_metadata.clone(),
            hit_type_counts: hit.hit_type_counts.clone(),
            populated_count: hit.populated_count,
            child_document_count: hit.child_documents.len(),
            population_state: hit.population_state(),
            children: hit.children.iter().map(|&child| self.node(child)).collect(),
        }
    }
}

/// Serializable view of a hit and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitNode {
    /// Kind.
    pub kind: Option<HitKind>,
    /// Localized hit-type label.
    pub translated_kind: Option<String>,
    /// Plain label.
    pub label: String,
    /// Escaped, highlighted label.
    pub short_label: String,
    /// Highlighted label by locale.
    pub short_labels: BTreeMap<String, String>,
    /// Link target.
    pub url: String,
    /// Structure type class.
    pub css_class: String,
    /// Highlighted text preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Matched metadata.
    pub found_metadata: Vec<MetadataPair>,
    /// Direct children per kind.
    pub hit_type_counts: BTreeMap<HitKind, usize>,
    /// Child documents turned into hits.
    pub populated_count: usize,
    /// Total child documents.
    pub child_document_count: usize,
    /// Population state.
    pub population_state: PopulationState,
    /// Child hits.
    pub children: Vec<HitNode>,
}
