//! In-memory collaborators backed by a JSON-loadable fixture.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    HitError, IndexDocument,
    collaborators::{
        AccessControl, AccessDecision, CmsPage, CmsPageSource, DocumentFetcher, IndexLabels,
        RequestContext, ResourceKind, TextLoader, Translator,
    },
    options::Services,
};

/// Everything the engine's collaborators answer from, held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Documents available to owner resolution.
    pub documents: Vec<IndexDocument>,
    /// CMS pages by record identifier.
    pub cms_pages: BTreeMap<String, Vec<CmsPage>>,
    /// Filenames the requester may not read.
    pub denied: BTreeSet<String>,
    /// Translations by locale, then key.
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
    /// Transcription file contents by filename.
    pub texts: BTreeMap<String, String>,
}

impl Fixture {
    /// Returns collaborators answering from this fixture, with labels from the index
    /// fields.
    pub fn services(&self) -> Services<'_> {
        Services {
            fetcher: self,
            access: self,
            texts: self,
            translator: self,
            labels: &IndexLabels,
            cms: self,
        }
    }
}

impl DocumentFetcher for Fixture {
    fn document_by_id(&self, iddoc: &str) -> Result<Option<IndexDocument>, HitError> {
        Ok(self
            .documents
            .iter()
            .find(|doc| doc.iddoc() == Some(iddoc))
            .cloned())
    }
}

impl AccessControl for Fixture {
    fn check(
        &self,
        _ctx: &RequestContext,
        _kind: ResourceKind,
        _record: &str,
        filename: &str,
    ) -> AccessDecision {
        if self.denied.contains(filename) {
            AccessDecision::Denied
        } else {
            AccessDecision::Granted
        }
    }
}

impl TextLoader for Fixture {
    fn load(&self, filename: &str) -> Result<String, HitError> {
        self.texts
            .get(filename)
            .cloned()
            .ok_or_else(|| HitError::TranscriptionUnavailable {
                filename: filename.to_string(),
            })
    }
}

impl Translator for Fixture {
    fn translate(&self, key: &str, locale: &str) -> String {
        self.translations
            .get(locale)
            .and_then(|keys| keys.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl CmsPageSource for Fixture {
    fn pages_for_record(&self, pi: &str) -> Vec<CmsPage> {
        self.cms_pages.get(pi).cloned().unwrap_or_default()
    }
}
