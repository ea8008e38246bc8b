//! Synthetic hits for text found outside the child documents: CMS pages attached to a
//! record and alternate (TEI) transcriptions.

use folio_highlight::{FragmentExtractor, FragmentOptions, escape_html};
use folio_query::{CMS_TEXT_ALL, FULLTEXT};
use tracing::{debug, error};

use crate::{
    HitError, HitKind, IndexDocument,
    collaborators::ResourceKind,
    document::fields,
    factory::HitFactory,
    hit::{Hit, HitId},
    transcription::{html_text, tei_text},
    tree::HitTree,
};

/// Language used when a request names none.
const DEFAULT_LANGUAGE: &str = "en";

/// Translation key of the alternate transcription wrapper label.
const TEI_LABEL_KEY: &str = "TEI";

/// Adds CMS-page and alternate-transcription hits to a tree.
pub struct AuxiliarySynthesizer<'a> {
    /// Hit construction for the request.
    factory: &'a HitFactory<'a>,
}

impl<'a> AuxiliarySynthesizer<'a> {
    /// Creates a synthesizer using `factory`.
    pub fn new(factory: &'a HitFactory<'a>) -> Self {
        Self { factory }
    }

    /// Adds one hit per CMS page of `id`'s record whose text matches, with one child
    /// per matching fragment. Returns the number of page hits added.
    pub fn add_cms_page_hits(&self, tree: &mut HitTree, id: HitId) -> usize {
        let Some(terms) = self.factory.request().terms.as_ref() else {
            return 0;
        };
        let cms_terms: Vec<&str> = terms.terms(CMS_TEXT_ALL).collect();
        if cms_terms.is_empty() {
            return 0;
        }
        let Some(pi) = tree.hit(id).document().and_then(IndexDocument::pi) else {
            return 0;
        };

        let extractor = self.extractor(false, true);
        let highlighter = self.factory.highlighter();
        let pages = self.factory.services().cms.pages_for_record(pi);
        let mut added = 0;
        for page in pages {
            let fragments: Vec<String> = page
                .texts
                .iter()
                .map(|html| html_text(html))
                .flat_map(|text| {
                    extractor
                        .fragments(&text, &cms_terms)
                        .map(|fragment| highlighter.highlight(fragment.trim(), &cms_terms).html)
                        .collect::<Vec<_>>()
                })
                .collect();
            if fragments.is_empty() {
                continue;
            }

            let label = self.factory.translate(&page.menu_title);
            let page_id = tree.add_child(id, self.synthetic(HitKind::Cms, &label, &page.url));
            for fragment in fragments {
                let mut hit = self.synthetic(HitKind::Cms, &label, &page.url);
                hit.fragment = Some(fragment);
                tree.add_child(page_id, hit);
            }
            debug!(page = %page.id, "added CMS page hit");
            added += 1;
        }
        added
    }

    /// Adds a page hit for the alternate transcription of `id`'s document in
    /// `language`, with one child per matching fragment. Returns whether a hit was
    /// added.
    pub fn add_alternate_text_hits(
        &self,
        tree: &mut HitTree,
        id: HitId,
        language: Option<&str>,
    ) -> bool {
        let Some(terms) = self.factory.request().terms.as_ref() else {
            return false;
        };
        let fulltext: Vec<&str> = terms.terms(FULLTEXT).collect();
        if fulltext.is_empty() {
            return false;
        }
        let Some(doc) = tree.hit(id).document() else {
            return false;
        };
        let language = language.unwrap_or(DEFAULT_LANGUAGE).to_uppercase();
        let localized = format!("{}{}{language}", fields::FILENAME_TEI, fields::MIDFIX_LANG);
        let Some(filename) = doc
            .first_non_blank(&localized)
            .or_else(|| doc.first_non_blank(fields::FILENAME_TEI))
        else {
            return false;
        };
        let record = doc.pi().unwrap_or_default();

        let services = self.factory.services();
        let context = &self.factory.request().context;
        if !services
            .access
            .check(context, ResourceKind::Text, record, filename)
            .is_granted()
        {
            let err = HitError::AccessDenied {
                record: record.to_string(),
                filename: filename.to_string(),
            };
            debug!(%err, "alternate transcription withheld");
            return false;
        }
        let text = match services
            .texts
            .load(filename)
            .and_then(|raw| tei_text(&raw, filename))
        {
            Ok(text) => text,
            Err(err @ HitError::TranscriptionUnavailable { .. }) => {
                debug!(%err);
                return false;
            }
            Err(err) => {
                error!(%err, "failed to load alternate transcription");
                return false;
            }
        };

        let highlighter = self.factory.highlighter();
        let fragments: Vec<String> = self
            .extractor(false, false)
            .fragments(&text, &fulltext)
            .map(|fragment| highlighter.highlight(fragment.trim(), &fulltext).html)
            .collect();
        if fragments.is_empty() {
            return false;
        }

        let label = self.factory.translate(TEI_LABEL_KEY);
        let url = tree.hit(id).url().to_string();
        let wrapper = tree.add_child(id, self.synthetic(HitKind::Page, &label, &url));
        for fragment in fragments {
            let mut hit = self.synthetic(HitKind::Page, &label, &url);
            hit.fragment = Some(fragment);
            tree.add_child(wrapper, hit);
        }
        true
    }

    /// Fragment extraction for synthetic hits.
    fn extractor(&self, extend_to_sentence: bool, dedupe: bool) -> FragmentExtractor {
        FragmentExtractor::new(FragmentOptions {
            max_length: self.factory.options().fragment_length,
            extend_to_sentence,
            dedupe,
            proximity_distance: self.factory.proximity_distance(),
            first_match_only: false,
            fallback_if_unmatched: false,
        })
    }

    /// A hit with no source document.
    fn synthetic(&self, kind: HitKind, label: &str, url: &str) -> Hit {
        let short_label = escape_html(label);
        let locales = self.factory.display_locales();
        Hit {
            kind: Some(kind),
            translated_kind: Some(self.factory.translate(&kind.hit_type_key())),
            labels: locales
                .iter()
                .map(|locale| (locale.to_string(), label.to_string()))
                .collect(),
            short_labels: locales
                .iter()
                .map(|locale| (locale.to_string(), short_label.clone()))
                .collect(),
            label: label.to_string(),
            short_label,
            url: url.to_string(),
            ..Hit::default()
        }
    }
}
