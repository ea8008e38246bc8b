//! Hit construction from index documents.

use std::collections::BTreeSet;

use folio_highlight::{FragmentExtractor, FragmentOptions, Highlighter, escape_html};
use folio_query::{FULLTEXT, SearchTermMap, TermNormalizer};
use tracing::trace;

use crate::{
    HitKind, IndexDocument,
    document::fields,
    hit::{Hit, MetadataPair},
    options::{HitOptions, SearchRequest, Services},
};

/// What an owner hit already shows, used to keep grouped-metadata children from
/// repeating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerDisplay {
    /// Display fields the owner document carries.
    pub fields: BTreeSet<String>,
    /// The owner's found metadata.
    pub pairs: Vec<MetadataPair>,
}

impl OwnerDisplay {
    /// Captures what `owner` displays, given the configured display fields.
    pub fn of(owner: &Hit, display_fields: &[String]) -> Self {
        let fields = owner
            .document()
            .map(|doc| {
                display_fields
                    .iter()
                    .filter(|field| doc.contains(field))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            fields,
            pairs: owner.found_metadata().to_vec(),
        }
    }
}

/// The inputs of one hit construction besides the request.
#[derive(Debug, Clone, Copy)]
pub struct HitSource<'d> {
    /// The document the hit represents.
    pub doc: &'d IndexDocument,
    /// The owning document, if known.
    pub owner: Option<&'d IndexDocument>,
    /// What the owner hit already displays.
    pub owner_display: Option<&'d OwnerDisplay>,
    /// Plain-text transcription of a page.
    pub fulltext: Option<&'d str>,
    /// Kind to use instead of the one the document declares.
    pub override_kind: Option<HitKind>,
}

impl<'d> HitSource<'d> {
    /// A source with only the document.
    pub fn new(doc: &'d IndexDocument) -> Self {
        Self {
            doc,
            owner: None,
            owner_display: None,
            fulltext: None,
            override_kind: None,
        }
    }

    /// Sets the owner document.
    pub fn with_owner(mut self, owner: Option<&'d IndexDocument>) -> Self {
        self.owner = owner;
        self
    }

    /// Sets the owner's displayed metadata.
    pub fn with_owner_display(mut self, display: Option<&'d OwnerDisplay>) -> Self {
        self.owner_display = display;
        self
    }

    /// Sets the page transcription.
    pub fn with_fulltext(mut self, fulltext: Option<&'d str>) -> Self {
        self.fulltext = fulltext;
        self
    }

    /// Sets the kind override.
    pub fn with_kind(mut self, kind: Option<HitKind>) -> Self {
        self.override_kind = kind;
        self
    }
}

/// Determines a document's hit kind.
///
/// An override wins. Grouped metadata is refined by its metadata subtype and user
/// content by its content subtype; an unrecognized subtype keeps the base kind. An
/// unknown or missing type yields `None`.
pub fn determine_kind(doc: &IndexDocument, override_kind: Option<HitKind>) -> Option<HitKind> {
    if override_kind.is_some() {
        return override_kind;
    }
    let kind = HitKind::from_index_name(doc.doc_type_name()?)?;
    let subtype_field = match kind {
        HitKind::GroupedMetadata => fields::METADATATYPE,
        HitKind::UserContent => fields::UGCTYPE,
        _ => return Some(kind),
    };
    Some(
        doc.first_non_blank(subtype_field)
            .and_then(HitKind::from_index_name)
            .unwrap_or(kind),
    )
}

/// Builds hits for one request.
pub struct HitFactory<'a> {
    /// Engine settings.
    options: &'a HitOptions,
    /// Collaborators.
    services: Services<'a>,
    /// The request hits are built for.
    request: &'a SearchRequest,
    /// Term normalizer for fuzzy expansion.
    normalizer: TermNormalizer,
    /// Highlighter configured with the request's proximity distance.
    highlighter: Highlighter,
}

impl<'a> HitFactory<'a> {
    /// Creates a factory for `request`.
    pub fn new(options: &'a HitOptions, services: Services<'a>, request: &'a SearchRequest) -> Self {
        Self {
            options,
            services,
            request,
            normalizer: TermNormalizer::new(),
            highlighter: Highlighter::with_proximity(
                request.proximity_distance.max(options.proximity_distance),
            ),
        }
    }

    /// Token distance for phrase terms: the request's, but at least the configured
    /// default.
    pub fn proximity_distance(&self) -> u32 {
        self.request
            .proximity_distance
            .max(self.options.proximity_distance)
    }

    /// Locales labels are built for: the request locale first, then the configured
    /// ones.
    pub fn display_locales(&self) -> Vec<&'a str> {
        let mut locales = vec![self.request.locale.as_str()];
        for locale in &self.options.locales {
            if !locales.contains(&locale.as_str()) {
                locales.push(locale);
            }
        }
        locales
    }

    /// Returns the engine settings.
    pub fn options(&self) -> &'a HitOptions {
        self.options
    }

    /// Returns the collaborators.
    pub fn services(&self) -> Services<'a> {
        self.services
    }

    /// Returns the request.
    pub fn request(&self) -> &'a SearchRequest {
        self.request
    }

    /// Returns the highlighter.
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Translates `key` into the request locale.
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(key, &self.request.locale)
    }

    /// Translates `key` into `locale`.
    pub fn translate_in(&self, key: &str, locale: &str) -> String {
        self.services.translator.translate(key, locale)
    }

    /// Resolves the request's terms against the values found in `doc` and `fulltext`.
    ///
    /// Fuzzy tokens become the literal words they match; tokens matching nothing drop
    /// out.
    pub fn resolve_terms(&self, doc: &IndexDocument, fulltext: Option<&str>) -> Option<SearchTermMap> {
        let terms = self.request.terms.as_ref()?;
        let mut found: Vec<&str> = doc.metadata_values().collect();
        found.extend(fulltext);
        Some(self.normalizer.resolve(terms, &found))
    }

    /// Builds the hit for `source`.
    pub fn create_hit(&self, source: HitSource<'_>) -> Hit {
        let doc = source.doc;
        let kind = determine_kind(doc, source.override_kind);
        let terms = self.resolve_terms(doc, source.fulltext);
        let label_terms = terms
            .as_ref()
            .map(|terms| self.label_terms(terms))
            .unwrap_or_default();

        let mut hit = Hit {
            kind,
            translated_kind: kind.map(|k| self.translate(&k.hit_type_key())),
            document: Some(doc.clone()),
            ..Hit::default()
        };
        for locale in self.display_locales() {
            let browse = self.services.labels.browse_label(doc, source.owner, locale);
            let label = match kind {
                Some(HitKind::GroupedMetadata) => self.translate_in(&browse.label, locale),
                _ => browse.label,
            };
            let short_label = if label_terms.is_empty() {
                escape_html(&label)
            } else {
                self.highlighter.highlight(&label, &label_terms).html
            };
            if locale == self.request.locale {
                hit.label.clone_from(&label);
                hit.short_label.clone_from(&short_label);
                hit.url = browse.url;
            }
            hit.labels.insert(locale.to_string(), label);
            hit.short_labels.insert(locale.to_string(), short_label);
        }

        if let Some(terms) = &terms {
            if let Some(text) = source.fulltext {
                hit.fragment = self.page_fragment(text, &terms);
            }
            self.populate_found_metadata(&mut hit, doc, terms, source.owner_display);
        }

        for field in &self.options.export_fields {
            if let Some(value) = doc.first(field) {
                hit.export_metadata.insert(field.clone(), value.to_string());
            }
        }

        trace!(
            iddoc = doc.iddoc().unwrap_or_default(),
            kind = ?hit.kind,
            found = hit.found_metadata.len(),
            "created hit"
        );
        hit
    }

    /// Terms matched against labels: the catch-all keys, else the title field.
    fn label_terms<'t>(&self, terms: &'t SearchTermMap) -> BTreeSet<&'t str> {
        let catch_all: BTreeSet<&str> = self
            .options
            .catch_all_fields
            .iter()
            .flat_map(|key| terms.terms(key))
            .collect();
        if catch_all.is_empty() {
            terms.terms(fields::MD_TITLE).collect()
        } else {
            catch_all
        }
    }

    /// Highlights the first full-text fragment of a page, or its opening when nothing
    /// matches.
    fn page_fragment(&self, text: &str, terms: &SearchTermMap) -> Option<String> {
        let fulltext: Vec<&str> = terms.terms(FULLTEXT).collect();
        let extractor = FragmentExtractor::new(FragmentOptions {
            max_length: self.options.fragment_length,
            extend_to_sentence: true,
            dedupe: true,
            proximity_distance: self.proximity_distance(),
            first_match_only: true,
            fallback_if_unmatched: true,
        });
        let fragment = extractor.fragments(text, &fulltext).next()?;
        Some(self.highlighter.highlight(fragment.trim(), &fulltext).html)
    }

    /// Adds the metadata values of `doc` matched by `terms` to `hit`.
    ///
    /// Catch-all keys scan every metadata field, other keys only their own field.
    /// Values equal to the hit's label are skipped. A grouped-metadata hit whose group is
    /// one the owner displays adds nothing, and it never repeats a pair the owner
    /// already lists.
    pub fn populate_found_metadata(
        &self,
        hit: &mut Hit,
        doc: &IndexDocument,
        terms: &SearchTermMap,
        owner: Option<&OwnerDisplay>,
    ) {
        let grouped = hit.kind == Some(HitKind::GroupedMetadata);
        let owner_shows_group = grouped
            && owner.is_some_and(|owner| {
                doc.first_non_blank(fields::LABEL)
                    .is_some_and(|group| owner.fields.contains(group))
            });
        let owner_pairs = owner.filter(|_| grouped).map(|o| o.pairs.as_slice());

        for (key, key_terms) in terms {
            if key_terms.is_empty() || owner_shows_group || self.options.ignore_fields.contains(key)
            {
                continue;
            }
            if self.options.catch_all_fields.contains(key) {
                for field in doc.metadata_field_names() {
                    if !self.options.ignore_fields.contains(field) {
                        self.add_field_matches(hit, doc, field, key, key_terms, owner_pairs);
                    }
                }
            } else if doc.contains(key) {
                self.add_field_matches(hit, doc, key, key, key_terms, owner_pairs);
            }
        }
    }

    /// Highlights the values of one field and adds the matches to `hit`.
    fn add_field_matches(
        &self,
        hit: &mut Hit,
        doc: &IndexDocument,
        field: &str,
        key: &str,
        terms: &BTreeSet<String>,
        owner_pairs: Option<&[MetadataPair]>,
    ) {
        let translate = self.options.translate_fields.contains(field)
            || self.options.translate_fields.contains(key);
        let capped = self.options.capped_fields.contains(field);

        let mut matches = Vec::new();
        for value in doc.values(field) {
            if value.trim().is_empty() || *value == hit.label {
                continue;
            }
            let highlighted = if translate {
                self.highlighter
                    .highlight_translated(value, terms, |m| self.translate(m))
            } else {
                self.highlighter.highlight(value, terms)
            };
            if highlighted.matched {
                matches.push(highlighted.html);
                if capped {
                    break;
                }
            }
        }
        if matches.is_empty() {
            return;
        }

        let values = if self.options.one_line_fields.contains(field) {
            vec![matches.join(", ")]
        } else {
            matches
        };
        let label = self.translate(field);
        for value in values {
            let pair = MetadataPair::new(label.clone(), value);
            if owner_pairs.is_some_and(|pairs| pairs.contains(&pair)) {
                continue;
            }
            hit.add_found_metadata(pair);
        }
    }
}
