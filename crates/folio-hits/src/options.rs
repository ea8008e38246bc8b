//! Engine settings, injected collaborators and per-request parameters.

use std::collections::BTreeSet;

use folio_config::Config;
use folio_query::SearchTermMap;

use crate::collaborators::{
    AccessControl, CmsPageSource, DocumentFetcher, LabelProvider, RequestContext, TextLoader,
    Translator,
};

/// Default maximum fragment length in characters.
pub const DEFAULT_FRAGMENT_LENGTH: usize = 200;

/// Read-only settings the engine consults while building hits.
#[derive(Debug, Clone)]
pub struct HitOptions {
    /// Maximum fragment length in characters.
    pub fragment_length: usize,
    /// Default token distance for phrase terms.
    pub proximity_distance: u32,
    /// Search-term keys whose terms apply to every metadata field.
    pub catch_all_fields: BTreeSet<String>,
    /// Fields never listed as found metadata.
    pub ignore_fields: BTreeSet<String>,
    /// Fields whose matched values are translation keys.
    pub translate_fields: BTreeSet<String>,
    /// Fields whose matches are joined into a single entry.
    pub one_line_fields: BTreeSet<String>,
    /// Fields capped to their first matching value.
    pub capped_fields: BTreeSet<String>,
    /// Fields a hit already displays on its own.
    pub hit_metadata: Vec<String>,
    /// Fields copied raw into export metadata.
    pub export_fields: Vec<String>,
    /// Locales labels are built for.
    pub locales: Vec<String>,
    /// Locale used when a request names none.
    pub default_locale: String,
}

impl Default for HitOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for HitOptions {
    fn from(config: &Config) -> Self {
        let set = |fields: &[String]| fields.iter().cloned().collect::<BTreeSet<_>>();
        Self {
            fragment_length: config.search.fragment_length,
            proximity_distance: config.search.proximity_distance,
            catch_all_fields: set(&config.search.catch_all_fields),
            ignore_fields: set(&config.display.ignore_fields),
            translate_fields: set(&config.display.translate_fields),
            one_line_fields: set(&config.display.one_line_fields),
            capped_fields: set(&config.display.capped_fields),
            hit_metadata: config.display.hit_metadata.clone(),
            export_fields: config.export.fields.clone(),
            locales: config.search.locales.clone(),
            default_locale: config.search.default_locale.clone(),
        }
    }
}

impl HitOptions {
    /// A request for `terms` in the default locale, with the configured proximity
    /// distance.
    pub fn request(&self, terms: Option<SearchTermMap>) -> SearchRequest {
        SearchRequest::new(terms, self.default_locale.clone())
            .with_proximity(self.proximity_distance)
    }
}

/// The collaborators a tree build calls out to.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Raw-document fetch for owner resolution.
    pub fetcher: &'a dyn DocumentFetcher,
    /// Access checks for transcription files.
    pub access: &'a dyn AccessControl,
    /// Transcription loading.
    pub texts: &'a dyn TextLoader,
    /// Localized strings.
    pub translator: &'a dyn Translator,
    /// Labels and links.
    pub labels: &'a dyn LabelProvider,
    /// CMS pages per record.
    pub cms: &'a dyn CmsPageSource,
}

/// One search request: the terms to mark and who is asking.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Normalized search terms by field; `None` for plain browsing.
    pub terms: Option<SearchTermMap>,
    /// Display locale.
    pub locale: String,
    /// Request context for access checks.
    pub context: RequestContext,
    /// Token distance for phrase terms.
    pub proximity_distance: u32,
}

impl SearchRequest {
    /// Creates a request for `terms` in `locale`.
    pub fn new(terms: Option<SearchTermMap>, locale: impl Into<String>) -> Self {
        Self {
            terms,
            locale: locale.into(),
            context: RequestContext::default(),
            proximity_distance: 0,
        }
    }

    /// Sets the request context.
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Sets the proximity distance.
    pub fn with_proximity(mut self, proximity_distance: u32) -> Self {
        self.proximity_distance = proximity_distance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_config() {
        let mut config = Config::default();
        config.display.ignore_fields = vec!["MD_SHELFMARK".into()];
        config.export.fields = vec!["MD_TITLE".into(), "PI".into()];
        config.search.fragment_length = 80;

        let options = HitOptions::from(&config);
        assert_eq!(options.fragment_length, 80);
        assert!(options.ignore_fields.contains("MD_SHELFMARK"));
        assert!(options.capped_fields.contains("NORM_ALTNAME"));
        assert!(options.catch_all_fields.contains("DEFAULT"));
        assert_eq!(options.export_fields, ["MD_TITLE", "PI"]);
    }

    #[test]
    fn default_options_match_default_config() {
        let options = HitOptions::default();
        assert_eq!(options.fragment_length, DEFAULT_FRAGMENT_LENGTH);
        assert_eq!(options.hit_metadata, ["MD_TITLE"]);
        assert_eq!(options.default_locale, "en");
        assert_eq!(options.locales, ["en"]);
    }

    #[test]
    fn request_from_options() {
        let mut config = Config::default();
        config.search.default_locale = "de".into();
        config.search.proximity_distance = 4;
        let request = HitOptions::from(&config).request(None);
        assert_eq!(request.locale, "de");
        assert_eq!(request.proximity_distance, 4);
        assert!(request.terms.is_none());
    }

    #[test]
    fn request_builder() {
        let request = SearchRequest::new(None, "de")
            .with_proximity(3)
            .with_context(RequestContext {
                user: Some("reader".into()),
                client_ip: None,
            });
        assert_eq!(request.locale, "de");
        assert_eq!(request.proximity_distance, 3);
        assert_eq!(request.context.user.as_deref(), Some("reader"));
    }
}
