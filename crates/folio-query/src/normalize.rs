//! Term normalization and fuzzy-term resolution.
//!
//! Raw terms arrive from the index query with grouping parentheses and diacritics
//! still attached. [`TermNormalizer`] cleans them and, for fuzzy tokens, swaps the
//! token for the literal words in a record's field values that the token matches.
//! Highlighting then only ever deals with literal terms.

use std::{collections::BTreeSet, iter, sync::LazyLock};

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{fuzzy::FuzzyMatcher, terms::SearchTermMap};

/// Characters that make up a word when scanning field values for fuzzy matches.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}\-_=⸗¬]+").expect("word pattern compiles"));

/// Folds one character for comparison: canonical decomposition, combining marks
/// dropped, lowercased.
///
/// A character can fold to zero or several characters.
pub fn fold_char(ch: char) -> impl Iterator<Item = char> {
    iter::once(ch)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Folds a string for case- and diacritic-insensitive comparison.
pub fn fold(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// Removes diacritical marks, keeping case.
pub fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Strips one leading `(` and one trailing `)`.
pub fn strip_parentheses(term: &str) -> &str {
    let term = term.strip_prefix('(').unwrap_or(term);
    term.strip_suffix(')').unwrap_or(term)
}

/// Normalizes raw search terms and resolves fuzzy tokens against record values.
pub struct TermNormalizer {
    /// Fuzzy-token parser.
    fuzzy: FuzzyMatcher,
}

impl Default for TermNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TermNormalizer {
    /// Creates a normalizer.
    pub fn new() -> Self {
        Self {
            fuzzy: FuzzyMatcher::new(),
        }
    }

    /// Strips parentheses and diacritics from a raw term.
    pub fn normalize(&self, term: &str) -> String {
        remove_diacritics(strip_parentheses(term.trim()))
    }

    /// Returns true if `term` uses fuzzy syntax after normalization.
    pub fn is_fuzzy(&self, term: &str) -> bool {
        self.fuzzy.is_fuzzy(&self.normalize(term))
    }

    /// Normalizes `term`, expanding a fuzzy token into the words of `found_values`
    /// it matches.
    ///
    /// A literal term comes back alone. A fuzzy token that matches nothing yields
    /// an empty list, dropping out for this record.
    pub fn expand<S: AsRef<str>>(&self, term: &str, found_values: &[S]) -> Vec<String> {
        let normalized = self.normalize(term);
        let Some(fuzzy) = self.fuzzy.parse(&normalized) else {
            return vec![normalized];
        };

        let mut seen = BTreeSet::new();
        found_values
            .iter()
            .flat_map(|value| WORD.find_iter(value.as_ref()))
            .map(|word| word.as_str())
            .filter(|word| fuzzy.matches(word))
            .filter(|word| seen.insert(word.to_string()))
            .map(String::from)
            .collect()
    }

    /// Expands every term in `terms` against `found_values`.
    ///
    /// Fields are kept even when all their terms drop out.
    pub fn resolve<S: AsRef<str>>(
        &self,
        terms: &SearchTermMap,
        found_values: &[S],
    ) -> SearchTermMap {
        terms
            .iter()
            .map(|(field, field_terms)| {
                let expanded: Vec<String> = field_terms
                    .iter()
                    .flat_map(|term| self.expand(term, found_values))
                    .collect();
                (field.clone(), expanded)
            })
            .collect()
    }
}
