//! Fuzzy-token recognition and matching.
//!
//! Two syntaxes are recognized: wildcards (`*` for any run, `?` for one character)
//! and an edit-distance suffix (`colour~1`, `~1` or `~2`). Both match against folded
//! words, so case and diacritics never matter.

use levenshtein_automata::{DFA, Distance, LevenshteinAutomatonBuilder};
use regex::Regex;

use crate::normalize::fold;

/// Largest edit distance accepted in a `~N` suffix.
pub const MAX_EDIT_DISTANCE: u8 = 2;

/// A search term that matches a family of words rather than one literal.
pub enum FuzzyTerm {
    /// Wildcard pattern compiled to an anchored regex over folded text.
    Wildcard(Regex),
    /// Levenshtein automaton for the folded stem.
    EditDistance(DFA),
}

impl FuzzyTerm {
    /// Returns true if `word` belongs to this term's family.
    pub fn matches(&self, word: &str) -> bool {
        let folded = fold(word);
        match self {
            Self::Wildcard(regex) => regex.is_match(&folded),
            Self::EditDistance(dfa) => matches!(dfa.eval(&folded), Distance::Exact(_)),
        }
    }
}

/// Builds [`FuzzyTerm`]s, holding one automaton builder per supported distance.
pub struct FuzzyMatcher {
    /// Builders indexed by distance minus one.
    builders: Vec<LevenshteinAutomatonBuilder>,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    /// Creates builders for every supported distance, with transpositions.
    pub fn new() -> Self {
        Self {
            builders: (1..=MAX_EDIT_DISTANCE)
                .map(|distance| LevenshteinAutomatonBuilder::new(distance, true))
                .collect(),
        }
    }

    /// Parses `term` as a fuzzy token, or returns `None` for a literal term.
    ///
    /// Phrases are never fuzzy.
    pub fn parse(&self, term: &str) -> Option<FuzzyTerm> {
        if term.chars().any(char::is_whitespace) {
            return None;
        }

        if let Some((stem, distance)) = split_edit_distance(term) {
            let builder = self.builders.get(usize::from(distance) - 1)?;
            return Some(FuzzyTerm::EditDistance(builder.build_dfa(&fold(stem))));
        }

        if term.contains(['*', '?']) {
            return wildcard_regex(&fold(term)).map(FuzzyTerm::Wildcard);
        }

        None
    }

    /// Returns true if `term` uses fuzzy syntax.
    pub fn is_fuzzy(&self, term: &str) -> bool {
        self.parse(term).is_some()
    }
}

/// Splits `colour~1` into `("colour", 1)` when the distance is supported.
fn split_edit_distance(term: &str) -> Option<(&str, u8)> {
    let (stem, suffix) = term.rsplit_once('~')?;
    let distance: u8 = suffix.parse().ok()?;
    if stem.is_empty() || !(1..=MAX_EDIT_DISTANCE).contains(&distance) {
        return None;
    }
    Some((stem, distance))
}

/// Compiles a wildcard pattern into an anchored regex.
fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::from("^");
    let mut literal = String::new();
    for ch in pattern.chars() {
        match ch {
            '*' | '?' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');
    Regex::new(&source).ok()
}
