//! Folded views of text that map matches back to the original.
//!
//! Searching happens on a folded copy (diacritics dropped, lowercased, whitespace runs
//! collapsed to one space) while every reported range points into the original text.

use std::{iter, ops::Range};

use folio_query::fold_char;

/// A folded copy of a text plus a byte map back to the original.
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    /// The original text.
    original: &'a str,
    /// The folded text.
    folded: String,
    /// For each byte of `folded`, the byte offset of the original character it came from.
    origins: Vec<usize>,
}

impl<'a> FoldedText<'a> {
    /// Folds `original`.
    pub fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut origins = Vec::with_capacity(original.len());
        let mut in_whitespace = false;

        for (offset, ch) in original.char_indices() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    folded.push(' ');
                    origins.push(offset);
                }
                in_whitespace = true;
                continue;
            }
            in_whitespace = false;
            for folded_ch in fold_char(ch) {
                folded.push(folded_ch);
                origins.extend(iter::repeat_n(offset, folded_ch.len_utf8()));
            }
        }

        Self {
            original,
            folded,
            origins,
        }
    }

    /// The original text.
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// The folded text.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Maps a byte range of the folded text to the original text.
    ///
    /// The result always covers whole original characters, including any combining
    /// marks that trail the last one.
    pub fn to_original(&self, range: Range<usize>) -> Range<usize> {
        if range.is_empty() || range.end > self.origins.len() {
            return 0..0;
        }
        let start = self.origins[range.start];
        let last = self.origins[range.end - 1];
        let end = self.origins[range.end..]
            .iter()
            .copied()
            .find(|&origin| origin > last)
            .unwrap_or(self.original.len());
        start..end
    }

    /// Finds every occurrence of `term`, returning original byte ranges.
    ///
    /// `term` is folded the same way as the text; an empty term finds nothing.
    pub fn find_all(&self, term: &str) -> Vec<Range<usize>> {
        let needle = fold_term(term);
        if needle.is_empty() {
            return Vec::new();
        }
        self.folded
            .match_indices(&needle)
            .map(|(start, found)| self.to_original(start..start + found.len()))
            .collect()
    }
}

/// Folds a search term for matching against a [`FoldedText`].
pub fn fold_term(term: &str) -> String {
    term.split_whitespace()
        .map(folio_query::fold)
        .collect::<Vec<_>>()
        .join(" ")
}
