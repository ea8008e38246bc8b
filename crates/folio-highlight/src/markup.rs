//! Search-term highlighting in HTML.

use std::ops::Range;

use crate::{escape::push_escaped, folded::FoldedText, matching::highlight_ranges};

/// Opening tag wrapped around every match.
pub const MARK_OPEN: &str = "<mark class=\"search-list--highlight\">";
/// Closing tag wrapped around every match.
pub const MARK_CLOSE: &str = "</mark>";

/// The result of highlighting one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// HTML-escaped value with matches wrapped in [`MARK_OPEN`] / [`MARK_CLOSE`].
    pub html: String,
    /// Whether any term matched.
    pub matched: bool,
}

/// Marks search-term occurrences in text values.
///
/// Matching ignores case and diacritics; overlapping matches merge into one mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter {
    /// Token distance for phrase-style terms; above zero, phrase words are marked
    /// individually.
    proximity_distance: u32,
}

impl Highlighter {
    /// Creates a highlighter for exact phrases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a highlighter for proximity queries.
    pub fn with_proximity(proximity_distance: u32) -> Self {
        Self { proximity_distance }
    }

    /// Returns the byte ranges of `value` that `terms` match.
    pub fn match_ranges<I, S>(&self, value: &str, terms: I) -> Vec<Range<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        highlight_ranges(&FoldedText::new(value), terms, self.proximity_distance)
    }

    /// Highlights `terms` in `value`.
    pub fn highlight<I, S>(&self, value: &str, terms: I) -> Highlighted
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = self.match_ranges(value, terms);
        render(value, &ranges, None)
    }

    /// Highlights `terms` in `value`, replacing each matched substring with its
    /// translation while keeping the marks around it.
    pub fn highlight_translated<I, S, F>(
        &self,
        value: &str,
        terms: I,
        translate: F,
    ) -> Highlighted
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> String,
    {
        let ranges = self.match_ranges(value, terms);
        let translate: &dyn Fn(&str) -> String = &translate;
        render(value, &ranges, Some(translate))
    }
}

/// Escapes `value` and wraps each of `ranges` in marks.
fn render(
    value: &str,
    ranges: &[Range<usize>],
    translate: Option<&dyn Fn(&str) -> String>,
) -> Highlighted {
    let mut html = String::with_capacity(value.len() + ranges.len() * 48);
    let mut cursor = 0;
    for range in ranges {
        push_escaped(&mut html, &value[cursor..range.start]);
        let matched = &value[range.clone()];
        html.push_str(MARK_OPEN);
        match translate {
            Some(translate) => push_escaped(&mut html, &translate(matched)),
            None => push_escaped(&mut html, matched),
        }
        html.push_str(MARK_CLOSE);
        cursor = range.end;
    }
    push_escaped(&mut html, &value[cursor..]);

    Highlighted {
        html,
        matched: !ranges.is_empty(),
    }
}

/// Removes highlight marks, leaving the escaped text.
pub fn strip_marks(html: &str) -> String {
    html.replace(MARK_OPEN, "").replace(MARK_CLOSE, "")
}
