//! Fragment extraction: bounded previews of long texts centered on term matches.
//!
//! [`FragmentExtractor::fragments`] locates match regions up front and cuts windows
//! lazily. The returned iterator is `Clone`, so a caller can restart it from any
//! saved copy.

use std::ops::Range;

use crate::{folded::FoldedText, matching::match_regions};

/// Tuning for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentOptions {
    /// Maximum fragment length in characters.
    pub max_length: usize,
    /// Grow windows to whole sentences when the sentence fits `max_length`.
    pub extend_to_sentence: bool,
    /// Skip fragments contained in one already emitted.
    pub dedupe: bool,
    /// Token distance within which phrase words count as one match.
    pub proximity_distance: u32,
    /// Emit at most one fragment.
    pub first_match_only: bool,
    /// Emit the leading window of the text when nothing matches.
    pub fallback_if_unmatched: bool,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            max_length: 200,
            extend_to_sentence: false,
            dedupe: true,
            proximity_distance: 0,
            first_match_only: false,
            fallback_if_unmatched: false,
        }
    }
}

/// Cuts fragments out of long texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentExtractor {
    /// Extraction options.
    options: FragmentOptions,
}

impl FragmentExtractor {
    /// Creates an extractor with `options`.
    pub fn new(options: FragmentOptions) -> Self {
        Self { options }
    }

    /// Returns the extraction options.
    pub fn options(&self) -> &FragmentOptions {
        &self.options
    }

    /// Returns the fragments of `text` for `terms`, in text order.
    ///
    /// No terms or no text yields nothing.
    pub fn fragments<'a, I, S>(&self, text: &'a str, terms: I) -> Fragments<'a>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<S> = terms.into_iter().collect();
        let max_length = self.options.max_length;
        let mut regions = Vec::new();
        let mut fallback = false;

        if !text.trim().is_empty() && max_length > 0 && !terms.is_empty() {
            let folded = FoldedText::new(text);
            regions = group_regions(
                text,
                match_regions(&folded, &terms, self.options.proximity_distance),
                max_length,
            );
            fallback = regions.is_empty() && self.options.fallback_if_unmatched;
        }

        Fragments {
            text,
            options: self.options,
            regions,
            next_region: 0,
            fallback,
            emitted: Vec::new(),
        }
    }
}

/// Lazy sequence of fragments produced by [`FragmentExtractor::fragments`].
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    /// The source text.
    text: &'a str,
    /// Extraction options.
    options: FragmentOptions,
    /// Grouped match regions, in text order.
    regions: Vec<Range<usize>>,
    /// Index of the next region to cut.
    next_region: usize,
    /// Whether the leading window is still owed because nothing matched.
    fallback: bool,
    /// Fragments emitted so far.
    emitted: Vec<&'a str>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.options.first_match_only && !self.emitted.is_empty() {
            return None;
        }

        if self.fallback {
            self.fallback = false;
            let window = leading_window(self.text, self.options.max_length);
            return self.emit(window);
        }

        while let Some(region) = self.regions.get(self.next_region).cloned() {
            self.next_region += 1;
            let window = if self.options.extend_to_sentence {
                sentence_window(self.text, &region, self.options.max_length)
                    .unwrap_or_else(|| centered_window(self.text, &region, self.options.max_length))
            } else {
                centered_window(self.text, &region, self.options.max_length)
            };
            let fragment = self.text[window].trim();
            if fragment.is_empty() {
                continue;
            }
            if self.options.dedupe && self.emitted.iter().any(|seen| seen.contains(fragment)) {
                continue;
            }
            self.emitted.push(fragment);
            return Some(fragment);
        }

        None
    }
}

impl<'a> Fragments<'a> {
    /// Records and returns a window that bypasses dedupe.
    fn emit(&mut self, window: Range<usize>) -> Option<&'a str> {
        let fragment = self.text[window].trim();
        if fragment.is_empty() {
            return None;
        }
        self.emitted.push(fragment);
        Some(fragment)
    }
}

/// Groups match regions that fit in one window of `max_length` characters.
fn group_regions(text: &str, regions: Vec<Range<usize>>, max_length: usize) -> Vec<Range<usize>> {
    let mut grouped: Vec<Range<usize>> = Vec::with_capacity(regions.len());
    for region in regions {
        if let Some(current) = grouped.last_mut()
            && char_len(text, current.start..region.end) <= max_length
        {
            current.end = current.end.max(region.end);
        } else {
            grouped.push(region);
        }
    }
    grouped
}

/// Counts the characters in `range` of `text`.
fn char_len(text: &str, range: Range<usize>) -> usize {
    text[range].chars().count()
}

/// Moves `offset` back by up to `count` characters, stopping at zero.
fn back_chars(text: &str, offset: usize, count: usize) -> usize {
    if count == 0 {
        return offset;
    }
    text[..offset]
        .char_indices()
        .rev()
        .nth(count - 1)
        .map_or(0, |(i, _)| i)
}

/// Moves `offset` forward by up to `count` characters, stopping at the end.
fn forward_chars(text: &str, offset: usize, count: usize) -> usize {
    text[offset..]
        .char_indices()
        .nth(count)
        .map_or(text.len(), |(i, _)| offset + i)
}

/// Cuts a window of at most `max_length` characters centered on `region`, with
/// edges pulled in to word boundaries.
fn centered_window(text: &str, region: &Range<usize>, max_length: usize) -> Range<usize> {
    let region_len = char_len(text, region.clone());
    if region_len >= max_length {
        return region.start..forward_chars(text, region.start, max_length);
    }

    let spare = max_length - region_len;
    let mut start = back_chars(text, region.start, spare / 2);
    let taken = char_len(text, start..region.start);
    let mut end = forward_chars(text, region.end, spare - taken);
    let given = char_len(text, region.end..end);
    if taken + given < spare {
        start = back_chars(text, start, spare - taken - given);
    }

    if start > 0 && !preceded_by_whitespace(text, start) {
        start = text[start..region.start]
            .find(char::is_whitespace)
            .map_or(region.start, |i| start + i);
    }
    if end < text.len() && !starts_with_whitespace(text, end) {
        end = text[region.end..end]
            .rfind(char::is_whitespace)
            .map_or(region.end, |i| region.end + i);
    }
    start..end
}

/// Returns true if the character before `offset` is whitespace.
fn preceded_by_whitespace(text: &str, offset: usize) -> bool {
    text[..offset].chars().next_back().is_some_and(char::is_whitespace)
}

/// Returns true if the character at `offset` is whitespace.
fn starts_with_whitespace(text: &str, offset: usize) -> bool {
    text[offset..].chars().next().is_some_and(char::is_whitespace)
}

/// Returns true if `ch` ends a sentence.
fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\n')
}

/// Returns the sentence(s) around `region` if they fit in `max_length` characters.
fn sentence_window(text: &str, region: &Range<usize>, max_length: usize) -> Option<Range<usize>> {
    let start = text[..region.start]
        .char_indices()
        .rev()
        .find(|&(_, ch)| is_sentence_end(ch))
        .map_or(0, |(i, ch)| i + ch.len_utf8());
    let end = text[region.end..]
        .char_indices()
        .find(|&(_, ch)| is_sentence_end(ch))
        .map_or(text.len(), |(i, ch)| region.end + i + ch.len_utf8());

    (char_len(text, start..end) <= max_length).then_some(start..end)
}

/// Returns the first `max_length` characters, cut at a word boundary.
fn leading_window(text: &str, max_length: usize) -> Range<usize> {
    let end = forward_chars(text, 0, max_length);
    if end >= text.len() || starts_with_whitespace(text, end) {
        return 0..end;
    }
    0..text[..end].rfind(char::is_whitespace).unwrap_or(end)
}
