//! Locating search terms in text.

use std::ops::Range;

use crate::folded::{FoldedText, fold_term};

/// Merges byte ranges, combining overlapping or adjacent ones.
///
/// The result is sorted by start position with no overlaps.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(current) = merged.last_mut()
            && range.start <= current.end
        {
            current.end = current.end.max(range.end);
        } else {
            merged.push(range);
        }
    }
    merged
}

/// Returns the words of a multi-word term when proximity matching applies to it.
fn proximity_words(term: &str, proximity: u32) -> Option<Vec<&str>> {
    let words: Vec<&str> = term.split_whitespace().collect();
    (proximity > 0 && words.len() > 1).then_some(words)
}

/// Finds the ranges to mark for `terms`.
///
/// With a proximity distance, a multi-word term is marked word by word, and only
/// inside complete near matches (see [`match_regions`]).
pub fn highlight_ranges<I, S>(
    text: &FoldedText<'_>,
    terms: I,
    proximity: u32,
) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens: Option<Vec<Token>> = None;
    let mut ranges = Vec::new();
    for term in terms {
        let term = term.as_ref();
        match proximity_words(term, proximity) {
            Some(words) => {
                let tokens = tokens.get_or_insert_with(|| tokenize(text.original()));
                for matched in near_matches(tokens, &words, proximity) {
                    for (&index, word) in matched.iter().zip(&words) {
                        let span = &tokens[index].range;
                        ranges.extend(
                            text.find_all(word)
                                .into_iter()
                                .filter(|r| r.start >= span.start && r.end <= span.end),
                        );
                    }
                }
            }
            None => ranges.extend(text.find_all(term)),
        }
    }
    merge_ranges(ranges)
}

/// Finds the regions a fragment should be centered on for `terms`.
///
/// With a proximity distance, a multi-word term matches wherever its words appear
/// in order with at most that many tokens between neighbours; the region spans from
/// the first word to the last.
pub fn match_regions<I, S>(
    text: &FoldedText<'_>,
    terms: I,
    proximity: u32,
) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens: Option<Vec<Token>> = None;
    let mut ranges = Vec::new();
    for term in terms {
        let term = term.as_ref();
        match proximity_words(term, proximity) {
            Some(words) => {
                let tokens = tokens.get_or_insert_with(|| tokenize(text.original()));
                ranges.extend(near_matches(tokens, &words, proximity).into_iter().filter_map(
                    |matched| {
                        let first = tokens.get(*matched.first()?)?;
                        let last = tokens.get(*matched.last()?)?;
                        Some(first.range.start..last.range.end)
                    },
                ));
            }
            None => ranges.extend(text.find_all(term)),
        }
    }
    merge_ranges(ranges)
}

/// A whitespace-delimited token of the original text.
struct Token {
    /// Byte range in the original text.
    range: Range<usize>,
    /// Folded token text.
    folded: String,
}

/// Splits `text` into whitespace-delimited tokens.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (offset, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(begin)) => {
                tokens.push(token(text, begin..offset));
                start = None;
            }
            (false, None) => start = Some(offset),
            _ => {}
        }
    }
    if let Some(begin) = start {
        tokens.push(token(text, begin..text.len()));
    }
    tokens
}

/// Builds a token for `range` of `text`.
fn token(text: &str, range: Range<usize>) -> Token {
    Token {
        folded: folio_query::fold(&text[range.clone()]),
        range,
    }
}

/// Finds where `words` occur in order within `proximity` tokens of each other.
///
/// Each match lists the token index of every word.
fn near_matches(tokens: &[Token], words: &[&str], proximity: u32) -> Vec<Vec<usize>> {
    let words: Vec<String> = words.iter().map(|w| fold_term(w)).collect();
    let Some((first, rest)) = words.split_first() else {
        return Vec::new();
    };
    let window = usize::try_from(proximity).unwrap_or(usize::MAX);

    let mut matches = Vec::new();
    for (start, candidate) in tokens.iter().enumerate() {
        if !candidate.folded.contains(first.as_str()) {
            continue;
        }
        let mut positions = vec![start];
        let complete = rest.iter().all(|word| {
            let last = positions[positions.len() - 1];
            let limit = last.saturating_add(window).saturating_add(1).min(tokens.len() - 1);
            match (last + 1..=limit).find(|&i| tokens[i].folded.contains(word.as_str())) {
                Some(found) => {
                    positions.push(found);
                    true
                }
                None => false,
            }
        });
        if complete {
            matches.push(positions);
        }
    }
    matches
}
