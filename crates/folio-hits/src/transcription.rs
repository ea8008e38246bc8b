//! Transcription loading and reduction to plain text.
//!
//! Pages come as plain text or ALTO line layout, alternate transcriptions as TEI, and
//! CMS content as HTML. Everything is reduced to plain text before fragment extraction.

use std::{fs, io::ErrorKind, path::PathBuf};

use quick_xml::{Reader, events::Event};
use scraper::Html;

use crate::{HitError, collaborators::TextLoader};

/// Format of a transcription file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionFormat {
    /// Plain text.
    PlainText,
    /// ALTO XML line layout.
    Alto,
    /// TEI XML.
    Tei,
}

/// Reduces a raw transcription to plain text.
pub fn to_plain_text(
    format: TranscriptionFormat,
    raw: &str,
    filename: &str,
) -> Result<String, HitError> {
    match format {
        TranscriptionFormat::PlainText => Ok(raw.to_string()),
        TranscriptionFormat::Alto => alto_text(raw, filename),
        TranscriptionFormat::Tei => tei_text(raw, filename),
    }
}

/// Reconstructs text from ALTO `String@CONTENT` attributes, one line per `TextLine`.
pub fn alto_text(xml: &str, filename: &str) -> Result<String, HitError> {
    let markup = |source| HitError::Markup {
        filename: filename.to_string(),
        source,
    };

    let mut reader = Reader::from_str(xml);
    let mut lines: Vec<String> = Vec::new();
    let mut words: Vec<String> = Vec::new();
    loop {
        match reader.read_event().map_err(markup)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"String" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"CONTENT" {
                        words.push(attr.unescape_value().map_err(markup)?.into_owned());
                    }
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"TextLine" => {
                if !words.is_empty() {
                    lines.push(words.join(" "));
                    words.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !words.is_empty() {
        lines.push(words.join(" "));
    }
    Ok(lines.join("\n"))
}

/// Elements whose end separates words in TEI.
const TEI_BLOCKS: &[&[u8]] = &[b"p", b"l", b"lb", b"head", b"div", b"ab", b"item", b"cell"];

/// Returns the text of the TEI `<text>` element, or of the whole document if it has none.
pub fn tei_text(xml: &str, filename: &str) -> Result<String, HitError> {
    let markup = |source| HitError::Markup {
        filename: filename.to_string(),
        source,
    };

    let mut reader = Reader::from_str(xml);
    let mut all = String::new();
    let mut body = String::new();
    let mut depth = 0_usize;
    let mut seen_text = false;
    loop {
        match reader.read_event().map_err(markup)? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"text" {
                    depth += 1;
                    seen_text = true;
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == b"text" {
                    depth = depth.saturating_sub(1);
                }
                if TEI_BLOCKS.contains(&name.as_ref()) {
                    all.push(' ');
                    if depth > 0 {
                        body.push(' ');
                    }
                }
            }
            Event::Empty(e) => {
                if TEI_BLOCKS.contains(&e.local_name().as_ref()) {
                    all.push(' ');
                    if depth > 0 {
                        body.push(' ');
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(markup)?;
                all.push_str(&text);
                if depth > 0 {
                    body.push_str(&text);
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c);
                all.push_str(&text);
                if depth > 0 {
                    body.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(collapse_whitespace(if seen_text { &body } else { &all }))
}

/// Returns the text content of an HTML snippet.
pub fn html_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<&str> = fragment.root_element().text().collect();
    collapse_whitespace(&text.join(" "))
}

/// Collapses whitespace runs to single spaces and trims the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Loads transcription files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryTexts {
    /// Directory filenames are relative to.
    root: PathBuf,
}

impl DirectoryTexts {
    /// Creates a loader reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextLoader for DirectoryTexts {
    fn load(&self, filename: &str) -> Result<String, HitError> {
        let path = self.root.join(filename);
        match fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                Err(HitError::TranscriptionUnavailable {
                    filename: filename.to_string(),
                })
            }
            Err(source) => Err(HitError::Io { path, source }),
        }
    }
}
