//! Error types for hit construction.
//!
//! None of these abort a tree build: the builder logs them per document and moves on.

use std::{io, path::PathBuf};

use quick_xml::Error as XmlError;
use thiserror::Error;

/// Errors raised while turning one index document into hits.
#[derive(Debug, Error)]
pub enum HitError {
    /// The document-type field is missing or not part of the known vocabulary.
    #[error("document {iddoc} has unknown document type {doc_type:?}")]
    UnknownDocumentType {
        /// Identifier of the offending document.
        iddoc: String,
        /// The raw document-type value, if any.
        doc_type: Option<String>,
    },

    /// The owner identifier resolves to no document.
    #[error("no document found for owner {owner} of document {iddoc}")]
    OwnerNotFound {
        /// Identifier of the child document.
        iddoc: String,
        /// Owner identifier that could not be resolved.
        owner: String,
    },

    /// No transcription is referenced, or the referenced file does not exist.
    #[error("transcription unavailable: {filename}")]
    TranscriptionUnavailable {
        /// The file that was looked for, or a description of what was missing.
        filename: String,
    },

    /// The access check for a resource failed.
    #[error("access denied to {filename} of record {record}")]
    AccessDenied {
        /// Record identifier.
        record: String,
        /// File the request was denied for.
        filename: String,
    },

    /// Reading a transcription failed for a reason other than absence.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A transcription file is not well-formed XML.
    #[error("malformed markup in {filename}: {source}")]
    Markup {
        /// The offending file.
        filename: String,
        /// Underlying XML error.
        source: XmlError,
    },
}
