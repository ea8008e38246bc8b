//! Search terms for folio.
//!
//! This crate turns user queries into per-field search terms and normalizes those
//! terms against the values actually present in a record:
//!
//! - **Terms**: `library` - searched in the catch-all field and in full text
//! - **Phrases**: `"old books"` - exact sequences
//! - **Proximity**: `"old books"~3` - phrase words up to three tokens apart
//! - **Fields**: `MD_TITLE:library` - one index field only
//! - **Negation**: `-draft` - excluded, never highlighted
//! - **OR / grouping**: `(library OR archive)`
//! - **Fuzzy tokens**: `wom*n`, `m?ller`, `colour~1`
//!
//! # Example
//!
//! ```
//! use folio_query::{DEFAULT, TermNormalizer, parse_terms};
//!
//! let parsed = parse_terms("wom*n MD_TITLE:library", DEFAULT).unwrap();
//! let normalizer = TermNormalizer::new();
//! let resolved = normalizer.resolve(&parsed.terms, &["A woman of letters"]);
//! assert_eq!(resolved.terms(DEFAULT).collect::<Vec<_>>(), vec!["woman"]);
//! ```

mod ast;
mod error;
mod fuzzy;
mod lexer;
mod normalize;
mod parser;
mod terms;

pub use ast::QueryExpr;
pub use error::{LexError, ParseError, QueryError};
pub use fuzzy::{FuzzyMatcher, FuzzyTerm, MAX_EDIT_DISTANCE};
pub use lexer::{Token, tokenize};
pub use normalize::{TermNormalizer, fold, fold_char, remove_diacritics, strip_parentheses};
pub use parser::parse;
pub use terms::{
    CMS_TEXT_ALL, DEFAULT, FULLTEXT, NORMDATATERMS, ParsedQuery, SearchTermMap, parse_terms,
};
