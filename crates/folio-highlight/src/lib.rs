//! Highlighting for folio.
//!
//! Two kinds of highlighting live here:
//!
//! - **Search-term markup**: [`Highlighter`] wraps term occurrences in HTML marks and
//!   [`FragmentExtractor`] cuts bounded previews of long texts around them. Both
//!   match without regard to case or diacritics.
//! - **Terminal output**: syntax-highlighted configuration and styled status text for
//!   the command line.

mod escape;
mod folded;
mod fragment;
mod markup;
mod matching;
mod terminal;

pub use escape::{escape_html, unescape_html};
pub use folded::{FoldedText, fold_term};
pub use fragment::{FragmentExtractor, FragmentOptions, Fragments};
pub use markup::{Highlighted, Highlighter, MARK_CLOSE, MARK_OPEN, strip_marks};
pub use matching::merge_ranges;
pub use terminal::{
    SyntaxHighlighter, colors, dim, header, render_marked, rule, subheader, success, warning,
};
