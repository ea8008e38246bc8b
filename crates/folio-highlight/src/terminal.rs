//! Syntax highlighting and styled terminal output.

use syntect::{
    easy::HighlightLines,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

use crate::{
    escape::unescape_html,
    markup::{MARK_CLOSE, MARK_OPEN},
};

/// A syntax highlighter for configuration shown in the terminal.
pub struct SyntaxHighlighter {
    /// Language definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Creates a new highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content for the syntax named by extension or name, falling back to
    /// plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(syntax_name)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output: String = LinesWithEndings::from(content)
            .map(|line| match lines.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => as_24_bit_terminal_escaped(&ranges, false),
                Err(_) => line.to_string(),
            })
            .collect();
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings and matches).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Renders highlighted HTML for the terminal: marks become bold yellow and entities
/// are unescaped.
pub fn render_marked(html: &str) -> String {
    let open = format!("{}{}", colors::BOLD, colors::YELLOW);
    unescape_html(
        &html
            .replace(MARK_OPEN, &open)
            .replace(MARK_CLOSE, colors::RESET),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlighter_toml() {
        let hl = SyntaxHighlighter::new();
        let toml = "[search]\nfragment_length = 200\n";
        let output = hl.highlight_toml(toml);
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_unknown_syntax_falls_back_to_plain() {
        let hl = SyntaxHighlighter::new();
        let output = hl.highlight("just words", "no-such-syntax");
        assert!(output.contains("just words"));
    }

    #[test]
    fn test_header_formatting() {
        let h = header("Test");
        assert!(h.contains(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.contains(colors::RESET));
        assert!(h.contains("Test"));
    }

    #[test]
    fn test_toml_syntax_available() {
        let ss = extra_syntaxes();
        assert!(
            ss.find_syntax_by_extension("toml").is_some(),
            "TOML syntax should be available"
        );
    }

    #[test]
    fn render_marked_uses_ansi() {
        let html = format!("R&amp;D {MARK_OPEN}library{MARK_CLOSE}");
        let rendered = render_marked(&html);
        assert_eq!(
            rendered,
            format!("R&D {}{}library{}", colors::BOLD, colors::YELLOW, colors::RESET)
        );
    }
}
