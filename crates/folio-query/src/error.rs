//! Error types for query-string lexing and parsing.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Formats the error with a caret under the offending input.
    pub fn format_with_context(&self) -> String {
        format!(
            "query syntax error: {}\n  {}\n  {}^",
            self.message,
            self.input,
            " ".repeat(self.position.min(self.input.len()))
        )
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl StdError for LexError {}

/// Parse error, located by token index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token appeared where the grammar does not allow it.
    #[error("at token {index}: {message}")]
    Unexpected {
        /// Error message.
        message: String,
        /// Token index where the error occurred.
        index: usize,
    },
    /// Input ended in the middle of an expression.
    #[error("unexpected end of query")]
    UnexpectedEnd,
}

impl ParseError {
    /// Creates an error for the token at `index`.
    pub fn unexpected(message: impl Into<String>, index: usize) -> Self {
        Self::Unexpected {
            message: message.into(),
            index,
        }
    }

    /// Returns the error message without the token index.
    pub fn message(&self) -> &str {
        match self {
            Self::Unexpected { message, .. } => message,
            Self::UnexpectedEnd => "unexpected end of query",
        }
    }
}

/// A unified error for turning a query string into search terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Tokenization failed.
    Lex(LexError),
    /// The token stream did not form a valid query.
    Parse {
        /// The underlying parse error.
        source: ParseError,
        /// The original query string.
        query: String,
    },
}

impl QueryError {
    /// Returns the error message without context.
    pub fn message(&self) -> &str {
        match self {
            Self::Lex(err) => &err.message,
            Self::Parse { source, .. } => source.message(),
        }
    }

    /// Returns a suggestion for common mistakes.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message();
        if message.contains("unclosed quote") {
            Some("Add a closing quote (\") to complete the phrase")
        } else if message.contains("closing parenthesis") {
            Some("Add a closing parenthesis ) to match the opening one")
        } else if message.contains("OR") {
            Some("OR requires expressions on both sides, e.g. 'library OR archive'")
        } else if message.contains("after '~'") {
            Some("Proximity takes a whole number, e.g. '\"old books\"~3'")
        } else {
            None
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => writeln!(f, "{}", err.format_with_context())?,
            Self::Parse { source, query } => {
                writeln!(f, "query syntax error: {source}")?;
                writeln!(f, "  {query}")?;
            }
        }
        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }
        Ok(())
    }
}

impl StdError for QueryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl From<LexError> for QueryError {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}
