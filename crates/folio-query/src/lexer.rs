//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of tokens for the parser.

use std::{iter::Peekable, str::Chars};

use crate::error::LexError;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word (search term), possibly carrying fuzzy syntax.
    Term(String),

    /// A quoted phrase with an optional `~N` proximity suffix.
    Phrase {
        /// Phrase content with the quotes stripped.
        text: String,
        /// Token distance from a trailing `~N`.
        proximity: Option<u32>,
    },

    /// The OR keyword.
    Or,

    /// Negation prefix (-).
    Not,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,

    /// Field prefix (`MD_TITLE:` produces `FieldPrefix("MD_TITLE")`).
    FieldPrefix(String),
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, position, self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        match ch {
            '"' => self.read_phrase(),
            '(' => {
                self.advance();
                Ok(Some(Token::LParen))
            }
            ')' => {
                self.advance();
                Ok(Some(Token::RParen))
            }
            '-' => {
                self.advance();
                Ok(Some(Token::Not))
            }
            _ => Ok(self.read_term_or_keyword()),
        }
    }

    /// Reads a quoted phrase and its optional proximity suffix.
    fn read_phrase(&mut self) -> Result<Option<Token>, LexError> {
        let start_pos = self.position;
        self.advance(); // opening quote

        let mut text = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance();
                    break;
                }
                Some(&ch) => {
                    text.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }

        let proximity = if self.chars.peek() == Some(&'~') {
            Some(self.read_proximity()?)
        } else {
            None
        };

        Ok(Some(Token::Phrase { text, proximity }))
    }

    /// Reads the `~N` suffix after a phrase.
    fn read_proximity(&mut self) -> Result<u32, LexError> {
        let start_pos = self.position;
        self.advance(); // '~'

        let mut number = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            number.push(ch);
            self.advance();
        }

        if number.is_empty() {
            return Err(self.error_at("expected number after '~'", start_pos));
        }

        number
            .parse::<u32>()
            .map_err(|_| self.error_at(format!("invalid proximity: {number}"), start_pos))
    }

    /// Reads a term, keyword (OR), or field prefix.
    fn read_term_or_keyword(&mut self) -> Option<Token> {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }

            if ch == ':' {
                self.advance();
                if word.is_empty() {
                    continue;
                }
                return Some(Token::FieldPrefix(word));
            }

            word.push(ch);
            self.advance();
        }

        if word.is_empty() {
            return None;
        }

        if word.eq_ignore_ascii_case("OR") {
            return Some(Token::Or);
        }

        Some(Token::Term(word))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Convenience function to tokenize a query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}
