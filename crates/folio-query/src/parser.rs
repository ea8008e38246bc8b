//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query      → or_expr
//! or_expr    → and_expr ("OR" and_expr)*
//! and_expr   → unary+
//! unary      → "-" unary | primary
//! primary    → TERM | PHRASE | field_expr | "(" or_expr ")"
//! field_expr → FIELD_PREFIX (TERM | PHRASE | "(" or_expr ")")
//! ```

use std::mem;

use crate::{
    ast::QueryExpr,
    error::{ParseError, QueryError},
    lexer::{Token, tokenize},
};

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let expr = self.parse_or_expr()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::unexpected(
                format!("unexpected token: {token:?}"),
                self.position,
            ));
        }

        Ok(Some(expr))
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = QueryExpr::or(vec![left, right]);
        }

        Ok(left)
    }

    /// Parses: and_expr → unary+
    fn parse_and_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut exprs = vec![self.parse_unary()?];

        while self.can_start_unary() {
            exprs.push(self.parse_unary()?);
        }

        Ok(QueryExpr::and(exprs))
    }

    /// Checks if the current token can start a unary expression.
    fn can_start_unary(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                Token::Term(_)
                    | Token::Phrase { .. }
                    | Token::Not
                    | Token::LParen
                    | Token::FieldPrefix(_)
            )
        )
    }

    /// Parses: unary → "-" unary | primary
    fn parse_unary(&mut self) -> Result<QueryExpr, ParseError> {
        if self.check(&Token::Not) {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(QueryExpr::Not(Box::new(expr)));
        }

        self.parse_primary()
    }

    /// Parses: primary → TERM | PHRASE | field_expr | "(" or_expr ")"
    fn parse_primary(&mut self) -> Result<QueryExpr, ParseError> {
        match self.peek().cloned() {
            Some(Token::Term(_) | Token::Phrase { .. }) => self.parse_term_or_phrase(),
            Some(Token::FieldPrefix(name)) => {
                self.advance();
                self.parse_field_expr(name)
            }
            Some(Token::LParen) => self.parse_group("expected closing parenthesis"),
            Some(Token::RParen) => Err(ParseError::unexpected(
                "unexpected closing parenthesis",
                self.position,
            )),
            Some(Token::Or) => Err(ParseError::unexpected(
                "unexpected OR (needs expression before it)",
                self.position,
            )),
            Some(Token::Not) => Err(ParseError::unexpected(
                "unexpected negation",
                self.position,
            )),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parses the expression after a field prefix.
    fn parse_field_expr(&mut self, name: String) -> Result<QueryExpr, ParseError> {
        let expr = match self.peek() {
            Some(Token::Term(_) | Token::Phrase { .. }) => self.parse_term_or_phrase()?,
            Some(Token::LParen) => {
                self.parse_group("expected closing parenthesis after field expression")?
            }
            _ => {
                return Err(ParseError::unexpected(
                    format!("expected term, phrase, or group after '{name}:'"),
                    self.position,
                ));
            }
        };

        Ok(QueryExpr::Field {
            name,
            expr: Box::new(expr),
        })
    }

    /// Parses a TERM or PHRASE token, consuming it.
    fn parse_term_or_phrase(&mut self) -> Result<QueryExpr, ParseError> {
        let position = self.position;
        let expr = match self.peek().cloned() {
            Some(Token::Term(text)) => QueryExpr::Term(text),
            Some(Token::Phrase { text, proximity }) => {
                let words: Vec<String> = text.split_whitespace().map(String::from).collect();
                match words.len() {
                    0 => return Err(ParseError::unexpected("empty phrase", position)),
                    1 if proximity.is_none() => QueryExpr::Term(words.concat()),
                    _ => QueryExpr::Phrase { words, proximity },
                }
            }
            _ => return Err(ParseError::unexpected("expected term or phrase", position)),
        };
        self.advance();
        Ok(expr)
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self, missing_rparen_msg: &str) -> Result<QueryExpr, ParseError> {
        self.advance(); // (
        let inner = self.parse_or_expr()?;

        if !self.check(&Token::RParen) {
            return Err(ParseError::unexpected(missing_rparen_msg, self.position));
        }
        self.advance(); // )

        Ok(inner)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Checks if the current token has the same variant as `token`.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(token))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses a query string into an AST.
///
/// Returns `Ok(None)` for empty queries.
pub fn parse(input: &str) -> Result<Option<QueryExpr>, QueryError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens)
        .parse()
        .map_err(|source| QueryError::Parse {
            source,
            query: input.to_string(),
        })
}
