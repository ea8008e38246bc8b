//! Query abstract syntax tree.

use std::fmt;

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single search term, possibly fuzzy.
    Term(String),

    /// A phrase, optionally allowing its words to sit up to `proximity` tokens apart.
    Phrase {
        /// Phrase words in order.
        words: Vec<String>,
        /// Maximum token distance between words.
        proximity: Option<u32>,
    },

    /// Negation: matches are excluded and never highlighted.
    Not(Box<Self>),

    /// Conjunction.
    And(Vec<Self>),

    /// Disjunction.
    Or(Vec<Self>),

    /// Field-scoped expression (`MD_TITLE:library`).
    Field {
        /// Index field name.
        name: String,
        /// Expression searched within that field.
        expr: Box<Self>,
    },
}

impl QueryExpr {
    /// Creates an And expression, flattening nested Ands.
    pub fn and(exprs: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1
            && let Some(only) = flattened.pop()
        {
            return only;
        }
        Self::And(flattened)
    }

    /// Creates an Or expression, flattening nested Ors.
    pub fn or(exprs: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = exprs
            .into_iter()
            .flat_map(|e| match e {
                Self::Or(inner) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1
            && let Some(only) = flattened.pop()
        {
            return only;
        }
        Self::Or(flattened)
    }

    /// Formats the expression as an indented tree.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(s) => writeln!(f, "{prefix}Term({s:?})"),
            Self::Phrase {
                words,
                proximity: Some(distance),
            } => writeln!(f, "{prefix}Phrase({words:?}, ~{distance})"),
            Self::Phrase { words, .. } => writeln!(f, "{prefix}Phrase({words:?})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(exprs) | Self::Or(exprs) => {
                let label = if matches!(self, Self::And(_)) { "And" } else { "Or" };
                writeln!(f, "{prefix}{label}")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Field { name, expr } => {
                writeln!(f, "{prefix}Field({name:?})")?;
                expr.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
