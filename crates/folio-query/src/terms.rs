//! Search-term maps: index field name to the terms searched in that field.

use std::collections::{BTreeMap, BTreeSet, btree_map};

use serde::{Deserialize, Serialize};

use crate::{ast::QueryExpr, error::QueryError, parser::parse};

/// Catch-all key for terms searched across every metadata field.
pub const DEFAULT: &str = "DEFAULT";
/// Catch-all key for terms searched across authority-record fields.
pub const NORMDATATERMS: &str = "NORMDATATERMS";
/// Key for terms searched in page full text.
pub const FULLTEXT: &str = "FULLTEXT";
/// Key for terms searched in CMS page text.
pub const CMS_TEXT_ALL: &str = "CMS_TEXT_ALL";

/// Mapping of field name to the set of terms searched in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTermMap(BTreeMap<String, BTreeSet<String>>);

impl SearchTermMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term under `field`.
    pub fn insert(&mut self, field: impl Into<String>, term: impl Into<String>) {
        self.0.entry(field.into()).or_default().insert(term.into());
    }

    /// Ensures `field` is present, even with no terms.
    pub fn insert_field(&mut self, field: impl Into<String>) {
        self.0.entry(field.into()).or_default();
    }

    /// Returns the terms for `field`, if the field is present.
    pub fn get(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.0.get(field)
    }

    /// Returns the terms for `field`, or nothing when absent.
    pub fn terms(&self, field: &str) -> impl Iterator<Item = &str> {
        self.0.get(field).into_iter().flatten().map(String::as_str)
    }

    /// Returns true if `field` is present.
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.0.iter()
    }

    /// Returns every term across every field.
    pub fn all_terms(&self) -> BTreeSet<&str> {
        self.0.values().flatten().map(String::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a SearchTermMap {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, T> FromIterator<(K, T)> for SearchTermMap
where
    K: Into<String>,
    T: IntoIterator,
    T::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, terms) in iter {
            let field = field.into();
            map.insert_field(field.clone());
            for term in terms {
                map.insert(field.clone(), term);
            }
        }
        map
    }
}

/// Search terms parsed from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Terms by field.
    pub terms: SearchTermMap,
    /// Largest `~N` proximity among the query's phrases, zero if none.
    pub proximity_distance: u32,
}

/// Parses a query string into search terms.
///
/// Unprefixed terms land under `default_field` and under [`FULLTEXT`]. Negated
/// expressions contribute nothing, since excluded terms are never highlighted.
pub fn parse_terms(input: &str, default_field: &str) -> Result<ParsedQuery, QueryError> {
    let mut parsed = ParsedQuery::default();
    if let Some(expr) = parse(input)? {
        collect(&expr, None, default_field, &mut parsed);
    }
    Ok(parsed)
}

/// Walks an expression, adding its positive terms to `out`.
fn collect(expr: &QueryExpr, field: Option<&str>, default_field: &str, out: &mut ParsedQuery) {
    match expr {
        QueryExpr::Term(term) => add_term(term, field, default_field, out),
        QueryExpr::Phrase { words, proximity } => {
            add_term(&words.join(" "), field, default_field, out);
            if let Some(distance) = proximity {
                out.proximity_distance = out.proximity_distance.max(*distance);
            }
        }
        QueryExpr::Not(_) => {}
        QueryExpr::And(exprs) | QueryExpr::Or(exprs) => {
            for inner in exprs {
                collect(inner, field, default_field, out);
            }
        }
        QueryExpr::Field { name, expr } => collect(expr, Some(name), default_field, out),
    }
}

/// Adds one term under its field, mirroring unprefixed terms into full text.
fn add_term(term: &str, field: Option<&str>, default_field: &str, out: &mut ParsedQuery) {
    match field {
        Some(name) => out.terms.insert(name, term),
        None => {
            out.terms.insert(default_field, term);
            out.terms.insert(FULLTEXT, term);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn bare_terms_go_to_default_and_fulltext() {
        let parsed = parse_terms("library archive", DEFAULT).unwrap();
        assert_eq!(parsed.terms.get(DEFAULT), Some(&set(&["archive", "library"])));
        assert_eq!(parsed.terms.get(FULLTEXT), Some(&set(&["archive", "library"])));
        assert_eq!(parsed.proximity_distance, 0);
    }

    #[test]
    fn field_prefixed_terms_stay_in_their_field() {
        let parsed = parse_terms("MD_TITLE:library FULLTEXT:\"old books\"", DEFAULT).unwrap();
        assert_eq!(parsed.terms.get("MD_TITLE"), Some(&set(&["library"])));
        assert_eq!(parsed.terms.get(FULLTEXT), Some(&set(&["old books"])));
        assert!(!parsed.terms.contains_key(DEFAULT));
    }

    #[test]
    fn negated_terms_are_dropped() {
        let parsed = parse_terms("library -draft -(MD_TITLE:copy)", DEFAULT).unwrap();
        assert_eq!(parsed.terms.all_terms(), BTreeSet::from(["library"]));
    }

    #[test]
    fn proximity_takes_the_largest() {
        let parsed = parse_terms("\"old books\"~2 OR \"rare prints\"~5", DEFAULT).unwrap();
        assert_eq!(parsed.proximity_distance, 5);
        assert!(parsed.terms.get(DEFAULT).unwrap().contains("rare prints"));
    }

    #[test]
    fn empty_query_yields_empty_map() {
        let parsed = parse_terms("  ", DEFAULT).unwrap();
        assert!(parsed.terms.is_empty());
    }

    #[test]
    fn from_iterator_keeps_empty_fields() {
        let map: SearchTermMap = [(FULLTEXT, Vec::<String>::new()), ("MD_TITLE", vec!["a".into()])]
            .into_iter()
            .collect();
        assert!(map.contains_key(FULLTEXT));
        assert_eq!(map.terms(FULLTEXT).count(), 0);
        assert_eq!(map.terms("MD_TITLE").collect::<Vec<_>>(), vec!["a"]);
    }
}
