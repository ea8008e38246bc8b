//! Flat per-hit rows for tabular export.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{HitKind, tree::HitTree};

/// One exported hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Kind of the hit.
    pub kind: Option<HitKind>,
    /// Plain label.
    pub label: String,
    /// Raw values of the configured export fields the hit's document has.
    pub fields: BTreeMap<String, String>,
}

/// Returns one row per hit, in pre-order.
pub fn export_rows(tree: &HitTree) -> Vec<ExportRow> {
    tree.preorder()
        .into_iter()
        .map(|id| {
            let hit = tree.hit(id);
            ExportRow {
                kind: hit.kind(),
                label: hit.label().to_string(),
                fields: hit.export_metadata().clone(),
            }
        })
        .collect()
}

/// Returns the field columns of `rows`, in `preferred` order first, then the rest
/// sorted.
pub fn export_columns<'r>(rows: &'r [ExportRow], preferred: &[String]) -> Vec<&'r str> {
    let present: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.fields.keys().map(String::as_str))
        .collect();
    let mut columns: Vec<&str> = preferred
        .iter()
        .filter_map(|field| present.get(field.as_str()).copied())
        .collect();
    let rest: Vec<&str> = present
        .into_iter()
        .filter(|field| !columns.contains(field))
        .collect();
    columns.extend(rest);
    columns
}
