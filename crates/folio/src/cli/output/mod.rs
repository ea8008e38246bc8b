//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use folio_highlight::{dim, header, render_marked, rule, subheader};
use folio_hits::{ExportRow, Hit, HitId, HitTree, export_columns};
use folio_query::ParsedQuery;
use serde::Serialize;

/// Indentation per tree level.
const INDENT: &str = "  ";
/// Width of the rule under the root label.
const RULE_WIDTH: usize = 60;

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders a hit tree as indented text, with search terms emphasized.
pub fn render_tree(tree: &HitTree) -> String {
    let mut out = String::new();
    let root = tree.hit(tree.root());
    out.push_str(&format!("{}\n", header(&render_marked(root.short_label()))));
    out.push_str(&format!("{}\n", rule(RULE_WIDTH)));
    render_metadata(&mut out, root, 1);
    for &child in root.children() {
        render_hit(&mut out, tree, child, 1);
    }

    let total = root.child_documents().len();
    let summary = if root.has_more_children() {
        format!(
            "{} of {total} child documents populated; more available",
            root.populated_count()
        )
    } else {
        format!("{} of {total} child documents populated", root.populated_count())
    };
    out.push_str(&format!("\n{}\n", dim(&summary)));
    out
}

/// Renders one hit and its descendants at `depth`.
fn render_hit(out: &mut String, tree: &HitTree, id: HitId, depth: usize) {
    let hit = tree.hit(id);
    let indent = INDENT.repeat(depth);
    let kind = hit
        .translated_kind()
        .map(str::to_string)
        .or_else(|| hit.kind().map(|kind| kind.to_string()))
        .unwrap_or_default();
    out.push_str(&format!(
        "{indent}{} {}\n",
        dim(&format!("[{kind}]")),
        render_marked(hit.short_label())
    ));
    if let Some(fragment) = hit.fragment() {
        out.push_str(&format!("{indent}{INDENT}{}\n", render_marked(fragment)));
    }
    render_metadata(out, hit, depth + 1);
    for &child in hit.children() {
        render_hit(out, tree, child, depth + 1);
    }
}

/// Renders a hit's found metadata as `label: value` lines.
fn render_metadata(out: &mut String, hit: &Hit, depth: usize) {
    let indent = INDENT.repeat(depth);
    for pair in hit.found_metadata() {
        out.push_str(&format!(
            "{indent}{} {}\n",
            dim(&format!("{}:", pair.label)),
            render_marked(&pair.value)
        ));
    }
}

/// Builds the export table for `rows`, with `preferred` columns first.
pub fn export_table(rows: &[ExportRow], preferred: &[String]) -> Table {
    let columns = export_columns(rows, preferred);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut heading = vec![Cell::new("Kind"), Cell::new("Label")];
    heading.extend(columns.iter().map(Cell::new));
    table.set_header(heading);

    for row in rows {
        let kind = row.kind.map(|kind| kind.to_string()).unwrap_or_default();
        let mut cells = vec![Cell::new(kind), Cell::new(&row.label)];
        cells.extend(
            columns
                .iter()
                .map(|column| Cell::new(row.fields.get(*column).map_or("", String::as_str))),
        );
        table.add_row(cells);
    }
    table
}

/// Renders parsed search terms as a field/terms table.
pub fn render_terms(parsed: &ParsedQuery) -> String {
    if parsed.terms.is_empty() {
        return format!("{}\n", dim("No search terms."));
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Field", "Terms"]);
    for (field, terms) in &parsed.terms {
        let joined = terms.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        table.add_row(vec![Cell::new(field), Cell::new(joined)]);
    }

    let mut out = format!("{}\n{table}\n", subheader("Search terms:"));
    if parsed.proximity_distance > 0 {
        let proximity = format!("proximity: {}", parsed.proximity_distance);
        out.push_str(&format!("{}\n", dim(&proximity)));
    }
    out
}
