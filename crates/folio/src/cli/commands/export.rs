//! Implementation of `folio export`.

use std::process::ExitCode;

use folio_hits::export_rows;

use crate::cli::{
    args::ExportCommand,
    commands::shared::{Window, build_tree},
    context::CommandContext,
    output::{export_table, print_json},
};

/// Populates every child document and prints one row per hit.
pub fn run(ctx: &CommandContext, cmd: &ExportCommand) -> ExitCode {
    let tree = match build_tree(ctx, &cmd.batch, Window::All) {
        Ok(tree) => tree,
        Err(code) => return code,
    };
    let rows = export_rows(&tree);

    if cmd.output.json {
        return print_json(&rows);
    }
    println!("{}", export_table(&rows, &ctx.config.export.fields));
    ExitCode::SUCCESS
}
