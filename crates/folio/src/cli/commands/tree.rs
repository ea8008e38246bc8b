//! Implementation of `folio tree`.

use std::process::ExitCode;

use crate::cli::{
    args::{DEFAULT_POPULATE_COUNT, TreeCommand},
    commands::shared::{Window, build_tree},
    context::CommandContext,
    output::{print_json, render_tree},
};

/// Builds a record's hit tree for one window of child documents and prints it.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let window = Window::Slice {
        skip: cmd.skip,
        count: cmd.count.unwrap_or(DEFAULT_POPULATE_COUNT),
        language: cmd.language.as_deref(),
    };
    let tree = match build_tree(ctx, &cmd.batch, window) {
        Ok(tree) => tree,
        Err(code) => return code,
    };

    if cmd.output.json {
        return print_json(&tree.node(tree.root()));
    }
    print!("{}", render_tree(&tree));
    ExitCode::SUCCESS
}
