//! Implementation of `folio terms`.

use std::process::ExitCode;

use folio_query::{DEFAULT, parse_terms};

use crate::cli::{
    args::TermsCommand,
    output::{print_json, render_terms},
};

/// Prints the per-field search terms a query yields.
pub fn run(cmd: &TermsCommand) -> ExitCode {
    let parsed = match parse_terms(&cmd.query, DEFAULT) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: invalid query '{}': {e}", cmd.query);
            return ExitCode::FAILURE;
        }
    };

    if cmd.output.json {
        return print_json(&parsed);
    }
    print!("{}", render_terms(&parsed));
    ExitCode::SUCCESS
}
