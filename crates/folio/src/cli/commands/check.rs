//! Implementation of `folio check`.

use std::process::ExitCode;

use folio_config::{Config, ConfigWarning, discover_config_files};
use folio_highlight::{success, warning};

use crate::cli::context::CommandContext;

/// Exit codes for `folio check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports issues.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'folio init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("Config files:");
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    let warnings = config.validate();

    println!("Locales: {}", config.search.locales.join(", "));
    match &config.files.text_root {
        Some(root) => {
            let status = if root.is_dir() { "ok" } else { "missing" };
            println!("Text root [{status}] -> {}", root.display());
        }
        None => println!("Text root: (none)"),
    }
    println!();

    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for item in &warnings {
        println!("  - {item}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::ZeroFragmentLength => {
                "Set search.fragment_length to a positive number of characters."
            }
            ConfigWarning::DefaultLocaleNotListed { .. } => {
                "Add the default locale to search.locales or change search.default_locale."
            }
            ConfigWarning::IgnoredFieldConfigured { .. } => {
                "Remove the field from display.ignore_fields or from the other display setting."
            }
            ConfigWarning::TextRootMissing { .. } => {
                "Create the text directory or update files.text_root."
            }
            ConfigWarning::TextRootNotDirectory { .. } => {
                "files.text_root must point to a directory, not a file."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("Hints:");
        for hint in hints {
            println!("  - {hint}");
        }
    }
}
