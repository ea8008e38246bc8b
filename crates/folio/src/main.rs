//! Command-line interface for the `folio` hit-tree tool.

mod cli;

use std::{io, process::ExitCode};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FOLIO_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();

    let ctx = match cli.command {
        Commands::Init(_) | Commands::Terms(_) | Commands::Check => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the stderr log subscriber, filtered by `FOLIO_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
