//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod export;
pub mod init;
mod shared;
pub mod terms;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Tree(cmd) => tree::run(ctx, &cmd),
        Commands::Export(cmd) => export::run(ctx, &cmd),
        Commands::Terms(cmd) => terms::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
