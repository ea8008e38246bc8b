//! Clap argument definitions for the `folio` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Child documents populated by `folio tree` when `--count` is not given.
pub const DEFAULT_POPULATE_COUNT: usize = 20;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - Search hit trees for digitized records")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags naming a batch file and the search that produced it.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Batch file with the root document, its child documents and collaborator data
    pub batch: PathBuf,

    /// Search query whose terms are highlighted (can be specified multiple times)
    #[arg(short = 'q', long = "query")]
    pub queries: Vec<String>,

    /// Display locale [default: search.default_locale]
    #[arg(long)]
    pub locale: Option<String>,

    /// Read transcription files from this directory instead of the batch file
    #[arg(long)]
    pub text_dir: Option<PathBuf>,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeCommand {
    #[command(flatten)]
    /// Batch and search flags.
    pub batch: BatchArgs,

    /// Child documents to skip before populating
    #[arg(long, default_value = "0")]
    pub skip: usize,

    /// Child documents to populate [default: 20]
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Language of the alternate transcription to search
    #[arg(long)]
    pub language: Option<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `folio export`.
#[derive(Args, Debug, Clone)]
pub struct ExportCommand {
    #[command(flatten)]
    /// Batch and search flags.
    pub batch: BatchArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `folio terms`.
#[derive(Args, Debug, Clone)]
pub struct TermsCommand {
    /// Query to parse
    pub query: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `folio init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.folio.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `folio` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build a hit tree from a batch file and print it
    #[command(after_help = "\
BATCH FILE:
  {
    \"root\": {\"IDDOC\": \"1\", \"DOCTYPE\": \"DOCSTRCT\", ...},
    \"children\": [{\"IDDOC\": \"2\", \"IDDOC_OWNER\": \"1\", ...}],
    \"documents\": [...],          documents owners are fetched from
    \"cms_pages\": {\"PI\": [...]},  CMS pages per record
    \"denied\": [\"file.txt\"],      transcriptions the reader may not see
    \"translations\": {\"en\": {\"KEY\": \"Label\"}},
    \"texts\": {\"file.txt\": \"...\"}
  }

EXAMPLES:
  folio tree batch.json -q library
  folio tree batch.json -q 'MD_TITLE:atlas' --skip 20 -n 20
  folio tree batch.json -q 'CMS_TEXT_ALL:opening' --json")]
    Tree(TreeCommand),

    /// Populate every child document and print export rows
    Export(ExportCommand),

    /// Show the search terms a query produces
    Terms(TermsCommand),

    /// Initialize folio configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
