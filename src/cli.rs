//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Top-level CLI parser for `namespacer`.
#[derive(Debug, Parser)]
#[command(
    name = "namespacer",
    version,
    about = "Align C# namespace declarations and using directives with the folder layout"
)]
pub struct Cli {
    /// Root directory to scan.
    pub path: Option<PathBuf>,

    /// Print the inferred tree without modifying any file.
    #[arg(short, long)]
    pub preview: bool,

    /// Compute every rewrite and report it, but write nothing.
    #[arg(long, conflicts_with = "preview")]
    pub dry_run: bool,

    /// Print the report as JSON.
    #[arg(long, conflicts_with = "preview")]
    pub json: bool,

    /// Additional directory name to skip (repeatable).
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Maximum number of files processed at once.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Configuration file to use instead of `<PATH>/namespacer.yaml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
