//! Core library entry for the `namespacer` CLI.
//!
//! Infers the namespace every C# source file should declare from its
//! folder and nearest project file, then rewrites the declaration and the
//! `using` directives that refer to renamed namespaces, leaving every other
//! byte untouched.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod pipeline;
pub mod ports;
pub mod rewrite;
pub mod tree;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose, cli.quiet);
    commands::dispatch(&cli)
}
