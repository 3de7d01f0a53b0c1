//! Binary entrypoint for the `namespacer` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; it only supplies NAMESPACER_LOG / NAMESPACER_RECORD.
    let _ = dotenvy::dotenv();

    match namespacer::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
