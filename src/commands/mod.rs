//! Command dispatch and handlers.

pub mod apply;
pub mod preview;

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::NamespaceError;

/// Environment variable naming a cassette file to record the run into.
pub const RECORD_ENV: &str = "NAMESPACER_RECORD";

/// Dispatch parsed arguments to the preview or apply handler.
///
/// When `NAMESPACER_RECORD` is set to a file path, every filesystem
/// interaction is recorded to that cassette file.
///
/// # Errors
///
/// Returns an error string if the path is missing or not a directory, the
/// configuration is invalid, or the selected handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let Some(path) = cli.path.as_deref() else {
        return Err(
            "Please provide a path to a directory containing .cs files.".to_string()
        );
    };

    let ctx = match env::var(RECORD_ENV) {
        Ok(cassette) => ServiceContext::recording(Path::new(&cassette)),
        Err(_) => ServiceContext::live(),
    };

    dispatch_with_context(cli, path, &ctx)
}

/// Dispatch with the given service context.
///
/// # Errors
///
/// Same as [`dispatch`].
pub fn dispatch_with_context(cli: &Cli, path: &Path, ctx: &ServiceContext) -> Result<(), String> {
    let root = resolve_root(ctx, path).map_err(|e| e.to_string())?;
    let config = Config::load(ctx, &root, cli.config.as_deref())
        .and_then(|config| config.with_overrides(&cli.exclude, cli.jobs))
        .map_err(|e| e.to_string())?;
    log::debug!("configuration: {config:?}");

    if cli.preview {
        preview::run(ctx, &root, &config, !cli.no_color)
    } else {
        apply::run(ctx, &root, &config, &apply::Output { dry_run: cli.dry_run, json: cli.json })
    }
}

/// Makes `path` absolute and checks that it is a directory.
fn resolve_root(ctx: &ServiceContext, path: &Path) -> Result<PathBuf, NamespaceError> {
    let invalid = || NamespaceError::InvalidRoot { path: path.to_path_buf() };
    if path.as_os_str().is_empty() {
        return Err(invalid());
    }
    let root = std::path::absolute(path).map_err(|_| invalid())?;
    if !ctx.fs.is_dir(&root) {
        return Err(invalid());
    }
    Ok(root)
}
