//! Preview mode: print the inferred tree, modify nothing.

use std::path::Path;

use colored::{ColoredString, Colorize};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::pipeline;
use crate::tree::print::{LineKind, PrintLine};
use crate::tree::DirTree;

/// Execute preview mode.
///
/// # Errors
///
/// Returns an error string if the tree cannot be scanned. Files without a
/// project root are shown as warnings, not errors.
pub fn run(ctx: &ServiceContext, root: &Path, config: &Config, color: bool) -> Result<(), String> {
    let tree = DirTree::scan(ctx.fs.as_ref(), root, config).map_err(|e| e.to_string())?;

    if !color {
        colored::control::set_override(false);
    }
    println!("Processing path: {}", root.display());
    for line in pipeline::preview(&tree) {
        println!("{}", render(&line));
    }
    Ok(())
}

/// Colours a line by kind.
#[must_use]
pub fn render(line: &PrintLine) -> ColoredString {
    let text = line.text.as_str();
    match line.kind {
        LineKind::Directory => text.cyan(),
        LineKind::ProjectMarker => text.red(),
        LineKind::SourceFile => text.green(),
        LineKind::Warning => text.yellow().bold(),
    }
}
