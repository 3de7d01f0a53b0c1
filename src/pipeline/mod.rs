//! Whole-tree orchestration: infer, rewrite declarations, then imports.
//!
//! ```text
//! Scan ──> Declare (per file, pooled) ──barrier──> Import (per file, pooled) ──> Done
//! ```
//!
//! Import only starts once every declaration rewrite has finished, since a
//! file's `using` lines may name namespaces declared anywhere in the tree.

pub mod pool;

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::NamespaceError;
use crate::namespace::target_namespace;
use crate::ports::FileSystem;
use crate::rewrite::{rewrite_declaration, rewrite_imports, NamespaceChange};
use crate::tree::print::{tree_lines, LineKind, PrintLine};
use crate::tree::DirTree;

use self::pool::run_bounded;

/// How [`apply`] treats the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute every rewrite but write nothing.
    pub dry_run: bool,
}

/// Declaration change found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Full path of the file.
    pub file: PathBuf,
    /// Declared and target namespace.
    #[serde(flatten)]
    pub change: NamespaceChange,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// One record per file with a namespace declaration, including files
    /// already declaring their target, sorted by path.
    pub changes: Vec<FileChange>,
    /// Files written (or, in a dry run, that would have been written),
    /// sorted by path.
    pub written: Vec<PathBuf>,
}

impl ApplyReport {
    /// Records whose namespace actually changes.
    pub fn renamed(&self) -> impl Iterator<Item = &FileChange> {
        self.changes.iter().filter(|c| !c.change.is_no_change())
    }

    /// Number of files whose declaration already matched.
    #[must_use]
    pub fn unchanged_count(&self) -> usize {
        self.changes.iter().filter(|c| c.change.is_no_change()).count()
    }
}

/// A source file and the namespace it should declare.
#[derive(Debug, Clone)]
struct FileJob {
    path: PathBuf,
    target: String,
}

/// State of a file after its declaration rewrite.
#[derive(Debug)]
struct Declared {
    path: PathBuf,
    change: Option<NamespaceChange>,
    /// New text, present only if the declaration was rewritten.
    rewritten: Option<String>,
}

/// Tree listing for preview mode.
///
/// Files whose namespace cannot be inferred are listed as warnings after the
/// tree; preview never fails on file content.
#[must_use]
pub fn preview(tree: &DirTree) -> Vec<PrintLine> {
    let mut lines = tree_lines(tree);
    for file in tree.source_files() {
        if let Err(err) = target_namespace(tree, file) {
            log::warn!("{err}");
            lines.push(PrintLine::new(format!("warning: {err}"), LineKind::Warning));
        }
    }
    lines
}

/// Infers the target namespace of every file.
///
/// Runs to completion before any file is touched so an orphaned file
/// aborts the run with nothing modified.
fn plan(tree: &DirTree) -> Result<Vec<FileJob>, NamespaceError> {
    tree.source_files()
        .map(|file| {
            Ok(FileJob { path: tree.file_path(file), target: target_namespace(tree, file)? })
        })
        .collect()
}

/// Rewrites declarations and then `using` directives across the tree.
///
/// # Errors
///
/// Fails if any file has no project root (before anything is written) or
/// on the first read or write error. Files rewritten before an I/O failure
/// stay rewritten.
pub async fn apply(
    fs: Arc<dyn FileSystem>,
    tree: &DirTree,
    config: &Config,
    options: ApplyOptions,
) -> Result<ApplyReport, NamespaceError> {
    let jobs = plan(tree)?;
    log::info!("rewriting declarations in {} files", jobs.len());

    let declared = {
        let fs = Arc::clone(&fs);
        run_bounded(jobs, config.jobs, move |job| declare(fs.as_ref(), job, options)).await?
    };

    let mut report = ApplyReport { dry_run: options.dry_run, ..ApplyReport::default() };
    for file in &declared {
        if let Some(change) = &file.change {
            report.changes.push(FileChange { file: file.path.clone(), change: change.clone() });
        }
        if file.rewritten.is_some() {
            report.written.push(file.path.clone());
        }
    }
    report.changes.sort_by(|a, b| a.file.cmp(&b.file));
    report.written.sort();

    let renames: Vec<NamespaceChange> =
        report.renamed().map(|c| c.change.clone()).collect();
    if renames.is_empty() {
        log::info!("every declaration already matches its folder, skipping imports");
        return Ok(report);
    }

    log::info!("rewriting using directives for {} renamed namespaces", renames.len());
    let renames = Arc::new(renames);
    let imported =
        run_bounded(declared, config.jobs, move |file| import(fs.as_ref(), file, &renames, options))
            .await?;

    for path in imported.into_iter().flatten() {
        if !report.written.contains(&path) {
            report.written.push(path);
        }
    }
    report.written.sort();
    Ok(report)
}

fn declare(
    fs: &dyn FileSystem,
    job: FileJob,
    options: ApplyOptions,
) -> Result<Declared, NamespaceError> {
    let text = fs.read_to_string(&job.path).map_err(|e| NamespaceError::io("read", &job.path, e))?;

    let (rewritten, change) = rewrite_declaration(&text, &job.target);
    let rewritten = match rewritten {
        Cow::Owned(new_text) => {
            if let Some(change) = &change {
                log::info!(
                    "{}: namespace {} -> {}",
                    job.path.display(),
                    change.old_namespace,
                    change.target_namespace
                );
            }
            if !options.dry_run {
                fs.write(&job.path, &new_text)
                    .map_err(|e| NamespaceError::io("write", &job.path, e))?;
            }
            Some(new_text)
        }
        Cow::Borrowed(_) => {
            if change.is_none() {
                log::debug!("{}: no namespace declaration", job.path.display());
            }
            None
        }
    };

    Ok(Declared { path: job.path, change, rewritten })
}

/// Returns the path if the file was (or would be) written.
fn import(
    fs: &dyn FileSystem,
    file: Declared,
    renames: &[NamespaceChange],
    options: ApplyOptions,
) -> Result<Option<PathBuf>, NamespaceError> {
    let text = match file.rewritten {
        Some(text) => text,
        None => fs.read_to_string(&file.path).map_err(|e| NamespaceError::io("read", &file.path, e))?,
    };

    let updated = rewrite_imports(&text, renames);
    if updated == text {
        log::debug!("{}: using directives unchanged", file.path.display());
        return Ok(None);
    }

    log::info!("{}: using directives updated", file.path.display());
    if !options.dry_run {
        fs.write(&file.path, &updated).map_err(|e| NamespaceError::io("write", &file.path, e))?;
    }
    Ok(Some(file.path))
}
