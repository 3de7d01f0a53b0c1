//! Apply mode: rewrite declarations and `using` directives in place.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::pipeline::{self, ApplyOptions, ApplyReport};
use crate::tree::DirTree;

/// How the run is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Write nothing, only report.
    pub dry_run: bool,
    /// Print the report as JSON instead of text.
    pub json: bool,
}

/// Execute apply mode.
///
/// # Errors
///
/// Returns an error string if scanning, inference or any file I/O fails.
pub fn run(ctx: &ServiceContext, root: &Path, config: &Config, output: &Output) -> Result<(), String> {
    let report = execute(ctx, root, config, ApplyOptions { dry_run: output.dry_run })?;

    if output.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Scans `root` and runs the full rewrite on a pooled runtime.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the run fails.
pub fn execute(
    ctx: &ServiceContext,
    root: &Path,
    config: &Config,
    options: ApplyOptions,
) -> Result<ApplyReport, String> {
    let tree = DirTree::scan(ctx.fs.as_ref(), root, config).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .max_blocking_threads(config.jobs)
        .build()
        .map_err(|e| format!("failed to start worker pool: {e}"))?;

    runtime
        .block_on(pipeline::apply(Arc::clone(&ctx.fs), &tree, config, options))
        .map_err(|e| e.to_string())
}

/// Human readable summary of a report.
#[must_use]
pub fn format_report(report: &ApplyReport) -> String {
    let mut out = String::new();
    for change in report.renamed() {
        let _ = writeln!(
            out,
            "{}: {} -> {}",
            change.file.display(),
            change.change.old_namespace,
            change.change.target_namespace
        );
    }
    let verb = if report.dry_run { "would be written" } else { "written" };
    let _ = writeln!(
        out,
        "{} renamed, {} unchanged, {} files {verb}",
        report.renamed().count(),
        report.unchanged_count(),
        report.written.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::pipeline::FileChange;
    use crate::rewrite::NamespaceChange;
    use crate::tree::tests::{record_scan, FakeDir};
    use serde_json::json;

    #[test]
    fn execute_runs_the_pipeline_on_a_bounded_runtime() {
        let mut recorder = CassetteRecorder::new("/unused", "apply");
        record_scan(
            &mut recorder,
            &[FakeDir { path: "/p", dirs: &[], markers: &["P.csproj"], sources: &["A.cs"] }],
        );
        recorder.record(
            "fs",
            "read_to_string",
            json!({"path": "/p/A.cs"}),
            json!({"ok": "namespace Old;\n"}),
        );
        let ctx = ServiceContext::replaying_cassette(&recorder.cassette());
        let config = Config { jobs: 1, ..Config::default() };

        let report =
            execute(&ctx, Path::new("/p"), &config, ApplyOptions { dry_run: true }).unwrap();
        assert_eq!(report.renamed().count(), 1);
        assert_eq!(report.written, vec![PathBuf::from("/p/A.cs")]);
    }

    #[test]
    fn report_lists_renames_and_totals() {
        let report = ApplyReport {
            dry_run: true,
            changes: vec![
                FileChange {
                    file: PathBuf::from("/p/A.cs"),
                    change: NamespaceChange::new("Old", "P"),
                },
                FileChange { file: PathBuf::from("/p/B.cs"), change: NamespaceChange::new("P", "P") },
            ],
            written: vec![PathBuf::from("/p/A.cs")],
        };
        assert_eq!(
            format_report(&report),
            "/p/A.cs: Old -> P\n1 renamed, 1 unchanged, 1 files would be written\n"
        );
    }

    #[test]
    fn json_report_flattens_change_fields() {
        let report = ApplyReport {
            dry_run: false,
            changes: vec![FileChange {
                file: PathBuf::from("/p/A.cs"),
                change: NamespaceChange::new("Old", "P"),
            }],
            written: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["changes"][0]["old_namespace"], "Old");
        assert_eq!(value["changes"][0]["target_namespace"], "P");
        assert_eq!(value["changes"][0]["file"], "/p/A.cs");
    }
}
