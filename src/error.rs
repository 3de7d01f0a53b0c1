//! Error taxonomy for scanning, inference and rewriting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run.
///
/// Pattern misses (no namespace declaration, a line that only looks like a
/// `using` directive) are not errors; affected files are left alone.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// The root path is missing or is not a directory.
    #[error("the provided path does not exist or is not a directory: {}", .path.display())]
    InvalidRoot {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// A source file has no project marker in any ancestor directory.
    #[error("{} is not inside any project (no marker file above it)", .file.display())]
    NoProjectRoot {
        /// Full path of the offending source file.
        file: PathBuf,
    },

    /// Reading, writing or listing failed.
    #[error("failed to {action} {}: {message}", .path.display())]
    Io {
        /// Operation that failed (`read`, `write`, `list`).
        action: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Message from the underlying filesystem adapter.
        message: String,
    },

    /// The configuration file or flags are invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// A worker task panicked or the pool shut down.
    #[error("worker task failed: {message}")]
    Worker {
        /// Description of the failure.
        message: String,
    },
}

impl NamespaceError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Io { action, path: path.into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_action_and_path() {
        let err = NamespaceError::io("write", "/project/A.cs", "disk full");
        assert_eq!(err.to_string(), "failed to write /project/A.cs: disk full");
    }

    #[test]
    fn no_project_root_names_the_file() {
        let err = NamespaceError::NoProjectRoot { file: PathBuf::from("/loose/File.cs") };
        assert!(err.to_string().starts_with("/loose/File.cs is not inside any project"));
    }
}
