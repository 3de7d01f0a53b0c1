//! Filesystem port for directory enumeration and whole-file I/O.

use std::path::Path;

/// Result type returned by every fallible port method.
pub type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Provides the filesystem primitives the scanner and rewriters rely on.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk. Implementations are shared between
/// worker tasks, hence `Send + Sync`.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> PortResult<String>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> PortResult<()>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the names of the sub-directories of `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_child_dirs(&self, path: &Path) -> PortResult<Vec<String>>;

    /// Lists the names of the files in `path` whose extension equals
    /// `extension` (ASCII case-insensitive), sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_files(&self, path: &Path, extension: &str) -> PortResult<Vec<String>>;
}
