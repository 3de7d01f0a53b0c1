//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::{FileSystem, PortResult};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl LiveFileSystem {
    fn sorted_entries(
        path: &Path,
        keep: impl Fn(&std::fs::DirEntry) -> std::io::Result<bool>,
    ) -> PortResult<Vec<String>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if !keep(&entry)? {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            } else {
                log::warn!("skipping non UTF-8 entry in {}", path.display());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> PortResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> PortResult<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_child_dirs(&self, path: &Path) -> PortResult<Vec<String>> {
        Self::sorted_entries(path, |entry| Ok(entry.file_type()?.is_dir()))
    }

    fn list_files(&self, path: &Path, extension: &str) -> PortResult<Vec<String>> {
        Self::sorted_entries(path, |entry| {
            let is_match = entry.file_type()?.is_file()
                && Path::new(&entry.file_name())
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            Ok(is_match)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_dirs_and_matching_files_sorted() {
        let dir = std::env::temp_dir().join("namespacer_live_fs_list");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("Zeta")).unwrap();
        std::fs::create_dir_all(dir.join("Alpha")).unwrap();
        std::fs::write(dir.join("B.cs"), "").unwrap();
        std::fs::write(dir.join("A.CS"), "").unwrap();
        std::fs::write(dir.join("App.csproj"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        let fs = LiveFileSystem;
        assert_eq!(fs.list_child_dirs(&dir).unwrap(), vec!["Alpha", "Zeta"]);
        assert_eq!(fs.list_files(&dir, "cs").unwrap(), vec!["A.CS", "B.cs"]);
        assert_eq!(fs.list_files(&dir, "csproj").unwrap(), vec!["App.csproj"]);
        assert!(fs.is_dir(&dir.join("Alpha")));
        assert!(!fs.is_dir(&dir.join("B.cs")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_missing_file_is_an_error() {
        let fs = LiveFileSystem;
        let result = fs.read_to_string(Path::new("/definitely/not/here.cs"));
        assert!(result.is_err());
    }
}
