//! Read-only snapshot of the scanned directory tree.
//!
//! Nodes live in an arena owned by [`DirTree`]; children are referenced by
//! [`DirId`] and every node keeps the id of its parent, so upward walks need
//! no shared ownership.

pub mod print;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::NamespaceError;
use crate::ports::FileSystem;

/// Index of a directory node inside its [`DirTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(usize);

/// A project marker file (e.g. `Company.App.csproj`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMarker {
    /// File name including extension.
    pub file_name: String,
}

impl ProjectMarker {
    /// Namespace root this marker defines: its file name without extension.
    #[must_use]
    pub fn namespace_root(&self) -> &str {
        self.file_name.rsplit_once('.').map_or(self.file_name.as_str(), |(stem, _)| stem)
    }
}

/// A source file and the directory it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name including extension.
    pub file_name: String,
    /// Directory owning the file.
    pub dir: DirId,
}

/// One scanned directory.
#[derive(Debug, Clone)]
pub struct DirNode {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// Base name of the directory.
    pub name: String,
    /// Parent directory, `None` for the scan root.
    pub parent: Option<DirId>,
    /// Sub-directories, sorted by name.
    pub children: Vec<DirId>,
    /// Project markers, sorted by name.
    pub markers: Vec<ProjectMarker>,
    /// Source files, sorted by name.
    pub files: Vec<SourceFile>,
}

/// The whole scanned tree. Immutable once [`DirTree::scan`] returns.
#[derive(Debug, Clone)]
pub struct DirTree {
    nodes: Vec<DirNode>,
}

impl DirTree {
    /// Scans `root` recursively through the filesystem port.
    ///
    /// Directories named in `config.exclude_dirs` are skipped at every depth.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceError::InvalidRoot`] if `root` is not a directory and
    /// [`NamespaceError::Io`] if a directory cannot be listed.
    pub fn scan(fs: &dyn FileSystem, root: &Path, config: &Config) -> Result<Self, NamespaceError> {
        if !fs.is_dir(root) {
            return Err(NamespaceError::InvalidRoot { path: root.to_path_buf() });
        }

        let mut tree = Self { nodes: Vec::new() };
        let root_id = tree.push(root.to_path_buf(), base_name(root), None);
        tree.fill(fs, root_id, config)?;
        log::debug!(
            "scanned {} directories, {} source files under {}",
            tree.nodes.len(),
            tree.source_files().count(),
            root.display()
        );
        Ok(tree)
    }

    fn push(&mut self, path: PathBuf, name: String, parent: Option<DirId>) -> DirId {
        let id = DirId(self.nodes.len());
        self.nodes.push(DirNode {
            path,
            name,
            parent,
            children: Vec::new(),
            markers: Vec::new(),
            files: Vec::new(),
        });
        id
    }

    fn fill(&mut self, fs: &dyn FileSystem, id: DirId, config: &Config) -> Result<(), NamespaceError> {
        let path = self.nodes[id.0].path.clone();
        let list_err = |e| NamespaceError::io("list", &path, e);

        let markers: Vec<ProjectMarker> = fs
            .list_files(&path, &config.marker_extension)
            .map_err(list_err)?
            .into_iter()
            .map(|file_name| ProjectMarker { file_name })
            .collect();
        if markers.len() > 1 {
            log::warn!(
                "{} holds {} project markers; using {} as namespace root",
                path.display(),
                markers.len(),
                markers[0].file_name
            );
        }

        let files = fs
            .list_files(&path, &config.source_extension)
            .map_err(list_err)?
            .into_iter()
            .map(|file_name| SourceFile { file_name, dir: id })
            .collect();

        let node = &mut self.nodes[id.0];
        node.markers = markers;
        node.files = files;

        for name in fs.list_child_dirs(&path).map_err(list_err)? {
            if config.is_excluded(&name) {
                log::debug!("skipping excluded directory {}", path.join(&name).display());
                continue;
            }
            let child = self.push(path.join(&name), name, Some(id));
            self.nodes[id.0].children.push(child);
            self.fill(fs, child, config)?;
        }
        Ok(())
    }

    /// The scan root.
    #[must_use]
    pub fn root(&self) -> DirId {
        DirId(0)
    }

    /// Looks up a directory node.
    #[must_use]
    pub fn node(&self, id: DirId) -> &DirNode {
        &self.nodes[id.0]
    }

    /// All source files, depth-first in sorted order.
    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        let mut stack = vec![self.root()];
        let mut ordered = Vec::new();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            ordered.extend(node.files.iter());
            stack.extend(node.children.iter().rev());
        }
        ordered.into_iter()
    }

    /// Full path of a source file.
    #[must_use]
    pub fn file_path(&self, file: &SourceFile) -> PathBuf {
        self.node(file.dir).path.join(&file.file_name)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::context::ServiceContext;
    use serde_json::json;

    /// One directory of a fake project: path, sub-directories, markers, sources.
    pub(crate) struct FakeDir<'a> {
        pub path: &'a str,
        pub dirs: &'a [&'a str],
        pub markers: &'a [&'a str],
        pub sources: &'a [&'a str],
    }

    /// Records the interactions a scan of `dirs` performs, in scan order.
    pub(crate) fn record_scan(recorder: &mut CassetteRecorder, dirs: &[FakeDir<'_>]) {
        recorder.record("fs", "is_dir", json!({"path": dirs[0].path}), json!(true));
        for dir in dirs {
            recorder.record(
                "fs",
                "list_files",
                json!({"path": dir.path, "extension": "csproj"}),
                json!({"ok": dir.markers}),
            );
            recorder.record(
                "fs",
                "list_files",
                json!({"path": dir.path, "extension": "cs"}),
                json!({"ok": dir.sources}),
            );
            recorder.record(
                "fs",
                "list_child_dirs",
                json!({"path": dir.path}),
                json!({"ok": dir.dirs}),
            );
        }
    }

    fn scan_cassette(dirs: &[FakeDir<'_>]) -> Cassette {
        let mut recorder = CassetteRecorder::new("/unused", "scan");
        record_scan(&mut recorder, dirs);
        recorder.cassette()
    }

    fn sample_dirs() -> Vec<FakeDir<'static>> {
        vec![
            FakeDir { path: "/repo", dirs: &["App", "bin"], markers: &[], sources: &[] },
            FakeDir {
                path: "/repo/App",
                dirs: &["Services"],
                markers: &["App.csproj"],
                sources: &["Program.cs"],
            },
            FakeDir {
                path: "/repo/App/Services",
                dirs: &[],
                markers: &[],
                sources: &["A.cs", "B.cs"],
            },
        ]
    }

    #[test]
    fn scan_builds_parent_links_and_skips_excluded_dirs() {
        let ctx = ServiceContext::replaying_cassette(&scan_cassette(&sample_dirs()));
        let tree = DirTree::scan(ctx.fs.as_ref(), Path::new("/repo"), &Config::default()).unwrap();

        let root = tree.node(tree.root());
        assert_eq!(root.name, "repo");
        assert_eq!(root.children.len(), 1, "bin must be excluded");

        let app_id = root.children[0];
        let app = tree.node(app_id);
        assert_eq!(app.name, "App");
        assert_eq!(app.parent, Some(tree.root()));
        assert_eq!(app.markers[0].namespace_root(), "App");

        let services = tree.node(app.children[0]);
        assert_eq!(services.parent, Some(app_id));
        assert_eq!(services.path, PathBuf::from("/repo/App/Services"));

        let files: Vec<PathBuf> = tree.source_files().map(|f| tree.file_path(f)).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("/repo/App/Program.cs"),
                PathBuf::from("/repo/App/Services/A.cs"),
                PathBuf::from("/repo/App/Services/B.cs"),
            ]
        );
    }

    #[test]
    fn scan_rejects_non_directory_root() {
        let mut recorder = CassetteRecorder::new("/unused", "scan");
        recorder.record("fs", "is_dir", json!({"path": "/repo/file.cs"}), json!(false));
        let ctx = ServiceContext::replaying_cassette(&recorder.cassette());

        let err = DirTree::scan(ctx.fs.as_ref(), Path::new("/repo/file.cs"), &Config::default())
            .unwrap_err();
        assert!(matches!(err, NamespaceError::InvalidRoot { .. }));
    }

    #[test]
    fn marker_namespace_root_strips_only_last_extension() {
        let marker = ProjectMarker { file_name: "Company.Product.Api.csproj".to_string() };
        assert_eq!(marker.namespace_root(), "Company.Product.Api");
    }
}
