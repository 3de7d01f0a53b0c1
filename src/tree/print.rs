//! Tree listing as plain data; colouring is left to the caller.

use super::{DirId, DirTree};

/// What a [`PrintLine`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A directory name.
    Directory,
    /// A project marker file.
    ProjectMarker,
    /// A source file.
    SourceFile,
    /// A problem found while previewing.
    Warning,
}

/// One line of tree output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintLine {
    /// Text including indentation.
    pub text: String,
    /// Semantic kind, used for colouring.
    pub kind: LineKind,
}

impl PrintLine {
    /// Creates a line of the given kind.
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self { text: text.into(), kind }
    }
}

/// Lists the tree: each directory at two spaces per level, followed by its
/// sub-directories, then its markers and source files one space deeper than
/// the directory name.
#[must_use]
pub fn tree_lines(tree: &DirTree) -> Vec<PrintLine> {
    let mut lines = Vec::new();
    push_dir(tree, tree.root(), 0, &mut lines);
    lines
}

fn push_dir(tree: &DirTree, id: DirId, depth: usize, lines: &mut Vec<PrintLine>) {
    let node = tree.node(id);
    let indent = " ".repeat(depth * 2);
    lines.push(PrintLine::new(format!("{indent}{}", node.name), LineKind::Directory));

    for &child in &node.children {
        push_dir(tree, child, depth + 1, lines);
    }
    for marker in &node.markers {
        lines.push(PrintLine::new(
            format!("{indent} {}", marker.file_name),
            LineKind::ProjectMarker,
        ));
    }
    for file in &node.files {
        lines.push(PrintLine::new(format!("{indent} {}", file.file_name), LineKind::SourceFile));
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::config::Config;
    use crate::context::ServiceContext;
    use crate::tree::tests::{record_scan, FakeDir};

    #[test]
    fn lists_subdirs_before_own_markers_and_files() {
        let mut recorder = CassetteRecorder::new("/unused", "print");
        record_scan(
            &mut recorder,
            &[
                FakeDir { path: "/r", dirs: &["Proj"], markers: &[], sources: &[] },
                FakeDir {
                    path: "/r/Proj",
                    dirs: &["Sub"],
                    markers: &["Proj.csproj"],
                    sources: &["Root.cs"],
                },
                FakeDir { path: "/r/Proj/Sub", dirs: &[], markers: &[], sources: &["Leaf.cs"] },
            ],
        );
        let ctx = ServiceContext::replaying_cassette(&recorder.cassette());
        let tree = DirTree::scan(ctx.fs.as_ref(), Path::new("/r"), &Config::default()).unwrap();

        let lines = tree_lines(&tree);
        let expected = vec![
            PrintLine::new("r", LineKind::Directory),
            PrintLine::new("  Proj", LineKind::Directory),
            PrintLine::new("    Sub", LineKind::Directory),
            PrintLine::new("     Leaf.cs", LineKind::SourceFile),
            PrintLine::new("   Proj.csproj", LineKind::ProjectMarker),
            PrintLine::new("   Root.cs", LineKind::SourceFile),
        ];
        assert_eq!(lines, expected);
    }
}
