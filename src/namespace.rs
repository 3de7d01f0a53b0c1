//! Target namespace inference from a file's position in the tree.

use crate::error::NamespaceError;
use crate::tree::{DirTree, SourceFile};

/// Segments of the namespace `file` should declare, most general first.
///
/// Walks up from the file's directory. A directory holding a project marker
/// contributes the marker's namespace root and ends the walk; any other
/// directory contributes its own name. A file next to its marker gets just
/// the marker's root.
///
/// # Errors
///
/// Returns [`NamespaceError::NoProjectRoot`] if no directory up to the scan
/// root holds a marker.
pub fn target_segments(tree: &DirTree, file: &SourceFile) -> Result<Vec<String>, NamespaceError> {
    let mut segments = Vec::new();
    let mut dir = Some(file.dir);

    while let Some(id) = dir {
        let node = tree.node(id);
        if let Some(marker) = node.markers.first() {
            segments.push(marker.namespace_root().to_string());
            segments.reverse();
            return Ok(segments);
        }
        segments.push(node.name.clone());
        dir = node.parent;
    }

    Err(NamespaceError::NoProjectRoot { file: tree.file_path(file) })
}

/// [`target_segments`] joined with `.`.
///
/// # Errors
///
/// Same as [`target_segments`].
pub fn target_namespace(tree: &DirTree, file: &SourceFile) -> Result<String, NamespaceError> {
    Ok(target_segments(tree, file)?.join("."))
}
