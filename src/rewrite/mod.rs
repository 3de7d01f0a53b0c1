//! Format-preserving text rewrites.
//!
//! Both rewriters work one physical line at a time. A line's terminator
//! (`\n` or `\r\n`) is never part of a match, so line endings and blank
//! lines always survive byte for byte.

pub mod declaration;
pub mod imports;

use serde::Serialize;

pub use declaration::rewrite_declaration;
pub use imports::rewrite_imports;

/// A namespace as found in a file and the namespace the file should declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceChange {
    /// Namespace currently declared.
    pub old_namespace: String,
    /// Namespace inferred from the file's location.
    pub target_namespace: String,
}

impl NamespaceChange {
    /// Creates a change record.
    pub fn new(old_namespace: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self { old_namespace: old_namespace.into(), target_namespace: target_namespace.into() }
    }

    /// `true` when the declared namespace already equals the target.
    #[must_use]
    pub fn is_no_change(&self) -> bool {
        self.old_namespace == self.target_namespace
    }
}

const BOM: char = '\u{FEFF}';

/// A line of text without its terminator, and where it starts in the file.
pub(crate) struct Line<'a> {
    pub start: usize,
    pub content: &'a str,
    pub ending: &'a str,
}

/// Splits `text` into lines, keeping every byte in exactly one
/// `content` or `ending`, except a leading byte-order mark, which belongs
/// to no line.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    let body = text.strip_prefix(BOM).unwrap_or(text);
    let mut start = text.len() - body.len();
    body.split_inclusive('\n').map(move |raw| {
        let content = raw.strip_suffix('\n').map_or(raw, |s| s.strip_suffix('\r').unwrap_or(s));
        let line = Line { start, content, ending: &raw[content.len()..] };
        start += raw.len();
        line
    })
}
