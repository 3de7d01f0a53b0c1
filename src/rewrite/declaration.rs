//! Namespace declaration rewrite.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::{lines, NamespaceChange};

/// `namespace Foo.Bar;`, `namespace Foo.Bar {` or a bare `namespace Foo.Bar`
/// whose brace follows on a later line.
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t]*namespace[ \t]+(?P<ns>[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)[ \t]*(?P<term>[;{])?[ \t]*$",
    )
    .expect("declaration pattern is valid")
});

static OPEN_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\{[ \t]*$").expect("brace pattern is valid"));

/// The first namespace declaration of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Declared namespace.
    pub namespace: &'a str,
    /// Byte range of the namespace identifier in the file text.
    pub span: Range<usize>,
}

/// Finds the first namespace declaration in `text`.
///
/// Lines after the first declaration are never inspected. A declaration
/// without `;` or `{` on its own line only counts when the next non-blank
/// line is a lone `{`.
#[must_use]
pub fn find_declaration(text: &str) -> Option<Declaration<'_>> {
    let mut awaiting_brace: Option<Declaration<'_>> = None;

    for line in lines(text) {
        if let Some(declaration) = awaiting_brace.take() {
            if line.content.trim().is_empty() {
                awaiting_brace = Some(declaration);
                continue;
            }
            if OPEN_BRACE.is_match(line.content) {
                return Some(declaration);
            }
        }

        let Some(captures) = DECLARATION.captures(line.content) else {
            continue;
        };
        let ns = captures.name("ns")?;
        let declaration = Declaration {
            namespace: ns.as_str(),
            span: line.start + ns.start()..line.start + ns.end(),
        };
        if captures.name("term").is_some() {
            return Some(declaration);
        }
        awaiting_brace = Some(declaration);
    }

    None
}

/// Replaces the namespace of the first declaration with `target`.
///
/// Returns the (possibly unchanged) text and the change record, which is
/// `None` only when the file has no declaration. Only the identifier bytes
/// are replaced: indentation, keyword, terminator style and line ending
/// are kept.
#[must_use]
pub fn rewrite_declaration<'a>(
    text: &'a str,
    target: &str,
) -> (Cow<'a, str>, Option<NamespaceChange>) {
    let Some(declaration) = find_declaration(text) else {
        return (Cow::Borrowed(text), None);
    };

    let change = NamespaceChange::new(declaration.namespace, target);
    if change.is_no_change() {
        return (Cow::Borrowed(text), Some(change));
    }

    let mut rewritten = String::with_capacity(text.len() + target.len());
    rewritten.push_str(&text[..declaration.span.start]);
    rewritten.push_str(target);
    rewritten.push_str(&text[declaration.span.end..]);
    (Cow::Owned(rewritten), Some(change))
}
