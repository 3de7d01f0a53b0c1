//! `using` directive rewrite.
//!
//! A directive body is classified once and rewritten by kind:
//!
//! | body                  | rewrite                                        |
//! |-----------------------|------------------------------------------------|
//! | `static Some.Type`    | never                                          |
//! | `Alias = Some.Thing`  | right-hand side, old namespace as a prefix     |
//! | `Some.Namespace`      | whole body, exact match only                   |

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::{lines, NamespaceChange};

static USING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?:(?P<global>global)(?P<gap>[ \t]+))?using[ \t]+(?P<body>[^;\r\n]+);[ \t]*$",
    )
    .expect("using pattern is valid")
});

const GLOBAL_QUALIFIER: &str = "global::";

/// Rewrites every `using` directive of `text` against `changes`.
///
/// No-change records are ignored. A line is only reassembled when its body
/// actually changes; every other byte of the file is returned untouched, and
/// a file with nothing to rewrite comes back borrowed.
#[must_use]
pub fn rewrite_imports<'a>(text: &'a str, changes: &[NamespaceChange]) -> Cow<'a, str> {
    let changes: Vec<&NamespaceChange> = changes.iter().filter(|c| !c.is_no_change()).collect();
    if changes.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut rewritten: Option<String> = None;
    let mut copied_up_to = 0;

    for line in lines(text) {
        let Some(replacement) = rewrite_line(line.content, &changes) else {
            continue;
        };
        let out = rewritten.get_or_insert_with(|| String::with_capacity(text.len()));
        out.push_str(&text[copied_up_to..line.start]);
        out.push_str(&replacement);
        copied_up_to = line.start + line.content.len();
    }

    match rewritten {
        Some(mut out) => {
            out.push_str(&text[copied_up_to..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(text),
    }
}

/// Rewritten line content, or `None` when the line is not a directive or
/// its body does not change.
fn rewrite_line(content: &str, changes: &[&NamespaceChange]) -> Option<String> {
    let captures = USING.captures(content)?;
    let body = captures.name("body")?.as_str().trim();
    let updated = rewrite_body(body, changes)?;

    let indent = captures.name("indent").map_or("", |m| m.as_str());
    let global = match (captures.name("global"), captures.name("gap")) {
        (Some(keyword), Some(gap)) => format!("{}{}", keyword.as_str(), gap.as_str()),
        _ => String::new(),
    };
    Some(format!("{indent}{global}using {updated};"))
}

/// New body for a directive, or `None` when nothing matches.
fn rewrite_body(body: &str, changes: &[&NamespaceChange]) -> Option<String> {
    if is_static_import(body) {
        return None;
    }

    if let Some((left, right)) = body.split_once('=') {
        let left = left.trim_end();
        let original = right.trim_start();
        let mut right = original.to_string();
        for change in changes {
            if let Some(replaced) =
                replace_namespace_prefix(&right, &change.old_namespace, &change.target_namespace)
            {
                right = replaced;
            }
        }
        return (right != original).then(|| format!("{left} = {right}"));
    }

    changes.iter().find_map(|change| {
        if body == change.old_namespace {
            Some(change.target_namespace.clone())
        } else {
            body.strip_prefix(GLOBAL_QUALIFIER)
                .filter(|rest| *rest == change.old_namespace)
                .map(|_| format!("{GLOBAL_QUALIFIER}{}", change.target_namespace))
        }
    })
}

fn is_static_import(body: &str) -> bool {
    body.strip_prefix("static").is_some_and(|rest| rest.starts_with([' ', '\t']))
}

/// Replaces `old` in `rhs` when `rhs` is `old` or starts with `old.`,
/// optionally behind a `global::` qualifier. `Old.NsExtra` does not match
/// `Old.Ns`.
fn replace_namespace_prefix(rhs: &str, old: &str, target: &str) -> Option<String> {
    let (qualifier, name) = match rhs.strip_prefix(GLOBAL_QUALIFIER) {
        Some(rest) => (GLOBAL_QUALIFIER, rest),
        None => ("", rhs),
    };

    if name == old {
        return Some(format!("{qualifier}{target}"));
    }
    let rest = name.strip_prefix(old)?;
    rest.starts_with('.').then(|| format!("{qualifier}{target}{rest}"))
}
