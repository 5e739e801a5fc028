//! Whitespace policies applied to raw block text.
//!
//! Both policies unescape leftover HTML entities and repair mojibake before
//! touching whitespace.

use std::borrow::Cow;

use crate::encoding::repair_mojibake;
use crate::patterns::{HORIZONTAL_SPACE, WHITESPACE_RUN};

fn decode_and_repair(raw: &str) -> String {
    let unescaped: Cow<'_, str> = html_escape::decode_html_entities(raw);
    let repaired = repair_mojibake(&unescaped);
    repaired.replace('\u{a0}', " ")
}

/// Inline policy: every whitespace run, newlines included, becomes one space.
///
/// ```rust
/// use bookclean::extractor::normalize::collapse_inline;
///
/// assert_eq!(collapse_inline("  The quick brown\n  fox&nbsp;jumps. "), "The quick brown fox jumps.");
/// ```
#[must_use]
pub fn collapse_inline(raw: &str) -> String {
    let text = decode_and_repair(raw);
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Line-oriented policy.
///
/// Line endings are unified, horizontal whitespace collapses within each
/// line, lines are stripped, empty lines at either end are dropped and runs
/// of empty lines shrink to one.
#[must_use]
pub fn normalize_lines(raw: &str) -> Vec<String> {
    let text = decode_and_repair(raw).replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let line = HORIZONTAL_SPACE.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() && lines.last().is_none_or(String::is_empty) {
            continue;
        }
        lines.push(line.to_string());
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
