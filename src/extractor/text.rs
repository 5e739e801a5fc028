//! Raw text collection from element subtrees.
//!
//! Collectors only decide where spaces and newlines go. Entity decoding,
//! repair and whitespace normalization happen afterwards in
//! [`super::normalize`].

use crate::dom::{node_tag, NodeRef};
use crate::extractor::tags::{is_line_boundary_tag, is_list_tag};
use crate::patterns::WHITESPACE_RUN;

/// How source newlines inside text nodes are treated by [`line_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Text is taken exactly as written (`<pre>`).
    Verbatim,
    /// Lines come from `<br>` and block boundaries only; source newlines are
    /// incidental and collapse to spaces.
    Structured,
    /// Source newlines are the line structure.
    Source,
}

impl LineMode {
    /// `Structured` when the element has explicit line structure, else
    /// `Source`.
    #[must_use]
    pub fn for_node(node: &NodeRef) -> Self {
        let structured = node
            .descendants()
            .iter()
            .filter_map(node_tag)
            .any(|t| t == "br" || is_line_boundary_tag(&t));
        if structured {
            Self::Structured
        } else {
            Self::Source
        }
    }
}

/// Inline text of an element: text nodes concatenated as written, `<br>` and
/// nested block boundaries becoming spaces. Nested lists are skipped when
/// `skip_lists` is set.
#[must_use]
pub fn inline_text(node: &NodeRef, skip_lists: bool) -> String {
    let mut out = String::new();
    push_inline(node, skip_lists, &mut out);
    out
}

fn push_inline(node: &NodeRef, skip_lists: bool, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
            continue;
        }
        let Some(tag) = node_tag(&child) else {
            continue;
        };
        match tag.as_str() {
            "br" => out.push(' '),
            "script" | "style" => {}
            t if skip_lists && is_list_tag(t) => {}
            t if is_line_boundary_tag(t) => {
                out.push(' ');
                push_inline(&child, skip_lists, out);
                out.push(' ');
            }
            _ => push_inline(&child, skip_lists, out),
        }
    }
}

/// Line-oriented text of an element: `<br>` ends a line and nested block
/// elements sit on their own lines.
#[must_use]
pub fn line_text(node: &NodeRef, mode: LineMode) -> String {
    let mut out = String::new();
    push_lines(node, mode, &mut out);
    out
}

fn push_lines(node: &NodeRef, mode: LineMode, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            let text = child.text();
            if mode == LineMode::Structured {
                out.push_str(&WHITESPACE_RUN.replace_all(&text, " "));
            } else {
                out.push_str(&text);
            }
            continue;
        }
        let Some(tag) = node_tag(&child) else {
            continue;
        };
        match tag.as_str() {
            "br" => out.push('\n'),
            "script" | "style" => {}
            "pre" => {
                out.push('\n');
                push_lines(&child, LineMode::Verbatim, out);
                out.push('\n');
            }
            t if is_line_boundary_tag(t) => {
                out.push('\n');
                push_lines(&child, mode, out);
                out.push('\n');
            }
            _ => push_lines(&child, mode, out),
        }
    }
}
