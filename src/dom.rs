//! DOM operations adapter
//!
//! Thin helpers over the `dom_query` crate so the rest of the crate talks about
//! tags, classes and children rather than parser internals.

pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML into a document. Malformed markup is recovered by the parser.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The whole document as a selection (used when there is no `<body>`).
#[must_use]
pub fn document_root(doc: &Document) -> Selection<'_> {
    Selection::from(doc.root())
}

/// `<body>` if present, else the whole document.
#[must_use]
pub fn body_or_root(doc: &Document) -> Selection<'_> {
    let body = doc.select_single("body");
    if body.exists() {
        body
    } else {
        document_root(doc)
    }
}

// === Attribute Operations ===

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Class attribute of a node, empty when missing.
#[must_use]
pub fn node_class(node: &NodeRef) -> String {
    node.attr("class").map(|s| s.to_string()).unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Lowercase tag name of an element node; `None` for text and other nodes.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

// === Tree Navigation ===

/// Direct element children, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Whether any direct element child has one of `tags`.
#[must_use]
pub fn has_direct_child(node: &NodeRef, tags: &[&str]) -> bool {
    element_children(node)
        .iter()
        .filter_map(node_tag)
        .any(|t| tags.contains(&t.as_str()))
}

/// Whether any descendant element has one of `tags`.
#[must_use]
pub fn has_descendant(node: &NodeRef, tags: &[&str]) -> bool {
    node.descendants()
        .iter()
        .filter_map(node_tag)
        .any(|t| tags.contains(&t.as_str()))
}

// === Text Content ===

/// All text content of the selection and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Length in characters of the visible text, each text node trimmed first.
#[must_use]
pub fn visible_text_len(sel: &Selection) -> usize {
    sel.nodes()
        .iter()
        .flat_map(NodeRef::descendants)
        .filter(NodeRef::is_text)
        .map(|n| n.text().trim().chars().count())
        .sum()
}

/// Text nodes joined with `separator`, skipping script and style content.
#[must_use]
pub fn joined_text(sel: &Selection, separator: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in sel.nodes().iter().flat_map(NodeRef::descendants) {
        if !node.is_text() {
            continue;
        }
        let in_code = node
            .parent()
            .and_then(|p| node_tag(&p))
            .is_some_and(|t| t == "script" || t == "style");
        if !in_code {
            parts.push(node.text().to_string());
        }
    }
    parts.join(separator)
}

// === Tree Manipulation ===

/// Remove every element under `root` matching a selector group.
///
/// The removal is permanent for the current parse.
pub fn remove_all(root: &Selection, selector_group: &str) {
    if selector_group.trim().is_empty() {
        return;
    }
    root.select(selector_group).remove();
}
