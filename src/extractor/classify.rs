//! Block classification and the document walker.
//!
//! The walker visits element children of the selected container in document
//! order. A classified block consumes its whole subtree; only containers and
//! transparent elements are descended into, so no text is emitted twice.

use log::trace;

use crate::dom::{element_children, has_descendant, has_direct_child, node_class, node_tag, NodeRef, Selection};
use crate::extractor::block::ContentBlock;
use crate::extractor::normalize::{collapse_inline, normalize_lines};
use crate::extractor::tags::{
    heading_level, is_line_boundary_tag, is_list_tag, CONTAINER_CHILD_TAGS, LIST_TAGS, STRUCTURAL_TAGS,
};
use crate::extractor::text::{inline_text, line_text, LineMode};
use crate::options::Options;
use crate::patterns::Catalog;

/// What an element is, decided by the first matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    /// `<hr>`.
    Rule,
    List,
    Preformatted,
    Blockquote,
    Poetry,
    Paragraph,
    /// A `div` with a block element as a direct child; it has no text of its
    /// own.
    Container,
    /// A `div` whose block elements sit deeper. Loose text between its
    /// children becomes paragraphs.
    Wrapper,
    /// Anything else; its children are visited.
    Transparent,
}

/// Classify one element.
///
/// Rules, first match wins: heading, rule, list, preformatted (when
/// preserved), blockquote, poetry (class hint, when enabled), pure container,
/// wrapper, paragraph (`p`, `h6`, any other `div`, unpreserved `pre`).
#[must_use]
pub fn classify(node: &NodeRef, options: &Options, catalog: &Catalog) -> BlockKind {
    let Some(tag) = node_tag(node) else {
        return BlockKind::Transparent;
    };
    if let Some(level) = heading_level(&tag) {
        return BlockKind::Heading(level);
    }
    match tag.as_str() {
        "hr" => return BlockKind::Rule,
        t if is_list_tag(t) => return BlockKind::List,
        "pre" if options.preserve_preformatted => return BlockKind::Preformatted,
        "blockquote" => return BlockKind::Blockquote,
        _ => {}
    }
    if options.detect_poetry && catalog.has_poetry_hint(&node_class(node)) {
        return BlockKind::Poetry;
    }
    match tag.as_str() {
        "div" if is_pure_container(node) => BlockKind::Container,
        "div" if has_descendant(node, &CONTAINER_CHILD_TAGS) => BlockKind::Wrapper,
        "p" | "div" | "pre" | "h6" => BlockKind::Paragraph,
        _ => BlockKind::Transparent,
    }
}

/// Whether a `div` has a block-level direct child.
#[must_use]
pub fn is_pure_container(node: &NodeRef) -> bool {
    has_direct_child(node, &CONTAINER_CHILD_TAGS)
}

/// Walks a container and turns it into blocks.
pub struct BlockWalker<'o> {
    options: &'o Options,
    catalog: &'o Catalog,
    blocks: Vec<ContentBlock>,
}

impl<'o> BlockWalker<'o> {
    #[must_use]
    pub fn new(options: &'o Options, catalog: &'o Catalog) -> Self {
        Self { options, catalog, blocks: Vec::new() }
    }

    /// Visit the children of every node in `root` and return the blocks.
    #[must_use]
    pub fn walk(mut self, root: &Selection) -> Vec<ContentBlock> {
        for node in root.nodes() {
            self.visit_children(node);
        }
        self.blocks
    }

    fn visit_children(&mut self, node: &NodeRef) {
        for child in element_children(node) {
            self.visit(&child);
        }
    }

    fn visit(&mut self, node: &NodeRef) {
        let kind = classify(node, self.options, self.catalog);
        trace!("{:?} -> {kind:?}", node_tag(node));
        match kind {
            BlockKind::Heading(level) => {
                let text = collapse_inline(&inline_text(node, false));
                if !text.is_empty() {
                    let text = if text.chars().count() <= self.options.heading_upper_limit {
                        text.to_uppercase()
                    } else {
                        text
                    };
                    self.blocks.push(ContentBlock::Heading(level, text));
                }
            }
            BlockKind::Rule => self.blocks.push(ContentBlock::SectionBreak),
            BlockKind::List => {
                self.push_list(node);
                for nested in nested_lists(node) {
                    self.visit(&nested);
                }
            }
            BlockKind::Preformatted => {
                self.push_lines(node, LineMode::Verbatim, ContentBlock::Preformatted);
            }
            BlockKind::Blockquote => {
                self.push_lines(node, LineMode::for_node(node), ContentBlock::Blockquote);
            }
            BlockKind::Poetry => {
                self.push_lines(node, LineMode::for_node(node), ContentBlock::Poetry);
            }
            BlockKind::Paragraph => self.push_paragraph(node),
            BlockKind::Wrapper => self.visit_wrapper(node),
            BlockKind::Container | BlockKind::Transparent => self.visit_children(node),
        }
    }

    /// Visit structural children; runs of text and inline elements between
    /// them are collected as paragraphs.
    fn visit_wrapper(&mut self, node: &NodeRef) {
        let mut loose = String::new();
        for child in node.children() {
            if child.is_text() {
                loose.push_str(&child.text());
                continue;
            }
            let Some(tag) = node_tag(&child) else {
                continue;
            };
            if STRUCTURAL_TAGS.contains(&tag.as_str()) || has_descendant(&child, &CONTAINER_CHILD_TAGS) {
                self.push_loose(&mut loose);
                self.visit(&child);
            } else if tag == "br" {
                loose.push(' ');
            } else if tag != "script" && tag != "style" {
                let boundary = if is_line_boundary_tag(&tag) { " " } else { "" };
                loose.push_str(boundary);
                loose.push_str(&inline_text(&child, false));
                loose.push_str(boundary);
            }
        }
        self.push_loose(&mut loose);
    }

    fn push_loose(&mut self, loose: &mut String) {
        let text = collapse_inline(loose);
        if !text.is_empty() {
            self.blocks.push(ContentBlock::Paragraph(text));
        }
        loose.clear();
    }

    fn push_list(&mut self, node: &NodeRef) {
        let items: Vec<String> = element_children(node)
            .iter()
            .filter(|child| node_tag(child).as_deref() == Some("li"))
            .map(|li| collapse_inline(&inline_text(li, true)))
            .filter(|item| !item.is_empty())
            .collect();
        if !items.is_empty() {
            self.blocks.push(ContentBlock::List(items));
        }
    }

    fn push_lines(&mut self, node: &NodeRef, mode: LineMode, make: fn(Vec<String>) -> ContentBlock) {
        let lines = normalize_lines(&line_text(node, mode));
        if !lines.is_empty() {
            self.blocks.push(make(lines));
        }
    }

    fn push_paragraph(&mut self, node: &NodeRef) {
        if self.options.keep_line_breaks && has_descendant(node, &["br"]) {
            let mut lines = normalize_lines(&line_text(node, LineMode::Structured));
            match lines.len() {
                0 => {}
                1 => self.blocks.push(ContentBlock::Paragraph(lines.remove(0))),
                _ => self.blocks.push(ContentBlock::Lines(lines)),
            }
            return;
        }
        let text = collapse_inline(&inline_text(node, false));
        if !text.is_empty() {
            self.blocks.push(ContentBlock::Paragraph(text));
        }
    }
}

/// Topmost lists nested inside a list's items.
fn nested_lists<'a>(list: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut found = Vec::new();
    for child in element_children(list) {
        collect_topmost(&child, &mut found);
    }
    found
}

fn collect_topmost<'a>(node: &NodeRef<'a>, found: &mut Vec<NodeRef<'a>>) {
    for child in element_children(node) {
        let is_list = node_tag(&child).is_some_and(|t| LIST_TAGS.contains(&t.as_str()));
        if is_list {
            found.push(child);
        } else {
            collect_topmost(&child, found);
        }
    }
}

/// Classify every block under `root`.
#[must_use]
pub fn extract_blocks(root: &Selection, options: &Options, catalog: &Catalog) -> Vec<ContentBlock> {
    BlockWalker::new(options, catalog).walk(root)
}
