//! Line-filter extraction
//!
//! A lighter strategy than the block walker: flatten the page to lines
//! (trimming to the Project Gutenberg markers when present), then drop
//! decorative and numeric debris line by line.

use crate::assemble::CleanedText;
use crate::dom::{self, body_or_root, document_root, Document};
use crate::patterns::{
    is_chapter_heading, BARE_NUMBER, DECORATIVE_CHARS, GUTENBERG_END, GUTENBERG_START, SEPARATOR_LINE,
    WHITESPACE_RUN,
};

/// Elements dropped before the generic flattening.
static GENERIC_DISCARD: &str = "script, style, nav, header, footer, aside";

/// Elements whose text the generic flattening keeps.
static GENERIC_BLOCKS: &str = "h1, h2, h3, h4, p, blockquote, li";

/// Text strictly between the Project Gutenberg START and END markers.
///
/// ```rust
/// use bookclean::extractor::fallback::between_gutenberg_markers;
///
/// let text = "licence\n*** START OF THE PROJECT GUTENBERG EBOOK DRACULA ***\nBody\n*** END OF THE PROJECT GUTENBERG EBOOK DRACULA ***\nlicence";
/// assert_eq!(between_gutenberg_markers(text), Some("\nBody\n"));
/// assert_eq!(between_gutenberg_markers("no markers"), None);
/// ```
#[must_use]
pub fn between_gutenberg_markers(text: &str) -> Option<&str> {
    let start = GUTENBERG_START.find(text)?;
    let end = GUTENBERG_END.find_at(text, start.end())?;
    Some(&text[start.end()..end.start()])
}

/// Flatten an HTML page to plain lines.
///
/// Marker-delimited Gutenberg content is preferred, first in the raw markup
/// and then in the document text. Other pages keep the text of headings,
/// paragraphs, quotes and list items, headings uppercased and set apart by
/// blank lines.
#[must_use]
pub fn flatten_html(html: &str) -> String {
    if let Some(chunk) = between_gutenberg_markers(html) {
        log::debug!("found Gutenberg markers in markup");
        if chunk.contains('<') && chunk.contains('>') {
            let doc = dom::parse(chunk);
            return dom::joined_text(&body_or_root(&doc), "\n");
        }
        return chunk.to_string();
    }

    let doc = dom::parse(html);
    let full = dom::joined_text(&document_root(&doc), "\n");
    if let Some(chunk) = between_gutenberg_markers(&full) {
        log::debug!("found Gutenberg markers in document text");
        return chunk.to_string();
    }

    generic_flatten(&doc)
}

fn generic_flatten(doc: &Document) -> String {
    let root = document_root(doc);
    dom::remove_all(&root, GENERIC_DISCARD);

    let mut lines: Vec<String> = Vec::new();
    for node in root.select(GENERIC_BLOCKS).nodes() {
        let text = WHITESPACE_RUN.replace_all(&node.text(), " ").trim().to_string();
        if text.is_empty() {
            continue;
        }
        let is_heading = dom::node_tag(node).is_some_and(|t| t.starts_with('h'));
        if is_heading {
            lines.push(String::new());
            lines.push(text.to_uppercase());
        } else {
            lines.push(text);
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

/// Whether a stripped line is debris the filter drops.
#[must_use]
pub fn is_debris_line(line: &str, aggressive: bool) -> bool {
    if line.is_empty() {
        return false;
    }
    if SEPARATOR_LINE.is_match(line) || BARE_NUMBER.is_match(line) {
        return true;
    }
    let len = line.chars().count();
    if len <= 2 && line.chars().all(|c| DECORATIVE_CHARS.contains(c)) {
        return true;
    }
    aggressive && len < 10 && !is_chapter_heading(line)
}

/// Filter flattened text line by line.
///
/// Empty lines are kept so paragraph gaps survive; the final cleanup then
/// limits them to one in a row.
///
/// ```rust
/// use bookclean::extractor::fallback::filter_lines;
///
/// let text = filter_lines("It began.\n*** *** ***\n12\nIt ended.", false);
/// assert_eq!(text.as_str(), "It began.\nIt ended.\n");
/// ```
#[must_use]
pub fn filter_lines(text: &str, aggressive: bool) -> CleanedText {
    let kept: Vec<String> = text
        .lines()
        .map(|line| line.replace('\u{a0}', " ").trim().to_string())
        .filter(|line| !is_debris_line(line, aggressive))
        .collect();
    CleanedText::finish(&kept.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_in_markup_are_parsed() {
        let html = "<html><body><p>licence</p>\
            <p>*** START OF THE PROJECT GUTENBERG EBOOK X ***</p>\
            <h2>CHAPTER I</h2><p>Body text.</p>\
            <p>*** END OF THE PROJECT GUTENBERG EBOOK X ***</p><p>more licence</p></body></html>";
        let flat = flatten_html(html);
        assert!(flat.contains("CHAPTER I"));
        assert!(flat.contains("Body text."));
        assert!(!flat.contains("licence"));
    }

    #[test]
    fn pages_without_markers_use_generic_flattening() {
        let html = "<html><body><nav><p>Menu</p></nav><h2>Intro</h2><p>One  two</p><ul><li>Item</li></ul></body></html>";
        assert_eq!(flatten_html(html), "INTRO\n\nOne two\n\nItem");
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let text = "*** END OF THE PROJECT GUTENBERG EBOOK X ***\n*** START OF THE PROJECT GUTENBERG EBOOK X ***\nbody";
        assert_eq!(between_gutenberg_markers(text), None);
    }

    #[test]
    fn debris_rules() {
        assert!(is_debris_line("*** *** ***", false));
        assert!(is_debris_line("42", false));
        assert!(is_debris_line("*", false));
        assert!(is_debris_line("•", false));
        assert!(!is_debris_line("I", false));
        assert!(!is_debris_line("", false));
    }

    #[test]
    fn aggressive_drops_short_lines_but_not_chapters() {
        assert!(is_debris_line("Fin.", true));
        assert!(!is_debris_line("Fin.", false));
        assert!(!is_debris_line("PART II", true));
        assert!(!is_debris_line("A longer line of prose.", true));
    }

    #[test]
    fn filter_keeps_paragraph_gaps() {
        let text = filter_lines("\n\nOne.\n\n\n\nTwo.\n  -  \n", false);
        assert_eq!(text.as_str(), "One.\n\nTwo.\n");
    }
}
