//! Tag catalogs used by block classification.
//!
//! Arrays are kept for iteration and documentation; the helper functions are
//! what the classifier calls.

/// Heading tags, h1 first. `h6` is read as an ordinary paragraph.
pub static HEADING_TAGS: [&str; 5] = ["h1", "h2", "h3", "h4", "h5"];

/// List tags whose direct `li` children become list items.
pub static LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// A `div` with one of these as a direct child only wraps other blocks.
pub static CONTAINER_CHILD_TAGS: [&str; 10] = [
    "p", "h1", "h2", "h3", "h4", "h5", "pre", "ul", "ol", "blockquote",
];

/// Children a wrapper `div` hands to the walker instead of reading inline.
pub static STRUCTURAL_TAGS: [&str; 12] = [
    "p", "h1", "h2", "h3", "h4", "h5", "pre", "ul", "ol", "blockquote", "hr", "div",
];

/// Elements that start a new line inside a line-oriented block.
pub static LINE_BOUNDARY_TAGS: [&str; 24] = [
    "p", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "ul", "ol", "dl", "dt", "dd", "tr", "table", "section", "article", "hr",
    "center", "address", "figcaption",
];

/// Heading level for `h1`..`h5`.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        _ => None,
    }
}

#[inline]
#[must_use]
pub fn is_list_tag(tag: &str) -> bool {
    LIST_TAGS.contains(&tag)
}

#[inline]
#[must_use]
pub fn is_line_boundary_tag(tag: &str) -> bool {
    LINE_BOUNDARY_TAGS.contains(&tag)
}
