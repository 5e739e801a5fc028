//! Selector infrastructure
//!
//! Content container selection, boilerplate removal and small predicate
//! rules for finding elements such as a page's title heading.

use dom_query::Selection;

pub mod content;
pub mod discard;

pub use content::{select_main_container, select_within};
pub use discard::{strip_non_content, strip_wiki_chrome};

use crate::dom;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for first element matching the rule
///
/// Iterates through all descendants in document order and returns the first
/// element for which the rule returns true.
///
/// # Example
///
/// ```rust
/// use bookclean::{dom, selector};
///
/// let doc = dom::parse(r#"<div><h3></h3><h2>Chapter I</h2></div>"#);
/// let root = doc.select("div");
///
/// let heading = selector::query(&root, selector::is_titled_heading);
/// assert_eq!(heading.map(|h| h.text().to_string()), Some("Chapter I".to_string()));
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}

/// An `h1`..`h6` with visible text.
#[must_use]
pub fn is_titled_heading(sel: &Selection) -> bool {
    dom::tag_name(sel).is_some_and(|t| matches!(t.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
        && !sel.text().trim().is_empty()
}

/// An `h1` with visible text.
#[must_use]
pub fn is_titled_h1(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("h1") && !sel.text().trim().is_empty()
}
