//! Main content container selection.
//!
//! Book sites wrap the text in a handful of conventional containers. The
//! first candidate (in catalog order) holding enough visible text wins;
//! otherwise the whole scope is used.

use log::debug;

use crate::dom::{body_or_root, visible_text_len, Document, Selection};
use crate::options::Options;
use crate::patterns::Catalog;

/// Pick the book-body container of a page, searching under `<body>`.
#[must_use]
pub fn select_main_container<'a>(doc: &'a Document, options: &Options, catalog: &Catalog) -> Selection<'a> {
    select_within(&body_or_root(doc), options, catalog)
}

/// Pick the first candidate under `scope` whose visible text is longer than
/// `options.min_container_chars`, else `scope` itself.
#[must_use]
pub fn select_within<'a>(scope: &Selection<'a>, options: &Options, catalog: &Catalog) -> Selection<'a> {
    for selector in &catalog.container_selectors {
        let candidate = scope.select_single(selector);
        if !candidate.exists() {
            continue;
        }
        let chars = visible_text_len(&candidate);
        if chars > options.min_container_chars {
            debug!("content container {selector} ({chars} chars)");
            return candidate;
        }
        debug!("skipping {selector}: {chars} chars");
    }
    debug!("no content container qualified, using whole scope");
    scope.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, tag_name};

    fn long_text() -> String {
        "word ".repeat(300)
    }

    #[test]
    fn first_qualifying_candidate_wins() {
        let html = format!(
            r#"<body><div id="main">short</div><div class="chapter">{}</div><div id="chapter">{}</div></body>"#,
            long_text(),
            long_text()
        );
        let doc = parse(&html);
        let picked = select_main_container(&doc, &Options::default(), &Catalog::default());
        // div#chapter precedes div.chapter in catalog order.
        assert_eq!(picked.attr("id").map(|s| s.to_string()), Some("chapter".to_string()));
    }

    #[test]
    fn short_candidates_fall_back_to_body() {
        let doc = parse(r#"<body><div id="content">tiny</div><p>other</p></body>"#);
        let picked = select_main_container(&doc, &Options::default(), &Catalog::default());
        assert_eq!(tag_name(&picked), Some("body".to_string()));
    }

    #[test]
    fn threshold_is_configurable() {
        let doc = parse(r#"<body><div id="book">a small book</div></body>"#);
        let options = Options { min_container_chars: 5, ..Options::default() };
        let picked = select_main_container(&doc, &options, &Catalog::default());
        assert_eq!(picked.attr("id").map(|s| s.to_string()), Some("book".to_string()));
    }

    #[test]
    fn threshold_is_strict() {
        let doc = parse(r#"<body><div id="text">12345</div></body>"#);
        let options = Options { min_container_chars: 5, ..Options::default() };
        let picked = select_main_container(&doc, &options, &Catalog::default());
        assert_eq!(tag_name(&picked), Some("body".to_string()));
    }
}
