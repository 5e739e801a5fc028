//! Chapter link discovery on wiki index pages.

use std::collections::HashSet;

use log::debug;
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::patterns::Catalog;
use crate::url_utils::{article_title, namespace, strip_fragment};

/// Containers holding the article body, most specific first.
const LINK_ROOTS: [&str; 2] = ["#mw-content-text", "div#content"];

/// Article links of an index page, in document order and without duplicates.
///
/// Links are resolved against `base_url` and kept only when they stay on the
/// same host, point under the article prefix, are not in an excluded
/// namespace and do not point back at the page itself. Fragments are
/// dropped. An unparseable base URL yields no links.
///
/// ```rust
/// use bookclean::{crawler::extract_chapter_links, Catalog};
///
/// let html = r#"<div id="mw-content-text">
///     <a href="/wiki/Book/Chapter_1#start">One</a>
///     <a href="/wiki/Category:Novels">Novels</a>
///     <a href="https://other.org/wiki/X">Elsewhere</a>
/// </div>"#;
/// let links = extract_chapter_links(html, "https://en.wikisource.org/wiki/Book", &Catalog::default());
/// assert_eq!(links, vec!["https://en.wikisource.org/wiki/Book/Chapter_1"]);
/// ```
#[must_use]
pub fn extract_chapter_links(html: &str, base_url: &str, catalog: &Catalog) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        debug!("cannot resolve links against {base_url}");
        return Vec::new();
    };
    let doc = dom::parse(html);
    links_in(&doc, &base, catalog)
}

pub(crate) fn links_in(doc: &Document, base: &Url, catalog: &Catalog) -> Vec<String> {
    let root = link_root(doc);
    let self_url = strip_fragment(base.as_str());

    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();
    for node in root.select("a[href]").nodes() {
        let Some(href) = node.attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        resolved.set_fragment(None);

        if resolved.host_str() != base.host_str() {
            continue;
        }
        let Some(title) = article_title(&resolved, &catalog.article_prefix) else {
            continue;
        };
        if namespace(&title).is_some_and(|ns| catalog.is_excluded_namespace(ns)) {
            debug!("skipping namespaced link {title}");
            continue;
        }

        let link = resolved.to_string();
        if link == self_url {
            continue;
        }
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }
    links
}

fn link_root(doc: &Document) -> Selection<'_> {
    for selector in LINK_ROOTS {
        let sel = doc.select_single(selector);
        if sel.exists() {
            return sel;
        }
    }
    dom::document_root(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://es.wikisource.org/wiki/Don_Quijote";

    fn links(html: &str) -> Vec<String> {
        extract_chapter_links(html, BASE, &Catalog::default())
    }

    #[test]
    fn relative_links_are_resolved_and_deduplicated() {
        let html = r#"<div id="mw-content-text">
            <a href="/wiki/Don_Quijote/Primera_parte">I</a>
            <a href="Don_Quijote/Segunda_parte">II</a>
            <a href="/wiki/Don_Quijote/Primera_parte#cap1">I again</a>
        </div>"#;
        assert_eq!(
            links(html),
            vec![
                "https://es.wikisource.org/wiki/Don_Quijote/Primera_parte",
                "https://es.wikisource.org/wiki/Don_Quijote/Segunda_parte",
            ]
        );
    }

    #[test]
    fn self_links_and_namespaces_are_excluded() {
        let html = r##"<div id="mw-content-text">
            <a href="/wiki/Don_Quijote#top">self</a>
            <a href="#notes">notes</a>
            <a href="/wiki/Categor%C3%ADa:Novelas">cat</a>
            <a href="/wiki/Special:Random">random</a>
            <a href="/w/index.php?title=Don_Quijote&action=edit">edit</a>
            <a href="/wiki/Don_Quijote/Pr%C3%B3logo">prólogo</a>
        </div>"##;
        assert_eq!(links(html), vec!["https://es.wikisource.org/wiki/Don_Quijote/Pr%C3%B3logo"]);
    }

    #[test]
    fn links_outside_content_root_are_ignored() {
        let html = r#"<div id="mw-navigation"><a href="/wiki/Portada">home</a></div>
            <div id="mw-content-text"><a href="/wiki/Don_Quijote/I">I</a></div>"#;
        assert_eq!(links(html), vec!["https://es.wikisource.org/wiki/Don_Quijote/I"]);
    }

    #[test]
    fn whole_document_used_without_content_root() {
        let html = r#"<p><a href="/wiki/Don_Quijote/I">I</a></p>"#;
        assert_eq!(links(html).len(), 1);
    }

    #[test]
    fn invalid_base_yields_nothing() {
        assert!(extract_chapter_links(r#"<a href="/wiki/X">x</a>"#, "not a url", &Catalog::default()).is_empty());
    }
}
