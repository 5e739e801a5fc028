//! Cleaning of a single wiki chapter page.

use crate::assemble::{assemble, CleanedText};
use crate::dom::{self, Document, Selection};
use crate::encoding::repair_mojibake;
use crate::extract::Cleaner;
use crate::result::Chapter;
use crate::selector::{self, is_titled_h1, is_titled_heading};
use crate::url_utils::title_from_url;

/// Divider line of a chapter banner.
pub const BANNER_DIVIDER: &str = "============================================================";

/// Containers of the rendered article body.
const CONTENT_ROOTS: [&str; 3] = [".mw-parser-output", "#mw-content-text", "div#content"];

/// Clean a chapter page. Returns `None` when no text remains.
pub(crate) fn clean_chapter(cleaner: &Cleaner, html: &str, url: &str) -> Option<Chapter> {
    let html = repair_mojibake(html);
    let doc = dom::parse(&html);
    let content = content_root(&doc);
    let title = chapter_title(&doc, &content, url);

    let catalog = cleaner.catalog();
    selector::strip_non_content(&content, catalog);
    selector::strip_wiki_chrome(&content, catalog);
    let container = selector::select_within(&content, cleaner.options(), catalog);

    let text = assemble(&cleaner.blocks_in(&container));
    let body = drop_noise_lines(&text, cleaner);
    if body.is_empty() {
        log::debug!("chapter {url} has no text");
        return None;
    }
    Some(Chapter { title, source_url: url.to_string(), body })
}

fn content_root(doc: &Document) -> Selection<'_> {
    for selector in CONTENT_ROOTS {
        let sel = doc.select_single(selector);
        if sel.exists() {
            return sel;
        }
    }
    dom::body_or_root(doc)
}

/// First `h1` of the page, else the first heading of the content, else
/// `<title>`, else a title derived from the URL.
fn chapter_title(doc: &Document, content: &Selection, url: &str) -> String {
    let from_heading = selector::query(&dom::document_root(doc), is_titled_h1)
        .or_else(|| selector::query(content, is_titled_heading))
        .map(|heading| collapse(&heading.text()));
    if let Some(title) = from_heading.filter(|t| !t.is_empty()) {
        return title;
    }

    let head_title = collapse(&doc.select_single("title").text());
    if !head_title.is_empty() {
        return head_title;
    }
    title_from_url(url)
}

/// Title of a whole work from its index page: the first `h1`, else
/// `<title>`, else a title derived from the URL. Rendered index pages carry
/// neither, so the URL usually decides.
pub(crate) fn work_title(html: &str, url: &str) -> String {
    let doc = dom::parse(&repair_mojibake(html));
    let heading = selector::query(&dom::document_root(&doc), is_titled_h1).map(|h1| collapse(&h1.text()));
    let title = heading.unwrap_or_else(|| collapse(&doc.select_single("title").text()));
    if title.is_empty() {
        title_from_url(url)
    } else {
        title
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn drop_noise_lines(text: &CleanedText, cleaner: &Cleaner) -> CleanedText {
    let catalog = cleaner.catalog();
    let kept: Vec<&str> = text.lines().filter(|line| !catalog.is_noise_line(line)).collect();
    CleanedText::finish(&kept.join("\n"))
}

/// A chapter with its banner: divider, title, source URL, divider, blank
/// line, body.
#[must_use]
pub fn banner(chapter: &Chapter) -> String {
    format!(
        "{BANNER_DIVIDER}\n{}\n{}\n{BANNER_DIVIDER}\n\n{}",
        chapter.title,
        chapter.source_url,
        chapter.body.as_str().trim_end()
    )
}
