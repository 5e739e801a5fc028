//! Single-page cleaning.
//!
//! [`Cleaner`] holds the options and the vocabulary and runs the pipeline:
//! repair, parse, strip boilerplate, select the container, classify, assemble
//! and detect structure. The line-filter strategy replaces the middle steps
//! with flattening and line filtering.

use std::time::Duration;

use log::{debug, info};

use crate::assemble::{assemble, CleanedText};
use crate::dom::{self, Selection};
use crate::encoding::{decode_bytes, repair_mojibake};
use crate::error::Result;
use crate::extractor::{self, between_gutenberg_markers, filter_lines, flatten_html, ContentBlock};
use crate::fetch::{fetch_page, Fetcher};
use crate::options::{Options, Strategy};
use crate::patterns::Catalog;
use crate::progress::{Phase, Progress};
use crate::result::{CleanedPage, Outcome};
use crate::selector;
use crate::structure::detect_structure;
use crate::url_utils::parse_url;

/// Cleans book pages into plain text.
///
/// A `Cleaner` is immutable and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: Options,
    catalog: Catalog,
}

impl Cleaner {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options, catalog: Catalog::default() }
    }

    #[must_use]
    pub fn with_catalog(options: Options, catalog: Catalog) -> Self {
        Self { options, catalog }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classified blocks of a page (DOM strategy, whatever
    /// [`Options::strategy`] says).
    #[must_use]
    pub fn blocks(&self, html: &str) -> Vec<ContentBlock> {
        let html = repair_mojibake(html);
        let doc = dom::parse(&html);
        let body = dom::body_or_root(&doc);
        selector::strip_non_content(&body, &self.catalog);
        let container = selector::select_main_container(&doc, &self.options, &self.catalog);
        self.blocks_in(&container)
    }

    /// Blocks of an already selected container.
    pub(crate) fn blocks_in(&self, container: &Selection) -> Vec<ContentBlock> {
        let blocks = extractor::extract_blocks(container, &self.options, &self.catalog);
        debug!("classified {} blocks", blocks.len());
        blocks
    }

    /// Cleaned text of an HTML page, without structure detection.
    #[must_use]
    pub fn clean_html_text(&self, html: &str) -> CleanedText {
        match self.options.strategy {
            Strategy::Dom => assemble(&self.blocks(html)),
            Strategy::LineFilter => {
                let html = repair_mojibake(html);
                filter_lines(&flatten_html(&html), self.options.aggressive)
            }
        }
    }

    /// Clean an HTML page.
    ///
    /// ```rust
    /// use bookclean::{Cleaner, Outcome};
    ///
    /// let html = "<html><body><nav>Home</nav><h1>Emma, a Novel</h1><p>Emma Woodhouse,\nhandsome, clever, and rich.</p></body></html>";
    /// let Outcome::Content(page) = Cleaner::default().clean_html(html) else { panic!("empty") };
    /// assert_eq!(page.text.as_str(), "EMMA, A NOVEL\n\nEmma Woodhouse, handsome, clever, and rich.\n");
    /// assert_eq!(page.structure.title.as_deref(), Some("EMMA, A NOVEL"));
    /// ```
    #[must_use]
    pub fn clean_html(&self, html: &str) -> Outcome<CleanedPage> {
        page_outcome(self.clean_html_text(html))
    }

    /// Decode downloaded bytes and clean them as HTML.
    #[must_use]
    pub fn clean_bytes(&self, bytes: &[u8]) -> Outcome<CleanedPage> {
        self.clean_html(&decode_bytes(bytes))
    }

    /// Clean plain text (no markup): repair, trim to the Gutenberg markers if
    /// present, then filter lines.
    #[must_use]
    pub fn clean_text(&self, text: &str) -> Outcome<CleanedPage> {
        let text = repair_mojibake(text);
        let body = between_gutenberg_markers(&text).unwrap_or(&*text);
        page_outcome(filter_lines(body, self.options.aggressive))
    }

    /// Download and clean one page, reporting progress.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] for a malformed URL and the
    /// fetcher's transport error if the download fails.
    pub fn clean_url<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        url: &str,
        timeout: Duration,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<Outcome<CleanedPage>> {
        let url = parse_url(url)?.to_string();

        progress(Progress::new(10, Phase::Downloading, format!("downloading {url}")));
        let page = fetch_page(fetcher, &url, timeout)?;
        info!("downloaded {} bytes from {url}", page.bytes.len());

        progress(Progress::new(40, Phase::Extracting, "decoding and extracting content"));
        let html = page.into_text();

        progress(Progress::new(70, Phase::Cleaning, "cleaning text"));
        let text = self.clean_html_text(&html);

        progress(Progress::new(90, Phase::Analyzing, "detecting structure"));
        let outcome = page_outcome(text);

        let message = if outcome.is_empty() { "no text found" } else { "done" };
        progress(Progress::new(100, Phase::Done, message));
        Ok(outcome)
    }
}

fn page_outcome(text: CleanedText) -> Outcome<CleanedPage> {
    if text.is_empty() {
        debug!("page produced no text");
        return Outcome::Empty;
    }
    let structure = detect_structure(text.as_str());
    Outcome::Content(CleanedPage { text, structure })
}

/// Clean an HTML page with default options.
#[must_use]
pub fn clean_html(html: &str) -> Outcome<CleanedPage> {
    Cleaner::default().clean_html(html)
}

/// Decode and clean HTML bytes with default options.
#[must_use]
pub fn clean_bytes(bytes: &[u8]) -> Outcome<CleanedPage> {
    Cleaner::default().clean_bytes(bytes)
}
