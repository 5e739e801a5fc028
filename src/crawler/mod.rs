//! Wikisource chapter crawler.
//!
//! A crawl runs in three stages:
//!
//! - **Indexing**: fetch the index page and collect its chapter links.
//! - **Expanding**: fetch each first-level link once. A page with at least
//!   `volume_link_threshold` chapter links of its own is a volume and its
//!   links are planned instead; any other page is itself a chapter.
//! - **Fetching**: fetch and clean every planned chapter not fetched yet,
//!   then join the chapters behind banners.
//!
//! Every URL is fetched at most once per crawl and chapters keep discovery
//! order. Cancellation is checked before each page fetch. Any chapter that
//! exhausts its retry budget aborts the crawl with
//! [`Error::ChapterFailed`] unless `skip_failed_chapters` is set.

mod chapter;
mod links;

use std::collections::HashSet;
use std::thread;

use log::{debug, info, warn};

use crate::assemble::CleanedText;
use crate::error::{Error, Result};
use crate::extract::Cleaner;
use crate::fetch::{fetch_page, Fetcher};
use crate::options::CrawlOptions;
use crate::progress::{scaled, CancelToken, Phase, Progress};
use crate::result::{Chapter, Outcome, Work};
use crate::structure::detect_structure;
use crate::url_utils::{ensure_render, parse_url, strip_fragment};

pub use chapter::{banner, BANNER_DIVIDER};
pub use links::extract_chapter_links;

/// A page planned for the Fetching stage.
#[derive(Debug, Clone)]
struct Planned {
    url: String,
    /// HTML already downloaded while expanding.
    html: Option<String>,
}

/// Crawls a multi-page work starting from its index page.
pub struct Crawler<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    cleaner: &'a Cleaner,
    options: CrawlOptions,
}

impl<'a, F: Fetcher + ?Sized> Crawler<'a, F> {
    #[must_use]
    pub fn new(fetcher: &'a F, cleaner: &'a Cleaner, options: CrawlOptions) -> Self {
        Self { fetcher, cleaner, options }
    }

    /// Crawl the work at `index_url`.
    ///
    /// Returns [`Outcome::Empty`] when the index has no chapter links or no
    /// chapter has any text.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `index_url` is not an absolute http(s) URL
    /// - the transport error of the index page if it cannot be fetched
    /// - [`Error::ChapterFailed`] naming the first chapter or volume that
    ///   could not be fetched
    /// - [`Error::Cancelled`] if `cancel` was triggered
    pub fn crawl(
        &self,
        index_url: &str,
        progress: &mut dyn FnMut(Progress),
        cancel: &CancelToken,
    ) -> Result<Outcome<Work>> {
        let index_url = strip_fragment(parse_url(index_url)?.as_str());

        cancel.check()?;
        progress(Progress::new(0, Phase::Indexing, format!("reading index {index_url}")));
        let index_html = self.fetch_with_retry(&ensure_render(&index_url))?;
        let links = extract_chapter_links(&index_html, &index_url, self.cleaner.catalog());
        info!("index {index_url} lists {} links", links.len());
        if links.is_empty() {
            progress(Progress::new(100, Phase::Done, "no chapter links found"));
            return Ok(Outcome::Empty);
        }

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(index_url.clone());
        let plan = self.expand(&links, &mut visited, progress, cancel)?;
        info!("planned {} chapters", plan.len());

        let chapters = self.fetch_chapters(plan, progress, cancel)?;
        if chapters.is_empty() {
            progress(Progress::new(100, Phase::Done, "no chapter text found"));
            return Ok(Outcome::Empty);
        }

        let sections: Vec<String> = chapters.iter().map(banner).collect();
        let text = CleanedText::finish(&sections.join("\n\n"));
        let mut structure = detect_structure(text.as_str());
        structure.title = Some(chapter::work_title(&index_html, &index_url));
        info!("crawl of {index_url} produced {} chapters", chapters.len());
        progress(Progress::new(100, Phase::Done, format!("{} chapters", chapters.len())));

        Ok(Outcome::Content(Work { index_url, chapters, text, structure }))
    }

    fn expand(
        &self,
        links: &[String],
        visited: &mut HashSet<String>,
        progress: &mut dyn FnMut(Progress),
        cancel: &CancelToken,
    ) -> Result<Vec<Planned>> {
        let mut plan = Vec::new();
        for (i, link) in links.iter().enumerate() {
            if !visited.insert(link.clone()) {
                debug!("already planned {link}");
                continue;
            }
            cancel.check()?;
            progress(Progress::new(scaled(5, 40, i, links.len()), Phase::Expanding, format!("checking {link}")));

            let html = match self.fetch_chapter_html(link) {
                Ok(html) => html,
                Err(err) if self.options.skip_failed_chapters => {
                    warn!("skipping {link}: {err}");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let sublinks = extract_chapter_links(&html, link, self.cleaner.catalog());
            if sublinks.len() >= self.options.volume_link_threshold {
                info!("{link} is a volume with {} links", sublinks.len());
                for sub in sublinks {
                    if visited.insert(sub.clone()) {
                        plan.push(Planned { url: sub, html: None });
                    }
                }
            } else {
                plan.push(Planned { url: link.clone(), html: Some(html) });
            }
        }
        Ok(plan)
    }

    fn fetch_chapters(
        &self,
        plan: Vec<Planned>,
        progress: &mut dyn FnMut(Progress),
        cancel: &CancelToken,
    ) -> Result<Vec<Chapter>> {
        let total = plan.len();
        let batch_size = self.options.concurrency.max(1);
        let mut chapters = Vec::with_capacity(total);
        let mut done = 0;

        for batch in plan.chunks(batch_size) {
            cancel.check()?;
            let results = if batch.len() == 1 {
                batch.iter().map(|item| self.process(item, cancel)).collect::<Vec<_>>()
            } else {
                self.process_batch(batch, cancel)
            };

            for (item, result) in batch.iter().zip(results) {
                done += 1;
                progress(Progress::new(
                    scaled(40, 99, done, total),
                    Phase::Fetching,
                    format!("chapter {done}/{total}: {}", item.url),
                ));
                match result {
                    Ok(Some(chapter)) => chapters.push(chapter),
                    Ok(None) => {}
                    Err(Error::Cancelled) => return Err(Error::Cancelled),
                    Err(err) if self.options.skip_failed_chapters => warn!("skipping {}: {err}", item.url),
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(chapters)
    }

    /// Fetch a batch on scoped threads; results come back in batch order.
    fn process_batch(&self, batch: &[Planned], cancel: &CancelToken) -> Vec<Result<Option<Chapter>>> {
        thread::scope(|scope| {
            let handles: Vec<_> =
                batch.iter().map(|item| scope.spawn(move || self.process(item, cancel))).collect();
            handles
                .into_iter()
                .zip(batch)
                .map(|(handle, item)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(Error::Transport { url: item.url.clone(), message: "chapter worker panicked".to_string() })
                    })
                })
                .collect()
        })
    }

    fn process(&self, item: &Planned, cancel: &CancelToken) -> Result<Option<Chapter>> {
        let html = match &item.html {
            Some(html) => html.clone(),
            None => {
                cancel.check()?;
                self.fetch_chapter_html(&item.url)?
            }
        };
        Ok(chapter::clean_chapter(self.cleaner, &html, &item.url))
    }

    /// Fetch a chapter or volume page in render mode; failures name `url`.
    fn fetch_chapter_html(&self, url: &str) -> Result<String> {
        self.fetch_with_retry(&ensure_render(url)).map_err(|source| Error::ChapterFailed {
            url: url.to_string(),
            attempts: self.options.max_attempts.max(1),
            source: Box::new(source),
        })
    }

    /// Fetch and decode `url`, retrying; returns the last error.
    fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let attempts = self.options.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match fetch_page(self.fetcher, url, self.options.timeout) {
                Ok(page) => return Ok(page.into_text()),
                Err(err) if attempt >= attempts => return Err(err),
                Err(err) => {
                    warn!("attempt {attempt}/{attempts} for {url} failed: {err}");
                    if !self.options.retry_delay.is_zero() {
                        thread::sleep(self.options.retry_delay);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

/// Crawl with the default HTTP fetcher and no progress reporting.
///
/// # Errors
///
/// See [`Crawler::crawl`].
#[cfg(feature = "http")]
pub fn crawl_wikisource(cleaner: &Cleaner, index_url: &str, options: CrawlOptions) -> Result<Outcome<Work>> {
    let fetcher = crate::fetch::HttpFetcher::new()?;
    Crawler::new(&fetcher, cleaner, options).crawl(index_url, &mut |_| {}, &CancelToken::new())
}
