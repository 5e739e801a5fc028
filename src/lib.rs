//! # bookclean
//!
//! Turns book web pages into clean plain text for republishing.
//!
//! The pipeline repairs mis-decoded text, strips site chrome, picks the
//! container holding the book body, classifies its blocks (headings,
//! paragraphs, lists, preformatted text, quotes, poetry, section breaks),
//! assembles them with a predictable blank-line policy and detects the
//! book's title, author, translator and chapter headings. A crawler follows
//! a Wikisource index page through its volumes and chapters.
//!
//! ## Quick Start
//!
//! ```rust
//! use bookclean::{clean_html, Outcome};
//!
//! let html = r#"<html><body><div class="poetry">Line one<br>Line two<br><br>Line three</div></body></html>"#;
//!
//! if let Outcome::Content(page) = clean_html(html) {
//!     assert_eq!(page.text.as_str(), "Line one\nLine two\n\nLine three\n");
//! }
//! ```
//!
//! ## Crawling Wikisource
//!
//! ```rust,no_run
//! use bookclean::{CancelToken, Cleaner, CrawlOptions, Crawler, HttpFetcher, Outcome};
//!
//! let fetcher = HttpFetcher::new()?;
//! let cleaner = Cleaner::default();
//! let crawler = Crawler::new(&fetcher, &cleaner, CrawlOptions::default());
//! let outcome = crawler.crawl(
//!     "https://es.wikisource.org/wiki/Don_Quijote",
//!     &mut |p| eprintln!("{:>3}% {}", p.percent, p.message),
//!     &CancelToken::new(),
//! )?;
//! if let Outcome::Content(work) = outcome {
//!     println!("{}", work.text);
//! }
//! # Ok::<(), bookclean::Error>(())
//! ```
//!
//! ## Features
//!
//! - `http` (default): [`HttpFetcher`], a blocking `reqwest` client.
//! - `cli` (default): the `bookclean` command-line binary.

mod assemble;
mod error;
mod extract;
mod options;
mod patterns;
mod result;
mod structure;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character decoding and mojibake repair.
pub mod encoding;

/// Block classification, normalization and the line-filter strategy.
pub mod extractor;

/// Content container selection and boilerplate removal.
pub mod selector;

/// URL validation and wiki URL helpers.
pub mod url_utils;

/// The fetch capability and the HTTP fetcher.
pub mod fetch;

/// Progress notifications and cancellation.
pub mod progress;

/// Wikisource chapter crawler.
pub mod crawler;

/// Text, HTML and Markdown export.
pub mod export;

/// Text statistics.
pub mod stats;

// Public API - re-exports
pub use assemble::{assemble, CleanedText};
pub use crawler::{extract_chapter_links, Crawler};
pub use error::{Error, ErrorKind, Result};
pub use export::ExportFormat;
pub use extract::{clean_bytes, clean_html, Cleaner};
pub use extractor::ContentBlock;
pub use fetch::{fetch_page, Fetcher, RawPage};
pub use options::{CrawlOptions, Options, Strategy};
pub use patterns::Catalog;
pub use progress::{CancelToken, Phase, Progress};
pub use result::{Chapter, CleanedPage, Outcome, Work};
pub use stats::TextStats;
pub use structure::{detect_structure, BookStructure, ChapterMarker};
pub use url_utils::is_wikisource_url;

#[cfg(feature = "http")]
pub use crawler::crawl_wikisource;
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;

pub use encoding::{decode_bytes, repair_mojibake};
