//! Configuration options for cleaning and crawling.
//!
//! [`Options`] controls the per-page cleaning policy and [`CrawlOptions`]
//! controls how a multi-page work is fetched. Both are plain structs with
//! public fields; start from `Default::default()` and override what you need.

use std::time::Duration;

/// Which cleaning strategy turns a page into [`CleanedText`](crate::CleanedText).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Classify DOM blocks and apply per-block whitespace policy.
    #[default]
    Dom,
    /// Flatten the page to text first, then drop debris line by line.
    LineFilter,
}

/// Options for cleaning a single page.
///
/// # Example
///
/// ```rust
/// use bookclean::Options;
///
/// let options = Options {
///     detect_poetry: false,
///     aggressive: true,
///     ..Options::default()
/// };
/// assert!(options.keep_line_breaks);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Honor `<br>` inside paragraphs by keeping the paragraph line-oriented.
    ///
    /// Default: `true`
    pub keep_line_breaks: bool,

    /// Keep `<pre>` blocks line-oriented. When off they are treated as
    /// ordinary paragraphs.
    ///
    /// Default: `true`
    pub preserve_preformatted: bool,

    /// Recognize poetry blocks by their class attribute.
    ///
    /// Default: `true`
    pub detect_poetry: bool,

    /// Line-filter strategy only: drop any short line that is not a chapter
    /// heading.
    ///
    /// Default: `false`
    pub aggressive: bool,

    /// Cleaning strategy for HTML input.
    ///
    /// Default: [`Strategy::Dom`]
    pub strategy: Strategy,

    /// Visible characters a candidate container needs before it is trusted as
    /// the book body.
    ///
    /// Default: `1000`
    pub min_container_chars: usize,

    /// Headings up to this many characters are uppercased.
    ///
    /// Default: `80`
    pub heading_upper_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keep_line_breaks: true,
            preserve_preformatted: true,
            detect_poetry: true,
            aggressive: false,
            strategy: Strategy::Dom,
            min_container_chars: 1000,
            heading_upper_limit: 80,
        }
    }
}

/// Options for a multi-page crawl.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Timeout for each individual page request.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Attempts per page before the page counts as failed.
    ///
    /// Default: `3`
    pub max_attempts: u32,

    /// Pause between two attempts at the same page.
    ///
    /// Default: 1 second
    pub retry_delay: Duration,

    /// A first-level page linking to at least this many article pages is a
    /// volume and is expanded into its sub-pages.
    ///
    /// Default: `4`
    pub volume_link_threshold: usize,

    /// Chapter pages fetched at once once the chapter list is known.
    /// `1` keeps the crawl strictly sequential.
    ///
    /// Default: `1`
    pub concurrency: usize,

    /// Log and omit chapters that exhaust their attempts instead of aborting.
    ///
    /// Default: `false`
    pub skip_failed_chapters: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            volume_link_threshold: 4,
            concurrency: 1,
            skip_failed_chapters: false,
        }
    }
}
