//! Compiled regex patterns and the fixed vocabulary used by the pipeline.
//!
//! Regexes are compiled once at first use with `LazyLock`. Word lists and
//! selector lists live in [`Catalog`], an immutable value built once and
//! handed to the components that need it.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Encoding
// =============================================================================

/// Tell-tale sequences of UTF-8 text that was decoded as Latin-1/CP1252.
pub static MOJIBAKE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ÃÂ]|â€|\\x[0-9a-fA-F]{2}").expect("MOJIBAKE_HINT regex")
});

// =============================================================================
// Structure
// =============================================================================

/// A chapter heading: keyword followed by a Roman or Arabic number.
pub static CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:CHAPTER|CAPÍTULO|CAP\.|PARTE|PART)\s+(?:[IVXLCDM]+|\d+)")
        .expect("CHAPTER_HEADING regex")
});

// =============================================================================
// Line filter
// =============================================================================

/// Decorative separator lines such as `* * *`, `*     *     *     *     *`,
/// `-----` or `•••`.
pub static SEPARATOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:\*\s*){3,}|[-_=]{3,}|(?:[•·–—]\s*){3,})\s*$")
        .expect("SEPARATOR_LINE regex")
});

/// A line holding nothing but an integer (page numbers).
pub static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\s*$").expect("BARE_NUMBER regex")
});

/// Characters a 1-2 character debris line may consist of.
pub const DECORATIVE_CHARS: &str = "*-_=·•";

pub static GUTENBERG_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\*\s*START OF (?:THE )?PROJECT GUTENBERG EBOOK.*?\*\*\*")
        .expect("GUTENBERG_START regex")
});

pub static GUTENBERG_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\*\s*END OF (?:THE )?PROJECT GUTENBERG EBOOK.*?\*\*\*")
        .expect("GUTENBERG_END regex")
});

// =============================================================================
// Whitespace
// =============================================================================

/// Any whitespace run, newlines included.
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUN regex")
});

/// Horizontal whitespace run (spaces, tabs, form feeds, vertical tabs).
pub static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\x0B\x0C]+").expect("HORIZONTAL_SPACE regex")
});

/// Three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex")
});

/// Whether a trimmed line opens a chapter.
#[must_use]
pub fn is_chapter_heading(line: &str) -> bool {
    CHAPTER_HEADING.is_match(line.trim())
}

// =============================================================================
// Vocabulary
// =============================================================================

const CONTAINER_SELECTORS: &[&str] = &[
    "div#body", "div#main", "div#content", "div#pg-body",
    "div#book", "div.book", "div#text", "div.text",
    "div#chapter", "div.chapter",
];

const BOILERPLATE_SELECTORS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer",
    "img", "svg", "figure", "picture",
    "#pg-header", "#pg-footer", "#pg-machine-header",
];

const POETRY_HINTS: &[&str] = &["poetry", "verse", "stanza", "poem"];

const EXCLUDED_NAMESPACES: &[&str] = &[
    "special", "help", "file", "category", "talk", "template", "portal",
    "especial", "ayuda", "archivo", "categoría", "discusión", "plantilla",
];

const WIKI_CHROME_SELECTORS: &[&str] = &[
    ".mw-editsection", ".toc", "#toc", ".navbox", ".vertical-navbox", ".metadata",
    ".sistersitebox", ".authority-control", ".mw-references-wrap", ".reflist",
    ".reference", ".catlinks", "#catlinks", ".printfooter", ".noprint", ".ws-noexport",
    ".hatnote", ".thumb", ".gallery", ".ambox",
];

const NOISE_PHRASES: &[&str] = &["retrieved from", "public domain", "categories"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Fixed vocabulary consulted by the selector, classifier, link filter and
/// noise filter.
///
/// ```rust
/// use bookclean::Catalog;
///
/// let mut catalog = Catalog::default();
/// catalog.excluded_namespaces.push("author".to_string());
/// assert!(catalog.is_excluded_namespace("Author"));
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Candidate book-body containers, highest priority first.
    pub container_selectors: Vec<String>,
    /// Elements removed from every parse before container selection.
    pub boilerplate_selectors: Vec<String>,
    /// Class substrings that mark a block as poetry.
    pub poetry_hints: Vec<String>,
    /// Path prefix of wiki article links.
    pub article_prefix: String,
    /// Lowercase title namespaces never followed by the crawler.
    pub excluded_namespaces: Vec<String>,
    /// Wiki interface chrome removed from chapter pages.
    pub wiki_chrome_selectors: Vec<String>,
    /// Lowercase phrases whose lines are dropped from crawled chapters.
    pub noise_phrases: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            container_selectors: owned(CONTAINER_SELECTORS),
            boilerplate_selectors: owned(BOILERPLATE_SELECTORS),
            poetry_hints: owned(POETRY_HINTS),
            article_prefix: "/wiki/".to_string(),
            excluded_namespaces: owned(EXCLUDED_NAMESPACES),
            wiki_chrome_selectors: owned(WIKI_CHROME_SELECTORS),
            noise_phrases: owned(NOISE_PHRASES),
        }
    }
}

impl Catalog {
    /// Whether a class attribute value carries a poetry hint.
    #[must_use]
    pub fn has_poetry_hint(&self, class_attr: &str) -> bool {
        let class_attr = class_attr.to_lowercase();
        self.poetry_hints.iter().any(|hint| class_attr.contains(hint.as_str()))
    }

    #[must_use]
    pub fn is_excluded_namespace(&self, namespace: &str) -> bool {
        let namespace = namespace.trim().to_lowercase();
        self.excluded_namespaces.iter().any(|ns| *ns == namespace)
    }

    /// Whether a cleaned output line is wiki noise.
    #[must_use]
    pub fn is_noise_line(&self, line: &str) -> bool {
        let line = line.trim().to_lowercase();
        self.noise_phrases.iter().any(|phrase| line.contains(phrase.as_str()))
    }

    /// Boilerplate selectors as one selector group.
    #[must_use]
    pub fn boilerplate_group(&self) -> String {
        self.boilerplate_selectors.join(", ")
    }

    #[must_use]
    pub fn wiki_chrome_group(&self) -> String {
        self.wiki_chrome_selectors.join(", ")
    }
}
