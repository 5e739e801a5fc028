//! Result types for cleaning and crawling output.

use serde::Serialize;

use crate::assemble::CleanedText;
use crate::structure::BookStructure;

/// Outcome of an operation that can legitimately find nothing.
///
/// An empty page or an index without chapter links is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Content(T),
    Empty,
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The content, if any.
    #[must_use]
    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(value) => Some(value),
            Self::Empty => None,
        }
    }

    #[must_use]
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Content(value) => Outcome::Content(value),
            Self::Empty => Outcome::Empty,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Content(value) => Outcome::Content(f(value)),
            Self::Empty => Outcome::Empty,
        }
    }
}

/// Cleaned text of one page with its detected structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedPage {
    pub text: CleanedText,
    pub structure: BookStructure,
}

/// One crawled chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub source_url: String,
    pub body: CleanedText,
}

/// A whole crawled work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Work {
    /// The index page the crawl started from.
    pub index_url: String,
    /// Chapters in discovery order.
    pub chapters: Vec<Chapter>,
    /// Every chapter behind its banner, as one cleaned document.
    pub text: CleanedText,
    pub structure: BookStructure,
}
