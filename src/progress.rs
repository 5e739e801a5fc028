//! Progress reporting and cancellation for long-running operations.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Stage of a single-page clean or a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Downloading,
    Extracting,
    Cleaning,
    Analyzing,
    /// Reading the index page of a work.
    Indexing,
    /// Fetching first-level links to find volumes.
    Expanding,
    /// Fetching chapter pages.
    Fetching,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::Cleaning => "cleaning",
            Self::Analyzing => "analyzing",
            Self::Indexing => "indexing",
            Self::Expanding => "expanding",
            Self::Fetching => "fetching",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// A progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 0-100, never decreasing within one operation.
    pub percent: u8,
    pub phase: Phase,
    pub message: String,
}

impl Progress {
    #[must_use]
    pub fn new(percent: u8, phase: Phase, message: impl Into<String>) -> Self {
        Self { percent: percent.min(100), phase, message: message.into() }
    }
}

/// Percent for step `done` of `total` within the band `start..=end`.
pub(crate) fn scaled(start: u8, end: u8, done: usize, total: usize) -> u8 {
    if total == 0 {
        return end;
    }
    let span = usize::from(end.saturating_sub(start));
    let step = span * done.min(total) / total;
    start.saturating_add(u8::try_from(step).unwrap_or(u8::MAX))
}

/// Shared flag a caller sets to abort a crawl between page fetches.
///
/// ```rust
/// use bookclean::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Error::Cancelled)` once cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if [`cancel`](Self::cancel) was called.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_stays_in_band() {
        assert_eq!(scaled(40, 100, 0, 10), 40);
        assert_eq!(scaled(40, 100, 5, 10), 70);
        assert_eq!(scaled(40, 100, 10, 10), 100);
        assert_eq!(scaled(40, 100, 12, 10), 100);
        assert_eq!(scaled(5, 40, 0, 0), 40);
    }

    #[test]
    fn progress_percent_is_clamped() {
        assert_eq!(Progress::new(150, Phase::Done, "done").percent, 100);
        assert_eq!(Phase::Fetching.to_string(), "fetching");
    }

    #[test]
    fn fresh_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }
}
