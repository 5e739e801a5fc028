//! Error types for bookclean.
//!
//! Only transport-level problems, cancellation and local I/O are errors.
//! Decoding and repair always produce a string, malformed markup degrades to
//! whatever tree the parser recovers, and "no content" is reported through
//! [`Outcome::Empty`](crate::Outcome) rather than through this type.

/// Error type for fetch, crawl and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be completed (DNS, connect, TLS, body read).
    #[error("fetching {url} failed: {message}")]
    Transport {
        /// URL that was being fetched.
        url: String,
        /// Transport-level description of the failure.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("fetching {url} returned HTTP {status}")]
    Status {
        /// URL that was being fetched.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request did not finish within its timeout.
    #[error("fetching {url} timed out")]
    Timeout {
        /// URL that was being fetched.
        url: String,
    },

    /// A crawl chapter kept failing after every retry; the crawl was aborted.
    #[error("chapter {url} failed after {attempts} attempt(s): {source}")]
    ChapterFailed {
        /// Chapter URL that could not be fetched.
        url: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the last attempt.
        #[source]
        source: Box<Error>,
    },

    /// A URL could not be parsed as an absolute http(s) URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
    },

    /// The caller cancelled the operation between two page fetches.
    #[error("operation cancelled")]
    Cancelled,

    /// Local file I/O failed (reading input files, writing exports).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`] for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network problems of any sort, including timeouts and bad statuses.
    Transport,
    /// Bad input URL.
    InvalidInput,
    /// User abort.
    Cancelled,
    /// Local filesystem.
    Io,
}

impl Error {
    /// The offending resource, when the error is tied to one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::ChapterFailed { url, .. }
            | Self::InvalidUrl { url } => Some(url),
            Self::Cancelled | Self::Io(_) => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. }
            | Self::Status { .. }
            | Self::Timeout { .. }
            | Self::ChapterFailed { .. } => ErrorKind::Transport,
            Self::InvalidUrl { .. } => ErrorKind::InvalidInput,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for bookclean operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_failure_reports_chapter_url() {
        let err = Error::ChapterFailed {
            url: "https://en.wikisource.org/wiki/Ch_2".to_string(),
            attempts: 3,
            source: Box::new(Error::Status {
                url: "https://en.wikisource.org/wiki/Ch_2?action=render".to_string(),
                status: 503,
            }),
        };

        assert_eq!(err.url(), Some("https://en.wikisource.org/wiki/Ch_2"));
        assert_eq!(err.kind(), ErrorKind::Transport);
        let msg = err.to_string();
        assert!(msg.contains("Ch_2"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn cancelled_has_no_resource() {
        assert_eq!(Error::Cancelled.url(), None);
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
    }
}
