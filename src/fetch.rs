//! Fetching pages.
//!
//! The pipeline only needs "bytes for a URL within a timeout", expressed as
//! the [`Fetcher`] trait. [`HttpFetcher`] (feature `http`) implements it
//! with a blocking `reqwest` client; tests plug in in-memory fetchers.

use std::time::Duration;

use crate::encoding::decode_bytes;
use crate::error::Result;

#[cfg(feature = "http")]
use crate::error::Error;

/// User-Agent sent by [`HttpFetcher`].
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; bookclean/",
    env!("CARGO_PKG_VERSION"),
    "; +https://crates.io/crates/bookclean)"
);

/// Something that can download a URL.
///
/// Implementations must be shareable across threads so a crawl can fetch
/// chapters concurrently.
pub trait Fetcher: Sync {
    /// Download `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a transport-kind error ([`crate::Error::Transport`],
    /// [`crate::Error::Status`] or [`crate::Error::Timeout`]) carrying `url`.
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// Raw bytes of a downloaded page, consumed right after download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub url: String,
    pub bytes: Vec<u8>,
}

impl RawPage {
    /// Decode the bytes to text (never fails).
    #[must_use]
    pub fn into_text(self) -> String {
        decode_bytes(&self.bytes)
    }
}

/// Download one page.
///
/// # Errors
///
/// Propagates the fetcher's transport error for `url`.
pub fn fetch_page<F: Fetcher + ?Sized>(fetcher: &F, url: &str, timeout: Duration) -> Result<RawPage> {
    log::debug!("fetching {url}");
    let bytes = fetcher.fetch(url, timeout)?;
    Ok(RawPage { url: url.to_string(), bytes })
}

/// Blocking HTTP fetcher.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Client with the crate's [`USER_AGENT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        Self::with_user_agent(USER_AGENT)
    }

    /// Client with a custom `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the TLS backend cannot be initialised.
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Transport { url: String::new(), message: e.to_string() })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url: url.to_string(), status: status.as_u16() });
        }

        let bytes = response.bytes().map_err(|e| transport_error(url, &e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(feature = "http")]
fn transport_error(url: &str, err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout { url: url.to_string() }
    } else {
        Error::Transport { url: url.to_string(), message: err.to_string() }
    }
}
