//! URL utility functions
//!
//! Validation of user-supplied URLs plus the wiki-specific helpers the
//! crawler needs: fragment stripping, render-mode URLs and article titles.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse an absolute http(s) URL or fail with [`Error::InvalidUrl`].
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for relative, non-http or malformed input.
pub fn parse_url(s: &str) -> Result<Url> {
    match is_absolute_url(s) {
        (true, Some(url)) => Ok(url),
        _ => Err(Error::InvalidUrl { url: s.to_string() }),
    }
}

/// The URL with any `#fragment` removed.
///
/// Unparseable input is returned with everything from `#` cut off.
#[must_use]
pub fn strip_fragment(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => url_str.split('#').next().unwrap_or_default().to_string(),
    }
}

/// The URL with `action=render` in its query, asking MediaWiki for the bare
/// article HTML. URLs that already carry it are returned unchanged.
///
/// ```rust
/// use bookclean::url_utils::ensure_render;
///
/// assert_eq!(
///     ensure_render("https://en.wikisource.org/wiki/Dracula"),
///     "https://en.wikisource.org/wiki/Dracula?action=render"
/// );
/// assert_eq!(
///     ensure_render("https://en.wikisource.org/w/index.php?title=Dracula"),
///     "https://en.wikisource.org/w/index.php?title=Dracula&action=render"
/// );
/// ```
#[must_use]
pub fn ensure_render(url_str: &str) -> String {
    let Ok(mut url) = Url::parse(url_str) else {
        return url_str.to_string();
    };
    if url.query_pairs().any(|(k, v)| k == "action" && v == "render") {
        return url_str.to_string();
    }
    url.set_fragment(None);
    url.query_pairs_mut().append_pair("action", "render");
    url.to_string()
}

/// Whether the URL points at a Wikisource host.
#[must_use]
pub fn is_wikisource_url(url_str: &str) -> bool {
    Url::parse(url_str.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| host == "wikisource.org" || host.ends_with(".wikisource.org"))
}

/// Percent-decoded article title of a wiki URL, if its path starts with
/// `prefix`.
#[must_use]
pub fn article_title(url: &Url, prefix: &str) -> Option<String> {
    let raw = url.path().strip_prefix(prefix)?;
    if raw.is_empty() {
        return None;
    }
    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Namespace of an article title (`"Category"` for `"Category:Novels"`).
#[must_use]
pub fn namespace(title: &str) -> Option<&str> {
    title.split_once(':').map(|(ns, _)| ns)
}

/// Human-readable title derived from a URL's last path segment.
///
/// ```rust
/// use bookclean::url_utils::title_from_url;
///
/// assert_eq!(
///     title_from_url("https://en.wikisource.org/wiki/Dracula/Chapter_I"),
///     "Chapter I"
/// );
/// ```
#[must_use]
pub fn title_from_url(url_str: &str) -> String {
    let path = Url::parse(url_str).map_or_else(|_| url_str.to_string(), |u| u.path().to_string());
    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    let title = decoded.replace('_', " ");
    let title = title.trim();
    if title.is_empty() {
        url_str.to_string()
    } else {
        title.to_string()
    }
}
