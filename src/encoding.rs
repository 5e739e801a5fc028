//! Character decoding of downloads and repair of mojibake.
//!
//! Decoding never fails: strict UTF-8 is tried first, then a charset declared
//! in the markup, then statistical detection, and finally lossy CP1252.
//! Repair undoes the classic "UTF-8 bytes read as Latin-1/CP1252" corruption
//! and leaves anything it cannot repair untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::Regex;

use crate::patterns::MOJIBAKE_HINT;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Which decoding step produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSource {
    /// The bytes were valid UTF-8.
    Utf8,
    /// A charset declared in a `<meta>` tag decoded the bytes cleanly.
    Declared(&'static Encoding),
    /// Statistical detection was confident and decoded the bytes cleanly.
    Detected(&'static Encoding),
    /// Lossy CP1252.
    Fallback,
}

/// Detect a charset declared in the first 1024 bytes of an HTML document.
///
/// Looks for `<meta charset="...">` first, then
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[must_use]
pub fn detect_declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    extract_charset(&head_str)
        .or_else(|| extract_content_type_charset(&head_str))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
}

fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode downloaded bytes into a string. Never fails.
///
/// # Examples
///
/// ```
/// use bookclean::encoding::decode_bytes;
///
/// assert_eq!(decode_bytes("Café".as_bytes()), "Café");
/// // Not UTF-8: falls through to a legacy single-byte decoding.
/// assert!(decode_bytes(b"Caf\xE9 au lait").starts_with("Caf"));
/// ```
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> String {
    decode_bytes_with_report(bytes).0
}

/// Like [`decode_bytes`], also reporting which step produced the text.
#[must_use]
pub fn decode_bytes_with_report(bytes: &[u8]) -> (String, DecodeSource) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return (text.to_string(), DecodeSource::Utf8);
    }

    if let Some(encoding) = detect_declared_encoding(bytes).filter(|e| *e != UTF_8) {
        let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
        if !had_errors {
            log::debug!("decoded with declared charset {}", encoding.name());
            return (decoded.into_owned(), DecodeSource::Declared(encoding));
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (guess, confident) = detector.guess_assess(None, true);
    if confident && guess != UTF_8 {
        let (decoded, had_errors) = guess.decode_without_bom_handling(bytes);
        if !had_errors {
            log::debug!("decoded with detected charset {}", guess.name());
            return (decoded.into_owned(), DecodeSource::Detected(guess));
        }
    }

    log::warn!("charset detection inconclusive, decoding as windows-1252");
    let (decoded, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (decoded.into_owned(), DecodeSource::Fallback)
}

/// Repair UTF-8 text that was mis-decoded as Latin-1/CP1252.
///
/// Text without any tell-tale sequence is returned borrowed and unchanged.
/// Otherwise the text is re-encoded to single bytes and decoded as UTF-8,
/// repeatedly while that keeps succeeding, so doubly-encoded text is fully
/// repaired and `repair(repair(s)) == repair(s)` holds for every input.
/// Text that does not survive the round trip is returned unchanged.
///
/// # Examples
///
/// ```
/// use bookclean::encoding::repair_mojibake;
///
/// assert_eq!(repair_mojibake("CafÃ©"), "Café");
/// assert_eq!(repair_mojibake("itâ€™s"), "it\u{2019}s");
/// assert_eq!(repair_mojibake("Crème brûlée"), "Crème brûlée");
/// ```
#[must_use]
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if !MOJIBAKE_HINT.is_match(text) {
        return Cow::Borrowed(text);
    }

    let mut repaired = String::new();
    let mut changed = false;
    loop {
        let source: &str = if changed { &repaired } else { text };
        let Some(next) = repair_once(source) else {
            break;
        };
        if next == source {
            break;
        }
        let more = MOJIBAKE_HINT.is_match(&next);
        repaired = next;
        changed = true;
        if !more {
            break;
        }
    }

    if changed {
        log::debug!("repaired mojibake ({} -> {} bytes)", text.len(), repaired.len());
        Cow::Owned(repaired)
    } else {
        Cow::Borrowed(text)
    }
}

fn repair_once(text: &str) -> Option<String> {
    let bytes = single_byte_encode(text)?;
    String::from_utf8(bytes).ok()
}

/// Latin-1 for code points up to U+00FF, CP1252 for the characters that only
/// CP1252 maps into 0x80..0x9F.
fn single_byte_encode(text: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if let Ok(byte) = u8::try_from(u32::from(ch)) {
            out.push(byte);
            continue;
        }
        let (encoded, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
        if had_errors || encoded.len() != 1 {
            return None;
        }
        out.push(encoded[0]);
    }
    Some(out)
}
