//! Book structure detection over cleaned text.
//!
//! Heuristic and best-effort: title, author and translator come from the
//! first lines of the text, chapters from every line that looks like a
//! chapter heading. Divider lines and bare URLs never count as header lines.

use serde::Serialize;

use crate::patterns::{is_chapter_heading, SEPARATOR_LINE};

/// Number of non-empty lines scanned for title, author and translator.
const HEADER_SCAN_LINES: usize = 50;

/// A detected chapter heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterMarker {
    /// 0-based index of the line in the text.
    pub line: usize,
    /// The trimmed heading line.
    pub title: String,
}

/// Heuristically detected book structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookStructure {
    pub title: Option<String>,
    pub author: Option<String>,
    pub translator: Option<String>,
    /// Chapter headings in text order.
    pub chapters: Vec<ChapterMarker>,
}

impl BookStructure {
    /// Title for display, `"Untitled"` when none was detected.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// Detect title, author, translator and chapter headings in `text`.
///
/// ```rust
/// use bookclean::detect_structure;
///
/// let s = detect_structure("Don Quijote\nby Miguel de Cervantes\n\nCHAPTER I\nIn a village of La Mancha...\n");
/// assert_eq!(s.title.as_deref(), Some("Don Quijote"));
/// assert_eq!(s.author.as_deref(), Some("by Miguel de Cervantes"));
/// assert_eq!(s.chapters[0].line, 3);
/// ```
#[must_use]
pub fn detect_structure(text: &str) -> BookStructure {
    let mut structure = BookStructure::default();

    let header = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_decoration(l))
        .take(HEADER_SCAN_LINES);
    for line in header {
        let len = line.chars().count();
        if structure.title.is_none() && len > 5 && len < 200 {
            structure.title = Some(line.to_string());
            continue;
        }
        let lower = line.to_lowercase();
        if lower.contains("by ") || lower.contains("por ") {
            structure.author.get_or_insert_with(|| line.to_string());
        }
        if lower.contains("translat") || lower.contains("traducc") {
            structure.translator.get_or_insert_with(|| line.to_string());
        }
    }

    structure.chapters = text
        .split('\n')
        .enumerate()
        .filter(|(_, line)| is_chapter_heading(line))
        .map(|(line, text)| ChapterMarker { line, title: text.trim().to_string() })
        .collect();

    structure
}

/// Separator rules and bare URLs, such as the lines of a chapter banner.
fn is_decoration(line: &str) -> bool {
    SEPARATOR_LINE.is_match(line) || line.starts_with("http://") || line.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_structure() {
        assert_eq!(detect_structure(""), BookStructure::default());
        assert_eq!(BookStructure::default().display_title(), "Untitled");
    }

    #[test]
    fn short_first_lines_are_not_titles() {
        let s = detect_structure("I\nII\nThe Real Title\n");
        assert_eq!(s.title.as_deref(), Some("The Real Title"));
    }

    #[test]
    fn author_and_translator_are_matched_independently() {
        let s = detect_structure("A Long Title\nTranslated by Jane Doe\nby John Roe\n");
        assert_eq!(s.translator.as_deref(), Some("Translated by Jane Doe"));
        assert_eq!(s.author.as_deref(), Some("Translated by Jane Doe"));

        let s = detect_structure("A Long Title\nTranslated by Jane Doe\nSome prose line\n");
        assert_eq!(s.author.as_deref(), Some("Translated by Jane Doe"));
        assert_eq!(s.translator.as_deref(), Some("Translated by Jane Doe"));
    }

    #[test]
    fn banner_lines_are_not_header_lines() {
        let text = "====================\nLetter 1\nhttps://en.wikisource.org/wiki/Frankenstein/Letter_1\n\
                    ====================\n\nTo Mrs. Saville, England.\n";
        let s = detect_structure(text);
        assert_eq!(s.title.as_deref(), Some("Letter 1"));
        assert!(s.author.is_none());
    }

    #[test]
    fn spanish_markers() {
        let s = detect_structure("La Regenta\npor Leopoldo Alas\nTraducción de nadie\n");
        assert_eq!(s.author.as_deref(), Some("por Leopoldo Alas"));
        assert_eq!(s.translator.as_deref(), Some("Traducción de nadie"));
    }

    #[test]
    fn chapters_are_recorded_with_line_index() {
        let text = "Some Book Title\n\nCHAPTER IV. The Escape\n\nText.\n\n4\n\nCapítulo 5\n";
        let s = detect_structure(text);
        assert_eq!(
            s.chapters,
            vec![
                ChapterMarker { line: 2, title: "CHAPTER IV. The Escape".into() },
                ChapterMarker { line: 8, title: "Capítulo 5".into() },
            ]
        );
    }

    #[test]
    fn only_first_fifty_lines_feed_the_header() {
        let mut text = String::from("Title of the Book\n");
        for i in 0..60 {
            text.push_str(&format!("line {i}\n"));
        }
        text.push_str("by Late Author\n");
        assert!(detect_structure(&text).author.is_none());
    }
}
