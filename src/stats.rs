//! Text statistics for cleaned output.

use serde::Serialize;

/// Words read per minute and words per printed page.
const WORDS_PER_MINUTE: usize = 250;
const WORDS_PER_PAGE: usize = 250;

/// Counts and averages describing a cleaned text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextStats {
    pub chars: usize,
    /// Characters other than spaces and newlines.
    pub chars_no_spaces: usize,
    pub words: usize,
    /// Non-empty lines.
    pub lines: usize,
    /// Blank-line separated blocks.
    pub paragraphs: usize,
    pub words_per_line: f64,
    pub chars_per_paragraph: f64,
    pub words_per_paragraph: f64,
    pub reading_minutes: usize,
    pub pages: usize,
}

impl TextStats {
    /// ```rust
    /// use bookclean::TextStats;
    ///
    /// let stats = TextStats::from_text("One two three.\n\nFour five.\n");
    /// assert_eq!(stats.words, 5);
    /// assert_eq!(stats.paragraphs, 2);
    /// assert_eq!(stats.lines, 2);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_text(text: &str) -> Self {
        let words = text.split_whitespace().count();
        let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        let paragraphs: Vec<&str> = text.split("\n\n").filter(|p| !p.trim().is_empty()).collect();
        let paragraph_chars: usize = paragraphs.iter().map(|p| p.chars().count()).sum();

        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

        Self {
            chars: text.chars().count(),
            chars_no_spaces: text.chars().filter(|c| *c != ' ' && *c != '\n').count(),
            words,
            lines,
            paragraphs: paragraphs.len(),
            words_per_line: ratio(words, lines),
            chars_per_paragraph: ratio(paragraph_chars, paragraphs.len()),
            words_per_paragraph: ratio(words, paragraphs.len()),
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
            pages: words.div_ceil(WORDS_PER_PAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        assert_eq!(TextStats::from_text(""), TextStats::default());
    }

    #[test]
    fn counts_and_averages() {
        let stats = TextStats::from_text("ab cd\nef\n\ngh\n");
        assert_eq!(stats.chars, 13);
        assert_eq!(stats.chars_no_spaces, 8);
        assert_eq!(stats.words, 4);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.paragraphs, 2);
        assert!((stats.words_per_paragraph - 2.0).abs() < f64::EPSILON);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn reading_time_rounds_up() {
        let text = "word ".repeat(501);
        let stats = TextStats::from_text(&text);
        assert_eq!(stats.pages, 3);
    }
}
