//! Assembly of classified blocks into the final cleaned text.

use std::fmt;

use serde::Serialize;

use crate::extractor::ContentBlock;
use crate::patterns::MULTIPLE_NEWLINES;

/// Final cleaned text.
///
/// Either empty, or trimmed text ending in exactly one `\n` in which no line
/// has surrounding whitespace and no more than one empty line appears in a
/// row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanedText(String);

impl CleanedText {
    /// Apply the global cleanup to arbitrary text.
    ///
    /// ```rust
    /// use bookclean::CleanedText;
    ///
    /// let text = CleanedText::finish("  Title  \n\n\n\n Body \t\n");
    /// assert_eq!(text.as_str(), "Title\n\nBody\n");
    /// assert!(CleanedText::finish(" \n \n").is_empty());
    /// ```
    #[must_use]
    pub fn finish(raw: &str) -> Self {
        let unified = raw.replace("\r\n", "\n");
        let stripped = unified.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
        let collapsed = MULTIPLE_NEWLINES.replace_all(&stripped, "\n\n");
        let trimmed = collapsed.trim();
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("{trimmed}\n"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lines of the text, without the final newline.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CleanedText> for String {
    fn from(text: CleanedText) -> Self {
        text.0
    }
}

/// Join rendered blocks with a blank line and clean up the result.
///
/// Section breaks render as nothing, so the gap they leave merges into the
/// ordinary blank line between blocks.
#[must_use]
pub fn assemble(blocks: &[ContentBlock]) -> CleanedText {
    let rendered: Vec<String> = blocks.iter().map(ContentBlock::render).collect();
    CleanedText::finish(&rendered.join("\n\n"))
}
