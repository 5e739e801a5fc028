//! The classified block model produced by the extractor.

use serde::Serialize;

/// One classified, already-normalized block of book content.
///
/// `Heading` and `Paragraph` text never contains a newline. The line-oriented
/// variants hold lines with no leading or trailing spaces and at most one
/// consecutive empty line, never at either end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentBlock {
    /// Heading level (1-6) and its single-line text.
    Heading(u8, String),
    /// Ordinary prose, whitespace collapsed to single spaces.
    Paragraph(String),
    /// Items of one list, rendered as dash-prefixed lines.
    List(Vec<String>),
    /// `<pre>` content.
    Preformatted(Vec<String>),
    Blockquote(Vec<String>),
    /// A block whose class marks it as verse.
    Poetry(Vec<String>),
    /// A paragraph whose explicit `<br>` line breaks were kept.
    Lines(Vec<String>),
    /// A horizontal rule.
    SectionBreak,
}

impl ContentBlock {
    /// The block as it appears in the assembled text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Heading(_, text) | Self::Paragraph(text) => text.clone(),
            Self::List(items) => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Preformatted(lines)
            | Self::Blockquote(lines)
            | Self::Poetry(lines)
            | Self::Lines(lines) => lines.join("\n"),
            Self::SectionBreak => String::new(),
        }
    }

    /// Whether the block is internally line-oriented.
    #[must_use]
    pub fn is_line_oriented(&self) -> bool {
        matches!(
            self,
            Self::List(_) | Self::Preformatted(_) | Self::Blockquote(_) | Self::Poetry(_) | Self::Lines(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_list_prefixes_items() {
        let block = ContentBlock::List(vec!["One".into(), "Two".into()]);
        assert_eq!(block.render(), "- One\n- Two");
    }

    #[test]
    fn render_lines_keeps_blank_line() {
        let block = ContentBlock::Poetry(vec!["a".into(), String::new(), "b".into()]);
        assert_eq!(block.render(), "a\n\nb");
        assert!(block.is_line_oriented());
    }

    #[test]
    fn section_break_renders_empty() {
        assert_eq!(ContentBlock::SectionBreak.render(), "");
        assert!(!ContentBlock::Heading(2, "X".into()).is_line_oriented());
    }
}
