//! Export of cleaned text as plain text, a standalone HTML page or Markdown.
//!
//! Exporters work on blank-line separated blocks of the cleaned text: lines
//! matching the chapter pattern become second-level headings, short
//! all-uppercase blocks third-level headings, everything else paragraphs.

use std::fmt;

use chrono::NaiveDateTime;
use html_escape::encode_text;

use crate::patterns::is_chapter_heading;
use crate::structure::BookStructure;

/// File name stem used when no title was detected.
const DEFAULT_STEM: &str = "book_clean";

/// Longest title-derived file name stem, in characters.
const MAX_STEM_CHARS: usize = 80;

/// Uppercase blocks shorter than this become subheadings.
const SUBHEADING_MAX_CHARS: usize = 100;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Html,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How a block is presented by the structured exporters.
#[derive(Debug, PartialEq, Eq)]
enum BlockRole {
    Chapter,
    Subheading,
    Body,
}

fn role(block: &str) -> BlockRole {
    if is_chapter_heading(block) {
        BlockRole::Chapter
    } else if block.chars().count() < SUBHEADING_MAX_CHARS && is_uppercase(block) {
        BlockRole::Subheading
    } else {
        BlockRole::Body
    }
}

/// At least one cased character and no lowercase one.
fn is_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

fn blocks(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|b| !b.is_empty())
}

/// Plain text export (the cleaned text itself).
#[must_use]
pub fn to_text(text: &str) -> String {
    text.to_string()
}

/// A standalone HTML page with escaped content.
///
/// ```rust
/// use bookclean::export::to_html;
///
/// let html = to_html("CHAPTER I\n\nTom & Jerry\nwent <home>.\n", "Tales");
/// assert!(html.contains("<h1>Tales</h1>"));
/// assert!(html.contains("<h2>CHAPTER I</h2>"));
/// assert!(html.contains("<p>Tom &amp; Jerry<br>\nwent &lt;home&gt;.</p>"));
/// ```
#[must_use]
pub fn to_html(text: &str, title: &str) -> String {
    let mut body = String::new();
    for block in blocks(text) {
        let escaped = encode_text(block);
        match role(block) {
            BlockRole::Chapter => body.push_str(&format!("    <h2>{escaped}</h2>\n")),
            BlockRole::Subheading => body.push_str(&format!("    <h3>{escaped}</h3>\n")),
            BlockRole::Body => body.push_str(&format!("    <p>{}</p>\n", escaped.replace('\n', "<br>\n"))),
        }
    }

    let title = encode_text(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: Georgia, serif; max-width: 800px; margin: 0 auto; padding: 2rem; line-height: 1.6; }}
        h2 {{ margin-top: 3rem; page-break-before: always; }}
        p {{ text-align: justify; margin: 1rem 0; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
{body}</body>
</html>
"#
    )
}

/// Markdown export with the detected title and author on top.
///
/// ```rust
/// use bookclean::{detect_structure, export::to_markdown};
///
/// let text = "Moby Dick\n\nby Herman Melville\n\nCHAPTER 1\n\nCall me Ishmael.\n";
/// let md = to_markdown(text, &detect_structure(text));
/// assert!(md.starts_with("# Moby Dick\n\n**by Herman Melville**\n\n"));
/// assert!(md.contains("## CHAPTER 1\n\nCall me Ishmael.\n"));
/// ```
#[must_use]
pub fn to_markdown(text: &str, structure: &BookStructure) -> String {
    let mut out = String::new();
    if let Some(title) = &structure.title {
        out.push_str(&format!("# {title}\n\n"));
        if let Some(author) = &structure.author {
            out.push_str(&format!("**{author}**\n\n"));
        }
    }
    for block in blocks(text) {
        match role(block) {
            BlockRole::Chapter => out.push_str(&format!("\n## {block}\n\n")),
            BlockRole::Subheading => out.push_str(&format!("### {block}\n\n")),
            BlockRole::Body => out.push_str(&format!("{block}\n\n")),
        }
    }
    out
}

/// Render `text` in `format`.
#[must_use]
pub fn render(format: ExportFormat, text: &str, structure: &BookStructure) -> String {
    match format {
        ExportFormat::Text => to_text(text),
        ExportFormat::Html => to_html(text, structure.display_title()),
        ExportFormat::Markdown => to_markdown(text, structure),
    }
}

/// File name for an export: sanitized title, timestamp and extension.
///
/// ```rust
/// use bookclean::{export::{suggested_file_name, ExportFormat}, BookStructure};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(14, 5, 0).unwrap();
/// let structure = BookStructure { title: Some("What? A <Book>: Part 1/2".into()), ..Default::default() };
/// assert_eq!(
///     suggested_file_name(&structure, ExportFormat::Markdown, &at),
///     "What A Book Part 12_20240309_140500.md"
/// );
/// assert_eq!(
///     suggested_file_name(&BookStructure::default(), ExportFormat::Text, &at),
///     "book_clean_20240309_140500.txt"
/// );
/// ```
#[must_use]
pub fn suggested_file_name(structure: &BookStructure, format: ExportFormat, timestamp: &NaiveDateTime) -> String {
    let stem = structure.title.as_deref().map(sanitize_stem).filter(|s| !s.is_empty());
    let stem = stem.as_deref().unwrap_or(DEFAULT_STEM);
    format!("{stem}_{}.{}", timestamp.format("%Y%m%d_%H%M%S"), format.extension())
}

fn sanitize_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\r'))
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let truncated: String = cleaned.chars().take(MAX_STEM_CHARS).collect();
    truncated.trim().to_string()
}
