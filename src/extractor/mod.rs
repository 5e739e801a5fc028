//! Block extraction.
//!
//! Turns the selected content container into an ordered list of
//! [`ContentBlock`]s, or, for the line-filter strategy, flattens the page and
//! filters it line by line.
//!
//! # Module Structure
//!
//! - `tags`: Tag catalogs and helper functions
//! - `block`: The [`ContentBlock`] model
//! - `text`: Raw text collection (inline and line-oriented)
//! - `normalize`: Whitespace policies, entity decoding and repair
//! - `classify`: Block classification and the document walker
//! - `fallback`: Line-filter strategy and Gutenberg marker handling
//!
//! # Usage
//!
//! ```rust
//! use bookclean::extractor::{extract_blocks, ContentBlock};
//! use bookclean::{dom, Catalog, Options};
//!
//! let doc = dom::parse("<body><h2>Preface</h2><p>It was\nlate.</p><hr></body>");
//! let blocks = extract_blocks(&dom::body_or_root(&doc), &Options::default(), &Catalog::default());
//! assert_eq!(
//!     blocks,
//!     vec![
//!         ContentBlock::Heading(2, "PREFACE".into()),
//!         ContentBlock::Paragraph("It was late.".into()),
//!         ContentBlock::SectionBreak,
//!     ]
//! );
//! ```

pub mod block;
pub mod classify;
pub mod fallback;
pub mod normalize;
pub mod tags;
pub mod text;

pub use block::ContentBlock;
pub use classify::{classify, extract_blocks, BlockKind, BlockWalker};
pub use fallback::{between_gutenberg_markers, filter_lines, flatten_html};
