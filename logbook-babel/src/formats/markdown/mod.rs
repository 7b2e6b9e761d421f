//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the canonical
//! article Markdown and the editing-surface tree.
//!
//! # Dialect
//!
//! Articles use a small, line-oriented Markdown subset. Each line is one
//! block; there is no lazy continuation and no nesting of blocks.
//!
//! | Element        | Markdown                 | Import Notes                       | Export Notes                     |
//! |----------------|--------------------------|------------------------------------|----------------------------------|
//! | Heading        | `#` to `####` + space    | Longest marker wins                | Levels outside 1–4 lose marker   |
//! | Paragraph      | any other line           | One paragraph per line             | Followed by a blank line         |
//! | List item      | `- item`, `N. item`      | Flat, ordered flag kept            | `N` renumbered from 1 per run    |
//! | Blockquote     | `> text`                 | Single line                        | Followed by a blank line         |
//! | Code block     | ```` ```lang ````        | Unclosed fence runs to end         | Language kept                    |
//! | Rule           | `---`                    | Whole line only                    | Surrounded by blank lines        |
//! | Image          | `![alt](src)`            | Alone on a line → block image      | Always on its own line           |
//! | Bold / Italic  | `**b**`, `*i*`, `***bi***` | Longest delimiter first          | Direct                           |
//! | Code span      | `` `code` ``             | Literal, no emphasis inside        | Direct                           |
//! | Link           | `[text](href)`           | Text parsed as inline              | Direct                           |
//!
//! # Lossy Conversions
//!
//! Markdown → tree → Markdown keeps every piece of text and every URL, but
//! not the exact syntax:
//! - consecutive lines become separate paragraphs separated by blank lines
//! - ordered list numbers restart at 1
//! - leading and trailing whitespace of lines is dropped
//! - runs of blank lines collapse to one
//!
//! Reserved characters are not escaped on export. A literal `*` or `` ` ``
//! in text may be read back as markup.

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Canonical article Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
