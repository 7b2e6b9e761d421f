//! HTML format implementation
//!
//! Export renders the display markup used by the public article page and the
//! admin live preview. Import reads the markup an editing surface holds and
//! rebuilds the tree from it.
//!
//! # Library Choice
//!
//! We use `html5ever` + `markup5ever_rcdom` for both directions: the DOM is
//! built node by node for export and serialized by html5ever (which takes
//! care of escaping), and import uses the browser-grade parser so that
//! whatever a contenteditable surface produced is read the way a browser
//! would read it.
//!
//! # Element Mapping Table
//!
//! | Tree node      | HTML                                   | Import also accepts            |
//! |----------------|----------------------------------------|--------------------------------|
//! | Heading N      | `<hN>`                                 | `<h1>`–`<h4>`                  |
//! | Paragraph      | `<p>`                                  |                                |
//! | List item      | `<li class="list-item list-disc">` / `list-decimal` | `<li>` inside `<ol>` is ordered |
//! | Blockquote     | `<blockquote>`                         |                                |
//! | Code block     | `<pre><code class="language-x">`       | `<pre>` without `<code>`       |
//! | Image          | `<img src alt>`                        |                                |
//! | Rule           | `<hr>`                                 |                                |
//! | Container      | `<div>`                                | any unknown element            |
//! | Bold / Italic  | `<strong>` / `<em>`                    | `<b>` / `<i>`                  |
//! | Code span      | `<code>`                               |                                |
//! | Link           | `<a href>`                             |                                |
//! | Line break     | `<br>`                                 |                                |
//!
//! List items are emitted flat, without a `<ul>`/`<ol>` wrapper; the item's
//! own class carries the list style.
//!
//! # Variants
//!
//! - `Standard`: the plain rule set.
//! - `Display`: public article page and admin preview. Text inside h1–h3 is
//!   split into styled spans so the display typeface only applies to Latin
//!   letters and digits (see [`crate::fonts`]).

pub mod parser;
mod serializer;

pub use serializer::{serialize_to_html, serialize_to_html_document};

use crate::error::FormatError;
use crate::fonts::FontStyles;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::str::FromStr;

/// Which rendering rule set to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderVariant {
    /// Plain rendering
    Standard,
    /// Public article page and live preview: font split on h1–h3
    #[default]
    Display,
}

impl FromStr for RenderVariant {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(RenderVariant::Standard),
            "display" | "preview" | "public" => Ok(RenderVariant::Display),
            other => Err(FormatError::InvalidOption {
                key: "variant".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Options for HTML serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlOptions {
    pub variant: RenderVariant,
    pub fonts: FontStyles,
    /// Optional custom CSS appended to standalone documents
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(variant: RenderVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn with_fonts(mut self, fonts: FontStyles) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Article display markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_editing_surface(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut html_options = self.options.clone();
        if let Some(variant) = options.get("variant") {
            html_options.variant = variant.parse()?;
        }
        if let Some(css) = options.get("css") {
            html_options.custom_css = Some(css.clone());
        }
        match options.get("standalone").map(String::as_str) {
            Some("true") => {
                let title = options.get("title").map(String::as_str).unwrap_or("Article");
                serialize_to_html_document(doc, title, &html_options)
            }
            _ => serialize_to_html(doc, &html_options),
        }
    }
}

/// Escape text content for HTML
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for a double-quoted HTML attribute
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
