//! Core data structures for the editing-surface tree.
//!
//! The tree is the live state of an editing session. It is derived from the
//! canonical Markdown once, mutated in place while the author works, and
//! serialized back to Markdown after every change.

use serde::{Deserialize, Serialize};

/// A block-level node of the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocNode {
    Heading(Heading),
    Paragraph(Paragraph),
    ListItem(ListItem),
    Blockquote(Blockquote),
    CodeBlock(CodeBlock),
    Image(Image),
    Rule,
    /// Generic wrapper for anything the surface produced that has no
    /// dedicated node type.
    Container(Container),
    /// Inline content sitting directly inside a container.
    Inline(InlineContent),
}

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<DocNode>,
}

/// Heading levels 1 to 4 (`#` to `####`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<InlineContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub content: Vec<InlineContent>,
}

/// A single, flat list item. Items are not grouped into list containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub ordered: bool,
    pub content: Vec<InlineContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    pub content: Vec<InlineContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub language: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub children: Vec<InlineContent>,
}

/// Represents inline content, such as text, bold, italics, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InlineContent {
    Text(String),
    Bold(Vec<InlineContent>),
    Italic(Vec<InlineContent>),
    Code(String),
    Link(Link),
    Image(Image),
    LineBreak,
}

impl InlineContent {
    pub fn text(value: impl Into<String>) -> Self {
        InlineContent::Text(value.into())
    }

    /// Number of cursor positions this node spans.
    ///
    /// Text counts characters; images and line breaks are a single position.
    pub fn len(&self) -> usize {
        match self {
            InlineContent::Text(text) | InlineContent::Code(text) => text.chars().count(),
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                inline_len(children)
            }
            InlineContent::Link(link) => inline_len(&link.children),
            InlineContent::Image(_) | InlineContent::LineBreak => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends the visible text of this node to `out`.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            InlineContent::Text(text) | InlineContent::Code(text) => out.push_str(text),
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            InlineContent::Link(link) => {
                for child in &link.children {
                    child.collect_text(out);
                }
            }
            InlineContent::Image(image) => out.push_str(&image.alt),
            InlineContent::LineBreak => out.push('\n'),
        }
    }
}

/// Total cursor length of a run of inline content.
pub fn inline_len(content: &[InlineContent]) -> usize {
    content.iter().map(InlineContent::len).sum()
}

/// Visible text of a run of inline content.
pub fn inline_text(content: &[InlineContent]) -> String {
    let mut out = String::new();
    for item in content {
        item.collect_text(&mut out);
    }
    out
}

impl DocNode {
    /// Inline content of blocks that carry it directly.
    pub fn inline_content(&self) -> Option<&Vec<InlineContent>> {
        match self {
            DocNode::Heading(Heading { content, .. })
            | DocNode::Paragraph(Paragraph { content })
            | DocNode::ListItem(ListItem { content, .. })
            | DocNode::Blockquote(Blockquote { content }) => Some(content),
            _ => None,
        }
    }

    pub fn inline_content_mut(&mut self) -> Option<&mut Vec<InlineContent>> {
        match self {
            DocNode::Heading(Heading { content, .. })
            | DocNode::Paragraph(Paragraph { content })
            | DocNode::ListItem(ListItem { content, .. })
            | DocNode::Blockquote(Blockquote { content }) => Some(content),
            _ => None,
        }
    }

    pub fn paragraph(content: Vec<InlineContent>) -> Self {
        DocNode::Paragraph(Paragraph { content })
    }

    pub fn heading(level: usize, content: Vec<InlineContent>) -> Self {
        DocNode::Heading(Heading { level, content })
    }
}

impl Document {
    pub fn new(children: Vec<DocNode>) -> Self {
        Document { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
