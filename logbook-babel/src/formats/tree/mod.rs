//! Tree formatter for the editing-surface tree
//!
//! A visual representation of the document tree, meant for debugging what
//! the parser or the editing-surface import produced.
//!
//! Each node is one line:
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document (3 blocks)
//! ├─ § h2 Hull survey
//! │ └─ ◦ Hull survey
//! ├─ ¶ Clear skies
//! │ ├─ 𝐁 Clear
//! │ │ └─ ◦ Clear
//! │ └─ ◦  skies
//! └─ ⎯ ---
//!
//! Icons
//!     Blocks: Document ⧉, Heading §, Paragraph ¶, ListItem •, Blockquote ❝,
//!         CodeBlock 𝒱, Image ▣, Rule ⎯, Container ➔
//!     Inlines: Text ◦, Bold 𝐁, Italic 𝐼, Code ƒ, Link ⊕, LineBreak ↵

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{inline_text, DocNode, Document, InlineContent};
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let cut: String = label.chars().take(LABEL_WIDTH).collect();
        format!("{cut}…")
    } else {
        label.to_string()
    }
}

fn block_type(node: &DocNode) -> &'static str {
    match node {
        DocNode::Heading(_) => "Heading",
        DocNode::Paragraph(_) => "Paragraph",
        DocNode::ListItem(_) => "ListItem",
        DocNode::Blockquote(_) => "Blockquote",
        DocNode::CodeBlock(_) => "CodeBlock",
        DocNode::Image(_) => "Image",
        DocNode::Rule => "Rule",
        DocNode::Container(_) => "Container",
        DocNode::Inline(inline) => inline_type(inline),
    }
}

fn inline_type(inline: &InlineContent) -> &'static str {
    match inline {
        InlineContent::Text(_) => "Text",
        InlineContent::Bold(_) => "Bold",
        InlineContent::Italic(_) => "Italic",
        InlineContent::Code(_) => "Code",
        InlineContent::Link(_) => "Link",
        InlineContent::Image(_) => "Image",
        InlineContent::LineBreak => "LineBreak",
    }
}

fn block_label(node: &DocNode) -> String {
    match node {
        DocNode::Heading(h) => format!("h{} {}", h.level, inline_text(&h.content)),
        DocNode::Paragraph(p) => inline_text(&p.content),
        DocNode::ListItem(item) => {
            let marker = if item.ordered { "1." } else { "-" };
            format!("{marker} {}", inline_text(&item.content))
        }
        DocNode::Blockquote(q) => inline_text(&q.content),
        DocNode::CodeBlock(code) => {
            let first_line = code.text.lines().next().unwrap_or("");
            match &code.language {
                Some(lang) => format!("{lang}: {first_line}"),
                None => first_line.to_string(),
            }
        }
        DocNode::Image(image) => format!("{} ({})", image.alt, image.src),
        DocNode::Rule => "---".to_string(),
        DocNode::Container(c) => format!("{} children", c.children.len()),
        DocNode::Inline(inline) => inline_label(inline),
    }
}

fn inline_label(inline: &InlineContent) -> String {
    match inline {
        InlineContent::Text(text) | InlineContent::Code(text) => text.clone(),
        InlineContent::Bold(children) | InlineContent::Italic(children) => inline_text(children),
        InlineContent::Link(link) => format!("{} → {}", inline_text(&link.children), link.href),
        InlineContent::Image(image) => format!("{} ({})", image.alt, image.src),
        InlineContent::LineBreak => String::new(),
    }
}

fn line(output: &mut String, prefix: &str, is_last: bool, node_type: &str, label: &str) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node_type),
        truncate(label)
    ));
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!("{prefix}{}", if is_last { "  " } else { "│ " })
}

fn format_block(
    output: &mut String,
    node: &DocNode,
    prefix: &str,
    is_last: bool,
    show_inlines: bool,
) {
    line(output, prefix, is_last, block_type(node), &block_label(node));
    let prefix = child_prefix(prefix, is_last);

    match node {
        DocNode::Container(container) => {
            let count = container.children.len();
            for (i, child) in container.children.iter().enumerate() {
                format_block(output, child, &prefix, i + 1 == count, show_inlines);
            }
        }
        DocNode::Inline(inline) if show_inlines => format_inline_children(output, inline, &prefix),
        other if show_inlines => {
            if let Some(content) = other.inline_content() {
                format_inlines(output, content, &prefix);
            }
        }
        _ => {}
    }
}

fn format_inlines(output: &mut String, content: &[InlineContent], prefix: &str) {
    let count = content.len();
    for (i, inline) in content.iter().enumerate() {
        let is_last = i + 1 == count;
        line(output, prefix, is_last, inline_type(inline), &inline_label(inline));
        format_inline_children(output, inline, &child_prefix(prefix, is_last));
    }
}

fn format_inline_children(output: &mut String, inline: &InlineContent, prefix: &str) {
    match inline {
        InlineContent::Bold(children) | InlineContent::Italic(children) => {
            format_inlines(output, children, prefix)
        }
        InlineContent::Link(link) => format_inlines(output, &link.children, prefix),
        _ => {}
    }
}

pub fn to_tree_str(doc: &Document) -> String {
    to_tree_str_with_params(doc, &HashMap::new())
}

/// Convert a document to its tree view with optional parameters
///
/// # Parameters
///
/// - `"inlines"`: when set to `"false"`, only block nodes are shown.
pub fn to_tree_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let show_inlines = params
        .get("inlines")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true);

    let mut output = format!(
        "{} Document ({} blocks)\n",
        get_icon("Document"),
        doc.children.len()
    );
    let count = doc.children.len();
    for (i, child) in doc.children.iter().enumerate() {
        format_block(&mut output, child, "", i + 1 == count, show_inlines);
    }
    output
}

/// Format implementation for the tree view
pub struct TreeFormat;

impl Format for TreeFormat {
    fn name(&self) -> &str {
        "tree"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_tree_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_tree_str_with_params(doc, options))
    }
}
