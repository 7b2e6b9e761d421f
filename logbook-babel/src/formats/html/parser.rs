//! HTML parsing (editing-surface markup → tree)
//!
//! Reads the markup held by a WYSIWYG surface, node type by node type. This
//! is a total function: elements without a dedicated node type become
//! generic containers (block context) or are made transparent (inline
//! context), so nothing the surface produced is rejected and no text is lost.
//!
//! Special cases:
//! - `<pre>` becomes one code block holding the text of its descendants; a
//!   `<code>` child is unwrapped rather than read as a code span.
//! - `<ul>`/`<ol>` wrappers are dropped and their items hoisted, since the tree
//!   keeps list items flat. Items of an `<ol>`, or carrying the
//!   `list-decimal` class, are ordered.
//! - `<span>` wrappers (such as the display-font split) are transparent and
//!   adjacent text is merged back together.

use crate::ir::nodes::{
    Blockquote, CodeBlock, Container, DocNode, Document, Heading, Image, InlineContent, Link,
    ListItem, Paragraph,
};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse editing-surface markup into a document tree.
pub fn parse_editing_surface(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(source);
    match find_element(&dom.document, "body") {
        Some(body) => Document {
            children: read_blocks(&body, false),
        },
        None => Document::default(),
    }
}

fn read_blocks(node: &Handle, ordered_context: bool) -> Vec<DocNode> {
    let mut blocks = Vec::new();

    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    blocks.push(DocNode::Inline(InlineContent::Text(text.to_string())));
                }
            }
            NodeData::Element { .. } => read_block_element(child, ordered_context, &mut blocks),
            _ => {}
        }
    }

    blocks
}

fn read_block_element(element: &Handle, ordered_context: bool, blocks: &mut Vec<DocNode>) {
    let tag = tag_name(element).unwrap_or_default();
    match tag.as_str() {
        "h1" | "h2" | "h3" | "h4" => {
            let level = tag[1..].parse().unwrap_or(1);
            blocks.push(DocNode::Heading(Heading {
                level,
                content: read_inlines(element),
            }));
        }
        "p" => blocks.push(DocNode::Paragraph(Paragraph {
            content: read_inlines(element),
        })),
        "li" => {
            let ordered = ordered_context || has_class(element, "list-decimal");
            blocks.push(DocNode::ListItem(ListItem {
                ordered,
                content: read_inlines(element),
            }));
        }
        "ul" => blocks.extend(read_blocks(element, false)),
        "ol" => blocks.extend(read_blocks(element, true)),
        "blockquote" => blocks.push(DocNode::Blockquote(Blockquote {
            content: read_inlines(element),
        })),
        "pre" => blocks.push(DocNode::CodeBlock(read_code_block(element))),
        "img" => blocks.push(DocNode::Image(read_image(element))),
        "hr" => blocks.push(DocNode::Rule),
        "br" | "strong" | "b" | "em" | "i" | "code" | "a" | "span" => {
            let mut inlines = Vec::new();
            read_inline_element(element, &mut inlines);
            blocks.extend(inlines.into_iter().map(DocNode::Inline));
        }
        _ => blocks.push(DocNode::Container(Container {
            children: read_blocks(element, ordered_context),
        })),
    }
}

fn read_inlines(node: &Handle) -> Vec<InlineContent> {
    let mut out = Vec::new();
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => push_text(&mut out, &contents.borrow()),
            NodeData::Element { .. } => read_inline_element(child, &mut out),
            _ => {}
        }
    }
    out
}

fn read_inline_element(element: &Handle, out: &mut Vec<InlineContent>) {
    let tag = tag_name(element).unwrap_or_default();
    match tag.as_str() {
        "strong" | "b" => out.push(InlineContent::Bold(read_inlines(element))),
        "em" | "i" => out.push(InlineContent::Italic(read_inlines(element))),
        "code" => out.push(InlineContent::Code(text_content(element))),
        "a" => out.push(InlineContent::Link(Link {
            href: attr(element, "href").unwrap_or_default(),
            children: read_inlines(element),
        })),
        "img" => out.push(InlineContent::Image(read_image(element))),
        "br" => out.push(InlineContent::LineBreak),
        _ => {
            for item in read_inlines(element) {
                match item {
                    InlineContent::Text(text) => push_text(out, &text),
                    other => out.push(other),
                }
            }
        }
    }
}

fn read_code_block(pre: &Handle) -> CodeBlock {
    let language = pre
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child).as_deref() == Some("code"))
        .and_then(|code| attr(code, "class"))
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-").map(str::to_string))
        });
    CodeBlock {
        language,
        text: text_content(pre),
    }
}

fn read_image(element: &Handle) -> Image {
    Image {
        src: attr(element, "src").unwrap_or_default(),
        alt: attr(element, "alt").unwrap_or_default(),
    }
}

/// Append text, merging with a preceding text node.
fn push_text(out: &mut Vec<InlineContent>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineContent::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(InlineContent::Text(text.to_string()));
    }
}

fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => collect_text(child, out),
            _ => {}
        }
    }
}

fn find_element(node: &Handle, name: &str) -> Option<Handle> {
    if tag_name(node).as_deref() == Some(name) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, name))
}

fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attr(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attribute| &*attribute.name.local == key)
            .map(|attribute| attribute.value.to_string()),
        _ => None,
    }
}

fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}
