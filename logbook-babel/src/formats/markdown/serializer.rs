//! Markdown serialization (editing-surface tree → canonical Markdown)
//!
//! This runs after every edit, so it is a single recursive walk with no
//! failure path: every tree the surface can hold has an emission.
//!
//! | Node               | Emission                                      |
//! |--------------------|-----------------------------------------------|
//! | Heading 1–4        | `#`×level, space, content, blank line         |
//! | Bold / Italic      | `**…**` / `*…*`                               |
//! | Code span          | `` `…` ``                                     |
//! | Code block         | fence, text, fence, blank line                |
//! | Link               | `[content](href)`                             |
//! | Image              | newline, `![alt](src)`, newline               |
//! | Blockquote         | `> `, content, blank line                     |
//! | List item          | `- ` or `N. `, content, newline               |
//! | Rule               | blank line, `---`, blank line                 |
//! | Line break         | newline                                       |
//! | Paragraph          | content, blank line                           |
//! | Container / other  | children, newline                             |
//!
//! Emphasis markers hug their text: whitespace at the edges of a bold or
//! italic span is written outside the markers, and a span with no text is
//! written as its whitespace alone. Headings, paragraphs, list items and
//! quotes with no text are skipped, since a bare `#` or `-` would read back
//! as a paragraph.
//!
//! A code block holds its text directly, so code inside it is never wrapped
//! in backticks a second time. Ordered items are numbered from 1 within each
//! consecutive run of ordered siblings.
//!
//! The concatenated output has every run of three or more newlines collapsed
//! to exactly two, then surrounding whitespace trimmed.

use crate::ir::nodes::{
    Blockquote, CodeBlock, Container, DocNode, Document, Heading, Image, InlineContent, Link,
    ListItem, Paragraph,
};

const MAX_HEADING_LEVEL: usize = 4;

/// Serialize a document tree to canonical Markdown.
pub fn serialize_to_markdown(doc: &Document) -> String {
    let mut out = String::new();
    write_blocks(&doc.children, &mut out);
    collapse_blank_lines(&out).trim().to_string()
}

fn write_blocks(nodes: &[DocNode], out: &mut String) {
    let mut ordinal = 0;
    for node in nodes {
        if node.inline_content().is_some_and(|content| is_blank(content)) {
            continue;
        }
        ordinal = match node {
            DocNode::ListItem(ListItem { ordered: true, .. }) => ordinal + 1,
            _ => 0,
        };
        write_block(node, ordinal, out);
    }
}

fn write_block(node: &DocNode, ordinal: usize, out: &mut String) {
    match node {
        DocNode::Heading(Heading { level, content }) => {
            if (1..=MAX_HEADING_LEVEL).contains(level) {
                out.push_str(&"#".repeat(*level));
                out.push(' ');
                write_inlines(content, out);
                out.push_str("\n\n");
            } else {
                write_inlines(content, out);
                out.push('\n');
            }
        }
        DocNode::Paragraph(Paragraph { content }) => {
            write_inlines(content, out);
            out.push_str("\n\n");
        }
        DocNode::ListItem(ListItem { ordered, content }) => {
            if *ordered {
                out.push_str(&format!("{ordinal}. "));
            } else {
                out.push_str("- ");
            }
            write_inlines(content, out);
            out.push('\n');
        }
        DocNode::Blockquote(Blockquote { content }) => {
            out.push_str("> ");
            write_inlines(content, out);
            out.push_str("\n\n");
        }
        DocNode::CodeBlock(CodeBlock { language, text }) => {
            out.push_str("```");
            if let Some(language) = language {
                out.push_str(language);
            }
            out.push('\n');
            out.push_str(text.trim_end_matches('\n'));
            out.push_str("\n```\n\n");
        }
        DocNode::Image(image) => write_image(image, out),
        DocNode::Rule => out.push_str("\n\n---\n\n"),
        DocNode::Container(Container { children }) => {
            write_blocks(children, out);
            out.push('\n');
        }
        DocNode::Inline(inline) => write_inline(inline, out),
    }
}

fn write_inlines(content: &[InlineContent], out: &mut String) {
    for inline in content {
        write_inline(inline, out);
    }
}

fn write_inline(inline: &InlineContent, out: &mut String) {
    match inline {
        InlineContent::Text(text) => out.push_str(text),
        InlineContent::Bold(children) => write_emphasis("**", children, out),
        InlineContent::Italic(children) => write_emphasis("*", children, out),
        InlineContent::Code(code) => {
            out.push('`');
            out.push_str(code);
            out.push('`');
        }
        InlineContent::Link(Link { href, children }) => {
            out.push('[');
            write_inlines(children, out);
            out.push_str("](");
            out.push_str(href);
            out.push(')');
        }
        InlineContent::Image(image) => write_image(image, out),
        InlineContent::LineBreak => out.push('\n'),
    }
}

fn write_emphasis(marker: &str, children: &[InlineContent], out: &mut String) {
    let mut inner = String::new();
    write_inlines(children, &mut inner);
    let core = inner.trim();
    if core.is_empty() {
        out.push_str(&inner);
        return;
    }
    let lead = inner.len() - inner.trim_start().len();
    out.push_str(&inner[..lead]);
    out.push_str(marker);
    out.push_str(core);
    out.push_str(marker);
    out.push_str(&inner[inner.trim_end().len()..]);
}

/// True when `content` would serialize to whitespace only.
fn is_blank(content: &[InlineContent]) -> bool {
    content.iter().all(|inline| match inline {
        InlineContent::Text(text) => text.trim().is_empty(),
        InlineContent::Bold(children) | InlineContent::Italic(children) => is_blank(children),
        _ => false,
    })
}

fn write_image(image: &Image, out: &mut String) {
    out.push_str(&format!("\n![{}]({})\n", image.alt, image.src));
}

/// Collapse every run of three or more newlines down to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(c);
            }
        } else {
            newlines = 0;
            out.push(c);
        }
    }
    out
}
