//! Export tests for Markdown format (tree → Markdown)
//!
//! These tests verify that serialized Markdown is read back by a CommonMark
//! parser with the intended structure, by checking the resulting Comrak AST.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use insta::assert_snapshot;
use logbook_babel::bridge::display_tree_to_markdown;
use logbook_babel::ir::nodes::*;

fn text(s: &str) -> InlineContent {
    InlineContent::text(s)
}

fn kitchensink() -> Document {
    Document::new(vec![
        DocNode::heading(1, vec![text("Sea trials")]),
        DocNode::paragraph(vec![
            text("The "),
            InlineContent::Bold(vec![text("hull")]),
            text(" passed "),
            InlineContent::Italic(vec![text("every")]),
            text(" check, see "),
            InlineContent::Link(Link {
                href: "https://example.com/report".to_string(),
                children: vec![text("the report")],
            }),
            text("."),
        ]),
        DocNode::ListItem(ListItem {
            ordered: true,
            content: vec![text("Inspect")],
        }),
        DocNode::ListItem(ListItem {
            ordered: true,
            content: vec![text("Repair")],
        }),
        DocNode::Blockquote(Blockquote {
            content: vec![text("Fair winds")],
        }),
        DocNode::CodeBlock(CodeBlock {
            language: Some("toml".to_string()),
            text: "draft = 4.2\n".to_string(),
        }),
        DocNode::Rule,
        DocNode::Image(Image {
            src: "/uploads/stern.webp".to_string(),
            alt: "Stern".to_string(),
        }),
    ])
}

fn comrak_root<'a>(md: &str, arena: &'a Arena<AstNode<'a>>) -> &'a AstNode<'a> {
    parse_document(arena, md, &Options::default())
}

/// Collect a short label for every block under the document root.
fn block_labels<'a>(root: &'a AstNode<'a>) -> Vec<String> {
    root.children()
        .map(|child| match &child.data.borrow().value {
            NodeValue::Heading(h) => format!("h{}", h.level),
            NodeValue::Paragraph => "p".to_string(),
            NodeValue::List(list) => match list.list_type {
                ListType::Ordered => format!("ol{}", child.children().count()),
                ListType::Bullet => format!("ul{}", child.children().count()),
            },
            NodeValue::BlockQuote => "quote".to_string(),
            NodeValue::CodeBlock(code) => format!("code:{}", code.info),
            NodeValue::ThematicBreak => "hr".to_string(),
            _ => "other".to_string(),
        })
        .collect()
}

fn collect_urls<'a>(node: &'a AstNode<'a>, urls: &mut Vec<String>) {
    match &node.data.borrow().value {
        NodeValue::Link(link) | NodeValue::Image(link) => urls.push(link.url.clone()),
        _ => {}
    }
    for child in node.children() {
        collect_urls(child, urls);
    }
}

#[test]
fn test_kitchensink_markdown() {
    assert_snapshot!(display_tree_to_markdown(&kitchensink()), @r"
    # Sea trials

    The **hull** passed *every* check, see [the report](https://example.com/report).

    1. Inspect
    2. Repair
    > Fair winds

    ```toml
    draft = 4.2
    ```

    ---

    ![Stern](/uploads/stern.webp)
    ");
}

#[test]
fn test_kitchensink_structure() {
    let md = display_tree_to_markdown(&kitchensink());
    let arena = Arena::new();
    let root = comrak_root(&md, &arena);

    assert_eq!(
        block_labels(root),
        vec!["h1", "p", "ol2", "quote", "code:toml", "hr", "p"]
    );

    let mut urls = Vec::new();
    collect_urls(root, &mut urls);
    assert_eq!(
        urls,
        vec!["https://example.com/report", "/uploads/stern.webp"]
    );
}

#[test]
fn test_unordered_items_form_bullet_list() {
    let doc = Document::new(vec![
        DocNode::ListItem(ListItem {
            ordered: false,
            content: vec![text("a")],
        }),
        DocNode::ListItem(ListItem {
            ordered: false,
            content: vec![text("b")],
        }),
    ]);
    let md = display_tree_to_markdown(&doc);
    assert_eq!(md, "- a\n- b");

    let arena = Arena::new();
    assert_eq!(block_labels(comrak_root(&md, &arena)), vec!["ul2"]);
}

#[test]
fn test_blank_line_collapse() {
    let doc = Document::new(vec![
        DocNode::paragraph(vec![text("a")]),
        DocNode::Rule,
        DocNode::Container(Container {
            children: vec![DocNode::Rule],
        }),
        DocNode::paragraph(vec![text("b")]),
    ]);
    let md = display_tree_to_markdown(&doc);
    assert!(!md.contains("\n\n\n"), "{md:?}");
    assert_eq!(md, "a\n\n---\n\n---\n\nb");
}

#[test]
fn test_unknown_surface_content_falls_back_to_children() {
    let doc = Document::new(vec![DocNode::Container(Container {
        children: vec![
            DocNode::Inline(text("plain ")),
            DocNode::Inline(InlineContent::Code("code".to_string())),
            DocNode::Inline(InlineContent::LineBreak),
            DocNode::Inline(text("next")),
        ],
    })]);
    assert_eq!(display_tree_to_markdown(&doc), "plain `code`\nnext");
}
