//! Import tests for Markdown format (Markdown → tree)

use logbook_babel::format::Format;
use logbook_babel::formats::markdown::MarkdownFormat;
use logbook_babel::ir::nodes::*;

fn parse(md: &str) -> Document {
    MarkdownFormat.parse(md).unwrap()
}

fn text(s: &str) -> InlineContent {
    InlineContent::text(s)
}

#[test]
fn test_empty_input() {
    assert!(parse("").is_empty());
    assert!(parse("   \n\t\n").is_empty());
}

#[test]
fn test_heading_precedence() {
    let doc = parse("#### A\n### B\n## C\n# D");
    let levels: Vec<(usize, String)> = doc
        .children
        .iter()
        .map(|node| match node {
            DocNode::Heading(h) => (h.level, inline_text(&h.content)),
            other => panic!("expected heading, got {other:?}"),
        })
        .collect();
    assert_eq!(
        levels,
        vec![
            (4, "A".to_string()),
            (3, "B".to_string()),
            (2, "C".to_string()),
            (1, "D".to_string()),
        ]
    );
}

#[test]
fn test_heading_needs_space() {
    let doc = parse("#hashtag");
    assert_eq!(doc.children, vec![DocNode::paragraph(vec![text("#hashtag")])]);
}

#[test]
fn test_emphasis_precedence() {
    let doc = parse("***x***");
    assert_eq!(
        doc.children,
        vec![DocNode::paragraph(vec![InlineContent::Bold(vec![
            InlineContent::Italic(vec![text("x")])
        ])])]
    );
}

#[test]
fn test_block_types() {
    let doc = parse("- dot\n1. one\n> quoted\n---\n![Hull](/hull.png)\n```\nraw *text*\n```");
    assert_eq!(
        doc.children,
        vec![
            DocNode::ListItem(ListItem {
                ordered: false,
                content: vec![text("dot")],
            }),
            DocNode::ListItem(ListItem {
                ordered: true,
                content: vec![text("one")],
            }),
            DocNode::Blockquote(Blockquote {
                content: vec![text("quoted")],
            }),
            DocNode::Rule,
            DocNode::Image(Image {
                src: "/hull.png".to_string(),
                alt: "Hull".to_string(),
            }),
            DocNode::CodeBlock(CodeBlock {
                language: None,
                text: "raw *text*".to_string(),
            }),
        ]
    );
}

#[test]
fn test_code_span_is_literal() {
    let doc = parse("use `**not bold**` here");
    assert_eq!(
        doc.children,
        vec![DocNode::paragraph(vec![
            text("use "),
            InlineContent::Code("**not bold**".to_string()),
            text(" here"),
        ])]
    );
}

#[test]
fn test_link_with_emphasis() {
    let doc = parse("[**Fleet** news](https://example.com/fleet)");
    assert_eq!(
        doc.children,
        vec![DocNode::paragraph(vec![InlineContent::Link(Link {
            href: "https://example.com/fleet".to_string(),
            children: vec![InlineContent::Bold(vec![text("Fleet")]), text(" news")],
        })])]
    );
}

#[test]
fn test_every_line_is_a_paragraph() {
    let doc = parse("first line\nsecond line");
    assert_eq!(doc.children.len(), 2);
}

#[test]
fn test_unmatched_markers_stay_literal() {
    let doc = parse("2 * 3 = 6 and [broken](");
    assert_eq!(
        doc.children,
        vec![DocNode::paragraph(vec![text("2 * 3 = 6 and [broken](")])]
    );
}
