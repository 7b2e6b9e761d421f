//! Export tests for HTML format (Markdown → display markup)

use insta::assert_snapshot;
use logbook_babel::bridge::render_markdown;
use logbook_babel::format::Format;
use logbook_babel::formats::html::{HtmlFormat, HtmlOptions, RenderVariant};
use logbook_babel::formats::markdown::MarkdownFormat;
use std::collections::HashMap;

fn standard(md: &str) -> String {
    render_markdown(md, &HtmlOptions::new(RenderVariant::Standard))
}

fn display(md: &str) -> String {
    render_markdown(md, &HtmlOptions::new(RenderVariant::Display))
}

#[test]
fn test_empty_input_renders_nothing() {
    assert_eq!(standard(""), "");
    assert_eq!(display(""), "");
    assert_eq!(standard("\n\n   \n"), "");
}

#[test]
fn test_heading_precedence() {
    let html = standard("#### A\n### B\n## C\n# D");
    assert_eq!(html.lines().next(), Some("<h4>A</h4>"));
    assert!(html.contains("<h3>B</h3>"));
    assert!(html.contains("<h2>C</h2>"));
    assert!(html.contains("<h1>D</h1>"));
    assert!(!html.contains('#'));
}

#[test]
fn test_emphasis_precedence() {
    assert_eq!(
        standard("***x***"),
        "<p><strong><em>x</em></strong></p>"
    );
}

#[test]
fn test_block_tags_are_never_paragraph_wrapped() {
    let cases = [
        ("# Heading", "<h1>Heading</h1>"),
        ("- item", "<li class=\"list-item list-disc\">item</li>"),
        ("3. item", "<li class=\"list-item list-decimal\">item</li>"),
        ("> quoted", "<blockquote>quoted</blockquote>"),
        ("---", "<hr>"),
        ("![Hull](/hull.png)", "<img src=\"/hull.png\" alt=\"Hull\">"),
        (
            "```\nfenced\n```",
            "<pre><code>fenced</code></pre>",
        ),
    ];
    for (md, expected) in cases {
        let html = standard(md);
        assert_eq!(html, expected, "input: {md:?}");
        assert!(!html.contains("<p>"), "input: {md:?}");
    }
}

// A line holding only an inline span is still a paragraph; the `<p>` comes
// from the line, never from the span. See "Paragraph wrapping" in DESIGN.md.
#[test]
fn test_inline_spans_are_wrapped_once() {
    assert_eq!(standard("`code`"), "<p><code>code</code></p>");
    assert_eq!(
        standard("[site](https://example.com)"),
        "<p><a href=\"https://example.com\">site</a></p>"
    );
}

#[test]
fn test_inline_image_in_paragraph() {
    assert_eq!(
        standard("See ![chart](/c.png) here"),
        "<p>See <img src=\"/c.png\" alt=\"chart\"> here</p>"
    );
}

#[test]
fn test_display_variant_splits_fonts() {
    let html = display("## Hull №7");
    assert!(html.starts_with("<h2><span style=\"font-family: var(--font-display), sans-serif\">Hull</span>"));
    assert!(html.contains(
        "<span style=\"font-family: var(--font-system), system-ui, sans-serif\"> №</span>"
    ));
    assert!(html.ends_with("<span style=\"font-family: var(--font-display), sans-serif\">7</span></h2>"));
}

#[test]
fn test_display_variant_leaves_h4_alone() {
    assert_eq!(display("#### Deck"), "<h4>Deck</h4>");
}

#[test]
fn test_kitchensink() {
    let md = "# Sea trials\nThe **hull** passed.\n- dot\n1. one\n> quote\n`code` span\n```rust\nlet x = 1;\n```\n---\n![Stern](/s.png)";
    assert_snapshot!(standard(md), @r#"
    <h1>Sea trials</h1>
    <p>The <strong>hull</strong> passed.</p>
    <li class="list-item list-disc">dot</li>
    <li class="list-item list-decimal">one</li>
    <blockquote>quote</blockquote>
    <p><code>code</code> span</p>
    <pre><code class="language-rust">let x = 1;</code></pre>
    <hr>
    <img src="/s.png" alt="Stern">
    "#);
}

#[test]
fn test_standalone_document_via_options() {
    let doc = MarkdownFormat.parse("# Dock").unwrap();
    let mut options = HashMap::new();
    options.insert("standalone".to_string(), "true".to_string());
    options.insert("title".to_string(), "Dock".to_string());
    let html = HtmlFormat::default()
        .serialize_with_options(&doc, &options)
        .unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Dock</title>"));
    assert!(html.contains("<article class=\"article-content\">"));
    assert!(html.contains(".list-decimal"));
}

#[test]
fn test_unknown_variant_is_rejected() {
    let doc = MarkdownFormat.parse("x").unwrap();
    let mut options = HashMap::new();
    options.insert("variant".to_string(), "fancy".to_string());
    assert!(HtmlFormat::default()
        .serialize_with_options(&doc, &options)
        .is_err());
}
