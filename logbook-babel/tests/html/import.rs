//! Import tests for HTML format (editing-surface markup → tree)

use logbook_babel::bridge::{display_tree_to_markdown, markdown_to_display_tree, render_markdown};
use logbook_babel::format::Format;
use logbook_babel::formats::html::parser::parse_editing_surface;
use logbook_babel::formats::html::{HtmlFormat, HtmlOptions, RenderVariant};
use logbook_babel::ir::nodes::*;

const ARTICLE: &str = "# Sea trials №2\nThe **hull** passed *every* check.\n- dot\n1. one\n2. two\n> Fair winds\nUse `cargo` and [docs](https://example.com/docs)\n```sh\nls -la\n```\n---\n![Stern](/uploads/stern.png)\na < b & c";

#[test]
fn test_rendered_markup_reads_back_as_same_tree() {
    for variant in [RenderVariant::Standard, RenderVariant::Display] {
        let html = render_markdown(ARTICLE, &HtmlOptions::new(variant));
        assert_eq!(
            parse_editing_surface(&html),
            markdown_to_display_tree(ARTICLE),
            "variant {variant:?}"
        );
    }
}

#[test]
fn test_contenteditable_markup() {
    let html = "<div><b>Bold</b> start</div><ul><li>one</li></ul><ol><li>first</li></ol><p><i>tilt</i><br>next</p>";
    let doc = HtmlFormat::default().parse(html).unwrap();
    assert_eq!(
        doc.children,
        vec![
            DocNode::Container(Container {
                children: vec![
                    DocNode::Inline(InlineContent::Bold(vec![InlineContent::text("Bold")])),
                    DocNode::Inline(InlineContent::text(" start")),
                ],
            }),
            DocNode::ListItem(ListItem {
                ordered: false,
                content: vec![InlineContent::text("one")],
            }),
            DocNode::ListItem(ListItem {
                ordered: true,
                content: vec![InlineContent::text("first")],
            }),
            DocNode::paragraph(vec![
                InlineContent::Italic(vec![InlineContent::text("tilt")]),
                InlineContent::LineBreak,
                InlineContent::text("next"),
            ]),
        ]
    );
}

#[test]
fn test_pre_without_code_child() {
    let doc = parse_editing_surface("<pre>raw <b>text</b></pre>");
    assert_eq!(
        doc.children,
        vec![DocNode::CodeBlock(CodeBlock {
            language: None,
            text: "raw text".to_string(),
        })]
    );
}

#[test]
fn test_nested_emphasis_from_surface_survives_save() {
    let doc = parse_editing_surface("<p><em>calm <strong>seas</strong></em></p>");
    let saved = display_tree_to_markdown(&doc);
    assert_eq!(saved, "*calm **seas***");

    let reloaded = markdown_to_display_tree(&saved);
    assert_eq!(
        reloaded.children,
        vec![DocNode::paragraph(vec![InlineContent::Italic(vec![
            InlineContent::text("calm "),
            InlineContent::Bold(vec![InlineContent::text("seas")]),
        ])])]
    );
    let content = reloaded.children[0].inline_content().unwrap();
    assert_eq!(inline_text(content), "calm seas");
}
