//! Markdown → tree → Markdown keeps text and URLs.

use logbook_babel::bridge::{display_tree_to_markdown, markdown_to_display_tree};
use logbook_babel::ir::nodes::*;
use proptest::prelude::*;

const ARTICLE: &str = "\
# Survey report
## Hull
### Findings
#### Notes
Plating is **sound** with *minor* pitting and ***one*** weld to redo.
- coatings
- anodes
1. clean
1. repaint
> Fair winds and following seas
Run `survey --full` then read [the guide](https://example.com/guide).
```bash
survey --full
```
---
![Midship section](https://cdn.example.com/midship.webp)
Inline ![thumb](/t.png) image";

/// All literal text runs and URLs of a tree, in document order.
///
/// Whitespace at the edges of a run is not content: lines are trimmed on load.
fn texts_and_urls(doc: &Document) -> (Vec<String>, Vec<String>) {
    fn push(texts: &mut Vec<String>, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            texts.push(text.to_string());
        }
    }
    fn walk_inline(inline: &InlineContent, texts: &mut Vec<String>, urls: &mut Vec<String>) {
        match inline {
            InlineContent::Text(t) | InlineContent::Code(t) => push(texts, t),
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                children.iter().for_each(|c| walk_inline(c, texts, urls))
            }
            InlineContent::Link(link) => {
                urls.push(link.href.clone());
                link.children.iter().for_each(|c| walk_inline(c, texts, urls));
            }
            InlineContent::Image(image) => {
                urls.push(image.src.clone());
                push(texts, &image.alt);
            }
            InlineContent::LineBreak => {}
        }
    }
    fn walk(node: &DocNode, texts: &mut Vec<String>, urls: &mut Vec<String>) {
        match node {
            DocNode::CodeBlock(code) => push(texts, &code.text),
            DocNode::Image(image) => {
                urls.push(image.src.clone());
                push(texts, &image.alt);
            }
            DocNode::Container(c) => c.children.iter().for_each(|n| walk(n, texts, urls)),
            DocNode::Inline(inline) => walk_inline(inline, texts, urls),
            DocNode::Rule => {}
            other => {
                if let Some(content) = other.inline_content() {
                    content.iter().for_each(|c| walk_inline(c, texts, urls));
                }
            }
        }
    }
    let (mut texts, mut urls) = (Vec::new(), Vec::new());
    doc.children.iter().for_each(|n| walk(n, &mut texts, &mut urls));
    (texts, urls)
}

#[test]
fn test_representative_article_keeps_text_and_urls() {
    let tree = markdown_to_display_tree(ARTICLE);
    let saved = display_tree_to_markdown(&tree);
    let reloaded = markdown_to_display_tree(&saved);

    assert_eq!(texts_and_urls(&reloaded), texts_and_urls(&tree));

    let (texts, urls) = texts_and_urls(&tree);
    for expected in [
        "Survey report",
        "sound",
        "survey --full",
        "Fair winds and following seas",
    ] {
        assert!(texts.iter().any(|t| t == expected), "missing {expected:?}");
    }
    assert_eq!(
        urls,
        vec![
            "https://example.com/guide",
            "https://cdn.example.com/midship.webp",
            "/t.png",
        ]
    );
}

#[test]
fn test_saved_markdown_reaches_fixed_point() {
    let save = |md: &str| display_tree_to_markdown(&markdown_to_display_tree(md));
    // The first save moves the inline image onto its own line.
    let once = save(ARTICLE);
    let twice = save(&once);
    assert_eq!(save(&twice), twice);
}

#[test]
fn test_list_kinds_survive() {
    let saved = display_tree_to_markdown(&markdown_to_display_tree("- a\n9. b\n9. c\n- d\n4. e"));
    assert_eq!(saved, "- a\n1. b\n2. c\n- d\n1. e");
}

#[test]
fn test_empty_heading_and_item_are_dropped_on_save() {
    for source in ["Intro\n# ", "Intro\n- ", "Intro\n1. "] {
        let saved = display_tree_to_markdown(&markdown_to_display_tree(source));
        assert_eq!(saved, "Intro", "saving {source:?}");
        assert_eq!(
            markdown_to_display_tree(&saved).children,
            vec![DocNode::paragraph(vec![InlineContent::text("Intro")])]
        );
    }
}

#[test]
fn test_serialized_output_never_has_three_newlines() {
    let saved = display_tree_to_markdown(&markdown_to_display_tree(ARTICLE));
    assert!(!saved.contains("\n\n\n"));
    assert_eq!(saved, saved.trim());
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}"
}

fn url() -> impl Strategy<Value = String> {
    "https://[a-z]{1,8}\\.example\\.com/[a-z0-9]{0,8}"
}

/// Lines built from the supported syntax with plain-word content.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        (1usize..=4, word()).prop_map(|(n, w)| format!("{} {w}", "#".repeat(n))),
        word(),
        word().prop_map(|w| format!("**{w}**")),
        word().prop_map(|w| format!("*{w}*")),
        word().prop_map(|w| format!("- {w}")),
        word().prop_map(|w| format!("1. {w}")),
        word().prop_map(|w| format!("> {w}")),
        word().prop_map(|w| format!("`{w}`")),
        (word(), url()).prop_map(|(w, u)| format!("[{w}]({u})")),
        (word(), url()).prop_map(|(w, u)| format!("![{w}]({u})")),
        Just("---".to_string()),
    ]
}

proptest! {
    #[test]
    fn round_trip_preserves_text_and_urls(lines in prop::collection::vec(line(), 0..12)) {
        let source = lines.join("\n");
        let tree = markdown_to_display_tree(&source);
        let reloaded = markdown_to_display_tree(&display_tree_to_markdown(&tree));
        prop_assert_eq!(texts_and_urls(&reloaded), texts_and_urls(&tree));
    }
}

/// Words and URLs of a tree. Text runs may merge or split on reload, words
/// may not.
fn words_and_urls(doc: &Document) -> (Vec<String>, Vec<String>) {
    let (texts, urls) = texts_and_urls(doc);
    let words = texts
        .iter()
        .flat_map(|t| t.split_whitespace())
        .map(str::to_string)
        .collect();
    (words, urls)
}

fn letters() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,8}"
}

/// Join nodes with a space so neighbouring markers never touch.
fn spaced(nodes: Vec<InlineContent>) -> Vec<InlineContent> {
    let mut out = Vec::with_capacity(nodes.len() * 2);
    for (i, node) in nodes.into_iter().enumerate() {
        if i > 0 {
            out.push(InlineContent::text(" "));
        }
        out.push(node);
    }
    out
}

fn plain_leaf() -> BoxedStrategy<InlineContent> {
    prop_oneof![
        letters().prop_map(InlineContent::Text),
        letters().prop_map(InlineContent::Code),
    ]
    .boxed()
}

/// Bold and italic spans nested up to three deep, either kind inside either.
fn emphasis(leaf: BoxedStrategy<InlineContent>) -> BoxedStrategy<InlineContent> {
    leaf.prop_recursive(3, 16, 3, |inner| {
        let children = move || prop::collection::vec(inner.clone(), 1..4).prop_map(spaced);
        prop_oneof![
            children().prop_map(InlineContent::Bold),
            children().prop_map(InlineContent::Italic),
        ]
    })
    .boxed()
}

/// Emphasis around links, or a link around emphasis. Links never nest.
fn inline() -> impl Strategy<Value = InlineContent> {
    let link_leaf = (letters(), url()).prop_map(|(label, href)| {
        InlineContent::Link(Link {
            href,
            children: vec![InlineContent::Text(label)],
        })
    });
    let linked_emphasis = (
        prop::collection::vec(emphasis(plain_leaf()), 1..3),
        url(),
    )
        .prop_map(|(children, href)| {
            InlineContent::Link(Link {
                href,
                children: spaced(children),
            })
        });
    prop_oneof![
        emphasis(prop_oneof![plain_leaf(), link_leaf].boxed()),
        linked_emphasis,
    ]
}

/// Blocks with nested inline content; some are left empty.
fn block() -> impl Strategy<Value = DocNode> {
    let content = || prop::collection::vec(inline(), 0..4).prop_map(spaced);
    prop_oneof![
        (1usize..=4, content()).prop_map(|(level, content)| DocNode::heading(level, content)),
        content().prop_map(DocNode::paragraph),
        (any::<bool>(), content())
            .prop_map(|(ordered, content)| DocNode::ListItem(ListItem { ordered, content })),
        content().prop_map(|content| DocNode::Blockquote(Blockquote { content })),
    ]
}

proptest! {
    #[test]
    fn saved_tree_keeps_nested_text_and_urls(blocks in prop::collection::vec(block(), 0..8)) {
        let tree = Document::new(blocks);
        let reloaded = markdown_to_display_tree(&display_tree_to_markdown(&tree));
        prop_assert_eq!(words_and_urls(&reloaded), words_and_urls(&tree));
    }
}
