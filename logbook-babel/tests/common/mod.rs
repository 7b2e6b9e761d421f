//! Tests for the flat <-> nested IR conversion.

use logbook_babel::common::flat_to_nested::events_to_tree;
use logbook_babel::common::nested_to_flat::tree_to_events;
use logbook_babel::ir::events::Event;
use logbook_babel::ir::nodes::*;

fn create_test_tree() -> Document {
    Document {
        children: vec![
            DocNode::Heading(Heading {
                level: 1,
                content: vec![InlineContent::Text("Title".to_string())],
            }),
            DocNode::Paragraph(Paragraph {
                content: vec![InlineContent::Text("Paragraph 1".to_string())],
            }),
            DocNode::ListItem(ListItem {
                ordered: true,
                content: vec![InlineContent::Text("Item 1".to_string())],
            }),
            DocNode::Container(Container {
                children: vec![
                    DocNode::Blockquote(Blockquote {
                        content: vec![InlineContent::Italic(vec![InlineContent::Text(
                            "Quoted".to_string(),
                        )])],
                    }),
                    DocNode::Inline(InlineContent::Text("loose".to_string())),
                    DocNode::Rule,
                ],
            }),
            DocNode::CodeBlock(CodeBlock {
                language: Some("rust".to_string()),
                text: "fn main() {}".to_string(),
            }),
            DocNode::Paragraph(Paragraph {
                content: vec![
                    InlineContent::Text("Final ".to_string()),
                    InlineContent::Bold(vec![InlineContent::Text("paragraph".to_string())]),
                ],
            }),
        ],
    }
}

#[test]
fn test_round_trip_conversion() {
    let original_tree = create_test_tree();

    // 1. Convert tree to events (nested -> flat)
    let events = tree_to_events(&original_tree);

    // 2. Convert events back to tree (flat -> nested)
    let reconstructed = events_to_tree(&events).expect("Failed to reconstruct tree");

    // 3. Assert that the original and reconstructed trees are identical
    assert_eq!(original_tree, reconstructed);
}

#[test]
fn test_event_stream_shape() {
    let doc = Document::new(vec![DocNode::ListItem(ListItem {
        ordered: false,
        content: vec![InlineContent::Text("dot".to_string())],
    })]);
    assert_eq!(
        tree_to_events(&doc),
        vec![
            Event::StartDocument,
            Event::StartListItem { ordered: false },
            Event::Inline(InlineContent::Text("dot".to_string())),
            Event::EndListItem,
            Event::EndDocument,
        ]
    );
}

#[test]
fn test_mismatched_events_are_rejected() {
    let events = vec![
        Event::StartDocument,
        Event::StartParagraph,
        Event::EndBlockquote,
        Event::EndDocument,
    ];
    assert!(events_to_tree(&events).is_err());
}
