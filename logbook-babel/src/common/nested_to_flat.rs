//! Flattens a document tree into the event stream the HTML serializer walks.
//!
//! A pre-order walk: a block with inline content becomes `Start*`, one
//! `Inline` event per inline node, then the matching `End*`. Code blocks,
//! images and rules are one event each. Containers wrap their children's
//! events in `StartContainer`/`EndContainer`.
//!
//! [`super::flat_to_nested::events_to_tree`] inverts this exactly.

use crate::ir::events::Event;
use crate::ir::nodes::{
    Blockquote, Container, DocNode, Document, Heading, InlineContent, ListItem, Paragraph,
};

/// Converts a `Document` to a flat vector of `Event`s.
pub fn tree_to_events(doc: &Document) -> Vec<Event> {
    let mut events = vec![Event::StartDocument];
    for child in &doc.children {
        walk_node(child, &mut events);
    }
    events.push(Event::EndDocument);
    events
}

fn walk_node(node: &DocNode, events: &mut Vec<Event>) {
    match node {
        DocNode::Heading(Heading { level, content }) => {
            events.push(Event::StartHeading(*level));
            emit_inlines(content, events);
            events.push(Event::EndHeading(*level));
        }
        DocNode::Paragraph(Paragraph { content }) => {
            events.push(Event::StartParagraph);
            emit_inlines(content, events);
            events.push(Event::EndParagraph);
        }
        DocNode::ListItem(ListItem { ordered, content }) => {
            events.push(Event::StartListItem { ordered: *ordered });
            emit_inlines(content, events);
            events.push(Event::EndListItem);
        }
        DocNode::Blockquote(Blockquote { content }) => {
            events.push(Event::StartBlockquote);
            emit_inlines(content, events);
            events.push(Event::EndBlockquote);
        }
        DocNode::CodeBlock(block) => events.push(Event::CodeBlock(block.clone())),
        DocNode::Image(image) => events.push(Event::Image(image.clone())),
        DocNode::Rule => events.push(Event::Rule),
        DocNode::Container(Container { children }) => {
            events.push(Event::StartContainer);
            for child in children {
                walk_node(child, events);
            }
            events.push(Event::EndContainer);
        }
        DocNode::Inline(inline) => events.push(Event::Inline(inline.clone())),
    }
}

fn emit_inlines(content: &[InlineContent], events: &mut Vec<Event>) {
    for inline in content {
        events.push(Event::Inline(inline.clone()));
    }
}
