//! Converts a flat event stream back to a nested IR tree structure.
//!
//! # The High-Level Concept
//!
//! The algorithm uses a stack of "open" blocks. A `Start` event pushes a new
//! block, making it the current target for inline content; its `End` event
//! pops it and appends the finished node to the parent. Leaf events (code
//! blocks, images, rules) are appended to the current parent directly.
//!
//! Article blocks never nest inside each other except through generic
//! containers, so the stack stays shallow: the root, any open containers, and
//! at most one inline-bearing block on top.
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - Expect `StartDocument`, push the root
//!
//! 2. **Processing `Start` Events:**
//!    - Push an empty block of the matching kind
//!
//! 3. **Processing `Inline` Events:**
//!    - Append to the block on top of the stack. Inline content directly
//!      inside the root or a container becomes a `DocNode::Inline`
//!
//! 4. **Processing `End` Events:**
//!    - Pop the block, validate it matches, append it to the new top
//!
//! 5. **Completion:**
//!    - `EndDocument` must leave only the root on the stack

use crate::ir::events::Event;
use crate::ir::nodes::*;
use thiserror::Error;

/// Error type for flat-to-nested conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Stack was empty when trying to pop
    #[error("Unexpected end event: {0}")]
    UnexpectedEnd(String),
    /// Mismatched start/end events
    #[error("Mismatched events: expected {expected}, found {found}")]
    MismatchedEvents { expected: String, found: String },
    /// Event stream did not begin with `StartDocument`
    #[error("Event stream must start with StartDocument")]
    MissingStart,
    /// Events remaining after document end
    #[error("Extra events after document end")]
    ExtraEvents,
    /// Stack not empty at end (unclosed blocks)
    #[error("Unclosed containers: {0} nodes remain on stack")]
    UnclosedContainers(usize),
}

/// Represents a block being built on the stack
#[derive(Debug)]
enum StackNode {
    Root(Vec<DocNode>),
    Heading {
        level: usize,
        content: Vec<InlineContent>,
    },
    Paragraph(Vec<InlineContent>),
    ListItem {
        ordered: bool,
        content: Vec<InlineContent>,
    },
    Blockquote(Vec<InlineContent>),
    Container(Vec<DocNode>),
}

impl StackNode {
    fn name(&self) -> &'static str {
        match self {
            StackNode::Root(_) => "Document",
            StackNode::Heading { .. } => "Heading",
            StackNode::Paragraph(_) => "Paragraph",
            StackNode::ListItem { .. } => "ListItem",
            StackNode::Blockquote(_) => "Blockquote",
            StackNode::Container(_) => "Container",
        }
    }

    fn into_doc_node(self) -> DocNode {
        match self {
            StackNode::Root(children) | StackNode::Container(children) => {
                DocNode::Container(Container { children })
            }
            StackNode::Heading { level, content } => DocNode::Heading(Heading { level, content }),
            StackNode::Paragraph(content) => DocNode::Paragraph(Paragraph { content }),
            StackNode::ListItem { ordered, content } => {
                DocNode::ListItem(ListItem { ordered, content })
            }
            StackNode::Blockquote(content) => DocNode::Blockquote(Blockquote { content }),
        }
    }

    fn push_block(&mut self, node: DocNode) -> Result<(), ConversionError> {
        match self {
            StackNode::Root(children) | StackNode::Container(children) => {
                children.push(node);
                Ok(())
            }
            other => Err(ConversionError::MismatchedEvents {
                expected: format!("End of {}", other.name()),
                found: "block content".to_string(),
            }),
        }
    }

    fn push_inline(&mut self, inline: InlineContent) {
        match self {
            StackNode::Root(children) | StackNode::Container(children) => {
                children.push(DocNode::Inline(inline))
            }
            StackNode::Heading { content, .. }
            | StackNode::Paragraph(content)
            | StackNode::ListItem { content, .. }
            | StackNode::Blockquote(content) => content.push(inline),
        }
    }
}

/// Converts a flat event stream into a `Document`.
pub fn events_to_tree(events: &[Event]) -> Result<Document, ConversionError> {
    let mut iter = events.iter();
    match iter.next() {
        Some(Event::StartDocument) => {}
        _ => return Err(ConversionError::MissingStart),
    }

    let mut stack = vec![StackNode::Root(Vec::new())];
    let mut finished = false;

    for event in iter {
        if finished {
            return Err(ConversionError::ExtraEvents);
        }
        match event {
            Event::StartDocument => {
                return Err(ConversionError::MismatchedEvents {
                    expected: "block event".to_string(),
                    found: "StartDocument".to_string(),
                })
            }
            Event::EndDocument => {
                if stack.len() != 1 {
                    return Err(ConversionError::UnclosedContainers(stack.len() - 1));
                }
                finished = true;
            }
            Event::StartHeading(level) => stack.push(StackNode::Heading {
                level: *level,
                content: Vec::new(),
            }),
            Event::StartParagraph => stack.push(StackNode::Paragraph(Vec::new())),
            Event::StartListItem { ordered } => stack.push(StackNode::ListItem {
                ordered: *ordered,
                content: Vec::new(),
            }),
            Event::StartBlockquote => stack.push(StackNode::Blockquote(Vec::new())),
            Event::StartContainer => stack.push(StackNode::Container(Vec::new())),
            Event::EndHeading(_) => close(&mut stack, "Heading")?,
            Event::EndParagraph => close(&mut stack, "Paragraph")?,
            Event::EndListItem => close(&mut stack, "ListItem")?,
            Event::EndBlockquote => close(&mut stack, "Blockquote")?,
            Event::EndContainer => close(&mut stack, "Container")?,
            Event::CodeBlock(block) => top(&mut stack)?.push_block(DocNode::CodeBlock(block.clone()))?,
            Event::Image(image) => top(&mut stack)?.push_block(DocNode::Image(image.clone()))?,
            Event::Rule => top(&mut stack)?.push_block(DocNode::Rule)?,
            Event::Inline(inline) => top(&mut stack)?.push_inline(inline.clone()),
        }
    }

    if !finished {
        return Err(ConversionError::UnclosedContainers(stack.len()));
    }

    match stack.pop() {
        Some(StackNode::Root(children)) => Ok(Document { children }),
        _ => Err(ConversionError::UnexpectedEnd("Document".to_string())),
    }
}

fn top(stack: &mut [StackNode]) -> Result<&mut StackNode, ConversionError> {
    stack
        .last_mut()
        .ok_or_else(|| ConversionError::UnexpectedEnd("empty stack".to_string()))
}

fn close(stack: &mut Vec<StackNode>, expected: &str) -> Result<(), ConversionError> {
    if stack.len() < 2 {
        return Err(ConversionError::UnexpectedEnd(expected.to_string()));
    }
    let node = stack
        .pop()
        .ok_or_else(|| ConversionError::UnexpectedEnd(expected.to_string()))?;
    if node.name() != expected {
        return Err(ConversionError::MismatchedEvents {
            expected: format!("End of {}", node.name()),
            found: format!("End of {expected}"),
        });
    }
    top(stack)?.push_block(node.into_doc_node())
}
