//! Defines the flat event stream representation of a document.

use crate::ir::nodes::{CodeBlock, Image, InlineContent};

/// Represents a single event in the document stream.
///
/// The Markdown parser emits these line by line, and the HTML serializer
/// consumes them to build its DOM. `flat_to_nested` and `nested_to_flat`
/// translate between the stream and the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartDocument,
    EndDocument,
    StartHeading(usize),
    EndHeading(usize),
    StartParagraph,
    EndParagraph,
    StartListItem {
        ordered: bool,
    },
    EndListItem,
    StartBlockquote,
    EndBlockquote,
    /// Marks the start of a generic container's children
    StartContainer,
    EndContainer,
    CodeBlock(CodeBlock),
    Image(Image),
    Rule,
    Inline(InlineContent),
}
