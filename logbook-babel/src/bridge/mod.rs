//! Rich-text ⇄ Markdown bridge
//!
//! The canonical article body is Markdown. An editing session turns it into a
//! tree once, at start, and from then on the tree is the live state: every
//! mutation serializes it back to Markdown and hands the result to whoever
//! holds the article (see [`EditorSession`]).
//!
//! Both directions are total. The load direction degrades to an empty tree
//! if the event stream cannot be rebuilt, and the save direction has an
//! emission for every node the tree can hold.
//!
//! Round trips are lossy in syntax only: `display_tree_to_markdown(
//! markdown_to_display_tree(s))` keeps every text run and every link and
//! image URL of `s`, while list numbering, line grouping and blank-line
//! counts are normalized.

mod edit;
mod session;

pub use session::{EditError, EditorSession, MarkdownListener, Selection};

use crate::formats::html::{serialize_to_html, HtmlOptions};
use crate::formats::markdown::parser::parse_from_markdown;
use crate::formats::markdown::serializer::serialize_to_markdown;
use crate::ir::nodes::Document;

/// Load direction: canonical Markdown → editing-surface tree.
pub fn markdown_to_display_tree(markdown: &str) -> Document {
    match parse_from_markdown(markdown) {
        Ok(doc) => {
            tracing::debug!(blocks = doc.children.len(), "Loaded editing-surface tree");
            doc
        }
        Err(err) => {
            tracing::warn!("Falling back to an empty tree: {err}");
            Document::default()
        }
    }
}

/// Save direction: editing-surface tree → canonical Markdown.
pub fn display_tree_to_markdown(tree: &Document) -> String {
    serialize_to_markdown(tree)
}

/// Render canonical Markdown to display markup.
///
/// Used by the public article page and the admin preview tab. Blank input
/// renders to an empty string.
pub fn render_markdown(markdown: &str, options: &HtmlOptions) -> String {
    let tree = markdown_to_display_tree(markdown);
    serialize_to_html(&tree, options).unwrap_or_else(|err| {
        tracing::warn!("Rendering failed: {err}");
        String::new()
    })
}
