//! Editing session: the live tree, the cursor, and the Markdown it produces.
//!
//! A session loads its Markdown once. From then on every mutation goes
//! through the session, which serializes the tree exactly once per mutation
//! and passes the result to its listener synchronously, in mutation order.
//! There is no debouncing: N edits produce N serializations and the holder
//! of the article keeps the last one.

use super::edit::{delete_range, insert_at, insert_chars, normalize, remove_chars};
use super::{display_tree_to_markdown, markdown_to_display_tree};
use crate::assets::InsertionRequest;
use crate::ir::nodes::{inline_len, CodeBlock, DocNode, Document, InlineContent};
use std::fmt;
use thiserror::Error;

/// Receives the serialized Markdown after every mutation.
pub type MarkdownListener = Box<dyn FnMut(&str)>;

/// A cursor range inside one block, in cursor positions.
///
/// `start == end` is a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub block: usize,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(block: usize, start: usize, end: usize) -> Self {
        Self {
            block,
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn caret(block: usize, offset: usize) -> Self {
        Self::new(block, offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Block {index} out of range (document has {len} blocks)")]
    BlockOutOfRange { index: usize, len: usize },
    #[error("Offset {offset} out of range (block has {len} positions)")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// Cursor positions a block offers.
fn block_len(node: &DocNode) -> usize {
    match node {
        DocNode::CodeBlock(CodeBlock { text, .. }) => text.chars().count(),
        other => other.inline_content().map(|c| inline_len(c)).unwrap_or(0),
    }
}

pub struct EditorSession {
    tree: Document,
    selection: Option<Selection>,
    markdown: String,
    revision: u64,
    listener: Option<MarkdownListener>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("tree", &self.tree)
            .field("selection", &self.selection)
            .field("revision", &self.revision)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl EditorSession {
    /// Start a session from canonical Markdown.
    ///
    /// This is the only time the Markdown is read. The held Markdown stays
    /// the source string until the first mutation.
    pub fn new(markdown: &str) -> Self {
        Self {
            tree: markdown_to_display_tree(markdown),
            selection: None,
            markdown: markdown.to_string(),
            revision: 0,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl FnMut(&str) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn tree(&self) -> &Document {
        &self.tree
    }

    /// Markdown produced by the last mutation.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Number of serializations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn select(&mut self, selection: Selection) -> Result<(), EditError> {
        let selection = Selection::new(selection.block, selection.start, selection.end);
        let node = self
            .tree
            .children
            .get(selection.block)
            .ok_or(EditError::BlockOutOfRange {
                index: selection.block,
                len: self.tree.children.len(),
            })?;
        let len = block_len(node);
        if selection.end > len {
            return Err(EditError::OffsetOutOfRange {
                offset: selection.end,
                len,
            });
        }
        self.selection = Some(selection);
        Ok(())
    }

    /// Drop the cursor, as when the surface loses focus.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn replace_document(&mut self, tree: Document) {
        self.tree = tree;
        self.selection = None;
        self.sync();
    }

    /// Insert a block at `index`, clamped to the end of the document.
    pub fn insert_block(&mut self, index: usize, node: DocNode) {
        let index = index.min(self.tree.children.len());
        self.tree.children.insert(index, node);
        if let Some(selection) = self.selection.as_mut() {
            if selection.block >= index {
                selection.block += 1;
            }
        }
        self.sync();
    }

    /// Replace the block at `index`, returning the old one.
    pub fn replace_block(&mut self, index: usize, node: DocNode) -> Result<DocNode, EditError> {
        let len = self.tree.children.len();
        let slot = self
            .tree
            .children
            .get_mut(index)
            .ok_or(EditError::BlockOutOfRange { index, len })?;
        let old = std::mem::replace(slot, node);
        if let Some(selection) = self.selection {
            if selection.block == index {
                let end = block_len(&self.tree.children[index]);
                self.selection = Some(Selection::new(
                    index,
                    selection.start.min(end),
                    selection.end.min(end),
                ));
            }
        }
        self.sync();
        Ok(old)
    }

    pub fn remove_block(&mut self, index: usize) -> Result<DocNode, EditError> {
        let len = self.tree.children.len();
        if index >= len {
            return Err(EditError::BlockOutOfRange { index, len });
        }
        let old = self.tree.children.remove(index);
        self.selection = match self.selection {
            Some(selection) if selection.block == index => None,
            Some(mut selection) if selection.block > index => {
                selection.block -= 1;
                Some(selection)
            }
            other => other,
        };
        self.sync();
        Ok(old)
    }

    /// Type `text` over the selection. Returns `false` without a selection.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let Some(selection) = self.selection else {
            tracing::debug!("No selection, text input ignored");
            return false;
        };
        let inserted = text.chars().count();
        let block = &mut self.tree.children[selection.block];

        if let DocNode::CodeBlock(code) = block {
            remove_chars(&mut code.text, selection.start, selection.end);
            insert_chars(&mut code.text, selection.start, text);
            self.selection = Some(Selection::caret(selection.block, selection.start + inserted));
        } else {
            self.splice(selection, InlineContent::Text(text.to_string()));
        }
        self.sync();
        true
    }

    /// Delete the selected range. Returns `false` if nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        if selection.is_collapsed() {
            return false;
        }
        let block = &mut self.tree.children[selection.block];
        if let DocNode::CodeBlock(code) = block {
            remove_chars(&mut code.text, selection.start, selection.end);
        } else if let Some(content) = block.inline_content_mut() {
            delete_range(content, selection.start, selection.end);
            normalize(content);
        }
        self.selection = Some(Selection::caret(selection.block, selection.start));
        self.sync();
        true
    }

    /// Splice an asset in at the selection.
    ///
    /// Selected content is deleted, the node is inserted, and the caret is
    /// collapsed right after it. Without a selection nothing happens and
    /// `false` is returned.
    pub fn insert(&mut self, request: InsertionRequest) -> bool {
        let Some(selection) = self.selection else {
            tracing::debug!("No selection, asset insertion ignored");
            return false;
        };
        self.splice(selection, request.into_inline());
        self.sync();
        true
    }

    /// Replace the selection with `node`. Blocks without inline content get a
    /// new paragraph after them instead.
    fn splice(&mut self, selection: Selection, node: InlineContent) {
        let width = node.len();
        let block = &mut self.tree.children[selection.block];

        if let Some(content) = block.inline_content_mut() {
            delete_range(content, selection.start, selection.end);
            insert_at(content, selection.start, node);
            normalize(content);
            self.selection = Some(Selection::caret(selection.block, selection.start + width));
        } else {
            let index = selection.block + 1;
            self.tree
                .children
                .insert(index, DocNode::paragraph(vec![node]));
            self.selection = Some(Selection::caret(index, width));
        }
    }

    fn sync(&mut self) {
        self.markdown = display_tree_to_markdown(&self.tree);
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            bytes = self.markdown.len(),
            "Serialized editing surface"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.markdown);
        }
    }
}
