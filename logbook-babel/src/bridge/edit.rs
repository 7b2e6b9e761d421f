//! Offset-addressed edits on runs of inline content.
//!
//! Offsets count cursor positions as defined by [`InlineContent::len`]: one
//! per character of text and code, one per image or line break. Link,
//! bold and italic wrappers take no positions of their own.

use crate::ir::nodes::InlineContent;

/// Remove the positions `start..end` from `content`.
///
/// Wrappers and text nodes emptied by the deletion are dropped.
pub(crate) fn delete_range(content: &mut Vec<InlineContent>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let mut pos = 0;
    content.retain_mut(|node| {
        let len = node.len();
        let node_start = pos;
        pos += len;
        if end <= node_start || start >= node_start + len {
            return true;
        }
        let local_start = start.saturating_sub(node_start);
        let local_end = (end - node_start).min(len);
        match node {
            InlineContent::Text(text) | InlineContent::Code(text) => {
                remove_chars(text, local_start, local_end);
                !text.is_empty()
            }
            InlineContent::Bold(children) | InlineContent::Italic(children) => {
                delete_range(children, local_start, local_end);
                !children.is_empty()
            }
            InlineContent::Link(link) => {
                delete_range(&mut link.children, local_start, local_end);
                !link.children.is_empty()
            }
            InlineContent::Image(_) | InlineContent::LineBreak => false,
        }
    });
}

/// Insert `node` at position `offset`, splitting a text node if needed.
///
/// An offset strictly inside a wrapper inserts into the wrapper. Offsets past
/// the end append.
pub(crate) fn insert_at(content: &mut Vec<InlineContent>, offset: usize, node: InlineContent) {
    let mut pos = 0;
    for index in 0..content.len() {
        if offset == pos {
            content.insert(index, node);
            return;
        }
        let len = content[index].len();
        if offset < pos + len {
            let local = offset - pos;
            let tail = match &mut content[index] {
                InlineContent::Text(text) => Some(InlineContent::Text(split_off_chars(text, local))),
                InlineContent::Code(code) => Some(InlineContent::Code(split_off_chars(code, local))),
                InlineContent::Bold(children) | InlineContent::Italic(children) => {
                    insert_at(children, local, node);
                    return;
                }
                InlineContent::Link(link) => {
                    insert_at(&mut link.children, local, node);
                    return;
                }
                InlineContent::Image(_) | InlineContent::LineBreak => None,
            };
            content.insert(index + 1, node);
            if let Some(tail) = tail {
                content.insert(index + 2, tail);
            }
            return;
        }
        pos += len;
    }
    content.push(node);
}

/// Merge adjacent text nodes and drop empty ones, recursively.
pub(crate) fn normalize(content: &mut Vec<InlineContent>) {
    let mut merged: Vec<InlineContent> = Vec::with_capacity(content.len());
    for mut node in content.drain(..) {
        match &mut node {
            InlineContent::Text(text) if text.is_empty() => continue,
            InlineContent::Text(text) => {
                if let Some(InlineContent::Text(prev)) = merged.last_mut() {
                    prev.push_str(text);
                    continue;
                }
            }
            InlineContent::Bold(children) | InlineContent::Italic(children) => normalize(children),
            InlineContent::Link(link) => normalize(&mut link.children),
            _ => {}
        }
        merged.push(node);
    }
    *content = merged;
}

fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

pub(crate) fn remove_chars(text: &mut String, start: usize, end: usize) {
    let start = byte_index(text, start);
    let end = byte_index(text, end);
    text.replace_range(start..end, "");
}

pub(crate) fn insert_chars(text: &mut String, offset: usize, value: &str) {
    let at = byte_index(text, offset);
    text.insert_str(at, value);
}

fn split_off_chars(text: &mut String, offset: usize) -> String {
    let at = byte_index(text, offset);
    text.split_off(at)
}
