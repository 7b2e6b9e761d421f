//! Markdown parsing (Markdown → editing-surface tree)
//!
//! Pipeline: Markdown string → line classification → Events → IR tree
//!
//! Every line is classified on its own. Block markers are tested longest
//! first, so `####` is never read as a level-1 heading with `###` text:
//!
//! | Line                     | Block                          |
//! |--------------------------|--------------------------------|
//! | ```` ```lang ````        | code block until closing fence |
//! | `#### `, `### `, `## `, `# ` | heading level 4, 3, 2, 1   |
//! | `- `                     | unordered list item            |
//! | `N. `                    | ordered list item              |
//! | `> `                     | blockquote                     |
//! | `---`                    | horizontal rule                |
//! | `![alt](src)` alone      | block image                    |
//! | blank / whitespace only  | nothing                        |
//! | anything else            | paragraph (one per line)       |

use super::inline::parse_inline;
use crate::common::flat_to_nested::events_to_tree;
use crate::error::FormatError;
use crate::ir::events::Event;
use crate::ir::nodes::{CodeBlock, Document, InlineContent};

const FENCE: &str = "```";

/// Parse Markdown string to a document tree
pub fn parse_from_markdown(source: &str) -> Result<Document, FormatError> {
    let events = markdown_to_events(source);
    events_to_tree(&events)
        .map_err(|e| FormatError::ParseError(format!("Failed to build tree from events: {e}")))
}

/// Convert Markdown source to a flat event stream.
pub fn markdown_to_events(source: &str) -> Vec<Event> {
    let mut events = vec![Event::StartDocument];
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        if let Some(info) = line.trim_start().strip_prefix(FENCE) {
            let language = info.trim();
            let mut body: Vec<&str> = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim() == FENCE {
                    break;
                }
                body.push(inner);
            }
            events.push(Event::CodeBlock(CodeBlock {
                language: (!language.is_empty()).then(|| language.to_string()),
                text: body.join("\n"),
            }));
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if let Some((level, rest)) = heading(line) {
            events.push(Event::StartHeading(level));
            push_inlines(&mut events, rest.trim());
            events.push(Event::EndHeading(level));
        } else if let Some(rest) = line.strip_prefix("- ") {
            events.push(Event::StartListItem { ordered: false });
            push_inlines(&mut events, rest.trim());
            events.push(Event::EndListItem);
        } else if let Some(rest) = ordered_item(line) {
            events.push(Event::StartListItem { ordered: true });
            push_inlines(&mut events, rest.trim());
            events.push(Event::EndListItem);
        } else if let Some(rest) = line.strip_prefix("> ") {
            events.push(Event::StartBlockquote);
            push_inlines(&mut events, rest.trim());
            events.push(Event::EndBlockquote);
        } else if line.trim() == "---" {
            events.push(Event::Rule);
        } else {
            let inlines = parse_inline(line.trim());
            match inlines.as_slice() {
                [InlineContent::Image(image)] => events.push(Event::Image(image.clone())),
                _ => {
                    events.push(Event::StartParagraph);
                    events.extend(inlines.into_iter().map(Event::Inline));
                    events.push(Event::EndParagraph);
                }
            }
        }
    }

    events.push(Event::EndDocument);
    events
}

/// Match heading markers longest first.
fn heading(line: &str) -> Option<(usize, &str)> {
    ["#### ", "### ", "## ", "# "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker).map(|rest| (marker.len() - 1, rest)))
}

/// `N. ` where N is one or more ASCII digits.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

fn push_inlines(events: &mut Vec<Event>, text: &str) {
    events.extend(parse_inline(text).into_iter().map(Event::Inline));
}
