//! Inline span parser
//!
//! Turns the text of a single line into inline nodes. Precedence, highest
//! first:
//!
//! 1. Code spans: everything between two backticks is literal.
//! 2. Images `![alt](src)`, then links `[text](href)`. Link text is parsed
//!    recursively; alt text is not.
//! 3. Emphasis runs. A run can open when it is followed by a non-space
//!    character and close when it follows one. Each closer pairs with the
//!    nearest open run before it, taking three asterisks (bold + italic) when
//!    both sides have them, else two (bold), else one (italic). Whatever is
//!    left of a closing run keeps closing outward, so in `*a **b***` the run
//!    `***` ends the bold and then the italic.
//!
//! Anything that fails to match is kept as literal text, so no input
//! character is ever dropped.

use crate::ir::nodes::{Image, InlineContent, Link};

/// Parse a line of Markdown into inline content.
pub fn parse_inline(text: &str) -> Vec<InlineContent> {
    let chars: Vec<char> = text.chars().collect();
    parse_chars(&chars)
}

/// A parsed piece of a line still waiting for its emphasis to resolve.
enum Piece {
    Text(String),
    Node(InlineContent),
    /// Asterisks not yet consumed by a pair.
    Run { left: usize, can_open: bool },
}

fn parse_chars(chars: &[char]) -> Vec<InlineContent> {
    let mut pieces = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '`' => {
                if let Some(end) = find_char(chars, i + 1, '`') {
                    if end > i + 1 {
                        let code = chars[i + 1..end].iter().collect();
                        pieces.push(Piece::Node(InlineContent::Code(code)));
                        i = end + 1;
                        continue;
                    }
                }
            }
            '!' if chars.get(i + 1) == Some(&'[') => {
                if let Some((alt, src, next)) = bracket_paren(chars, i + 1, true) {
                    pieces.push(Piece::Node(InlineContent::Image(Image {
                        src,
                        alt: alt.iter().collect(),
                    })));
                    i = next;
                    continue;
                }
            }
            '[' => {
                if let Some((label, href, next)) = bracket_paren(chars, i, false) {
                    pieces.push(Piece::Node(InlineContent::Link(Link {
                        href,
                        children: parse_chars(label),
                    })));
                    i = next;
                    continue;
                }
            }
            '*' => {
                let run = run_len(chars, i);
                let before = i.checked_sub(1).map(|b| chars[b]);
                let after = chars.get(i + run).copied();
                let can_open = after.is_some_and(|c| !c.is_whitespace());
                let can_close = before.is_some_and(|c| !c.is_whitespace());
                let left = if can_close { close_run(&mut pieces, run) } else { run };
                pieces.push(Piece::Run { left, can_open });
                i += run;
                continue;
            }
            _ => {}
        }
        push_char(&mut pieces, chars[i]);
        i += 1;
    }

    finish(pieces)
}

/// Pair a closing run of `run` asterisks with open runs before it, innermost
/// first. Returns how many asterisks were not used.
fn close_run(pieces: &mut Vec<Piece>, mut run: usize) -> usize {
    while run > 0 {
        let Some(opener) = pieces.iter().rposition(
            |p| matches!(p, Piece::Run { left, can_open: true } if *left > 0),
        ) else {
            break;
        };
        let Piece::Run { left: open, .. } = &mut pieces[opener] else {
            break;
        };
        let width = match (*open, run) {
            (o, r) if o >= 3 && r >= 3 => 3,
            (o, r) if o >= 2 && r >= 2 => 2,
            _ => 1,
        };
        *open -= width;
        let inner = finish(pieces.drain(opener + 1..).collect());
        let node = match width {
            3 => InlineContent::Bold(vec![InlineContent::Italic(inner)]),
            2 => InlineContent::Bold(inner),
            _ => InlineContent::Italic(inner),
        };
        pieces.push(Piece::Node(node));
        run -= width;
    }
    run
}

/// Merge pieces into nodes; unpaired asterisks become literal text.
fn finish(pieces: Vec<Piece>) -> Vec<InlineContent> {
    let mut out = Vec::new();
    let mut buf = String::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => buf.push_str(&text),
            Piece::Run { left, .. } => buf.push_str(&"*".repeat(left)),
            Piece::Node(node) => {
                flush(&mut buf, &mut out);
                out.push(node);
            }
        }
    }
    flush(&mut buf, &mut out);
    out
}

fn push_char(pieces: &mut Vec<Piece>, c: char) {
    match pieces.last_mut() {
        Some(Piece::Text(text)) => text.push(c),
        _ => pieces.push(Piece::Text(c.to_string())),
    }
}

/// Parse `[label](target)` starting at the `[` at `open`.
///
/// Returns the label characters, the trimmed target and the index after `)`.
fn bracket_paren(
    chars: &[char],
    open: usize,
    allow_empty_label: bool,
) -> Option<(&[char], String, usize)> {
    let close = find_char(chars, open + 1, ']')?;
    if chars.get(close + 1) != Some(&'(') {
        return None;
    }
    let end = find_char(chars, close + 2, ')')?;
    let label = &chars[open + 1..close];
    let target: String = chars[close + 2..end].iter().collect();
    let target = target.trim().to_string();
    if target.is_empty() || (!allow_empty_label && label.is_empty()) {
        return None;
    }
    Some((label, target, end + 1))
}

fn find_char(chars: &[char], from: usize, needle: char) -> Option<usize> {
    chars
        .get(from..)?
        .iter()
        .position(|c| *c == needle)
        .map(|pos| pos + from)
}

fn run_len(chars: &[char], start: usize) -> usize {
    chars[start..].iter().take_while(|c| **c == '*').count()
}

fn flush(buf: &mut String, out: &mut Vec<InlineContent>) {
    if !buf.is_empty() {
        out.push(InlineContent::Text(std::mem::take(buf)));
    }
}
