//! Shared icon mapping for the tree visualization format
//!
//! Keeps node icons in one place so the tree view and its tests agree.

/// Get the Unicode icon for a given tree node type
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "ListItem" => "•",
        "Blockquote" => "❝",
        "CodeBlock" => "𝒱",
        "Image" => "▣",
        "Rule" => "⎯",
        "Container" => "➔",
        "Text" => "◦",
        "Bold" => "𝐁",
        "Italic" => "𝐼",
        "Code" => "ƒ",
        "Link" => "⊕",
        "LineBreak" => "↵",
        _ => "○",
    }
}
