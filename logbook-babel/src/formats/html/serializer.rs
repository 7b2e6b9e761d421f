//! HTML serialization (tree → display markup)
//!
//! Pipeline: IR tree → Events → RcDom (HTML DOM tree) → HTML string
//!
//! Output is a fragment: one top-level element per block, joined by
//! newlines. Paragraphs that end up holding nothing but whitespace are
//! removed from the DOM before serialization.

use super::{escape_text, HtmlOptions, RenderVariant};
use crate::common::nested_to_flat::tree_to_events;
use crate::error::FormatError;
use crate::fonts::{split_runs, FontStyles};
use crate::ir::events::Event;
use crate::ir::nodes::{CodeBlock, Document, Image, InlineContent};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Headings up to this level get the display font split.
const FONT_SPLIT_MAX_LEVEL: usize = 3;

/// Render a document tree to an HTML fragment.
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    // Step 1: IR → Events
    let events = tree_to_events(doc);

    // Step 2: Events → RcDom
    let dom = build_html_dom(&events, options)?;

    // Step 3: RcDom → HTML string
    serialize_dom(&dom)
}

/// Render a complete standalone HTML page with embedded CSS.
pub fn serialize_to_html_document(
    doc: &Document,
    title: &str,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let body = serialize_to_html(doc, options)?;
    Ok(wrap_in_document(&body, title, options))
}

/// Build an HTML DOM tree from IR events
fn build_html_dom(events: &[Event], options: &HtmlOptions) -> Result<RcDom, FormatError> {
    let dom = RcDom::default();
    let root = create_element("div", vec![("class", "article-content")]);

    let mut current_parent: Handle = root.clone();
    let mut parent_stack: Vec<Handle> = vec![];

    // Font styles to split text with while inside a display heading
    let mut split_fonts: Option<&FontStyles> = None;

    for event in events {
        match event {
            Event::StartDocument | Event::EndDocument => {}

            Event::StartHeading(level) => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                open(&mut current_parent, &mut parent_stack, create_element(&tag, vec![]));
                if options.variant == RenderVariant::Display && *level <= FONT_SPLIT_MAX_LEVEL {
                    split_fonts = Some(&options.fonts);
                }
            }

            Event::EndHeading(_) => {
                split_fonts = None;
                close(&mut current_parent, &mut parent_stack, "heading")?;
            }

            Event::StartParagraph => {
                open(&mut current_parent, &mut parent_stack, create_element("p", vec![]));
            }

            Event::EndParagraph => {
                let paragraph = current_parent.clone();
                close(&mut current_parent, &mut parent_stack, "paragraph")?;
                if is_blank(&paragraph) {
                    current_parent.children.borrow_mut().pop();
                }
            }

            Event::StartListItem { ordered } => {
                let class = if *ordered {
                    "list-item list-decimal"
                } else {
                    "list-item list-disc"
                };
                open(
                    &mut current_parent,
                    &mut parent_stack,
                    create_element("li", vec![("class", class)]),
                );
            }

            Event::EndListItem => close(&mut current_parent, &mut parent_stack, "list item")?,

            Event::StartBlockquote => {
                open(
                    &mut current_parent,
                    &mut parent_stack,
                    create_element("blockquote", vec![]),
                );
            }

            Event::EndBlockquote => close(&mut current_parent, &mut parent_stack, "blockquote")?,

            Event::StartContainer => {
                open(&mut current_parent, &mut parent_stack, create_element("div", vec![]));
            }

            Event::EndContainer => close(&mut current_parent, &mut parent_stack, "container")?,

            Event::CodeBlock(CodeBlock { language, text }) => {
                let pre = create_element("pre", vec![]);
                let class = language.as_ref().map(|lang| format!("language-{lang}"));
                let code_attrs = match &class {
                    Some(class) => vec![("class", class.as_str())],
                    None => vec![],
                };
                let code = create_element("code", code_attrs);
                code.children.borrow_mut().push(create_text(text));
                pre.children.borrow_mut().push(code);
                current_parent.children.borrow_mut().push(pre);
            }

            Event::Image(image) => {
                current_parent.children.borrow_mut().push(create_image(image));
            }

            Event::Rule => {
                current_parent
                    .children
                    .borrow_mut()
                    .push(create_element("hr", vec![]));
            }

            Event::Inline(inline) => add_inline_to_node(&current_parent, inline, split_fonts),
        }
    }

    dom.document.children.borrow_mut().push(root);
    Ok(dom)
}

fn open(current_parent: &mut Handle, parent_stack: &mut Vec<Handle>, element: Handle) {
    current_parent.children.borrow_mut().push(element.clone());
    parent_stack.push(current_parent.clone());
    *current_parent = element;
}

fn close(
    current_parent: &mut Handle,
    parent_stack: &mut Vec<Handle>,
    what: &str,
) -> Result<(), FormatError> {
    *current_parent = parent_stack
        .pop()
        .ok_or_else(|| FormatError::SerializationError(format!("Unbalanced {what} end")))?;
    Ok(())
}

/// True when an element holds only whitespace text.
fn is_blank(element: &Handle) -> bool {
    element.children.borrow().iter().all(|child| match &child.data {
        NodeData::Text { contents } => contents.borrow().trim().is_empty(),
        _ => false,
    })
}

/// Add inline content to an HTML node
fn add_inline_to_node(parent: &Handle, inline: &InlineContent, split_fonts: Option<&FontStyles>) {
    match inline {
        InlineContent::Text(text) => match split_fonts {
            Some(styles) => {
                for run in split_runs(text) {
                    let span = create_element("span", vec![("style", styles.style_for(run.class))]);
                    span.children.borrow_mut().push(create_text(run.text));
                    parent.children.borrow_mut().push(span);
                }
            }
            None => parent.children.borrow_mut().push(create_text(text)),
        },

        InlineContent::Bold(children) => {
            let strong = create_element("strong", vec![]);
            parent.children.borrow_mut().push(strong.clone());
            for child in children {
                add_inline_to_node(&strong, child, split_fonts);
            }
        }

        InlineContent::Italic(children) => {
            let em = create_element("em", vec![]);
            parent.children.borrow_mut().push(em.clone());
            for child in children {
                add_inline_to_node(&em, child, split_fonts);
            }
        }

        InlineContent::Code(code_text) => {
            let code = create_element("code", vec![]);
            code.children.borrow_mut().push(create_text(code_text));
            parent.children.borrow_mut().push(code);
        }

        InlineContent::Link(link) => {
            let anchor = create_element("a", vec![("href", link.href.as_str())]);
            parent.children.borrow_mut().push(anchor.clone());
            for child in &link.children {
                add_inline_to_node(&anchor, child, split_fonts);
            }
        }

        InlineContent::Image(image) => parent.children.borrow_mut().push(create_image(image)),

        InlineContent::LineBreak => parent
            .children
            .borrow_mut()
            .push(create_element("br", vec![])),
    }
}

fn create_image(image: &Image) -> Handle {
    create_element(
        "img",
        vec![("src", image.src.as_str()), ("alt", image.alt.as_str())],
    )
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the inner content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let root = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut blocks = Vec::new();
    for child in root.children.borrow().iter() {
        let mut output = Vec::new();
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        let block = String::from_utf8(output).map_err(|e| {
            FormatError::SerializationError(format!("UTF-8 conversion failed: {e}"))
        })?;
        blocks.push(block);
    }

    Ok(blocks.join("\n"))
}

/// Wrap the content in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let article_css = include_str!("../../../css/article.css");
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = escape_text(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="logbook-babel">
  <title>{escaped_title}</title>
  <style>
{article_css}
{custom_css}
  </style>
</head>
<body>
<article class="article-content">
{body_html}
</article>
</body>
</html>"#
    )
}
