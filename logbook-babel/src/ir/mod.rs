//! Intermediate Representation (IR) for Logbook articles.
//!
//! The node tree is the editing-surface model; the event stream is the flat
//! form used by the Markdown parser and the HTML serializer.

pub mod events;
pub mod nodes;
