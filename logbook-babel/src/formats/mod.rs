//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the editing-surface tree and its text representations.

pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod tree;

pub use html::{HtmlFormat, HtmlOptions, RenderVariant};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tree::TreeFormat;
