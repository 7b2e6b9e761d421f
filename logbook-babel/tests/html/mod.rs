//! HTML format tests
//!
//! Display rendering, the font split, and editing-surface import.

mod export;
mod fonts;
mod import;
