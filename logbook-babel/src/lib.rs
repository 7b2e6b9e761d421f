//! Article content editing for Logbook
//!
//!     This crate holds everything between an article's canonical Markdown and what an author
//!     or reader sees: the Markdown renderer used by the public article page and the admin
//!     preview, the bridge that keeps a WYSIWYG editing surface and the Markdown in sync, and
//!     the workflow that validates and inserts images and links.
//!
//!     This is a pure lib: it powers the logbook cli but is shell agnostic, that is no code
//!     should be written that supposes a shell environment, be it to std print, env vars etc.
//!     Logging goes through `tracing`; installing a subscriber is up to the caller.
//!
//! Architecture
//!
//!     Every conversion goes through one tree (./ir/nodes.rs), the editing-surface tree. Formats
//!     only translate between their own syntax and that tree, or its flat event stream
//!     (./ir/events.rs) when a format is easier to read or write as a sequence. Rebuilding the
//!     tree from events and flattening it again is done once, in ./common.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # canonical Markdown: inline.rs, parser.rs, serializer.rs
//!     │   ├── html                # display markup out, editing-surface markup in
//!     │   ├── tree                # debug tree view
//!     │   └── json                # serde form of the tree
//!     ├── fonts.rs                # display-font split for headings
//!     ├── bridge                  # load/save conversions and EditorSession
//!     ├── assets                  # validation, modal state, upload collaborator
//!     ├── article.rs              # article record, slugs, AdminToken
//!     ├── store.rs                # ContentStore and the file-backed store
//!     ├── ir                      # Intermediate Representation
//!     └── common                  # event stream ⇄ tree
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod (see tests/lib.rs).
//!
//! Rendering
//!
//!     Markdown is read by a structural parser: lines are classified into blocks first, then the
//!     inline spans of each block are parsed. Paragraphs are simply the lines no other block
//!     claimed, so no block is ever re-wrapped in a paragraph. The HTML renderer has two
//!     variants; the display variant splits h1–h3 text into Latin and non-Latin runs so the
//!     display typeface only applies where it has glyphs (./fonts.rs).
//!
//! Library Choices
//!
//!     HTML is built and read with html5ever and markup5ever_rcdom, so escaping on the way out
//!     and parsing on the way in behave like a browser. The upload collaborator uses reqwest
//!     (behind the `http-upload` feature). Markdown is parsed in-house: the dialect is
//!     line-oriented and much smaller than CommonMark.
//!
pub mod article;
pub mod assets;
pub mod bridge;
pub mod error;
pub mod fonts;
pub mod format;
pub mod formats;
pub mod registry;
pub mod store;

pub mod common;
pub mod ir;

pub use article::{slugify, AdminToken, Article};
pub use assets::{AssetError, AssetKind, AssetModal, InsertionRequest, UploadPolicy};
pub use bridge::{
    display_tree_to_markdown, markdown_to_display_tree, render_markdown, EditorSession, Selection,
};
pub use error::FormatError;
pub use format::Format;
pub use formats::html::{HtmlOptions, RenderVariant};
pub use registry::FormatRegistry;
pub use store::{ContentStore, FileContentStore, StoreError};
