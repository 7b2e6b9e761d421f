//! The seam between the registry and each text representation of an article.

use crate::error::{FormatError, Operation};
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// A named text representation of the editing-surface [`Document`].
///
/// A format declares which directions it handles; the default method bodies
/// refuse with [`FormatError::Unsupported`], so a serialize-only format such
/// as the tree view only writes `name`, `supports_serialization` and
/// `serialize`.
pub trait Format: Send + Sync {
    /// Registry key, also accepted by the CLI's `--from`/`--to`.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Extensions (no leading dot) this format is detected from.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::unsupported(self.name(), Operation::Parse))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::unsupported(self.name(), Operation::Serialize))
    }

    /// Serialize with string-keyed knobs (`variant`, `standalone`, ...).
    /// Formats without knobs accept an empty map only.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if !options.is_empty() {
            return Err(FormatError::unsupported(self.name(), Operation::Options));
        }
        self.serialize(doc)
    }
}
