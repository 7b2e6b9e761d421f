//! Lookup of formats by name and by file extension.
//!
//! The CLI resolves `--from`/`--to` through here, and falls back to the input
//! file's extension when `--from` is omitted. Extensions are matched
//! case-insensitively (`POST.MD` is Markdown).

use crate::error::{FormatError, Operation};
use crate::format::Format;
use crate::formats::html::HtmlOptions;
use crate::ir::nodes::Document;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
    /// Lowercased extension → format name
    extensions: HashMap<String, String>,
}

impl FormatRegistry {
    /// An empty registry. See [`FormatRegistry::with_defaults`] for the usual set.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
            extensions: HashMap::new(),
        }
    }

    /// Add `format`, replacing any format registered under the same name.
    /// Its extensions take over from earlier claims.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_string();
        self.extensions.retain(|_, owner| *owner != name);
        for ext in format.file_extensions() {
            self.extensions.insert(ext.to_ascii_lowercase(), name.clone());
        }
        self.formats.insert(name, Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the format owning `filename`'s extension, if any.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let ext = Path::new(filename).extension()?.to_str()?;
        self.extensions.get(&ext.to_ascii_lowercase()).cloned()
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::unsupported(format, Operation::Parse));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::unsupported(format, Operation::Serialize));
        }
        fmt.serialize_with_options(doc, options)
    }

    /// Parse `source` as `from` and write it out as `to`.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        // Fail on an unknown target before doing any parsing work.
        self.get(to)?;
        let doc = self.parse(source, from)?;
        tracing::debug!(from, to, blocks = doc.children.len(), "Converting document");
        self.serialize_with_options(&doc, to, options)
    }

    /// Markdown, HTML (default display options), tree and JSON.
    pub fn with_defaults() -> Self {
        Self::with_html_options(HtmlOptions::default())
    }

    /// The default set, with HTML rendered using `options`.
    pub fn with_html_options(options: HtmlOptions) -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::html::HtmlFormat::new(options));
        registry.register(crate::formats::tree::TreeFormat);
        registry.register(crate::formats::json::JsonFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
