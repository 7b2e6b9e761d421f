//! Shared configuration loader for the Logbook toolchain.
//!
//! `defaults/logbook.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`LogbookConfig`].
//!
//! Layers, lowest first: embedded defaults, files in the order they were
//! added, `LOGBOOK_*` environment variables, explicit overrides. Environment
//! keys use `__` between sections, so `LOGBOOK_UPLOAD__ENDPOINT` sets
//! `upload.endpoint`; `LOGBOOK_UPLOAD__ALLOWED_TYPES` takes a comma list.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use logbook_babel::fonts::FontStyles;
use logbook_babel::{HtmlOptions, RenderVariant, UploadPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/logbook.default.toml");

/// Top-level configuration consumed by Logbook applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LogbookConfig {
    pub render: RenderConfig,
    pub upload: UploadConfig,
    pub store: StoreConfig,
}

/// Markdown rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub variant: VariantConfig,
    pub latin_font_style: String,
    pub fallback_font_style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VariantConfig {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "display")]
    Display,
}

impl From<VariantConfig> for RenderVariant {
    fn from(variant: VariantConfig) -> Self {
        match variant {
            VariantConfig::Standard => RenderVariant::Standard,
            VariantConfig::Display => RenderVariant::Display,
        }
    }
}

impl From<&RenderConfig> for FontStyles {
    fn from(config: &RenderConfig) -> Self {
        FontStyles {
            latin: config.latin_font_style.clone(),
            fallback: config.fallback_font_style.clone(),
        }
    }
}

impl From<&RenderConfig> for HtmlOptions {
    fn from(config: &RenderConfig) -> Self {
        HtmlOptions::new(config.variant.into()).with_fonts(config.into())
    }
}

/// Asset upload endpoint and limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub endpoint: String,
    #[serde(rename = "type")]
    pub upload_type: String,
    pub max_file_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl UploadConfig {
    /// The configured endpoint, if one is set.
    pub fn endpoint(&self) -> Option<&str> {
        let endpoint = self.endpoint.trim();
        (!endpoint.is_empty()).then_some(endpoint)
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        UploadPolicy {
            max_bytes: config.max_file_bytes,
            allowed_types: config
                .allowed_types
                .iter()
                .map(|mime| mime.to_ascii_lowercase())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub content_dir: PathBuf,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `LOGBOOK_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_environment(environment())
    }

    fn with_environment(mut self, env: Environment) -> Self {
        self.builder = self.builder.add_source(env);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LogbookConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("LOGBOOK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("upload.allowed_types")
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LogbookConfig, ConfigError> {
    Loader::new().build()
}
