//! Asset insertion workflow
//!
//! Images and links reach an article through a modal: the author either
//! types a URL (plus alt text or label) or picks a local file that is sent to
//! the upload endpoint, whose returned URL is then used. Everything is
//! validated before any upload or insertion:
//!
//! - files larger than [`UploadPolicy::max_bytes`] (2 MiB, inclusive) are
//!   rejected with their size in MB to two decimals
//! - only `image/webp`, `image/jpeg` and `image/png` are accepted
//! - URLs must not be empty or whitespace only
//!
//! A validated [`InsertionRequest`] is spliced into the editing session at
//! the current selection (see [`crate::bridge::EditorSession::insert`]).

mod modal;
mod upload;

pub use modal::{AssetModal, UploadOutcome, UploadTicket};
#[cfg(feature = "http-upload")]
pub use upload::HttpUploader;
pub use upload::{UploadError, UploadFile, Uploader, UPLOAD_FAILED_MESSAGE};

use crate::ir::nodes::{Image, InlineContent, Link};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Default upload ceiling: 2 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 2 * BYTES_PER_MB;

/// MIME types accepted by default.
pub const DEFAULT_ALLOWED_TYPES: [&str; 3] = ["image/webp", "image/jpeg", "image/png"];

/// Validation failures. All of them are shown inline in the modal and are
/// recoverable by correcting the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("File is too large ({:.2}MB). Maximum size is {}MB.", megabytes(.size), limit_label(.max))]
    FileTooLarge { size: u64, max: u64 },
    #[error("Unsupported file type. Please choose a WebP, JPEG or PNG image.")]
    UnsupportedType { mime: String },
    #[error("Please enter a URL.")]
    EmptyUrl,
    #[error("An upload is already in progress.")]
    UploadInFlight,
    #[error("The asset dialog is not open.")]
    NotOpen,
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / BYTES_PER_MB as f64
}

fn limit_label(bytes: &u64) -> String {
    if bytes % BYTES_PER_MB == 0 {
        (bytes / BYTES_PER_MB).to_string()
    } else {
        format!("{:.2}", megabytes(bytes))
    }
}

/// Size and type limits for uploaded files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_FILE_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    /// Check a file before upload. Size is checked before type.
    pub fn validate_file(&self, size: u64, mime: &str) -> Result<(), AssetError> {
        if size > self.max_bytes {
            return Err(AssetError::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        let mime = mime.trim().to_ascii_lowercase();
        if !self.allowed_types.iter().any(|allowed| *allowed == mime) {
            return Err(AssetError::UnsupportedType { mime });
        }
        Ok(())
    }
}

/// Reject empty or whitespace-only URLs. Returns the trimmed URL.
pub fn validate_url(url: &str) -> Result<&str, AssetError> {
    let url = url.trim();
    if url.is_empty() {
        Err(AssetError::EmptyUrl)
    } else {
        Ok(url)
    }
}

/// Guess the MIME type of an image file from its extension.
pub fn mime_from_extension(path: &str) -> Option<&'static str> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();
    match extension.as_str() {
        "webp" => Some("image/webp"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Image,
    Link,
}

/// A validated asset ready to be spliced into the editing surface.
///
/// `label` is the alt text for images and the link text for links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRequest {
    pub kind: AssetKind,
    pub url: String,
    pub label: String,
}

impl InsertionRequest {
    pub fn new(kind: AssetKind, url: &str, label: &str) -> Result<Self, AssetError> {
        let url = validate_url(url)?;
        Ok(Self {
            kind,
            url: url.to_string(),
            label: label.trim().to_string(),
        })
    }

    pub fn image(url: &str, alt: &str) -> Result<Self, AssetError> {
        Self::new(AssetKind::Image, url, alt)
    }

    pub fn link(url: &str, label: &str) -> Result<Self, AssetError> {
        Self::new(AssetKind::Link, url, label)
    }

    /// The node to splice in. A link without a label shows its URL.
    pub fn into_inline(self) -> InlineContent {
        match self.kind {
            AssetKind::Image => InlineContent::Image(Image {
                src: self.url,
                alt: self.label,
            }),
            AssetKind::Link => {
                let text = if self.label.is_empty() {
                    self.url.clone()
                } else {
                    self.label
                };
                InlineContent::Link(Link {
                    href: self.url,
                    children: vec![InlineContent::Text(text)],
                })
            }
        }
    }

    /// Markdown snippet for this asset.
    pub fn to_markdown(&self) -> String {
        match self.kind {
            AssetKind::Image => format!("![{}]({})", self.label, self.url),
            AssetKind::Link if self.label.is_empty() => format!("[{0}]({0})", self.url),
            AssetKind::Link => format!("[{}]({})", self.label, self.url),
        }
    }
}
