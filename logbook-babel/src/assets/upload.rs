//! Upload collaborator
//!
//! The blob store is external: it accepts a multipart form with a `file`
//! field and a `type` discriminator and answers `{"url": "..."}`. Any
//! endpoint honoring that contract works.

use serde::Deserialize;
use thiserror::Error;

/// Message shown in the modal for every upload failure.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

#[derive(Debug, Error)]
pub enum UploadError {
    #[cfg(feature = "http-upload")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upload transport failed: {0}")]
    Transport(String),
    #[error("Upload endpoint returned status {0}")]
    Status(u16),
    #[error("Unexpected upload response: {0}")]
    InvalidResponse(String),
    #[error("Invalid upload endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// A local file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Sends a file to the blob store and returns its public URL.
pub trait Uploader {
    fn upload(&self, file: &UploadFile) -> Result<String, UploadError>;
}

#[derive(Debug, Deserialize)]
#[cfg_attr(not(feature = "http-upload"), allow(dead_code))]
struct UploadResponse {
    url: String,
}

#[cfg(feature = "http-upload")]
pub use http::HttpUploader;

#[cfg(feature = "http-upload")]
mod http {
    use super::{UploadError, UploadFile, UploadResponse, Uploader};
    use reqwest::blocking::multipart::{Form, Part};
    use url::Url;

    /// [`Uploader`] posting to an HTTP endpoint.
    #[derive(Debug, Clone)]
    pub struct HttpUploader {
        endpoint: Url,
        upload_type: String,
        client: reqwest::blocking::Client,
    }

    impl HttpUploader {
        /// `upload_type` is sent as the `type` form field (e.g. `blog`).
        pub fn new(endpoint: &str, upload_type: impl Into<String>) -> Result<Self, UploadError> {
            let parsed = Url::parse(endpoint).map_err(|e| UploadError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(UploadError::InvalidEndpoint {
                    endpoint: endpoint.to_string(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
            Ok(Self {
                endpoint: parsed,
                upload_type: upload_type.into(),
                client: reqwest::blocking::Client::new(),
            })
        }

        pub fn endpoint(&self) -> &Url {
            &self.endpoint
        }
    }

    impl Uploader for HttpUploader {
        fn upload(&self, file: &UploadFile) -> Result<String, UploadError> {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime)?;
            let form = Form::new()
                .part("file", part)
                .text("type", self.upload_type.clone());

            tracing::debug!(endpoint = %self.endpoint, size = file.size(), "Uploading asset");
            let response = self
                .client
                .post(self.endpoint.clone())
                .multipart(form)
                .send()?;

            let status = response.status();
            if !status.is_success() {
                return Err(UploadError::Status(status.as_u16()));
            }
            let body: UploadResponse = response
                .json()
                .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;
            Ok(body.url)
        }
    }

}
