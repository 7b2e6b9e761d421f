//! Modal state for image and link insertion.
//!
//! One modal instance allows one upload in flight. Closing the modal does not
//! cancel the request; it bumps the modal's generation so that a response
//! arriving afterwards is recognized as stale and dropped.

use super::upload::{UploadError, UploadFile, Uploader, UPLOAD_FAILED_MESSAGE};
use super::{AssetError, AssetKind, InsertionRequest, UploadPolicy};

/// Proof that an upload was started by a given opening of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The URL was accepted; the modal closed and the asset is ready to insert.
    Completed(InsertionRequest),
    /// The upload failed; the modal stays open with its input intact.
    Failed,
    /// The response belonged to a closed modal and was ignored.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct AssetModal {
    kind: AssetKind,
    open: bool,
    url: String,
    label: String,
    error: Option<String>,
    uploading: bool,
    generation: u64,
}

impl AssetModal {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            open: false,
            url: String::new(),
            label: String::new(),
            error: None,
            uploading: false,
            generation: 0,
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Inline error message to show, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self) {
        if !self.open {
            self.reset();
            self.open = true;
        }
    }

    /// Close and tear down local state. Pending uploads become stale.
    pub fn close(&mut self) {
        self.open = false;
        self.reset();
        self.generation += 1;
    }

    fn reset(&mut self) {
        self.url.clear();
        self.label.clear();
        self.error = None;
        self.uploading = false;
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.error = None;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Confirm the typed URL. On success the modal closes and returns the request.
    pub fn confirm(&mut self) -> Result<InsertionRequest, AssetError> {
        if !self.open {
            return Err(AssetError::NotOpen);
        }
        match InsertionRequest::new(self.kind, &self.url, &self.label) {
            Ok(request) => {
                self.close();
                Ok(request)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Validate a picked file and mark an upload as in flight.
    pub fn begin_upload(
        &mut self,
        size: u64,
        mime: &str,
        policy: &UploadPolicy,
    ) -> Result<UploadTicket, AssetError> {
        if !self.open {
            return Err(AssetError::NotOpen);
        }
        if self.uploading {
            return Err(AssetError::UploadInFlight);
        }
        if let Err(err) = policy.validate_file(size, mime) {
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;
        self.uploading = true;
        Ok(UploadTicket {
            generation: self.generation,
        })
    }

    /// Apply the result of an upload started with `ticket`.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, UploadError>,
    ) -> UploadOutcome {
        if ticket.generation != self.generation || !self.uploading {
            tracing::warn!("Discarding upload response for a closed asset dialog");
            return UploadOutcome::Discarded;
        }
        self.uploading = false;

        match result {
            Ok(url) => match InsertionRequest::new(self.kind, &url, &self.label) {
                Ok(request) => {
                    self.close();
                    UploadOutcome::Completed(request)
                }
                Err(err) => {
                    tracing::warn!("Upload endpoint returned an unusable URL: {err}");
                    self.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
                    UploadOutcome::Failed
                }
            },
            Err(err) => {
                tracing::warn!("Upload failed: {err}");
                self.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
                UploadOutcome::Failed
            }
        }
    }

    /// Validate `file`, upload it synchronously and apply the result.
    pub fn upload_with(
        &mut self,
        uploader: &dyn Uploader,
        file: &UploadFile,
        policy: &UploadPolicy,
    ) -> Result<UploadOutcome, AssetError> {
        let ticket = self.begin_upload(file.size(), &file.mime, policy)?;
        let result = uploader.upload(file);
        Ok(self.finish_upload(ticket, result))
    }
}
