//! Upload limits and URL checks as seen through the modal.

use logbook_babel::assets::{
    validate_url, AssetError, AssetKind, AssetModal, UploadPolicy, UPLOAD_FAILED_MESSAGE,
};
use logbook_babel::assets::{UploadError, UploadFile, UploadOutcome, Uploader};

struct Unreachable;

impl Uploader for Unreachable {
    fn upload(&self, _file: &UploadFile) -> Result<String, UploadError> {
        Err(UploadError::Transport("connection refused".to_string()))
    }
}

#[test]
fn test_exact_limit_is_accepted() {
    let policy = UploadPolicy::default();
    assert_eq!(policy.max_bytes, 2_097_152);
    assert!(policy.validate_file(2_097_152, "image/jpeg").is_ok());
}

#[test]
fn test_one_byte_over_is_rejected() {
    let err = UploadPolicy::default()
        .validate_file(2_097_153, "image/jpeg")
        .unwrap_err();
    assert_eq!(
        err,
        AssetError::FileTooLarge {
            size: 2_097_153,
            max: 2_097_152
        }
    );
    assert!(err.to_string().contains("2.00MB"));
}

#[test]
fn test_gif_is_not_allowed() {
    assert!(matches!(
        UploadPolicy::default().validate_file(100, "image/gif"),
        Err(AssetError::UnsupportedType { .. })
    ));
}

#[test]
fn test_whitespace_url_rejected() {
    assert_eq!(validate_url(" \t "), Err(AssetError::EmptyUrl));
}

#[test]
fn test_transport_failure_allows_resubmission() {
    let mut modal = AssetModal::new(AssetKind::Image);
    modal.open();
    modal.set_label("Bow");
    let file = UploadFile::new("bow.webp", "image/webp", vec![1, 2, 3]);
    let policy = UploadPolicy::default();

    let outcome = modal.upload_with(&Unreachable, &file, &policy).unwrap();
    assert_eq!(outcome, UploadOutcome::Failed);
    assert_eq!(modal.error(), Some(UPLOAD_FAILED_MESSAGE));
    assert_eq!(modal.label(), "Bow");

    // The trigger is enabled again after a failure.
    assert!(modal.begin_upload(file.size(), &file.mime, &policy).is_ok());
}
