//! Editing-session behaviour seen from the article holder.

use logbook_babel::assets::{
    AssetKind, AssetModal, UploadError, UploadFile, UploadOutcome, UploadPolicy, Uploader,
};
use logbook_babel::bridge::{EditorSession, Selection};
use logbook_babel::InsertionRequest;
use std::cell::RefCell;
use std::rc::Rc;

struct StubStore;

impl Uploader for StubStore {
    fn upload(&self, file: &UploadFile) -> Result<String, UploadError> {
        Ok(format!("https://cdn.example.com/{}", file.name))
    }
}

fn session_with_log(markdown: &str) -> (EditorSession, Rc<RefCell<String>>) {
    let held = Rc::new(RefCell::new(markdown.to_string()));
    let sink = Rc::clone(&held);
    let session = EditorSession::new(markdown).with_listener(move |md: &str| {
        *sink.borrow_mut() = md.to_string();
    });
    (session, held)
}

#[test]
fn test_last_write_wins() {
    let (mut session, held) = session_with_log("## Log");
    session.select(Selection::caret(0, 3)).unwrap();
    session.insert_text("book");
    session.insert_text(" entries");
    assert_eq!(*held.borrow(), "## Logbook entries");
    assert_eq!(session.markdown(), "## Logbook entries");
}

#[test]
fn test_upload_then_insert() {
    let (mut session, held) = session_with_log("Before after");
    session.select(Selection::caret(0, 7)).unwrap();

    let mut modal = AssetModal::new(AssetKind::Image);
    modal.open();
    modal.set_label("Deck plan");
    let file = UploadFile::new("deck.png", "image/png", vec![0; 1024]);
    let outcome = modal
        .upload_with(&StubStore, &file, &UploadPolicy::default())
        .unwrap();

    let UploadOutcome::Completed(request) = outcome else {
        panic!("upload should complete");
    };
    assert!(session.insert(request));
    assert_eq!(
        *held.borrow(),
        "Before \n![Deck plan](https://cdn.example.com/deck.png)\nafter"
    );
}

#[test]
fn test_insert_with_unfocused_editor_keeps_markdown() {
    let (mut session, held) = session_with_log("Body");
    let request = InsertionRequest::image("/a.png", "a").unwrap();
    assert!(!session.insert(request));
    assert_eq!(*held.borrow(), "Body");
    assert_eq!(session.revision(), 0);
}

#[test]
fn test_one_serialization_per_edit() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut session = EditorSession::new("a\nb\nc").with_listener(move |_: &str| {
        *counter.borrow_mut() += 1;
    });

    session.select(Selection::new(1, 0, 1)).unwrap();
    assert!(session.delete_selection());
    assert!(session.insert_text("B"));
    session.remove_block(2).unwrap();

    assert_eq!(*calls.borrow(), 3);
    assert_eq!(session.revision(), 3);
    assert_eq!(session.markdown(), "a\n\nB");
}
