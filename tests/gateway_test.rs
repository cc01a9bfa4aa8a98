mod helpers;

use std::sync::atomic::Ordering;

use base64::{engine::general_purpose::STANDARD, Engine};
use helpers::StubModel;
use packrat::archive::types::Attachment;
use packrat::gateway::{
    Gateway, DOCUMENT_SUMMARY_FAILED, IMAGE_EXTRACTION_FAILED, NOTHING_TO_SUMMARIZE,
    SUMMARY_FAILED,
};
use packrat::ingest::process_attachments;

fn attachment(name: &str, mime_type: &str, bytes: &[u8]) -> Attachment {
    Attachment {
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        content: format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)),
    }
}

#[tokio::test]
async fn empty_input_never_reaches_the_model() {
    let stub = StubModel::ok();
    let calls = stub.calls.clone();
    let gateway = Gateway::new(Box::new(stub));

    assert_eq!(gateway.summarize("   ").await, NOTHING_TO_SUMMARIZE);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn remote_failure_resolves_to_the_fixed_string() {
    let gateway = Gateway::new(Box::new(StubModel::failing()));
    assert_eq!(gateway.summarize("real content").await, SUMMARY_FAILED);
}

#[tokio::test]
async fn attachments_process_in_submission_order() {
    let stub = StubModel::ok();
    let log = stub.log.clone();
    let gateway = Gateway::new(Box::new(stub));

    let attachments = vec![
        attachment("one.png", "image/png", b"one"),
        attachment("two.pdf", "application/pdf", b"two"),
        attachment("three.jpg", "image/jpeg", b"three"),
    ];

    let mut body = "intro".to_string();
    process_attachments(&gateway, &attachments, &mut body).await;

    // Calls arrived strictly in submission order.
    assert_eq!(
        *log.lock().unwrap(),
        vec!["file:image/png", "file:application/pdf", "file:image/jpeg"]
    );
    // Appends landed in the same order, blank-line separated.
    assert_eq!(
        body,
        "intro\n\ncontent of one\n\ncontent of two\n\ncontent of three"
    );
}

#[tokio::test]
async fn failed_attachment_processing_appends_type_specific_fallbacks() {
    let gateway = Gateway::new(Box::new(StubModel::failing()));

    let attachments = vec![
        attachment("scan.png", "image/png", b"img"),
        attachment("paper.pdf", "application/pdf", b"doc"),
    ];

    let mut body = String::new();
    process_attachments(&gateway, &attachments, &mut body).await;

    assert_eq!(
        body,
        format!("{IMAGE_EXTRACTION_FAILED}\n\n{DOCUMENT_SUMMARY_FAILED}")
    );
}

#[tokio::test]
async fn undecodable_payload_degrades_like_a_remote_failure() {
    let stub = StubModel::ok();
    let calls = stub.calls.clone();
    let gateway = Gateway::new(Box::new(stub));

    let broken = Attachment {
        name: "broken.png".to_string(),
        mime_type: "image/png".to_string(),
        content: "data:image/png;base64,***".to_string(),
    };

    let mut body = String::new();
    process_attachments(&gateway, &[broken], &mut body).await;

    assert_eq!(body, IMAGE_EXTRACTION_FAILED);
    // The model was never called for the broken payload.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn summary_memo_flow_stores_fallback_strings_too() {
    let (_tmp, mut store) = helpers::test_store();
    let article = store
        .create_article(helpers::draft("Host", "Tech", &[]))
        .unwrap();

    let gateway = Gateway::new(Box::new(StubModel::failing()));
    let summary = gateway.summarize("selected passage").await;

    // The result is always applied, degraded or not.
    let memo = store.add_memo(&article.id, summary.as_str(), true).unwrap();
    let stored = &store.get(&article.id).unwrap().memos[0];
    assert_eq!(stored.id, memo.id);
    assert_eq!(stored.content, SUMMARY_FAILED);
    assert!(stored.is_summary);
}
