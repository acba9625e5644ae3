use crate::helpers::{body_bytes, body_json, convert_request, StubSpeechBackend, TestApp};

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[tokio::test]
async fn it_should_convert_a_plain_text_document() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(
            Some(("text/plain", b"Hello   world\n\nfoo")),
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "audio/mpeg"
    );
    assert_eq!(response.headers().get("x-character-count").unwrap(), "15");
    assert_eq!(response.headers().get("x-language").unwrap(), "en");
    assert_eq!(response.headers().get("x-voice").unwrap(), "com");
    assert!(response.headers().get("x-request-id").is_some());

    // The stub echoes the normalized text it was given.
    let audio = body_bytes(response).await;
    assert_eq!(audio, b"audio:Hello world foo");
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn it_should_honor_language_and_voice_selections() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(
            Some(("text/plain", b"Hola mundo")),
            Some("Spanish"),
            Some("UK English (Accent)"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-language").unwrap(), "es");
    assert_eq!(response.headers().get("x-voice").unwrap(), "co.uk");
}

#[tokio::test]
async fn it_should_reject_unsupported_file_types() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(Some(("image/png", b"\x89PNG")), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Unsupported file type"),
        "unexpected message: {}",
        body
    );
}

#[tokio::test]
async fn it_should_report_textless_documents_distinctly_from_unreadable_ones() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    // Whitespace-only document: readable, but nothing to synthesize.
    let response = app
        .router
        .clone()
        .oneshot(convert_request(Some(("text/plain", b"  \n\t  ")), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Could not read any text"));

    // Corrupt DOCX: unreadable, different message category.
    let response = app
        .router
        .clone()
        .oneshot(convert_request(
            Some((DOCX_CONTENT_TYPE, b"not a zip container")),
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Could not read your file"));
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn it_should_not_invoke_synthesis_for_a_textless_pdf() {
    let backend = StubSpeechBackend::succeeding();
    let app = TestApp::new(backend.clone()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(
            Some(("application/pdf", &pdf_without_text())),
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Could not read any text"));
    assert_eq!(backend.calls(), 0);
}

/// Well-formed one-page PDF whose page carries no text operations.
fn pdf_without_text() -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn it_should_reject_unknown_selections() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(
            Some(("text/plain", b"Hello")),
            Some("Klingon"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Klingon"));
}

#[tokio::test]
async fn it_should_surface_backend_rejections_with_their_diagnostic() {
    let app = TestApp::new(StubSpeechBackend::rejecting(
        "404 Not Found: no voice for xx via fr host",
    ))
    .await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(Some(("text/plain", b"Hello")), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Could not generate audio"));
    assert!(
        message.contains("no voice for xx via fr host"),
        "backend diagnostic lost: {}",
        message
    );
    assert_eq!(app.staging_entries(), 0);
}

#[tokio::test]
async fn it_should_require_a_document_part() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(None, Some("English"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("document"));
}

#[tokio::test]
async fn it_should_reject_an_empty_document_part() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app
        .router
        .clone()
        .oneshot(convert_request(Some(("text/plain", b"")), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
