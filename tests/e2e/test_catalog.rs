use crate::helpers::{body_json, StubSpeechBackend, TestApp};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn it_should_list_the_curated_languages_with_english_first() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app.router.clone().oneshot(get("/api/languages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let languages = body.as_array().unwrap();
    assert_eq!(languages.len(), 7);
    assert_eq!(languages[0]["label"], "English");
    assert_eq!(languages[0]["code"], "en");
}

#[tokio::test]
async fn it_should_list_the_six_voice_variants() {
    let app = TestApp::new(StubSpeechBackend::succeeding()).await;

    let response = app.router.clone().oneshot(get("/api/voices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let voices = body.as_array().unwrap();
    assert_eq!(voices.len(), 6);
    assert_eq!(voices[0]["label"], "US English (Standard)");
    assert_eq!(voices[0]["host_tag"], "com");
}
