// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use futures_util::stream;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

use super::{inject_console, ConsoleHandle, ConsoleLayerState};
use crate::config::ConsoleConfig;
use crate::stack::NoStackSource;

const PAGE: &str = "<html><body><h1>Hi</h1></body></html>";

async fn index(console: ConsoleHandle) -> Html<&'static str> {
    console.log("handler ran");
    console.log_to("sql", "select 1");
    Html(PAGE)
}

async fn api(console: ConsoleHandle) -> Json<serde_json::Value> {
    console.log("api called");
    Json(json!({ "ok": true }))
}

async fn compressed() -> Response {
    (
        [(CONTENT_TYPE, "text/html"), (CONTENT_ENCODING, "gzip")],
        "not really gzip",
    )
        .into_response()
}

async fn binary() -> Response {
    ([(CONTENT_TYPE, "text/html")], vec![0xffu8, 0xfe, 0x00]).into_response()
}

const STREAMED_CHUNKS: [&str; 4] = [
    "<html><body><p>1 ",
    "streamed chunk 2 ",
    "streamed chunk 3 ",
    "</p></body></html>",
];

async fn streamed(console: ConsoleHandle) -> Response {
    console.log("streaming");
    let frames = STREAMED_CHUNKS.map(|chunk| Ok::<_, std::io::Error>(chunk.to_string()));
    (
        [(CONTENT_TYPE, "text/html")],
        Body::from_stream(stream::iter(frames)),
    )
        .into_response()
}

fn app(state: ConsoleLayerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api", get(api))
        .route("/compressed", get(compressed))
        .route("/binary", get(binary))
        .route("/streamed", get(streamed))
        .layer(middleware::from_fn_with_state(
            state.with_source(Arc::new(NoStackSource)),
            inject_console,
        ))
}

async fn get_path(router: Router, path: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn test_html_response_gets_console() {
    let (status, headers, body) = get_path(app(ConsoleLayerState::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<html><body><h1>Hi</h1>\n<!-- ##"));
    assert!(body.ends_with("</script>\n</body></html>"));
    assert_eq!(body.matches("### HackerConsole ###").count(), 1);
    assert!(body.contains("'handler&nbsp;ran<'+'br /'+'>\\n'"));
    assert!(body.contains("'sql'"));

    let length: usize = headers[CONTENT_LENGTH].to_str().unwrap().parse().unwrap();
    assert_eq!(length, body.len());
}

#[tokio::test]
async fn test_json_response_is_untouched() {
    let (status, headers, body) = get_path(app(ConsoleLayerState::default()), "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"ok":true}"#);
    assert_eq!(headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_encoded_and_binary_bodies_are_untouched() {
    let (_, headers, body) = get_path(app(ConsoleLayerState::default()), "/compressed").await;
    assert_eq!(body, "not really gzip");
    assert_eq!(headers[CONTENT_ENCODING], "gzip");

    let request = Request::builder().uri("/binary").body(Body::empty()).unwrap();
    let response = app(ConsoleLayerState::default()).oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), &[0xffu8, 0xfe, 0x00]);
}

#[tokio::test]
async fn test_disabled_console_passes_through() {
    let config = ConsoleConfig {
        enabled: false,
        ..Default::default()
    };
    let state = ConsoleLayerState::from_config(&config).unwrap();

    // handlers still get a console, the page is left alone
    let (status, _, body) = get_path(app(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PAGE);
}

#[tokio::test]
async fn test_oversized_page_is_untouched() {
    let config = ConsoleConfig {
        max_body_bytes: 10,
        ..Default::default()
    };
    let state = ConsoleLayerState::from_config(&config).unwrap();

    let (status, _, body) = get_path(app(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PAGE);
}

#[tokio::test]
async fn test_streamed_page_over_limit_is_untouched() {
    let config = ConsoleConfig {
        max_body_bytes: 30,
        ..Default::default()
    };
    let state = ConsoleLayerState::from_config(&config).unwrap();

    let (status, headers, body) = get_path(app(state), "/streamed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, STREAMED_CHUNKS.concat());
    assert!(!headers.contains_key(CONTENT_LENGTH));
}

#[tokio::test]
async fn test_streamed_page_within_limit_gets_console() {
    let (status, headers, body) = get_path(app(ConsoleLayerState::default()), "/streamed").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<html><body><p>1 streamed chunk 2 streamed chunk 3 </p>\n<!-- ##"));
    assert!(body.contains("'streaming<'+'br /'+'>\\n'"));
    let length: usize = headers[CONTENT_LENGTH].to_str().unwrap().parse().unwrap();
    assert_eq!(length, body.len());
}

#[tokio::test]
async fn test_each_request_gets_a_fresh_console() {
    let router = app(ConsoleLayerState::default());

    let (_, _, first) = get_path(router.clone(), "/").await;
    let (_, _, second) = get_path(router, "/").await;

    assert_eq!(first, second);
    assert_eq!(second.matches("handler&nbsp;ran").count(), 1);
}
