// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HttpContentFetcher against a local page server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};
use byob_search::search::content::{
    ContentFetchConfig, ContentFetcher, FetchError, HttpContentFetcher,
};
use std::net::SocketAddr;
use std::time::Duration;

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Qubit news</title>
    <style>body { color: red; }</style>
    <script>var tracking = "secret";</script>
  </head>
  <body>
    <h1>Error   correction</h1>
    <p>Logical qubits
       crossed a threshold.</p>
    <noscript>Enable JavaScript</noscript>
  </body>
</html>"#;

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE) }))
        .route("/blank", get(|| async { Html("<html><body>  <script>x()</script> </body></html>") }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone").into_response() }))
        .route("/moved", get(|| async { Redirect::temporary("/article") }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html("<p>late</p>")
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn local_fetcher() -> HttpContentFetcher {
    HttpContentFetcher::new(ContentFetchConfig {
        timeout_secs: 1,
        allow_private_hosts: true,
        ..ContentFetchConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_extracts_visible_text() {
    let addr = spawn_server().await;
    let url = format!("http://{}/article", addr);

    let content = local_fetcher().fetch(&url, 50_000).await.unwrap();

    assert_eq!(content.url, url);
    assert!(content.text.contains("Error correction"));
    assert!(content.text.contains("Logical qubits crossed a threshold."));
    assert!(!content.text.contains("tracking"));
    assert!(!content.text.contains("color: red"));
    assert!(!content.text.contains("Enable JavaScript"));
}

#[tokio::test]
async fn test_fetch_truncates_to_max_chars() {
    let addr = spawn_server().await;
    let content = local_fetcher()
        .fetch(&format!("http://{}/article", addr), 12)
        .await
        .unwrap();
    assert_eq!(content.text.chars().count(), 12);
}

#[tokio::test]
async fn test_non_success_status_is_absent() {
    let addr = spawn_server().await;
    let fetcher = local_fetcher();
    let url = format!("http://{}/missing", addr);

    assert!(fetcher.fetch(&url, 1000).await.is_none());
    assert!(matches!(
        fetcher.fetch_content(&url, 1000).await,
        Err(FetchError::HttpStatus(404, _))
    ));
}

#[tokio::test]
async fn test_page_without_text_is_absent() {
    let addr = spawn_server().await;
    let result = local_fetcher()
        .fetch_content(&format!("http://{}/blank", addr), 1000)
        .await;
    assert!(matches!(result, Err(FetchError::NoContent(_))));
}

#[tokio::test]
async fn test_redirect_followed() {
    let addr = spawn_server().await;
    let content = local_fetcher()
        .fetch(&format!("http://{}/moved", addr), 1000)
        .await
        .unwrap();
    assert!(content.text.contains("Logical qubits"));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let addr = spawn_server().await;
    let result = local_fetcher()
        .fetch_content(&format!("http://{}/slow", addr), 1000)
        .await;
    assert!(matches!(result, Err(FetchError::Timeout(_))));
}

#[tokio::test]
async fn test_private_hosts_refused_by_default() {
    let addr = spawn_server().await;
    let fetcher = HttpContentFetcher::new(ContentFetchConfig::default()).unwrap();

    let result = fetcher
        .fetch_content(&format!("http://{}/article", addr), 1000)
        .await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl(_))));
}
