// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat-completions client against a local OpenAI-compatible stand-in

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use byob_search::llm::{CompletionRequest, LanguageModel, LlmConfig, ModelError, OpenAiChatClient};
use serde_json::{json, Value};
use std::net::SocketAddr;

/// Echoes the model, auth header and user message back as the completion
async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let content = format!(
        "{}|{}|{}|{}",
        body["model"].as_str().unwrap_or("-"),
        auth,
        body["messages"][1]["content"].as_str().unwrap_or("-"),
        body.get("temperature").map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
    );
    Json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/ok/chat/completions", post(completions))
        .route(
            "/down/chat/completions",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        )
        .route(
            "/blank/chat/completions",
            post(|| async {
                Json(json!({"choices": [{"message": {"role": "assistant", "content": ""}}]}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, prefix: &str) -> OpenAiChatClient {
    let config = LlmConfig {
        base_url: format!("http://{}/{}", addr, prefix),
        timeout_secs: 5,
    };
    OpenAiChatClient::new("sk-test", &config).unwrap()
}

#[tokio::test]
async fn test_completion_round_trip() {
    let addr = spawn_server().await;
    let request = CompletionRequest::new("gpt-4o", "Be brief", "hello").with_temperature(0.0);

    let text = client(addr, "ok").complete(&request).await.unwrap();
    assert_eq!(text, "gpt-4o|Bearer sk-test|hello|0.0");
}

#[tokio::test]
async fn test_unset_temperature_not_sent() {
    let addr = spawn_server().await;
    let request = CompletionRequest::new("gpt-4o-mini", "Be brief", "hi");

    let text = client(addr, "ok").complete(&request).await.unwrap();
    assert!(text.ends_with("|-"));
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let addr = spawn_server().await;
    let err = client(addr, "down")
        .complete(&CompletionRequest::new("gpt-4o", "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Api { status: 503, ref body } if body == "overloaded"));
}

#[tokio::test]
async fn test_blank_completion_is_distinct_failure() {
    let addr = spawn_server().await;
    let err = client(addr, "blank")
        .complete(&CompletionRequest::new("gpt-4o", "s", "u"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::EmptyCompletion));
}
