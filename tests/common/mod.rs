//! Shared test utilities and fixtures
//!
//! Wiremock stand-ins for the `/models` and `/chat/completions` endpoints.

#![allow(dead_code)]

use playground_providers::{ApiConfig, Client};
use playground_types::ApiKey;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "gsk_integration";

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> Client {
    let config = ApiConfig::new(ApiKey::new(TEST_KEY)).with_base_url(server.uri());
    Client::new(config).expect("loopback base URL is accepted")
}

/// Mount a `/models` listing with the given ids.
pub async fn mount_models(server: &MockServer, ids: &[&str]) {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "object": "model", "owned_by": "test"}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": data
        })))
        .mount(server)
        .await;
}

/// Mount a failing `/models` endpoint.
pub async fn mount_models_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(status).set_body_string("service unavailable"))
        .mount(server)
        .await;
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

/// Mount a successful completion for every chat request.
pub async fn mount_chat_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(server)
        .await;
}

/// Mount an OpenAI-style error body for every chat request.
pub async fn mount_chat_error(server: &MockServer, status: u16, code: &str, message: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": {
                "message": message,
                "type": "invalid_request_error",
                "code": code
            }
        })))
        .mount(server)
        .await;
}

/// JSON bodies of every chat request the server has seen.
pub async fn chat_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == "/chat/completions")
        .map(|request| serde_json::from_slice(&request.body).expect("chat body is JSON"))
        .collect()
}
