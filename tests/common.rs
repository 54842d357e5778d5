// ABOUTME: Shared fixtures for integration tests
// ABOUTME: In-memory server resources and a mock completion API with request capture
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use gpt_chatbox::config::{CompletionConfig, DatabaseConfig, SecurityConfig, ServerConfig};
use gpt_chatbox::database::Database;
use gpt_chatbox::security::CHAT_NONCE_ACTION;
use gpt_chatbox::server::ServerResources;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Fixed nonce secret so tests can mint tokens deterministically
pub const TEST_NONCE_SECRET: &str = "test-nonce-secret";

/// What the mock completion API should do with incoming requests
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with a chat-format body carrying this text
    ChatOk(String),
    /// Reply with a legacy-format body carrying this text
    LegacyOk(String),
    /// Reply 200 with an empty choices array
    EmptyChoices,
    /// Reply 200 with a body that is not JSON
    MalformedBody,
    /// Sleep past the client timeout before answering
    Hang,
    /// Reply 500 but still include a chat-format choice
    ErrorStatusWithChoices(String),
    /// Reply 500 with a large multibyte error body and no choices
    OversizedMultibyteErrorBody,
}

/// One captured outbound request
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub body: Value,
}

struct MockState {
    behavior: MockBehavior,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// Handle to a running mock completion API
pub struct MockCompletionApi {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockCompletionApi {
    /// All requests the mock has received so far
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn mock_handler(
    path: &'static str,
    state: Arc<MockState>,
    body: Value,
) -> Response {
    state.requests.lock().unwrap().push(CapturedRequest {
        path: path.to_owned(),
        body,
    });

    match &state.behavior {
        MockBehavior::ChatOk(text) => Json(json!({
            "choices": [{"message": {"role": "assistant", "content": text}}],
            "model": "mock"
        }))
        .into_response(),
        MockBehavior::LegacyOk(text) => Json(json!({
            "choices": [{"text": text}],
            "model": "mock"
        }))
        .into_response(),
        MockBehavior::EmptyChoices => Json(json!({"choices": []})).into_response(),
        MockBehavior::MalformedBody => (StatusCode::OK, "not json").into_response(),
        MockBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({"choices": []})).into_response()
        }
        MockBehavior::ErrorStatusWithChoices(text) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": text}}]
            })),
        )
            .into_response(),
        MockBehavior::OversizedMultibyteErrorBody => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"message": "€".repeat(300)}})),
        )
            .into_response(),
    }
}

/// Start a mock completion API on an ephemeral port
pub async fn spawn_mock_api(behavior: MockBehavior) -> MockCompletionApi {
    let state = Arc::new(MockState {
        behavior,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                |State(state): State<Arc<MockState>>, Json(body): Json<Value>| async move {
                    mock_handler("/v1/chat/completions", state, body).await
                },
            ),
        )
        .route(
            "/v1/completions",
            post(
                |State(state): State<Arc<MockState>>, Json(body): Json<Value>| async move {
                    mock_handler("/v1/completions", state, body).await
                },
            ),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockCompletionApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Build server resources over an in-memory database, pointed at the given
/// completion API base URL
pub async fn create_test_resources(
    model: &str,
    api_key: Option<&str>,
    base_url: &str,
) -> Arc<ServerResources> {
    let config = ServerConfig {
        http_port: 0,
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
        },
        completion: CompletionConfig {
            api_key: api_key.map(str::to_owned),
            base_url: base_url.to_owned(),
            model: model.to_owned(),
            temperature: 0.7,
            max_tokens: 150,
            timeout: Duration::from_secs(2),
        },
        security: SecurityConfig {
            nonce_secret: TEST_NONCE_SECRET.to_owned(),
        },
    };

    let database = Database::new(&config.database.url).await.unwrap();
    Arc::new(ServerResources::new(&config, database).unwrap())
}

/// Mint a nonce the submit endpoint will accept
pub fn valid_nonce(resources: &ServerResources) -> String {
    resources.nonce.create(CHAT_NONCE_ACTION)
}
