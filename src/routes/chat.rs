// ABOUTME: Chat route handlers for widget submissions and bootstrap data
// ABOUTME: Validates the anti-forgery nonce, runs the turn pipeline, and shapes the JSON envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Chat routes
//!
//! `POST /api/chat/submit` takes the widget's form-encoded submission and
//! returns the success envelope `{"success":true,"data":{...}}`; failures
//! are rendered by [`AppError`]'s response mapping as
//! `{"success":false,"data":"<message>"}`.
//!
//! `GET /api/chat/bootstrap` hands the widget a fresh nonce plus the model
//! settings it needs for display hints.

use crate::{
    errors::AppError,
    llm::model_token_ceiling,
    security::CHAT_NONCE_ACTION,
    server::ServerResources,
    services::chat_orchestration,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Form payload of a widget submission
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// The user's question
    #[serde(default)]
    pub user_input: String,
    /// Existing conversation to append to; anything that does not parse as
    /// a positive integer starts a new one
    #[serde(default)]
    pub conversation_id: String,
    /// Anti-forgery token from the bootstrap payload
    #[serde(default)]
    pub chatgpt_nonce: String,
}

impl SubmitRequest {
    /// Coerce the submitted conversation id, treating absent or
    /// non-numeric values as "new conversation"
    fn conversation_id(&self) -> i64 {
        self.conversation_id.trim().parse().unwrap_or(0)
    }
}

/// Payload of a successful submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitData {
    /// Generated reply text
    pub response_text: String,
    /// Conversation the turn was recorded in
    pub conversation_id: i64,
}

/// Payload of the widget bootstrap endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct BootstrapData {
    /// Fresh anti-forgery token
    pub nonce: String,
    /// Configured model name
    pub model: String,
    /// Configured completion token budget
    pub max_tokens: u32,
    /// Advisory ceiling for the configured model
    pub max_token_ceiling: u32,
}

/// Chat routes implementation
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat/submit", post(Self::submit))
            .route("/api/chat/bootstrap", get(Self::bootstrap))
            .with_state(resources)
    }

    /// Handle a widget submission
    async fn submit(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<SubmitRequest>,
    ) -> Result<Response, AppError> {
        resources
            .nonce
            .verify(&request.chatgpt_nonce, CHAT_NONCE_ACTION)?;

        let store = resources.database.conversations();
        let turn = chat_orchestration::run_turn(
            &store,
            &resources.completion,
            &request.user_input,
            request.conversation_id(),
        )
        .await?;

        info!(
            conversation_id = turn.conversation_id,
            response_len = turn.response_text.len(),
            "Chat turn completed"
        );

        let envelope = serde_json::json!({
            "success": true,
            "data": SubmitData {
                response_text: turn.response_text,
                conversation_id: turn.conversation_id,
            },
        });

        Ok((StatusCode::OK, Json(envelope)).into_response())
    }

    /// Hand the widget a nonce and display hints
    async fn bootstrap(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let model = resources.completion.model().to_owned();
        let envelope = serde_json::json!({
            "success": true,
            "data": BootstrapData {
                nonce: resources.nonce.create(CHAT_NONCE_ACTION),
                max_token_ceiling: model_token_ceiling(&model),
                max_tokens: resources.max_tokens,
                model,
            },
        });

        Ok((StatusCode::OK, Json(envelope)).into_response())
    }
}
