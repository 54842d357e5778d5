// ABOUTME: HTTP client for OpenAI-style completion endpoints with model family routing
// ABOUTME: Sends chat or legacy completion requests and extracts the reply text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! # `OpenAI` completion client
//!
//! One client handles both wire formats. The model name in the configuration
//! picks the endpoint and payload shape per request; see
//! [`ModelFamily`](super::ModelFamily).
//!
//! Error classification matters to the widget: network failures (connect,
//! send, timeout, unreadable body) surface as transport errors, while a body
//! that arrives but lacks the expected choice structure surfaces as an
//! invalid-response error. The body is decoded regardless of HTTP status, so
//! an upstream error payload that still carries choices is used as-is.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{ChatMessage, ModelFamily};
use crate::config::CompletionConfig;
use crate::errors::{AppError, AppResult};

/// Connection timeout, separate from the overall request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Chat completions request payload
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

/// Legacy completions request payload
#[derive(Debug, Serialize)]
struct LegacyCompletionRequest {
    model: String,
    prompt: String,
    temperature: f64,
    max_tokens: u32,
}

/// Chat completions response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Legacy completions response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct LegacyCompletionResponse {
    #[serde(default)]
    choices: Vec<LegacyChoice>,
}

#[derive(Debug, Deserialize)]
struct LegacyChoice {
    text: Option<String>,
}

/// Client for `OpenAI`-style completion endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiClient {
    /// Create a client around the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: CompletionConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::internal(format!("Failed to create HTTP client: {e}")).with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// The configured model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether a bearer token is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Send the user's text to the completion API and return the reply text
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` when no API key is configured
    /// - `ExternalTransport` when the request cannot be sent or the body read
    /// - `ExternalInvalidResponse` when the body lacks the expected choice
    #[instrument(skip(self, user_text), fields(model = %self.config.model))]
    pub async fn complete(&self, user_text: &str) -> AppResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config_missing("API key not set"))?;

        let family = ModelFamily::for_model(&self.config.model);
        let (endpoint, payload) = match family {
            ModelFamily::Chat => (
                "v1/chat/completions",
                serde_json::to_value(ChatCompletionRequest {
                    model: self.config.model.clone(),
                    messages: vec![ChatMessage::user(user_text)],
                    temperature: self.config.temperature,
                    max_tokens: self.config.max_tokens,
                }),
            ),
            ModelFamily::Legacy => (
                "v1/completions",
                serde_json::to_value(LegacyCompletionRequest {
                    model: self.config.model.clone(),
                    prompt: user_text.to_owned(),
                    temperature: self.config.temperature,
                    max_tokens: self.config.max_tokens,
                }),
            ),
        };
        let payload = payload
            .map_err(|e| AppError::internal(format!("Failed to encode request: {e}")))?;

        debug!(endpoint, family = ?family, "Sending completion request");

        let response = self
            .client
            .post(self.api_url(endpoint))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Completion request failed: {}", e);
                AppError::transport("Error communicating with API").with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read completion response: {}", e);
            AppError::transport("Error communicating with API").with_source(e)
        })?;

        debug!(status = %status, body_len = body.len(), "Completion response received");

        // The body is decoded regardless of status; upstream error payloads
        // without the expected choices fall through to the shape error.
        let content = match family {
            ModelFamily::Chat => serde_json::from_str::<ChatCompletionResponse>(&body)
                .ok()
                .and_then(|r| r.choices.into_iter().next())
                .and_then(|c| c.message)
                .and_then(|m| m.content),
            ModelFamily::Legacy => serde_json::from_str::<LegacyCompletionResponse>(&body)
                .ok()
                .and_then(|r| r.choices.into_iter().next())
                .and_then(|c| c.text),
        };

        content.map(|text| text.trim().to_owned()).ok_or_else(|| {
            error!(
                status = %status,
                "Completion response missing expected choice: {}",
                body_snippet(&body)
            );
            AppError::invalid_response("Invalid response from API")
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }
}

/// Leading portion of an upstream body for log lines, truncated on a char
/// boundary so multibyte bodies never slice mid-character
fn body_snippet(body: &str) -> &str {
    const MAX_SNIPPET_BYTES: usize = 500;
    if body.len() <= MAX_SNIPPET_BYTES {
        return body;
    }
    let mut end = MAX_SNIPPET_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
