// ABOUTME: Completion API types shared across the chat backend
// ABOUTME: Model family routing, message structures, and per-model token ceilings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! # Completion API layer
//!
//! The configured model name decides which wire format the outbound request
//! uses. Chat-family models (`gpt-3.5*`, `gpt-4*`) speak the role-based chat
//! completions format; everything else gets the legacy prompt-based
//! completions format. Routing is by substring so dated variants like
//! `gpt-3.5-turbo-0301` land in the right family without a lookup table.

mod openai;

pub use openai::OpenAiClient;

use serde::{Deserialize, Serialize};

/// Wire format family for a completion model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Role-based chat completions (`/v1/chat/completions`)
    Chat,
    /// Prompt-based legacy completions (`/v1/completions`)
    Legacy,
}

impl ModelFamily {
    /// Classify a model name into its wire format family
    #[must_use]
    pub fn for_model(model: &str) -> Self {
        if model.contains("gpt-3.5") || model.contains("gpt-4") {
            Self::Chat
        } else {
            Self::Legacy
        }
    }
}

/// Role of a message in a chat completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Advisory completion-token ceiling for a model
///
/// Mirrors the hint table the widget uses to warn operators about
/// over-budget `max_tokens` settings. Values are upper bounds on the
/// completion budget, not context window sizes. `gpt-4-32k` must match
/// before the plain `gpt-4` substring.
#[must_use]
pub fn model_token_ceiling(model: &str) -> u32 {
    if model.contains("gpt-4-32k") {
        32_768
    } else if model.contains("gpt-3.5") || model.contains("gpt-4") || model.contains("davinci") {
        4_096
    } else {
        // curie, babbage, ada, and anything unrecognized
        2_048
    }
}
