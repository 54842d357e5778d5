// ABOUTME: Chat turn orchestration: input validation, completion dispatch, persistence
// ABOUTME: Domain steps behind the submit handler, usable without the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! One submission is one turn: validate the text, fetch the completion,
//! persist the exchange. Each step is a hard stop; a completion that cannot
//! be persisted is discarded and the turn fails.

use crate::database::ConversationStore;
use crate::errors::{AppError, AppResult};
use crate::llm::OpenAiClient;

/// Number of leading words kept when deriving a conversation title
const TITLE_WORDS: usize = 5;

/// Result of a successful chat turn
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// Generated reply text
    pub response_text: String,
    /// The conversation the turn was recorded in
    pub conversation_id: i64,
}

/// Validate and normalize the submitted text
///
/// # Errors
///
/// Returns an invalid-input error when the text is missing or whitespace
pub fn validate_input(raw: &str) -> AppResult<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Invalid input"));
    }
    Ok(trimmed)
}

/// Derive a conversation title from the opening words of the first question
///
/// Whitespace runs collapse to single spaces; anything past the word limit
/// is replaced by an ellipsis.
#[must_use]
pub fn derive_title(input: &str) -> String {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.len() > TITLE_WORDS {
        format!("{}...", words[..TITLE_WORDS].join(" "))
    } else {
        words.join(" ")
    }
}

/// Format one exchange as a flat-text turn block
#[must_use]
pub fn format_turn(question: &str, answer: &str) -> String {
    format!("User: {question}\n\nChatGPT: {answer}")
}

/// Record a completed exchange, appending to an existing conversation or
/// creating a new one
///
/// A positive id must resolve; it is never silently replaced by a new
/// record. Zero or negative ids start a fresh conversation.
///
/// # Errors
///
/// Returns a not-found error for an unresolvable id, or a database error
/// when the write fails
pub async fn persist_turn(
    store: &ConversationStore,
    conversation_id: i64,
    question: &str,
    answer: &str,
) -> AppResult<i64> {
    let turn = format_turn(question, answer);

    if conversation_id > 0 {
        let record = store
            .append(conversation_id, &format!("\n\n{turn}"))
            .await?;
        Ok(record.id)
    } else {
        let record = store.create(&derive_title(question), &turn).await?;
        Ok(record.id)
    }
}

/// Run a full chat turn: validate, complete, persist
///
/// Validation and configuration failures stop the turn before any outbound
/// call; the store is only touched once a reply has arrived.
///
/// # Errors
///
/// Propagates the first failing step with its widget-facing message
pub async fn run_turn(
    store: &ConversationStore,
    client: &OpenAiClient,
    raw_input: &str,
    conversation_id: i64,
) -> AppResult<ChatTurn> {
    let question = validate_input(raw_input)?;
    let answer = client.complete(question).await?;
    let conversation_id = persist_turn(store, conversation_id, question, &answer).await?;

    Ok(ChatTurn {
        response_text: answer,
        conversation_id,
    })
}
