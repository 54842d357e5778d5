// ABOUTME: Database operations for flat-text chat conversation records
// ABOUTME: Create, fetch, and append-only body growth keyed by integer id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// Database representation of a conversation
///
/// The body is a single flat text document; each turn is appended as a
/// `User:`/`ChatGPT:` block. There is no per-message table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Unique conversation ID (always > 0)
    pub id: i64,
    /// Conversation title, derived from the opening words
    pub title: String,
    /// Full conversation text
    pub body: String,
    /// When the conversation was created (ISO 8601)
    pub created_at: String,
    /// When the conversation was last updated (ISO 8601)
    pub updated_at: String,
}

/// Conversation database operations
pub struct ConversationStore {
    pool: SqlitePool,
}

impl ConversationStore {
    /// Create a new conversation store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new conversation with an initial body
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(&self, title: &str, body: &str) -> AppResult<ConversationRecord> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO conversations (title, body, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ",
        )
        .bind(title)
        .bind(body)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database("Error saving conversation").with_source(e)
        })?;

        Ok(ConversationRecord {
            id: result.last_insert_rowid(),
            title: title.to_owned(),
            body: body.to_owned(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a conversation by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: i64) -> AppResult<Option<ConversationRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, title, body, created_at, updated_at
            FROM conversations
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("Error saving conversation").with_source(e))?;

        Ok(row.map(|r| ConversationRecord {
            id: r.get("id"),
            title: r.get("title"),
            body: r.get("body"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    /// Append text to an existing conversation body
    ///
    /// The concatenation happens in SQL so the body only ever grows.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the id does not resolve, or a database
    /// error if the update fails
    pub async fn append(&self, id: i64, text: &str) -> AppResult<ConversationRecord> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            UPDATE conversations
            SET body = body || $1, updated_at = $2
            WHERE id = $3
            ",
        )
        .bind(text)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database("Error saving conversation").with_source(e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Invalid conversation ID"));
        }

        self.get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid conversation ID"))
    }

    /// Count stored conversations
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM conversations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database("Error saving conversation").with_source(e))?;

        Ok(row.get("count"))
    }
}
