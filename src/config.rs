// ABOUTME: Environment-driven configuration for the chat backend
// ABOUTME: Collects HTTP, database, completion API, and anti-forgery settings in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Server configuration loaded from environment variables
//!
//! Every setting has a default except the completion API key. A missing key
//! is not a startup failure; the chat endpoint reports it per request so the
//! rest of the server stays usable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default SQLite database URL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/chatbox.db";
/// Default completion API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com";
/// Default completion model
pub const DEFAULT_MODEL: &str = "text-davinci-003";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default completion token budget
pub const DEFAULT_MAX_TOKENS: u32 = 150;
/// Default outbound request timeout in seconds
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 20;

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Completion API configuration
    pub completion: CompletionConfig,
    /// Anti-forgery configuration
    pub security: SecurityConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or connection string)
    pub url: String,
}

/// Completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Bearer token for the completion API. `None` until the operator sets it;
    /// chat requests fail with a per-request error rather than at startup.
    pub api_key: Option<String>,
    /// Base URL of the completion API
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Completion token budget
    pub max_tokens: u32,
    /// Outbound request timeout
    pub timeout: Duration,
}

/// Anti-forgery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret mixed into nonce derivation. Generated per process when unset,
    /// which invalidates outstanding nonces across restarts.
    pub nonce_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            info!("No .env file found or failed to load: {}", e);
        }

        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; chat requests will be rejected until it is");
        }

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL)?,
            },
            completion: CompletionConfig {
                api_key,
                base_url: env_var_or("OPENAI_API_BASE_URL", DEFAULT_API_BASE_URL)?,
                model: env_var_or("CHATGPT_MODEL", DEFAULT_MODEL)?,
                temperature: env_var_or("CHATGPT_TEMPERATURE", &DEFAULT_TEMPERATURE.to_string())?
                    .parse::<f64>()
                    .context("Invalid CHATGPT_TEMPERATURE value")?
                    .clamp(0.0, 1.0),
                max_tokens: env_var_or("CHATGPT_MAX_TOKENS", &DEFAULT_MAX_TOKENS.to_string())?
                    .parse::<u32>()
                    .context("Invalid CHATGPT_MAX_TOKENS value")?
                    .clamp(1, 32_768),
                timeout: Duration::from_secs(
                    env_var_or(
                        "COMPLETION_TIMEOUT_SECS",
                        &DEFAULT_COMPLETION_TIMEOUT_SECS.to_string(),
                    )?
                    .parse()
                    .context("Invalid COMPLETION_TIMEOUT_SECS value")?,
                ),
            },
            security: SecurityConfig {
                nonce_secret: env::var("NONCE_SECRET")
                    .ok()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(crate::security::generate_secret),
            },
        };

        info!(
            http_port = config.http_port,
            database_url = %config.database.url,
            model = %config.completion.model,
            api_key_set = config.completion.api_key.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}
