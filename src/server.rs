// ABOUTME: Shared resource container and HTTP server entry point
// ABOUTME: Wires the database, completion client, and nonce validator into the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! # Server resources and runtime
//!
//! [`ServerResources`] holds everything the handlers share: the database,
//! the completion client (with its reqwest connection pool), and the nonce
//! validator. Handlers receive it as axum state behind one `Arc`.

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::llm::OpenAiClient;
use crate::routes;
use crate::security::NonceValidator;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Centralized resource container for dependency injection
pub struct ServerResources {
    /// Conversation storage
    pub database: Database,
    /// Completion API client
    pub completion: OpenAiClient,
    /// Anti-forgery nonce validator
    pub nonce: NonceValidator,
    /// Configured completion token budget, exposed to the widget
    pub max_tokens: u32,
}

impl ServerResources {
    /// Build resources from loaded configuration and a connected database
    ///
    /// # Errors
    ///
    /// Returns an error if the completion client cannot be created
    pub fn new(config: &ServerConfig, database: Database) -> AppResult<Self> {
        Ok(Self {
            database,
            completion: OpenAiClient::new(config.completion.clone())?,
            nonce: NonceValidator::new(config.security.nonce_secret.clone()),
            max_tokens: config.completion.max_tokens,
        })
    }
}

/// The HTTP server
pub struct ChatServer {
    resources: Arc<ServerResources>,
}

impl ChatServer {
    /// Create a server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Bind the port and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self, port: u16) -> Result<()> {
        let app = routes::router(self.resources).layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;

        info!(port, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve when the process receives an interrupt, letting in-flight turns
/// finish before the listener closes
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Keep serving; shutdown then needs an external kill
        tracing::error!("Failed to install shutdown signal handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
