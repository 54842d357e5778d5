// ABOUTME: Route module organization for the chat backend HTTP endpoints
// ABOUTME: Assembles the chat, widget, and health routers into one application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Route modules for the chat backend
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the service layer.

/// Chat submission and widget bootstrap routes
pub mod chat;
/// Embedded chat widget page and script routes
pub mod widget;

pub use chat::ChatRoutes;
pub use widget::WidgetRoutes;

use crate::server::ServerResources;
use axum::{routing::get, Json, Router};
use std::sync::Arc;

/// Build the full application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(ChatRoutes::routes(resources))
        .merge(WidgetRoutes::routes())
}

/// Health check for load balancers and monitoring
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
