// ABOUTME: Routes serving the embedded chat widget page and its script
// ABOUTME: Assets are compiled into the binary so the server deploys as one file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Widget asset routes
//!
//! Serves the demo chat page at `/` and the widget script at `/widget.js`.
//! Both are embedded at compile time.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Embedded widget page
const WIDGET_HTML: &str = include_str!("../../assets/widget.html");
/// Embedded widget script
const WIDGET_JS: &str = include_str!("../../assets/widget.js");

/// Widget asset routes implementation
pub struct WidgetRoutes;

impl WidgetRoutes {
    /// Create the widget asset routes
    pub fn routes() -> Router {
        Router::new()
            .route("/", get(Self::page))
            .route("/widget.js", get(Self::script))
    }

    async fn page() -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            WIDGET_HTML,
        )
            .into_response()
    }

    async fn script() -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
            WIDGET_JS,
        )
            .into_response()
    }
}
