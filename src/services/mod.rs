// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Keeps the submit pipeline testable without standing up the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Domain service layer
//!
//! Business logic extracted from route handlers so the submit pipeline can
//! be exercised directly in tests.

/// Chat turn orchestration: validation, completion, persistence
pub mod chat_orchestration;
