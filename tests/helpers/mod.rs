// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the axum request builder used across test files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
