// ABOUTME: Main library entry point for the GPT chatbox backend
// ABOUTME: HTTP bridge between the embeddable chat widget and OpenAI-style completion APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

#![deny(unsafe_code)]

//! # GPT Chatbox Server
//!
//! A small HTTP backend for an embeddable website chat widget. Each widget
//! submission becomes one completion request against an `OpenAI`-style API;
//! the exchange is appended to a flat-text conversation record in SQLite and
//! the generated text is returned as JSON.
//!
//! ## Features
//!
//! - **Model family routing**: chat-family models (`gpt-3.5*`, `gpt-4*`) use
//!   the chat completions format, everything else the legacy prompt format
//! - **Stateless anti-forgery nonces**: derived from a secret and a time
//!   tick, no server-side session storage
//! - **Append-only conversations**: one growing text document per
//!   conversation, titled from the opening words
//! - **Embedded widget**: the demo page and script ship inside the binary
//!
//! ## Quick Start
//!
//! 1. Set `OPENAI_API_KEY`
//! 2. Start the server with `gpt-chatbox-server`
//! 3. Open `http://localhost:8080/` and chat

/// Environment-driven server configuration
pub mod config;

/// SQLite persistence for conversations
pub mod database;

/// Unified error handling with HTTP response mapping
pub mod errors;

/// Completion API types and client
pub mod llm;

/// Logging configuration and structured logging setup
pub mod logging;

/// HTTP route handlers
pub mod routes;

/// Anti-forgery nonce generation and validation
pub mod security;

/// Shared resources and the HTTP server runtime
pub mod server;

/// Domain service layer behind the route handlers
pub mod services;
