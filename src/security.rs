// ABOUTME: Stateless anti-forgery nonce generation and validation for widget submissions
// ABOUTME: Derives short-lived tokens from a process secret so no server-side storage is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! Anti-forgery nonce module
//!
//! Tokens are derived from a secret, a coarse time tick, and an action name,
//! so they validate without any server-side storage. A nonce minted in the
//! current tick window stays valid through the following window, giving a
//! lifetime between 12 and 24 hours.

use crate::errors::{AppError, AppResult};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Action name bound into chat submission nonces
pub const CHAT_NONCE_ACTION: &str = "chatbox_submit";

/// Tick width in seconds (12 hours); a nonce survives the current and the
/// previous tick
const NONCE_TICK_SECS: u64 = 12 * 60 * 60;

/// Hex characters kept from the derived digest
const NONCE_HEX_LEN: usize = 16;

/// Secret length in bytes for generated secrets (32 bytes = 256 bits)
const SECRET_LENGTH: usize = 32;

/// Stateless nonce generator and validator
#[derive(Debug, Clone)]
pub struct NonceValidator {
    secret: String,
}

impl NonceValidator {
    /// Create a validator around the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mint a nonce for the given action in the current tick window
    #[must_use]
    pub fn create(&self, action: &str) -> String {
        self.derive(current_tick(), action)
    }

    /// Validate a nonce for the given action
    ///
    /// # Errors
    ///
    /// Returns an `AuthInvalid` error when the token matches neither the
    /// current nor the previous tick window
    pub fn verify(&self, nonce: &str, action: &str) -> AppResult<()> {
        let tick = current_tick();
        if nonce == self.derive(tick, action) || nonce == self.derive(tick.wrapping_sub(1), action)
        {
            Ok(())
        } else {
            Err(AppError::auth_invalid("Invalid nonce"))
        }
    }

    fn derive(&self, tick: u64, action: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(tick.to_be_bytes());
        hasher.update(action.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest)[..NONCE_HEX_LEN].to_string()
    }
}

/// Generate a random process secret for nonce derivation
#[must_use]
pub fn generate_secret() -> String {
    let random_bytes: Vec<u8> = (0..SECRET_LENGTH)
        .map(|_| rand::thread_rng().gen())
        .collect();
    hex::encode(random_bytes)
}

fn current_tick() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    now / NONCE_TICK_SECS
}
