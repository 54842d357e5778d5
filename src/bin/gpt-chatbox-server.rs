// ABOUTME: Server binary for the GPT chatbox backend
// ABOUTME: Loads configuration, migrates the database, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 gpt-chatbox contributors

//! # GPT Chatbox Server Binary
//!
//! Starts the chat backend: widget page, bootstrap endpoint, and the
//! completion-backed submit endpoint.

use anyhow::Result;
use clap::Parser;
use gpt_chatbox::{
    config::ServerConfig,
    database::Database,
    logging,
    server::{ChatServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "gpt-chatbox-server")]
#[command(about = "GPT Chatbox - completion-backed chat widget server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting GPT Chatbox server");

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(&config, database)?);
    let server = ChatServer::new(resources);

    server.run(config.http_port).await
}
