use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::feed::sampler::DEFAULT_FEED_SIZE;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; optional integrations are resolved per request.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL. When unset the service runs on the in-memory store.
    pub database_url: Option<String>,
    /// Chat webhook receiving review notifications. Required by `/api/v1/review` only.
    pub discord_webhook_url: Option<String>,
    pub clients_dir: PathBuf,
    pub feed_size: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let feed_size = std::env::var("FEED_SIZE")
            .unwrap_or_else(|_| DEFAULT_FEED_SIZE.to_string())
            .parse::<usize>()
            .context("FEED_SIZE must be a positive integer")?;
        if feed_size == 0 {
            bail!("FEED_SIZE must be a positive integer");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            discord_webhook_url: optional_env("DISCORD_WEBHOOK_URL"),
            clients_dir: optional_env("CLIENTS_DIR")
                .unwrap_or_else(|| "public/clients".to_string())
                .into(),
            feed_size,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
