mod config;
mod db;
mod errors;
mod feed;
mod feedback;
mod models;
mod projects;
mod routes;
mod state;
mod store;
mod votes;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::open_store;
use crate::feedback::notifier::WebhookNotifier;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration errors abort startup before anything else runs
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting thumbreview v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config).await?;

    let notifier = WebhookNotifier::new(config.discord_webhook_url.clone())?;
    if !notifier.is_configured() {
        warn!("DISCORD_WEBHOOK_URL not set, /api/v1/review will answer with a server error");
    }

    info!(
        "Serving client folders from {} (feed size {})",
        config.clients_dir.display(),
        config.feed_size
    );

    let state = AppState {
        store,
        notifier,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the review front end has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
