use std::sync::Arc;

use crate::config::Config;
use crate::feedback::notifier::WebhookNotifier;
use crate::store::ReviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Projects, thumbnails and votes. PostgreSQL or in-memory, chosen at startup.
    pub store: Arc<dyn ReviewStore>,
    pub notifier: WebhookNotifier,
    pub config: Config,
}
