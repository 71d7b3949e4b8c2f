//! Webhook notifier — the single outbound channel for review notifications.
//!
//! One POST per message. No retry and no queue: a failed delivery is reported to the
//! caller and forgotten.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::feedback::message::WebhookMessage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("DISCORD_WEBHOOK_URL is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<NotifyError> for AppError {
    fn from(e: NotifyError) -> Self {
        match e {
            NotifyError::NotConfigured => AppError::Misconfiguration(e.to_string()),
            other => AppError::UpstreamDelivery(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            url,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Posts `message` to the webhook. Fails with `NotConfigured` before any network I/O
    /// when no URL is set.
    pub async fn deliver(&self, message: &WebhookMessage) -> Result<(), NotifyError> {
        let url = self.url.as_deref().ok_or(NotifyError::NotConfigured)?;

        let response = self.client.post(url).json(message).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook rejected notification with {status}");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Webhook accepted notification ({status})");
        Ok(())
    }
}
