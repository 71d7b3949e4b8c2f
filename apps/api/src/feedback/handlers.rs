use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::feedback::message::FeedbackPayload;
use crate::feedback::notifier::NotifyError;
use crate::state::AppState;

/// POST /api/v1/review
/// Relays a thumbnail request or preview feedback to the chat webhook.
pub async fn handle_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if !state.notifier.is_configured() {
        return Err(NotifyError::NotConfigured.into());
    }

    let payload = FeedbackPayload::from_json(body)?;
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let message = payload.to_message(Utc::now(), user_agent);

    state.notifier.deliver(&message).await?;
    info!("Relayed review notification");

    Ok(Json(json!({ "ok": true })))
}
