use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Upstream delivery failed: {0}")]
    UpstreamDelivery(String),

    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamDelivery(_) => StatusCode::BAD_GATEWAY,
            AppError::Misconfiguration(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::InvalidPayload(msg) => ("INVALID_PAYLOAD", msg.clone()),
            AppError::UpstreamDelivery(msg) => {
                tracing::error!("Upstream delivery failure: {msg}");
                (
                    "UPSTREAM_DELIVERY_FAILURE",
                    "The notification could not be delivered".to_string(),
                )
            }
            AppError::Misconfiguration(msg) => {
                tracing::error!("Misconfiguration: {msg}");
                ("MISCONFIGURATION", msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                ("DATABASE_ERROR", "A database error occurred".to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
