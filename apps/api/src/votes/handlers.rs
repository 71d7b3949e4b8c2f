use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::vote::VoteRow;
use crate::state::AppState;
use crate::votes::recorder::{record_vote, VoteSubmission};

#[derive(Serialize)]
pub struct VoteResponse {
    pub ok: bool,
    pub vote: VoteRow,
}

/// POST /api/v1/vote
pub async fn handle_vote(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<VoteResponse>, AppError> {
    let submission = VoteSubmission::from_json(&body)?;
    let vote = record_vote(state.store.as_ref(), &submission).await?;
    Ok(Json(VoteResponse { ok: true, vote }))
}
