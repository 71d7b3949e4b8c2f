use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::vote::VoteRow;
use crate::store::{ReviewStore, VoteUpsert};

/// A client's reaction to a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum Reaction {
    Dislike,
    Neutral,
    Like,
}

impl From<Reaction> for i16 {
    fn from(r: Reaction) -> i16 {
        match r {
            Reaction::Dislike => -1,
            Reaction::Neutral => 0,
            Reaction::Like => 1,
        }
    }
}

impl TryFrom<i16> for Reaction {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Reaction::Dislike),
            0 => Ok(Reaction::Neutral),
            1 => Ok(Reaction::Like),
            other => Err(format!("value must be -1, 0 or 1 (got {other})")),
        }
    }
}

/// A vote submission after payload validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteSubmission {
    pub token: String,
    pub thumbnail_id: i64,
    pub reaction: Reaction,
}

impl VoteSubmission {
    /// Validates a raw JSON body `{token, thumbnailId, value}`. `itemId` is accepted as an
    /// alias of `thumbnailId`. Non-integer ids and out-of-range values are rejected.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::InvalidPayload("token is required".into()))?;

        let thumbnail_id = body
            .get("thumbnailId")
            .or_else(|| body.get("itemId"))
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::InvalidPayload("thumbnailId must be an integer".into()))?;

        let reaction = body
            .get("value")
            .and_then(Value::as_i64)
            .and_then(|v| i16::try_from(v).ok())
            .ok_or_else(|| AppError::InvalidPayload("value must be -1, 0 or 1".into()))
            .and_then(|v| Reaction::try_from(v).map_err(AppError::InvalidPayload))?;

        Ok(Self {
            token: token.to_string(),
            thumbnail_id,
            reaction,
        })
    }
}

/// Records a vote: resolves the token to its project, checks the thumbnail belongs to it,
/// then upserts on `(thumbnail_id, token)`.
pub async fn record_vote(
    store: &dyn ReviewStore,
    submission: &VoteSubmission,
) -> Result<VoteRow, AppError> {
    let project = store
        .project_by_token(&submission.token)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

    if !project.owns_thumbnail(submission.thumbnail_id) {
        return Err(AppError::NotFound(format!(
            "Thumbnail {} not found in project",
            submission.thumbnail_id
        )));
    }

    let vote = store
        .upsert_vote(VoteUpsert {
            project_id: project.project.id,
            thumbnail_id: submission.thumbnail_id,
            token: &submission.token,
            value: submission.reaction.into(),
        })
        .await?;

    info!(
        "Recorded vote {} on thumbnail {} for project {}",
        vote.value, vote.thumbnail_id, vote.project_id
    );
    Ok(vote)
}
