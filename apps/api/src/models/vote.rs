use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoteRow {
    pub id: i64,
    pub project_id: i64,
    pub thumbnail_id: i64,
    pub token: String,
    pub value: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vote counts for one thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub thumbnail_id: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub neutral: i64,
}
