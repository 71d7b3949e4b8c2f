use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub client_name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRow {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A project together with its thumbnails, ordered by thumbnail id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub thumbnails: Vec<ThumbnailRow>,
}

impl Project {
    pub fn owns_thumbnail(&self, thumbnail_id: i64) -> bool {
        self.thumbnails.iter().any(|t| t.id == thumbnail_id)
    }

    /// Image URLs in thumbnail order; the candidate pool for this project's mock feed.
    pub fn image_pool(&self) -> Vec<String> {
        self.thumbnails.iter().map(|t| t.image_url.clone()).collect()
    }
}

/// Validated input for project creation.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub client_name: String,
    pub token: String,
    pub thumbnails: Vec<NewThumbnail>,
}

#[derive(Debug, Clone)]
pub struct NewThumbnail {
    pub title: String,
    pub image_url: String,
}
