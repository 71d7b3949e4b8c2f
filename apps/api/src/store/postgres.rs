use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::project::{NewProject, Project, ProjectRow, ThumbnailRow};
use crate::models::vote::{VoteRow, VoteTally};
use crate::store::{ReviewStore, VoteUpsert};

/// PostgreSQL-backed store. Schema lives in `migrations/` and is applied by `db::open_store`.
#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn thumbnails_for(&self, project_ids: &[i64]) -> Result<Vec<ThumbnailRow>, AppError> {
        Ok(sqlx::query_as::<_, ThumbnailRow>(
            "SELECT * FROM thumbnails WHERE project_id = ANY($1) ORDER BY id ASC",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn with_thumbnails(&self, row: Option<ProjectRow>) -> Result<Option<Project>, AppError> {
        let Some(project) = row else {
            return Ok(None);
        };
        let thumbnails = self.thumbnails_for(&[project.id]).await?;
        Ok(Some(Project {
            project,
            thumbnails,
        }))
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn create_project(&self, new: NewProject) -> Result<Project, AppError> {
        let mut tx = self.pool.begin().await?;

        let project: ProjectRow = sqlx::query_as(
            "INSERT INTO projects (name, client_name, token) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.client_name)
        .bind(&new.token)
        .fetch_one(&mut *tx)
        .await?;

        let mut thumbnails = Vec::with_capacity(new.thumbnails.len());
        for thumb in &new.thumbnails {
            let row: ThumbnailRow = sqlx::query_as(
                "INSERT INTO thumbnails (project_id, title, image_url) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(project.id)
            .bind(&thumb.title)
            .bind(&thumb.image_url)
            .fetch_one(&mut *tx)
            .await?;
            thumbnails.push(row);
        }

        tx.commit().await?;
        info!(
            "Created project {} with {} thumbnails",
            project.id,
            thumbnails.len()
        );

        Ok(Project {
            project,
            thumbnails,
        })
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects: Vec<ProjectRow> =
            sqlx::query_as("SELECT * FROM projects ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
        let mut by_project: HashMap<i64, Vec<ThumbnailRow>> = HashMap::new();
        for thumb in self.thumbnails_for(&ids).await? {
            by_project.entry(thumb.project_id).or_default().push(thumb);
        }

        Ok(projects
            .into_iter()
            .map(|project| Project {
                thumbnails: by_project.remove(&project.id).unwrap_or_default(),
                project,
            })
            .collect())
    }

    async fn project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let row: Option<ProjectRow> = sqlx::query_as("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.with_thumbnails(row).await
    }

    async fn project_by_token(&self, token: &str) -> Result<Option<Project>, AppError> {
        let row: Option<ProjectRow> = sqlx::query_as("SELECT * FROM projects WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        self.with_thumbnails(row).await
    }

    async fn upsert_vote(&self, vote: VoteUpsert<'_>) -> Result<VoteRow, AppError> {
        // The unique index on (thumbnail_id, token) serializes concurrent duplicates.
        Ok(sqlx::query_as::<_, VoteRow>(
            r#"
            INSERT INTO votes (project_id, thumbnail_id, token, value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (thumbnail_id, token)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(vote.project_id)
        .bind(vote.thumbnail_id)
        .bind(vote.token)
        .bind(vote.value)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn vote_tallies(&self, project_id: i64) -> Result<Vec<VoteTally>, AppError> {
        Ok(sqlx::query_as::<_, VoteTally>(
            r#"
            SELECT t.id AS thumbnail_id,
                   COUNT(v.id) FILTER (WHERE v.value = 1)  AS likes,
                   COUNT(v.id) FILTER (WHERE v.value = -1) AS dislikes,
                   COUNT(v.id) FILTER (WHERE v.value = 0)  AS neutral
            FROM thumbnails t
            LEFT JOIN votes v ON v.thumbnail_id = t.id
            WHERE t.project_id = $1
            GROUP BY t.id
            ORDER BY t.id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
