use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::project::{NewProject, Project, ProjectRow, ThumbnailRow};
use crate::models::vote::{VoteRow, VoteTally};
use crate::store::{ReviewStore, VoteUpsert};

#[derive(Default)]
struct Inner {
    projects: Vec<ProjectRow>,
    thumbnails: Vec<ThumbnailRow>,
    votes: HashMap<(i64, String), VoteRow>,
    next_project_id: i64,
    next_thumbnail_id: i64,
    next_vote_id: i64,
}

impl Inner {
    fn assemble(&self, project: &ProjectRow) -> Project {
        Project {
            project: project.clone(),
            thumbnails: self
                .thumbnails
                .iter()
                .filter(|t| t.project_id == project.id)
                .cloned()
                .collect(),
        }
    }
}

/// Process-local store. Writes are serialized by a single lock, so duplicate votes are
/// last-write-wins in lock acquisition order.
#[derive(Default)]
pub struct MemoryReviewStore {
    inner: RwLock<Inner>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn create_project(&self, new: NewProject) -> Result<Project, AppError> {
        let mut inner = self.inner.write().await;
        if inner.projects.iter().any(|p| p.token == new.token) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Project token collision"
            )));
        }

        let now = Utc::now();
        inner.next_project_id += 1;
        let project = ProjectRow {
            id: inner.next_project_id,
            name: new.name,
            client_name: new.client_name,
            token: new.token,
            created_at: now,
        };

        for thumb in new.thumbnails {
            inner.next_thumbnail_id += 1;
            let row = ThumbnailRow {
                id: inner.next_thumbnail_id,
                project_id: project.id,
                title: thumb.title,
                image_url: thumb.image_url,
                created_at: now,
            };
            inner.thumbnails.push(row);
        }

        inner.projects.push(project.clone());
        Ok(inner.assemble(&project))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let inner = self.inner.read().await;
        // Ids grow with insertion, so reverse id order is newest first.
        let mut rows: Vec<&ProjectRow> = inner.projects.iter().collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows.into_iter().map(|p| inner.assemble(p)).collect())
    }

    async fn project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| inner.assemble(p)))
    }

    async fn project_by_token(&self, token: &str) -> Result<Option<Project>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .projects
            .iter()
            .find(|p| p.token == token)
            .map(|p| inner.assemble(p)))
    }

    async fn upsert_vote(&self, vote: VoteUpsert<'_>) -> Result<VoteRow, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let key = (vote.thumbnail_id, vote.token.to_string());

        if let Some(existing) = inner.votes.get_mut(&key) {
            existing.value = vote.value;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        inner.next_vote_id += 1;
        let row = VoteRow {
            id: inner.next_vote_id,
            project_id: vote.project_id,
            thumbnail_id: vote.thumbnail_id,
            token: vote.token.to_string(),
            value: vote.value,
            created_at: now,
            updated_at: now,
        };
        inner.votes.insert(key, row.clone());
        Ok(row)
    }

    async fn vote_tallies(&self, project_id: i64) -> Result<Vec<VoteTally>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .thumbnails
            .iter()
            .filter(|t| t.project_id == project_id)
            .map(|t| {
                let mut tally = VoteTally {
                    thumbnail_id: t.id,
                    ..Default::default()
                };
                for vote in inner.votes.values().filter(|v| v.thumbnail_id == t.id) {
                    match vote.value {
                        1 => tally.likes += 1,
                        -1 => tally.dislikes += 1,
                        _ => tally.neutral += 1,
                    }
                }
                tally
            })
            .collect())
    }
}
