//! Persistence seam for projects, thumbnails and votes.
//!
//! Handlers only see `ReviewStore`; PostgreSQL backs production and the in-memory store
//! backs tests and database-less local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::project::{NewProject, Project};
use crate::models::vote::{VoteRow, VoteTally};

pub use memory::MemoryReviewStore;
pub use postgres::PgReviewStore;

/// A vote to upsert, keyed by `(thumbnail_id, token)`.
#[derive(Debug, Clone, Copy)]
pub struct VoteUpsert<'a> {
    pub project_id: i64,
    pub thumbnail_id: i64,
    pub token: &'a str,
    pub value: i16,
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create_project(&self, new: NewProject) -> Result<Project, AppError>;

    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    async fn project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;

    async fn project_by_token(&self, token: &str) -> Result<Option<Project>, AppError>;

    /// Inserts the vote or overwrites the value of the existing `(thumbnail_id, token)` record.
    async fn upsert_vote(&self, vote: VoteUpsert<'_>) -> Result<VoteRow, AppError>;

    /// One tally per thumbnail of the project, in thumbnail order.
    async fn vote_tallies(&self, project_id: i64) -> Result<Vec<VoteTally>, AppError>;
}
