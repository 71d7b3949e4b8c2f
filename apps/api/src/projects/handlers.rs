use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::project::Project;
use crate::models::vote::VoteTally;
use crate::projects::validation::{validate_new_project, CreateProjectRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub project: Project,
    /// Relative link handed to the client for reviewing.
    pub client_path: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        let client_path = format!("/p/{}", project.project.token);
        Self {
            project,
            client_path,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTallyResponse {
    pub project_id: i64,
    pub tallies: Vec<VoteTally>,
}

fn parse_project_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidPayload("Invalid id".into()))
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let projects = state.store.list_projects().await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    let req: CreateProjectRequest = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidPayload(format!("Invalid payload: {e}")))?;
    let new_project = validate_new_project(req)?;
    let project = state.store.create_project(new_project).await?;
    Ok((StatusCode::CREATED, Json(project.into())))
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let id = parse_project_id(&id)?;
    let project = state
        .store
        .project_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(Json(project.into()))
}

/// GET /api/v1/projects/:id/votes
pub async fn handle_project_votes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VoteTallyResponse>, AppError> {
    let id = parse_project_id(&id)?;
    if state.store.project_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }
    let tallies = state.store.vote_tallies(id).await?;
    Ok(Json(VoteTallyResponse {
        project_id: id,
        tallies,
    }))
}

/// GET /api/v1/p/:token
pub async fn handle_project_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = state
        .store
        .project_by_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
    Ok(Json(project.into()))
}
