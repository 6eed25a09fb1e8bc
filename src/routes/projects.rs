use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::db;
use crate::error::AppError;
use crate::models::Project;
use crate::state::{AppState, SharedState};

/// Body of a create or update request. Fields are optional at the wire level
/// so a missing field reports the same validation error as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct ValidProject {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

impl ProjectInput {
    pub fn validate(self) -> Result<ValidProject, AppError> {
        let name = non_blank(self.name);
        let description = non_blank(self.description);
        let (Some(name), Some(description)) = (name, description) else {
            return Err(AppError::Validation(
                "Name and description are required".to_string(),
            ));
        };
        Ok(ValidProject {
            name,
            description,
            image: non_blank(self.image),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Malformed ids can never name a project, so they are reported as missing.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| not_found())
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

pub async fn list_projects(state: &AppState) -> Result<Vec<Project>, AppError> {
    let pool = state.db.acquire_connection().await?;
    Ok(db::projects::list(pool).await?)
}

pub async fn find_project(state: &AppState, raw_id: &str) -> Result<Project, AppError> {
    let id = parse_id(raw_id)?;
    let pool = state.db.acquire_connection().await?;
    db::projects::find_by_id(pool, id)
        .await?
        .ok_or_else(not_found)
}

pub async fn create_project(state: &AppState, input: ProjectInput) -> Result<Project, AppError> {
    let valid = input.validate()?;
    let pool = state.db.acquire_connection().await?;
    let project = db::projects::create(
        pool,
        &valid.name,
        &valid.description,
        valid.image.as_deref(),
    )
    .await?;

    tracing::info!(project_id = %project.id, "Project created");
    Ok(project)
}

pub async fn update_project(
    state: &AppState,
    raw_id: &str,
    input: ProjectInput,
) -> Result<Project, AppError> {
    let valid = input.validate()?;
    let id = parse_id(raw_id)?;
    let pool = state.db.acquire_connection().await?;
    let project = db::projects::update(
        pool,
        id,
        &valid.name,
        &valid.description,
        valid.image.as_deref(),
    )
    .await?
    .ok_or_else(not_found)?;

    tracing::info!(project_id = %project.id, "Project updated");
    Ok(project)
}

pub async fn delete_project(state: &AppState, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id)?;
    let pool = state.db.acquire_connection().await?;
    if !db::projects::delete(pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(project_id = %id, "Project deleted");
    Ok(())
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(list_projects(&state).await?))
}

pub async fn create(
    _admin: AdminSession,
    State(state): State<SharedState>,
    Json(req): Json<ProjectInput>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = create_project(&state, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(find_project(&state, &id).await?))
}

pub async fn update(
    _admin: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<ProjectInput>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(update_project(&state, &id, req).await?))
}

pub async fn delete(
    _admin: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_project(&state, &id).await?;
    Ok(Json(serde_json::json!({ "message": "Project deleted successfully" })))
}
