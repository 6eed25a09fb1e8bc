use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::auth::AdminSession;
use crate::db;
use crate::error::AppError;
use crate::state::{AppState, SharedState};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub projects: i64,
}

pub async fn counts(state: &AppState) -> Result<DashboardCounts, AppError> {
    let pool = state.db.acquire_connection().await?;
    let (users, projects) = tokio::try_join!(
        db::users::count_all(pool),
        db::projects::count_all(pool)
    )?;
    Ok(DashboardCounts { users, projects })
}

pub async fn summary(
    _admin: AdminSession,
    State(state): State<SharedState>,
) -> Result<Json<DashboardCounts>, AppError> {
    Ok(Json(counts(&state).await?))
}
