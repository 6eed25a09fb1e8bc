use axum::Json;
use axum::extract::State;

use crate::auth::AdminSession;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

pub async fn list(
    _admin: AdminSession,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    let pool = state.db.acquire_connection().await?;
    let users = db::users::list_all(pool).await?;
    Ok(Json(users))
}
