use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{CurrentSession, SessionClaims, authorize, issue_session, password};
use crate::config::normalize_email;
use crate::db;
use crate::error::AppError;
use crate::models::{Role, User};
use crate::state::{AppState, SharedState};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub session: SessionClaims,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a self-registered account. The role is always `user`.
pub async fn register_user(state: &AppState, req: RegisterRequest) -> Result<User, AppError> {
    let name = req.name.trim();
    let email = normalize_email(&req.email);

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Email address is invalid".to_string()));
    }

    let reserved = state
        .config
        .admin
        .as_ref()
        .is_some_and(|admin| admin.email == email);
    let pool = state.db.acquire_connection().await?;
    if reserved || db::users::exists_by_email(pool, &email).await? {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let pw_hash = password::hash_blocking(req.password)
        .await
        .map_err(AppError::Internal)?;

    let user = db::users::create(pool, name, &email, &pw_hash, Role::User)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// Throttled credential check. Any failure is a plain `Unauthenticated`.
pub async fn sign_in(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<SessionClaims, AppError> {
    if state.login_limiter.check(email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    match authorize(state, email, password).await? {
        Some(claims) => {
            state.login_limiter.reset(email);
            tracing::info!(subject = %claims.sub, role = %claims.role, "Signed in");
            Ok(claims)
        }
        None => {
            state.login_limiter.record_failure(email);
            tracing::warn!("Failed sign-in attempt");
            Err(AppError::Unauthenticated("Invalid credentials".to_string()))
        }
    }
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = register_user(&state, req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn callback(
    State(state): State<SharedState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let claims = sign_in(&state, &req.email, &req.password).await?;
    let token = issue_session(&claims, &state.config)?;

    let jar = session_cookie(&token, &state.config);
    Ok((
        jar,
        Json(SessionResponse {
            token,
            session: claims,
        }),
    ))
}

pub async fn session(CurrentSession(session): CurrentSession) -> Json<Option<SessionClaims>> {
    Json(session)
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_session_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
