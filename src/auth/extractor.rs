use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::SessionClaims;
use crate::auth::session::current_session;
use crate::error::AppError;
use crate::state::SharedState;

/// The single admin gate: a session must exist and carry the admin role.
pub fn require_admin(session: Option<SessionClaims>) -> Result<SessionClaims, AppError> {
    let Some(claims) = session else {
        return Err(AppError::Unauthenticated(
            "Authentication required".to_string(),
        ));
    };
    if !claims.is_admin() {
        return Err(AppError::Unauthorized("Admin access required".to_string()));
    }
    Ok(claims)
}

/// Whatever session the request carries, possibly none.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionClaims>);

impl FromRequestParts<SharedState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(current_session(&parts.headers, &state.config)))
    }
}

/// A verified session with the admin role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionClaims);

impl FromRequestParts<SharedState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let session = current_session(&parts.headers, &state.config);
        require_admin(session).map(AdminSession)
    }
}
