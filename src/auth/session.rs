use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;

use crate::auth::jwt::{self, SessionClaims};
use crate::config::Config;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session_token";

/// Sign the claims into a time-bounded token.
pub fn issue_session(claims: &SessionClaims, config: &Config) -> Result<String, AppError> {
    jwt::encode_token(claims, &config.jwt_secret).map_err(AppError::Internal)
}

pub fn session_ttl(config: &Config) -> Duration {
    Duration::minutes(config.session_ttl_minutes)
}

/// Resolve the session carried by a request, if any.
///
/// A bearer token takes precedence over the cookie. Every failure reduces to
/// `None`; the reason is only logged.
pub fn current_session(headers: &HeaderMap, config: &Config) -> Option<SessionClaims> {
    let token = bearer_token(headers).or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    })?;

    match jwt::decode_token(&token, &config.jwt_secret) {
        Ok(claims) => Some(claims),
        Err(e) => {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("Session token expired"),
                kind => tracing::debug!(?kind, "Session token rejected"),
            }
            None
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

pub fn session_cookie(token: &str, config: &Config) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(config.session_ttl_minutes))
        .build();

    CookieJar::new().add(cookie)
}

pub fn clear_session_cookie() -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(cookie)
}
