use crate::auth::jwt::SessionClaims;
use crate::auth::password;
use crate::auth::session::session_ttl;
use crate::config::{AdminAccount, normalize_email};
use crate::db;
use crate::error::AppError;
use crate::models::Role;
use crate::state::AppState;

/// Subject used for the administrator account configured outside the database.
pub const STATIC_ADMIN_ID: &str = "admin";

/// Where a set of credentials can be resolved from, in priority order.
enum PrincipalSource<'a> {
    Static(&'a AdminAccount),
    Stored,
}

impl PrincipalSource<'_> {
    async fn resolve(
        &self,
        state: &AppState,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionClaims>, AppError> {
        let ttl = session_ttl(&state.config);
        match self {
            PrincipalSource::Static(admin) => {
                if admin.email != email {
                    return Ok(None);
                }
                let valid =
                    password::verify_blocking(password.to_string(), admin.password_hash.clone())
                        .await
                        .map_err(AppError::Internal)?;
                Ok(valid.then(|| {
                    SessionClaims::new(
                        STATIC_ADMIN_ID.to_string(),
                        admin.name.clone(),
                        admin.email.clone(),
                        Role::Admin,
                        ttl,
                    )
                }))
            }
            PrincipalSource::Stored => {
                let pool = state.db.acquire_connection().await?;
                let Some(stored) = db::users::find_credentials_by_email(pool, email).await? else {
                    return Ok(None);
                };
                let valid = match password::verify_blocking(
                    password.to_string(),
                    stored.password_hash.clone(),
                )
                .await
                {
                    Ok(valid) => valid,
                    Err(e) => {
                        tracing::error!(user_id = %stored.id, "Stored password hash unreadable: {e}");
                        false
                    }
                };
                Ok(valid.then(|| {
                    SessionClaims::new(
                        stored.id.to_string(),
                        stored.name,
                        stored.email,
                        stored.role,
                        ttl,
                    )
                }))
            }
        }
    }
}

/// Check an email/password pair.
///
/// `Ok(None)` covers every "wrong credentials" outcome. Only infrastructure
/// failures are errors. The configured administrator is checked first and
/// never touches the database.
pub async fn authorize(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<Option<SessionClaims>, AppError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Ok(None);
    }

    let mut sources = Vec::with_capacity(2);
    if let Some(admin) = &state.config.admin {
        sources.push(PrincipalSource::Static(admin));
    }
    sources.push(PrincipalSource::Stored);

    for source in &sources {
        if let Some(claims) = source.resolve(state, &email, password).await? {
            return Ok(Some(claims));
        }
    }
    Ok(None)
}
