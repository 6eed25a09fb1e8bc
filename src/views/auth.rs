use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::session::{clear_session_cookie, session_cookie, session_ttl};
use crate::auth::{CurrentSession, SessionClaims, issue_session};
use crate::error::AppError;
use crate::routes::auth::{CredentialsRequest, RegisterRequest, register_user, sign_in};
use crate::state::{AppState, SharedState};
use crate::views::{Nav, render};

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    nav: Nav,
    email: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    nav: Nav,
    name: String,
    email: String,
    error: Option<String>,
}

fn landing_for(claims: &SessionClaims) -> &'static str {
    if claims.is_admin() { "/admin" } else { "/home" }
}

/// Set the session cookie and send the browser to its landing page.
fn signed_in_redirect(state: &AppState, claims: &SessionClaims) -> Result<Response, AppError> {
    let token = issue_session(claims, &state.config)?;
    let jar = session_cookie(&token, &state.config);
    Ok((jar, Redirect::to(landing_for(claims))).into_response())
}

pub async fn login_page(CurrentSession(session): CurrentSession) -> Response {
    if let Some(claims) = &session {
        return Redirect::to(landing_for(claims)).into_response();
    }

    render(&LoginTemplate {
        nav: Nav::default(),
        email: String::new(),
        error: None,
    })
}

pub async fn login_submit(
    State(state): State<SharedState>,
    Form(form): Form<CredentialsRequest>,
) -> Response {
    let outcome = sign_in(&state, &form.email, &form.password)
        .await
        .and_then(|claims| signed_in_redirect(&state, &claims));

    match outcome {
        Ok(response) => response,
        Err(e) => render(&LoginTemplate {
            nav: Nav::default(),
            email: form.email,
            error: Some(e.public_message()),
        }),
    }
}

pub async fn register_page(CurrentSession(session): CurrentSession) -> Response {
    if let Some(claims) = &session {
        return Redirect::to(landing_for(claims)).into_response();
    }

    render(&RegisterTemplate {
        nav: Nav::default(),
        name: String::new(),
        email: String::new(),
        error: None,
    })
}

pub async fn register_submit(
    State(state): State<SharedState>,
    Form(form): Form<RegisterRequest>,
) -> Response {
    let name = form.name.clone();
    let email = form.email.clone();

    let outcome = register_user(&state, form).await.and_then(|user| {
        let claims = SessionClaims::new(
            user.id.to_string(),
            user.name,
            user.email,
            user.role,
            session_ttl(&state.config),
        );
        signed_in_redirect(&state, &claims)
    });

    match outcome {
        Ok(response) => response,
        Err(e) => render(&RegisterTemplate {
            nav: Nav::default(),
            name,
            email,
            error: Some(e.public_message()),
        }),
    }
}

pub async fn logout() -> Response {
    (clear_session_cookie(), Redirect::to("/")).into_response()
}
