pub mod admin;
pub mod auth;
pub mod public;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use crate::auth::SessionClaims;
use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Public pages
        .route("/", get(public::home))
        .route("/home", get(public::home))
        .route("/properties", get(public::properties))
        .route("/properties/{id}", get(public::property))
        .route("/buildings/{id}", get(public::property))
        .route("/about", get(public::about))
        .route("/contact", get(public::contact))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route("/logout", post(auth::logout))
        // Admin
        .route("/admin", get(admin::index))
        .route("/admin/users", get(admin::users_page))
        .route("/admin/projects", post(admin::create_submit))
        .route(
            "/admin/projects/{id}/edit",
            get(admin::edit_page).post(admin::update_submit),
        )
        .route("/admin/projects/{id}/delete", post(admin::delete_submit))
}

/// Navigation state shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub signed_in: bool,
    pub is_admin: bool,
    pub user_name: String,
}

impl Nav {
    pub fn from_session(session: Option<&SessionClaims>) -> Self {
        match session {
            Some(claims) => Nav {
                signed_in: true,
                is_admin: claims.is_admin(),
                user_name: claims.name.clone(),
            },
            None => Nav::default(),
        }
    }
}

/// Template-friendly projection of a project.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub created_at: String,
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        ProjectCard {
            id: project.id.to_string(),
            name: project.name,
            description: project.description,
            image: project.image.unwrap_or_default(),
            created_at: project.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "public/not_found.html")]
struct NotFoundTemplate {
    nav: Nav,
    message: String,
}

pub(crate) fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => AppError::Internal(format!("Template render failed: {e}")).into_response(),
    }
}

#[derive(Template)]
#[template(path = "public/error.html")]
struct ErrorTemplate {
    nav: Nav,
    message: String,
}

/// Page-flavoured error: a missing record gets an HTML 404 and server
/// failures an HTML error page. Auth failures keep their plain response so
/// the redirect middleware can turn them into a trip to `/login`.
pub(crate) fn page_error(err: AppError, nav: Nav) -> Response {
    match err {
        AppError::NotFound(message) => {
            let page = render(&NotFoundTemplate { nav, message });
            (StatusCode::NOT_FOUND, page).into_response()
        }
        AppError::Unauthenticated(_) | AppError::Unauthorized(_) => err.into_response(),
        other => {
            let status = other.status();
            let page = render(&ErrorTemplate {
                nav,
                message: other.public_message(),
            });
            (status, page).into_response()
        }
    }
}
