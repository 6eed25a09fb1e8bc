use askama::Template;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::AdminSession;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::routes::dashboard::counts;
use crate::routes::projects::{
    ProjectInput, create_project, delete_project, find_project, list_projects, update_project,
};
use crate::state::{AppState, SharedState};
use crate::views::{Nav, ProjectCard, page_error, render};

#[derive(Template)]
#[template(path = "admin/index.html")]
struct AdminTemplate {
    nav: Nav,
    user_count: i64,
    project_count: i64,
    projects: Vec<ProjectCard>,
    form: ProjectForm,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
struct UsersTemplate {
    nav: Nav,
    users: Vec<UserRow>,
}

#[derive(Template)]
#[template(path = "admin/edit_project.html")]
struct EditProjectTemplate {
    nav: Nav,
    id: String,
    form: ProjectForm,
    error: Option<String>,
}

struct UserRow {
    name: String,
    email: String,
    role: String,
    joined: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        UserRow {
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            joined: user.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Values echoed back into the listing form.
#[derive(Default)]
struct ProjectForm {
    name: String,
    description: String,
    image: String,
}

impl ProjectForm {
    fn from_input(input: &ProjectInput) -> Self {
        ProjectForm {
            name: input.name.clone().unwrap_or_default(),
            description: input.description.clone().unwrap_or_default(),
            image: input.image.clone().unwrap_or_default(),
        }
    }
}

async fn admin_page(
    state: &AppState,
    nav: Nav,
    form: ProjectForm,
    error: Option<String>,
) -> Response {
    let loaded = match counts(state).await {
        Ok(summary) => list_projects(state).await.map(|projects| (summary, projects)),
        Err(e) => Err(e),
    };

    match loaded {
        Ok((summary, projects)) => render(&AdminTemplate {
            nav,
            user_count: summary.users,
            project_count: summary.projects,
            projects: projects.into_iter().map(ProjectCard::from).collect(),
            form,
            error,
        }),
        Err(e) => page_error(e, nav),
    }
}

pub async fn index(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
) -> Response {
    admin_page(
        &state,
        Nav::from_session(Some(&admin)),
        ProjectForm::default(),
        None,
    )
    .await
}

async fn load_users(state: &AppState) -> Result<Vec<User>, AppError> {
    let pool = state.db.acquire_connection().await?;
    Ok(db::users::list_all(pool).await?)
}

pub async fn users_page(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
) -> Response {
    let nav = Nav::from_session(Some(&admin));
    match load_users(&state).await {
        Ok(users) => render(&UsersTemplate {
            nav,
            users: users.into_iter().map(UserRow::from).collect(),
        }),
        Err(e) => page_error(e, nav),
    }
}

pub async fn create_submit(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
    Form(input): Form<ProjectInput>,
) -> Response {
    let nav = Nav::from_session(Some(&admin));
    let form = ProjectForm::from_input(&input);
    match create_project(&state, input).await {
        Ok(_) => Redirect::to("/admin").into_response(),
        Err(AppError::Validation(msg)) => admin_page(&state, nav, form, Some(msg)).await,
        Err(e) => page_error(e, nav),
    }
}

pub async fn edit_page(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let nav = Nav::from_session(Some(&admin));
    match find_project(&state, &id).await {
        Ok(project) => {
            let card = ProjectCard::from(project);
            render(&EditProjectTemplate {
                nav,
                id: card.id,
                form: ProjectForm {
                    name: card.name,
                    description: card.description,
                    image: card.image,
                },
                error: None,
            })
        }
        Err(e) => page_error(e, nav),
    }
}

pub async fn update_submit(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Form(input): Form<ProjectInput>,
) -> Response {
    let nav = Nav::from_session(Some(&admin));
    let form = ProjectForm::from_input(&input);
    match update_project(&state, &id, input).await {
        Ok(_) => Redirect::to("/admin").into_response(),
        Err(AppError::Validation(msg)) => render(&EditProjectTemplate {
            nav,
            id,
            form,
            error: Some(msg),
        }),
        Err(e) => page_error(e, nav),
    }
}

pub async fn delete_submit(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    match delete_project(&state, &id).await {
        Ok(()) => Redirect::to("/admin").into_response(),
        Err(e) => page_error(e, Nav::from_session(Some(&admin))),
    }
}
