use askama::Template;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::auth::CurrentSession;
use crate::routes::projects::{find_project, list_projects};
use crate::state::{AppState, SharedState};
use crate::views::{Nav, ProjectCard, page_error, render};

const FEATURED_COUNT: usize = 6;

#[derive(Template)]
#[template(path = "public/home.html")]
struct HomeTemplate {
    nav: Nav,
    projects: Vec<ProjectCard>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "public/properties.html")]
struct PropertiesTemplate {
    nav: Nav,
    projects: Vec<ProjectCard>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "public/property.html")]
struct PropertyTemplate {
    nav: Nav,
    project: ProjectCard,
}

#[derive(Template)]
#[template(path = "public/about.html")]
struct AboutTemplate {
    nav: Nav,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
struct ContactTemplate {
    nav: Nav,
}

/// Listing failures still render the page, with the message inline.
async fn project_cards(state: &AppState) -> (Vec<ProjectCard>, Option<String>) {
    match list_projects(state).await {
        Ok(projects) => (projects.into_iter().map(ProjectCard::from).collect(), None),
        Err(e) => {
            tracing::error!("Failed to list projects: {e}");
            (Vec::new(), Some("Failed to fetch projects".to_string()))
        }
    }
}

pub async fn home(
    CurrentSession(session): CurrentSession,
    State(state): State<SharedState>,
) -> Response {
    let (mut projects, error) = project_cards(&state).await;
    // Newest listings first on the landing page.
    projects.reverse();
    projects.truncate(FEATURED_COUNT);

    render(&HomeTemplate {
        nav: Nav::from_session(session.as_ref()),
        projects,
        error,
    })
}

pub async fn properties(
    CurrentSession(session): CurrentSession,
    State(state): State<SharedState>,
) -> Response {
    let (projects, error) = project_cards(&state).await;
    render(&PropertiesTemplate {
        nav: Nav::from_session(session.as_ref()),
        projects,
        error,
    })
}

pub async fn property(
    CurrentSession(session): CurrentSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let nav = Nav::from_session(session.as_ref());
    match find_project(&state, &id).await {
        Ok(project) => render(&PropertyTemplate {
            nav,
            project: project.into(),
        }),
        Err(e) => page_error(e, nav),
    }
}

pub async fn about(CurrentSession(session): CurrentSession) -> Response {
    render(&AboutTemplate {
        nav: Nav::from_session(session.as_ref()),
    })
}

pub async fn contact(CurrentSession(session): CurrentSession) -> Response {
    render(&ContactTemplate {
        nav: Nav::from_session(session.as_ref()),
    })
}
