use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Sends browsers to `/login` when a page rejects them for a missing or
/// non-admin session, instead of showing the JSON error.
pub async fn redirect_unauthorized(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Redirect::to("/login").into_response(),
        _ => response,
    }
}
