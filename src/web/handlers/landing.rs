//! Marketing landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::Caller;
use crate::web::middleware::session::Session;

/// Template for the landing page (`templates/landing.html`).
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub caller: Option<Caller>,
}

/// Renders the landing page for visitors.
///
/// # Endpoint
///
/// `GET /`
///
/// Signed-in callers are sent straight to `/dashboard` with
/// `307 Temporary Redirect` and no page is rendered.
pub async fn landing_handler(Extension(session): Extension<Session>) -> Response {
    if session.is_signed_in() {
        return Redirect::temporary("/dashboard").into_response();
    }

    LandingTemplate { caller: None }.into_response()
}
