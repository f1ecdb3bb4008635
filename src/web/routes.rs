//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_link_form_handler, dashboard_handler, delete_link_form_handler, landing_handler,
    link_detail_handler, sign_in_handler, sign_out_handler, sign_up_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Dashboard routes requiring a signed-in caller.
///
/// Protected via [`crate::web::middleware::session::require_session`].
///
/// # Endpoints
///
/// - `GET  /dashboard`                    - Links table and create form
/// - `POST /dashboard/links`              - Create form submission
/// - `GET  /dashboard/links/{id}`         - Link detail with recent clicks
/// - `POST /dashboard/links/{id}/delete`  - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/dashboard/links", post(create_link_form_handler))
        .route("/dashboard/links/{id}", get(link_detail_handler))
        .route("/dashboard/links/{id}/delete", post(delete_link_form_handler))
}

/// Public pages.
///
/// # Endpoints
///
/// - `GET /`         - Landing page (signed-in callers go to the dashboard)
/// - `GET /sign-in`  - Hosted sign-in hand-off
/// - `GET /sign-up`  - Hosted sign-up hand-off
/// - `GET /sign-out` - Clear the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_handler))
        .route("/sign-in", get(sign_in_handler))
        .route("/sign-up", get(sign_up_handler))
        .route("/sign-out", get(sign_out_handler))
}
