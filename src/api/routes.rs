//! API route configuration.
//!
//! All API endpoints require a session, checked by
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_clicks_handler,
    list_links_handler, me_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, protected by session authentication.
///
/// # Endpoints
///
/// - `GET    /me`                - The authenticated caller
/// - `GET    /links`             - Caller's links (paginated)
/// - `POST   /links`             - Create a short link
/// - `GET    /links/{id}`        - One link
/// - `PATCH  /links/{id}`        - Change a link's destination
/// - `DELETE /links/{id}`        - Delete a link
/// - `GET    /links/{id}/clicks` - Recent clicks of a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{id}/clicks", get(link_clicks_handler))
}
