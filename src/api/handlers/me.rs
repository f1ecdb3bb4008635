//! Handler for the current caller endpoint.

use axum::{Extension, Json};

use crate::api::dto::me::MeResponse;
use crate::domain::entities::Caller;

/// Returns the authenticated caller.
///
/// # Endpoint
///
/// `GET /api/me`
pub async fn me_handler(Extension(caller): Extension<Caller>) -> Json<MeResponse> {
    Json(MeResponse::from(caller))
}
