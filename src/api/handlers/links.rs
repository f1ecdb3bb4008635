//! Handlers for link management endpoints.
//!
//! Every handler acts on behalf of the authenticated [`Caller`] inserted by
//! [`crate::api::middleware::auth`]; links of other owners answer 404.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::clicks::{ClickInfo, ClicksQuery, ClicksResponse};
use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, UpdateLinkRequest,
};
use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=25`
///
/// # Errors
///
/// Returns 400 Bad Request for invalid pagination parameters.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (page, page_size) = params.validate()?;

    let links = state
        .link_service
        .list_links(&caller.id, page, page_size)
        .await?;

    Ok(Json(LinkListResponse::from_page(links, |code| {
        state.link_service.short_url(code)
    })))
}

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "code": "my-link"
/// }
/// ```
///
/// `code` is optional; a random 8-character code is generated when omitted.
///
/// # Errors
///
/// - 400 Bad Request if the URL or custom code is invalid
/// - 409 Conflict if the custom code is already taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&caller.id, &payload.url, payload.code.as_deref())
        .await?;

    let short_url = state.link_service.short_url(&link.code);
    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}

/// Returns one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&caller.id, id).await?;

    let short_url = state.link_service.short_url(&link.code);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Changes the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/new-target" }
/// ```
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link_url(&caller.id, id, &payload.url)
        .await?;

    let short_url = state.link_service.short_url(&link.code);
    Ok(Json(LinkResponse::new(link, short_url)))
}

/// Deletes one of the caller's links together with its click records.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Response
///
/// `204 No Content` on success.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the most recent clicks of one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/links/{id}/clicks?limit=20`
///
/// `limit` is clamped to `1..=100`.
pub async fn link_clicks_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Query(query): Query<ClicksQuery>,
) -> Result<Json<ClicksResponse>, AppError> {
    let clicks = state
        .click_service
        .recent_clicks(&caller.id, id, query.limit())
        .await?;

    Ok(Json(ClicksResponse {
        link_id: id,
        items: clicks.into_iter().map(ClickInfo::from).collect(),
    }))
}
