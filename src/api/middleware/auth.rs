//! Session authentication middleware for the JSON API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::web::middleware::session::Session;
use crate::{error::AppError, state::AppState};

/// Authenticates API requests and exposes the [`crate::domain::entities::Caller`]
/// to handlers as a request extension.
///
/// # Token Sources
///
/// ```text
/// Authorization: Bearer <session token>
/// Cookie: __session=<session token>
/// ```
///
/// The header wins when both are present, so scripts can call the API with a
/// token while browsers reuse their session cookie.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - No token is present
/// - The token signature, expiry, issuer or audience is invalid
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    // Already verified by the session layer.
    if let Some(caller) = parts
        .extensions
        .get::<Session>()
        .and_then(|session| session.caller.clone())
    {
        let mut req = Request::from_parts(parts, body);
        req.extensions_mut().insert(caller);
        return Ok(next.run(req).await);
    }

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => st.auth_service.session_token(&parts.headers),
    };

    let Some(token) = token else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Authorization header or session cookie is missing" }),
        ));
    };

    let caller = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
