//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                 - Landing page (public)
//! - `GET  /sign-in|sign-up|sign-out` - Hosted auth hand-off (public)
//! - `/dashboard/*`           - Web UI (session required, redirects to `/sign-in`)
//! - `/api/*`                 - JSON API (session required, 401 otherwise)
//! - `GET  /health`           - Health check: DB, click queue (public)
//! - `/static/*`              - Static assets
//! - `GET  /{code}`           - Short link redirect (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Session** - Caller resolution for pages, bearer or cookie auth for the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::error::not_found_handler;
use crate::web::middleware::session;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// How clients are keyed for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No rate limiting.
    Disabled,
    /// Keyed by the socket peer address.
    PeerIp,
    /// Keyed by proxy headers, falling back to the peer address.
    ForwardedIp,
}

fn limit_public(router: Router<AppState>, mode: RateLimit) -> Router<AppState> {
    match mode {
        RateLimit::Disabled => router,
        RateLimit::PeerIp => router.layer(rate_limit::layer()),
        RateLimit::ForwardedIp => router.layer(rate_limit::proxied_layer()),
    }
}

fn limit_secure(router: Router<AppState>, mode: RateLimit) -> Router<AppState> {
    match mode {
        RateLimit::Disabled => router,
        RateLimit::PeerIp => router.layer(rate_limit::secure_layer()),
        RateLimit::ForwardedIp => router.layer(rate_limit::secure_proxied_layer()),
    }
}

/// Builds every route with its authentication middleware.
///
/// The redirect handler extracts `ConnectInfo<SocketAddr>`, so the router
/// must be served with `into_make_service_with_connect_info`.
pub fn build_router(state: AppState, rate_limit: RateLimit) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let api_router = limit_secure(api_router, rate_limit);

    let web_protected =
        web::routes::protected_routes().route_layer(middleware::from_fn(session::require_session));

    let web_router = Router::new()
        .merge(web_protected)
        .merge(web::routes::public_routes());
    let web_router = limit_public(web_router, rate_limit);

    let redirect_router = limit_public(
        Router::new().route("/{code}", get(redirect_handler)),
        rate_limit,
    );

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web_router)
        .merge(redirect_router)
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), session::layer))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let mode = if behind_proxy {
        RateLimit::ForwardedIp
    } else {
        RateLimit::PeerIp
    };

    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, mode))
}
