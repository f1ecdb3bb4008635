#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use shortlink::application::services::{AuthService, ClickService, LinkService};
use shortlink::domain::click_event::ClickEvent;
use shortlink::infrastructure::identity::JwtIdentityProvider;
use shortlink::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use shortlink::routes::{RateLimit, build_router};
use shortlink::state::{AppState, SiteSettings};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const TEST_SECRET: &str = "test-session-secret";
pub const SESSION_COOKIE: &str = "__session";
pub const BASE_URL: &str = "https://sho.rt";

/// Mints a session token for `sub` signed with [`TEST_SECRET`].
pub fn session_token(sub: &str) -> String {
    let claims = json!({
        "sub": sub,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Mints a token that expired an hour ago.
pub fn expired_token(sub: &str) -> String {
    let claims = json!({
        "sub": sub,
        "exp": chrono::Utc::now().timestamp() - 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(sub: &str) -> String {
    format!("Bearer {}", session_token(sub))
}

pub fn session_cookie(sub: &str) -> String {
    format!("{}={}", SESSION_COOKIE, session_token(sub))
}

pub fn site() -> SiteSettings {
    SiteSettings {
        public_base_url: BASE_URL.to_string(),
        sign_in_url: "https://accounts.example.com/sign-in".to_string(),
        sign_up_url: "https://accounts.example.com/sign-up".to_string(),
        behind_proxy: false,
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repo = Arc::new(PgClickRepository::new(pool));

    let link_service = Arc::new(LinkService::new(link_repo.clone(), BASE_URL));
    let click_service = Arc::new(ClickService::new(click_repo, link_repo, None));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(JwtIdentityProvider::hs256(TEST_SECRET)),
        SESSION_COOKIE,
    ));

    let state = AppState::new(link_service, click_service, auth_service, tx, site());

    (state, rx)
}

/// Serves the full router, without rate limiting, with a fixed peer address.
pub fn test_server(pool: PgPool) -> (TestServer, AppState, mpsc::Receiver<ClickEvent>) {
    let (state, rx) = create_test_state(pool);
    let app = build_router(state.clone(), RateLimit::Disabled).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    (server, state, rx)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str, owner_id: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (code, url, owner_id) VALUES ($1, $2, $3) RETURNING id")
        .bind(code)
        .bind(url)
        .bind(owner_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_click(pool: &PgPool, link_id: i64, ip: &str) {
    sqlx::query("INSERT INTO link_clicks (link_id, ip) VALUES ($1, $2)")
        .bind(link_id)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
