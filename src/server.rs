//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, ClickService, LinkService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, IdentityProvider, LinkRepository};
use crate::infrastructure::identity::JwtIdentityProvider;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::{AppState, SiteSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Session token verifier
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The verification key is unusable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let identity: Arc<dyn IdentityProvider> = Arc::new(
        JwtIdentityProvider::from_config(&config.auth)
            .context("Failed to initialize session verifier")?,
    );

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool));

    let link_service = Arc::new(LinkService::new(
        link_repository.clone(),
        config.public_base_url.clone(),
    ));
    let click_service = Arc::new(ClickService::new(
        click_repository,
        link_repository,
        config.click_ip_secret.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(identity, config.auth.session_cookie.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        click_service.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.click_worker_concurrency,
        "Click worker started"
    );

    let state = AppState::new(
        link_service,
        click_service,
        auth_service,
        click_tx,
        SiteSettings::from_config(&config),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it the last click sender) is gone; let the worker drain.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Click worker panicked");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
