//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use crate::web::error::PageError;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code and increment its click counter in one statement
/// 2. Send click details to the background worker
/// 3. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// The counter is exact. Click details are sent to a bounded channel; if the
/// queue is full the detail record is dropped and counted, the redirect is
/// never delayed.
///
/// # Errors
///
/// Returns a 404 page if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, PageError> {
    let link = match state.link_service.resolve(&code).await {
        Ok(link) => link,
        Err(e) => {
            if matches!(e, AppError::NotFound { .. }) {
                metrics::counter!("redirects_not_found_total").increment(1);
                tracing::debug!(code = %code, "Unknown short code");
            }
            return Err(e.into());
        }
    };

    metrics::counter!("redirects_total").increment(1);

    let ip = client_ip(&headers, addr, state.site.behind_proxy);
    let click_event = ClickEvent::new(
        link.id,
        link.code,
        Some(ip.to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    match state.click_sender.try_send(click_event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("click_events_dropped_total").increment(1);
            tracing::warn!(link_id = event.link_id, "Click queue full, dropping click details");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("click_events_dropped_total").increment(1);
            tracing::error!(link_id = event.link_id, "Click queue closed, dropping click details");
        }
    }

    Ok(Redirect::temporary(&link.url))
}
