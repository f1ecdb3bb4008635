//! Background worker persisting click detail records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::application::services::ClickService;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;

/// Retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Drains the click channel until every sender is dropped.
///
/// Up to `concurrency` events are persisted at the same time. When the
/// channel closes, in-flight events are awaited before returning.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<ClickService>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let clicks = clicks.clone();
        tokio::spawn(async move {
            let _permit = permit;
            process_event(&clicks, event).await;
        });
    }

    let _ = semaphore.acquire_many(concurrency as u32).await;
    tracing::info!("Click worker stopped");
}

/// Persists a single event, retrying transient failures.
///
/// Returns `true` if the click was stored. A link deleted between the
/// redirect and the write is not retried.
pub async fn process_event(clicks: &ClickService, event: ClickEvent) -> bool {
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || clicks.record(event.clone()),
        |e: &AppError| matches!(e, AppError::Internal { .. }),
    )
    .await;

    match result {
        Ok(_) => true,
        Err(AppError::NotFound { .. }) => {
            tracing::debug!(link_id = event.link_id, code = %event.code, "Link gone before click was stored");
            false
        }
        Err(e) => {
            metrics::counter!("click_events_failed_total").increment(1);
            tracing::error!(
                link_id = event.link_id,
                code = %event.code,
                error = %e,
                "Failed to store click after retries"
            );
            false
        }
    }
}
