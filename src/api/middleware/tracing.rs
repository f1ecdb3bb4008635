//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Each request gets an `INFO` span with method, URI and HTTP version; the
/// response is logged at `INFO` with status and latency in milliseconds.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/docs-2026 version=HTTP/1.1}: finished processing request latency=3 ms status=307
/// INFO request{method=POST uri=/api/links version=HTTP/1.1}: finished processing request latency=12 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
