//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits apply per client IP. Behind a trusted reverse proxy the
//! `*_proxied` variants read the address from `X-Forwarded-For` /
//! `X-Real-IP` / `Forwarded`, falling back to the peer address.

use axum::body::Body;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
struct Quota {
    per_second: u64,
    burst: u32,
}

/// Public pages: 2 requests per second, bursts of 100.
const PUBLIC: Quota = Quota {
    per_second: 2,
    burst: 100,
};

/// Authenticated API: 1 request per second, bursts of 10.
const SECURE: Quota = Quota {
    per_second: 1,
    burst: 10,
};

fn build<K: KeyExtractor>(
    key_extractor: K,
    quota: Quota,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(quota.per_second)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for public pages keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(landing_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    build(PeerIpKeyExtractor, PUBLIC)
}

/// Same as [`layer`], keyed by the forwarded client address.
pub fn proxied_layer() -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>
{
    build(SmartIpKeyExtractor, PUBLIC)
}

/// Creates a stricter rate limiter for the authenticated JSON API.
pub fn secure_layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    build(PeerIpKeyExtractor, SECURE)
}

/// Same as [`secure_layer`], keyed by the forwarded client address.
pub fn secure_proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    build(SmartIpKeyExtractor, SECURE)
}
