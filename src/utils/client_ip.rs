//! Client IP extraction for click records.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Determines the client IP of a request.
///
/// With `behind_proxy` set, the first address of `X-Forwarded-For` wins,
/// then `X-Real-IP`; malformed values are ignored. Otherwise, and as a
/// fallback, the socket peer address is used.
///
/// Only enable `behind_proxy` when a trusted reverse proxy overwrites these
/// headers, since clients can set them freely.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> IpAddr {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if let Some(ip) = forwarded {
            return ip;
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if let Some(ip) = real_ip {
            return ip;
        }
    }

    peer.ip()
}
