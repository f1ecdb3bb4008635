//! Click detail recording and retrieval service.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Upper bound for a single click listing.
pub const MAX_RECENT_CLICKS: i64 = 100;

/// Service storing click detail records and exposing them to link owners.
///
/// When an `ip_secret` is configured, client addresses are stored as an
/// HMAC-SHA256 digest instead of in clear text.
pub struct ClickService {
    clicks: Arc<dyn ClickRepository>,
    links: Arc<dyn LinkRepository>,
    ip_secret: Option<String>,
}

impl ClickService {
    pub fn new(
        clicks: Arc<dyn ClickRepository>,
        links: Arc<dyn LinkRepository>,
        ip_secret: Option<String>,
    ) -> Self {
        Self {
            clicks,
            links,
            ip_secret,
        }
    }

    /// Hashes a client address with the configured secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_ip(&self, secret: &str, ip: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            AppError::internal("Failed to hash client address", json!({ "reason": e.to_string() }))
        })?;
        mac.update(ip.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Stores the detail record of a click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link was deleted in the meantime.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record(&self, event: ClickEvent) -> Result<Click, AppError> {
        let ip = match (&self.ip_secret, event.ip) {
            (Some(secret), Some(ip)) => Some(self.hash_ip(secret, &ip)?),
            (None, ip) => ip,
            (Some(_), None) => None,
        };

        self.clicks
            .record_click(NewClick {
                link_id: event.link_id,
                user_agent: event.user_agent,
                referer: event.referer,
                ip,
            })
            .await
    }

    /// Returns the latest clicks of one of the owner's links, newest first.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or owned by someone else.
    pub async fn recent_clicks(
        &self,
        owner_id: &str,
        link_id: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError> {
        if self.links.find_for_owner(link_id, owner_id).await?.is_none() {
            return Err(AppError::not_found("Link not found", json!({ "id": link_id })));
        }

        self.clicks
            .recent_clicks(link_id, limit.clamp(1, MAX_RECENT_CLICKS))
            .await
    }
}
