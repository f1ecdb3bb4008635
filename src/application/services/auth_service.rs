//! Session lookup on top of the external identity provider.

use axum::http::{HeaderMap, header};
use std::sync::Arc;

use crate::domain::entities::Caller;
use crate::domain::repositories::IdentityProvider;
use crate::error::AppError;
use serde_json::json;

/// Default name of the session cookie set by the hosted sign-in pages.
pub const DEFAULT_SESSION_COOKIE: &str = "__session";

/// Service resolving the current caller of a request.
///
/// A session token is read from the `Authorization: Bearer` header first and
/// from the session cookie second. The token itself is verified by the
/// [`IdentityProvider`].
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    cookie_name: String,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>, cookie_name: impl Into<String>) -> Self {
        Self {
            provider,
            cookie_name: cookie_name.into(),
        }
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Extracts the raw session token from request headers.
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        bearer_token(headers).or_else(|| cookie_value(headers, &self.cookie_name))
    }

    /// Returns the signed-in caller, if any.
    ///
    /// Missing, malformed or rejected tokens all yield `None`.
    pub async fn current_caller(&self, headers: &HeaderMap) -> Option<Caller> {
        let token = self.session_token(headers)?;
        self.provider.identify(&token).await
    }

    /// Verifies a raw session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the provider rejects the token.
    pub async fn authenticate(&self, token: &str) -> Result<Caller, AppError> {
        self.provider.identify(token).await.ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired session token" }),
            )
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
