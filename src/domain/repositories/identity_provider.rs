//! Contract of the external authentication provider.

use crate::domain::entities::Caller;
use async_trait::async_trait;

/// Answers "who is the current caller" for a session token.
///
/// Invalid, expired or foreign tokens are not errors: they simply identify
/// nobody.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::JwtIdentityProvider`] - verifies provider-issued JWTs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identify(&self, token: &str) -> Option<Caller>;
}
