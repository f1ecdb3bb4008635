//! Session token verification for the hosted identity provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::entities::Caller;
use crate::domain::repositories::IdentityProvider;

/// Claims read from a session token. Registered claims are checked by
/// [`Validation`]; profile claims are optional.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "image_url")]
    picture: Option<String>,
}

/// Verifies provider-issued JWTs locally.
///
/// Supports an HS256 shared secret or an RS256 public key. Expiry and
/// not-before are always enforced; issuer and audience only when configured.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    /// Builds a verifier for tokens signed with a shared HS256 secret.
    pub fn hs256(secret: &str) -> Self {
        Self::with_key(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
    }

    /// Builds a verifier for tokens signed with an RS256 key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if `pem` is not a valid RSA public key.
    pub fn rs256_pem(pem: &str) -> Result<Self> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .context("failed to parse RS256 public key")?;
        Ok(Self::with_key(key, Algorithm::RS256))
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self { key, validation }
    }

    /// Requires the `iss` claim to be present and match.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }

    /// Requires the `aud` claim to be present and contain `audience`.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.validation.required_spec_claims.insert("aud".to_string());
        self
    }

    /// Tolerated clock skew for `exp` and `nbf`.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.validation.leeway = seconds;
        self
    }

    /// Builds the verifier described by the auth configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable key is configured.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let mut provider = match (&config.jwt_secret, &config.jwt_public_key) {
            (Some(secret), None) => Self::hs256(secret),
            (None, Some(pem)) => Self::rs256_pem(pem)?,
            _ => anyhow::bail!("exactly one of AUTH_JWT_SECRET or AUTH_JWT_PUBLIC_KEY is required"),
        };

        if let Some(ref issuer) = config.issuer {
            provider = provider.with_issuer(issuer);
        }
        if let Some(ref audience) = config.audience {
            provider = provider.with_audience(audience);
        }

        Ok(provider.with_leeway(config.leeway_seconds))
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn identify(&self, token: &str) -> Option<Caller> {
        let data = match decode::<SessionClaims>(token, &self.key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        let claims = data.claims;
        if claims.sub.trim().is_empty() {
            return None;
        }

        Some(Caller {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            image_url: claims.picture,
        })
    }
}
