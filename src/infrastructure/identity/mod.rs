//! Identity provider integrations.

pub mod jwt_verifier;

pub use jwt_verifier::JwtIdentityProvider;
