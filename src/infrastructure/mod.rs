//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`identity`] - Session token verification

pub mod identity;
pub mod persistence;
