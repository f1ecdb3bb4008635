//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod clicks;
pub mod health;
pub mod links;
pub mod me;
pub mod pagination;
