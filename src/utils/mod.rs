//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_normalizer`] - Destination URL validation and normalization
//! - [`client_ip`] - Client address extraction (proxy aware)
//! - [`db_error`] - Database error classification

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
