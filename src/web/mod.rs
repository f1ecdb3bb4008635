//! Web layer for browser-based UI.
//!
//! Server-rendered HTML pages built with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session resolution and the sign-in gate
//! - [`error`] - HTML error pages
//! - [`routes`] - Page route configuration

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
