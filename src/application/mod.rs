//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide the API used by both the
//! JSON handlers and the server-rendered pages.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, management and resolution
//! - [`services::click_service::ClickService`] - Click detail recording and listing
//! - [`services::auth_service::AuthService`] - Session lookup for the current caller

pub mod services;
