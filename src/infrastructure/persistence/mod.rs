//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries with bound parameters.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, ownership checks and click counting
//! - [`PgClickRepository`] - Click detail records

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
