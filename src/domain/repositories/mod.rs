//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations and external
//! collaborators; implementations live in `crate::infrastructure`. Mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD and atomic resolution
//! - [`ClickRepository`] - Click detail records
//! - [`IdentityProvider`] - Session token verification
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod click_repository;
pub mod identity_provider;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use identity_provider::IdentityProvider;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
