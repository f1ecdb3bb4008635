//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Every read or write that is not part of the public redirect path is
/// scoped to an owner: a link belonging to someone else behaves exactly like
/// a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, regardless of owner.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by id if it belongs to `owner_id`.
    async fn find_for_owner(&self, id: i64, owner_id: &str) -> Result<Option<Link>, AppError>;

    /// Lists an owner's links, newest first.
    async fn list_by_owner(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Link>, AppError>;

    /// Counts an owner's links.
    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError>;

    /// Replaces the destination of an owned link.
    ///
    /// Returns `Ok(None)` if no link with `id` belongs to `owner_id`.
    async fn update_url(
        &self,
        id: i64,
        owner_id: &str,
        url: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Deletes an owned link and its click records.
    ///
    /// Returns `Ok(false)` if no link with `id` belongs to `owner_id`.
    async fn delete(&self, id: i64, owner_id: &str) -> Result<bool, AppError>;

    /// Looks up a code and increments its click counter in one atomic step.
    ///
    /// Returns the link with the already-incremented counter, or `Ok(None)`
    /// when the code does not exist (nothing is incremented then).
    async fn resolve_and_count(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
