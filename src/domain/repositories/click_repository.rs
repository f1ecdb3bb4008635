//! Repository trait for click records.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click detail records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Stores a click record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Returns the most recent clicks of a link, newest first.
    async fn recent_clicks(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError>;
}
