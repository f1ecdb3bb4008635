//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by an authenticated user.
///
/// `clicks` is maintained by the database and only ever grows: it is
/// incremented by exactly one for every resolved redirect.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub owner_id: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        url: String,
        owner_id: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            url,
            owner_id,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// `url` must already be validated and normalized, `code` must already be
/// validated (custom) or generated.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub url: String,
    pub owner_id: String,
}
