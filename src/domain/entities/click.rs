//! Click entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A click record captured when a short link is resolved.
///
/// The per-link counter lives on [`crate::domain::entities::Link`]; this
/// record keeps the request metadata for the owner's detail view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl Click {
    pub fn new(
        id: i64,
        link_id: i64,
        clicked_at: DateTime<Utc>,
        user_agent: Option<String>,
        referer: Option<String>,
        ip: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            clicked_at,
            user_agent,
            referer,
            ip,
        }
    }
}

/// Input data for recording a new click.
///
/// The `link_id` must reference an existing link; the timestamp is set by
/// the database.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}
