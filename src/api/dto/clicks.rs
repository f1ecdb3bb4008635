//! DTOs for click event data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::Click;

/// Default number of clicks returned by the click listing.
pub const DEFAULT_CLICK_LIMIT: i64 = 20;

/// Query parameters for `GET /api/links/{id}/clicks`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ClicksQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ClicksQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_CLICK_LIMIT)
    }
}

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None` for cleaner responses.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub id: i64,
    pub clicked_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            id: click.id,
            clicked_at: click.clicked_at,
            user_agent: click.user_agent,
            referer: click.referer,
            ip: click.ip,
        }
    }
}

/// Response of the click listing.
#[derive(Debug, Serialize)]
pub struct ClicksResponse {
    pub link_id: i64,
    pub items: Vec<ClickInfo>,
}
