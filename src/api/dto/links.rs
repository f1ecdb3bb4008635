//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::dto::pagination::PageInfo;
use crate::application::services::LinkPage;
use crate::domain::entities::Link;
use crate::utils::url_normalizer::MAX_URL_LENGTH;

/// `MAX_URL_LENGTH` as the `u64` the validator length attribute expects.
const MAX_URL_LENGTH_U64: u64 = MAX_URL_LENGTH as u64;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("static regex"));

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (http or https).
    #[validate(length(min = 1, max = MAX_URL_LENGTH_U64, message = "URL must not be empty"))]
    pub url: String,

    /// Optional custom short code.
    #[validate(length(min = 4, max = 32, message = "Custom code must be 4-32 characters"))]
    #[validate(regex(
        path = *CUSTOM_CODE_REGEX,
        message = "Custom code can only contain lowercase letters, digits, and hyphens"
    ))]
    pub code: Option<String>,
}

/// Request body for `PATCH /api/links/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[validate(length(min = 1, max = MAX_URL_LENGTH_U64, message = "URL must not be empty"))]
    pub url: String,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.code,
            url: link.url,
            short_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Paginated list of the caller's links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PageInfo,
    pub items: Vec<LinkResponse>,
}

impl LinkListResponse {
    /// Builds the response, deriving each short URL with `short_url`.
    pub fn from_page(page: LinkPage, short_url: impl Fn(&str) -> String) -> Self {
        let pagination = PageInfo {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages(),
        };

        let items = page
            .items
            .into_iter()
            .map(|link| {
                let short = short_url(&link.code);
                LinkResponse::new(link, short)
            })
            .collect();

        Self { pagination, items }
    }
}
