//! Link creation, management and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{MAX_CODE_LEN, generate_code, is_reserved, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Attempts at inserting a generated code before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Default and maximum page sizes for link listings.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of an owner's links.
#[derive(Debug, Clone)]
pub struct LinkPage {
    pub items: Vec<Link>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

impl LinkPage {
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 1;
        }
        let size = i64::from(self.page_size.max(1));
        ((self.total + size - 1) / size) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Service for creating, listing, updating, deleting and resolving links.
///
/// All management operations take the caller's id and only ever touch that
/// caller's links. Resolution is the only public operation.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    public_base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `public_base_url` is the externally visible origin used to build
    /// short URLs (e.g. `https://sho.rt`).
    pub fn new(link_repository: Arc<dyn LinkRepository>, public_base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link owned by `owner_id`.
    ///
    /// # Code Selection
    ///
    /// - A non-blank `custom_code` is validated and used as-is
    /// - Otherwise a random 8-character code is generated; collisions are
    ///   retried up to 5 times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is already taken.
    /// Returns [`AppError::Internal`] if no free code could be generated.
    pub async fn create_link(
        &self,
        owner_id: &str,
        url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let url = normalize_url(url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "url" }))
        })?;

        let custom_code = custom_code.map(str::trim).filter(|c| !c.is_empty());

        let link = match custom_code {
            Some(code) => {
                validate_custom_code(code)?;
                self.link_repository
                    .create(NewLink {
                        code: code.to_string(),
                        url,
                        owner_id: owner_id.to_string(),
                    })
                    .await?
            }
            None => self.create_with_generated_code(owner_id, url).await?,
        };

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(link_id = link.id, code = %link.code, owner_id, "Link created");

        Ok(link)
    }

    async fn create_with_generated_code(&self, owner_id: &str, url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code()?;
            if is_reserved(&code) {
                continue;
            }

            let new_link = NewLink {
                code,
                url: url.clone(),
                owner_id: owner_id.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Lists the owner's links, newest first.
    ///
    /// `page` starts at 1; `page_size` is clamped to `1..=100`.
    pub async fn list_links(
        &self,
        owner_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<LinkPage, AppError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let items = self
            .link_repository
            .list_by_owner(owner_id, i64::from(page_size), offset)
            .await?;
        let total = self.link_repository.count_by_owner(owner_id).await?;

        Ok(LinkPage {
            items,
            page,
            page_size,
            total,
        })
    }

    /// Retrieves one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or owned by someone else.
    pub async fn get_link(&self, owner_id: &str, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_for_owner(id, owner_id)
            .await?
            .ok_or_else(|| link_not_found(id))
    }

    /// Points one of the owner's links at a new destination.
    pub async fn update_link_url(
        &self,
        owner_id: &str,
        id: i64,
        url: &str,
    ) -> Result<Link, AppError> {
        let url = normalize_url(url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "url" }))
        })?;

        let link = self
            .link_repository
            .update_url(id, owner_id, &url)
            .await?
            .ok_or_else(|| link_not_found(id))?;

        tracing::info!(link_id = id, owner_id, "Link destination updated");
        Ok(link)
    }

    /// Deletes one of the owner's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or owned by someone else.
    pub async fn delete_link(&self, owner_id: &str, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id, owner_id).await? {
            return Err(link_not_found(id));
        }

        tracing::info!(link_id = id, owner_id, "Link deleted");
        Ok(())
    }

    /// Resolves a short code for redirecting, counting the click.
    ///
    /// Codes that cannot exist are rejected without a database round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(code_not_found(code));
        }

        self.link_repository
            .resolve_and_count(code)
            .await?
            .ok_or_else(|| code_not_found(code))
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url, code)
    }

    /// Checks repository connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn link_not_found(id: i64) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

fn code_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
