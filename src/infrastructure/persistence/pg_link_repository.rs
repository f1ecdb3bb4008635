//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

const LINK_COLUMNS: &str = "id, code, url, owner_id, clicks, created_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Every management query filters on `owner_id`, so a link owned by someone
/// else behaves exactly like a missing one.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (code, url, owner_id) VALUES ($1, $2, $3) RETURNING {LINK_COLUMNS}"
        );

        sqlx::query_as::<_, Link>(&sql)
            .bind(&new_link.code)
            .bind(&new_link.url)
            .bind(&new_link.owner_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_code(&e) {
                    AppError::conflict(
                        "Short code is already taken",
                        json!({ "code": new_link.code }),
                    )
                } else {
                    AppError::from(e)
                }
            })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_for_owner(&self, id: i64, owner_id: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1 AND owner_id = $2");

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let links = sqlx::query_as::<_, Link>(&sql)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(links)
    }

    async fn count_by_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update_url(
        &self,
        id: i64,
        owner_id: &str,
        url: &str,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "UPDATE links SET url = $3 WHERE id = $1 AND owner_id = $2 RETURNING {LINK_COLUMNS}"
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn delete(&self, id: i64, owner_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn resolve_and_count(&self, code: &str) -> Result<Option<Link>, AppError> {
        // Single statement: concurrent redirects never lose an increment.
        let sql = format!(
            "UPDATE links SET clicks = clicks + 1 WHERE code = $1 RETURNING {LINK_COLUMNS}"
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
