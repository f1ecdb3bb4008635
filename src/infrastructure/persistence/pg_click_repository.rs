//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click detail records.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        // A deleted link surfaces as a foreign key violation, mapped to NotFound.
        let click = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO link_clicks (link_id, user_agent, referer, ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, clicked_at, user_agent, referer, ip
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.user_agent)
        .bind(new_click.referer)
        .bind(new_click.ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(click)
    }

    async fn recent_clicks(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let clicks = sqlx::query_as::<_, Click>(
            r#"
            SELECT id, link_id, clicked_at, user_agent, referer, ip
            FROM link_clicks
            WHERE link_id = $1
            ORDER BY clicked_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }
}
