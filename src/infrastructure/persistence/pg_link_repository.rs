//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::parse_id;
use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every `links` query.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    title: String,
    url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id.to_string(),
            r.title,
            r.url,
            r.created_at,
            r.expires_at,
            r.clicks,
        )
    }
}

fn link_not_found(id: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

/// PostgreSQL repository for links.
///
/// Ids are `BIGSERIAL` values exposed as decimal strings. The click counter
/// is incremented in a single `UPDATE`, so concurrent visits never lose a count.
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
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (title, url, created_at, expires_at, clicks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, url, created_at, expires_at, clicks
            "#,
        )
        .bind(&new_link.title)
        .bind(&new_link.url)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .bind(new_link.clicks)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: &str) -> Result<Link, AppError> {
        let key = parse_id(id)?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, title, url, created_at, expires_at, clicks
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or_else(|| link_not_found(id))
    }

    async fn update(&self, update: LinkUpdate) -> Result<Link, AppError> {
        if update.id.is_empty() {
            return Err(AppError::bad_request(
                "Missing link id",
                json!({ "field": "id" }),
            ));
        }

        let key = parse_id(&update.id)?;

        // `clicks` is intentionally absent from SET.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET title = $2, url = $3, expires_at = $4
            WHERE id = $1
            RETURNING id, title, url, created_at, expires_at, clicks
            "#,
        )
        .bind(key)
        .bind(&update.title)
        .bind(&update.url)
        .bind(update.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from)
            .ok_or_else(|| link_not_found(&update.id))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let key = parse_id(id)?;

        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(id));
        }

        Ok(())
    }

    async fn increment_clicks(&self, id: &str) -> Result<(), AppError> {
        let key = parse_id(id)?;

        let result = sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE id = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(id));
        }

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE expires_at < $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
