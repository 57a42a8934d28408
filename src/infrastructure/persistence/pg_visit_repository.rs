//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::parse_id;
use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    visited_at: DateTime<Utc>,
}

/// PostgreSQL repository for visit events.
///
/// `visits.link_id` has no foreign key: visits are kept after their link
/// is deleted or swept.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let link_id = parse_id(&new_visit.link_id)?;

        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, visited_at)
            VALUES ($1, $2)
            RETURNING id, link_id, visited_at
            "#,
        )
        .bind(link_id)
        .bind(new_visit.visited_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit::new(
            row.id.to_string(),
            row.link_id.to_string(),
            row.visited_at,
        ))
    }
}
