//! PostgreSQL visit repository tests.

mod common;

use chrono::{Duration, Utc};
use link_lifecycle::domain::entities::NewVisit;
use link_lifecycle::domain::repositories::VisitRepository;
use link_lifecycle::infrastructure::persistence::PgVisitRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_visit(pool: PgPool) {
    let link_id = common::insert_link(&pool, "docs", Utc::now() + Duration::days(1)).await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    let visit = repo
        .create(NewVisit {
            link_id: link_id.to_string(),
            visited_at: Utc::now(),
        })
        .await
        .unwrap();

    assert_eq!(visit.link_id, link_id.to_string());
    assert_eq!(common::count_visits(&pool, link_id).await, 1);
}

#[sqlx::test]
async fn test_visits_survive_link_deletion(pool: PgPool) {
    let link_id = common::insert_link(&pool, "docs", Utc::now() + Duration::days(1)).await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    repo.create(NewVisit {
        link_id: link_id.to_string(),
        visited_at: Utc::now(),
    })
    .await
    .unwrap();

    sqlx::query("DELETE FROM links WHERE id = $1")
        .bind(link_id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(common::count_visits(&pool, link_id).await, 1);
}
