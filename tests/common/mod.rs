#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use link_lifecycle::application::services::{DynLinkService, LinkService};
use link_lifecycle::domain::repositories::{LinkRepository, VisitRepository};
use link_lifecycle::infrastructure::persistence::{
    InMemoryLinkRepository, InMemoryVisitRepository,
};
use link_lifecycle::routes::router;
use link_lifecycle::state::AppState;

pub const TEST_TOKEN: &str = "Bearer test-token";

/// Test server wired to in-memory stores the test can inspect.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<InMemoryLinkRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
    pub service: Arc<DynLinkService>,
}

pub fn create_test_service(
    links: Arc<InMemoryLinkRepository>,
    visits: Arc<InMemoryVisitRepository>,
) -> Arc<DynLinkService> {
    let link_repo: Arc<dyn LinkRepository> = links;
    let visit_repo: Arc<dyn VisitRepository> = visits;
    Arc::new(LinkService::new(link_repo, visit_repo))
}

pub fn create_test_state(service: Arc<DynLinkService>) -> AppState {
    AppState::new(service, std::time::Duration::from_secs(5))
}

pub fn create_test_app() -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::new());
    let visits = Arc::new(InMemoryVisitRepository::new());
    let service = create_test_service(links.clone(), visits.clone());

    let server = TestServer::new(router(create_test_state(service.clone()))).unwrap();

    TestApp {
        server,
        links,
        visits,
        service,
    }
}

pub fn future_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::days(30)
}

pub fn past_expiry() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

pub fn link_body(title: &str, url: &str, expires_at: DateTime<Utc>) -> Value {
    json!({
        "title": title,
        "url": url,
        "expiresAt": expires_at.to_rfc3339(),
    })
}

/// Creates a link through the API and returns its JSON representation.
pub async fn create_link_via_api(server: &TestServer, body: Value) -> Value {
    let response = server
        .post("/links")
        .add_header("Authorization", TEST_TOKEN)
        .json(&body)
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn insert_link(pool: &PgPool, title: &str, expires_at: DateTime<Utc>) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO links (title, url, created_at, expires_at, clicks) VALUES ($1, $2, NOW(), $3, 0) RETURNING id",
    )
    .bind(title)
    .bind("https://example.com")
    .bind(expires_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_visits(pool: &PgPool, link_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
        .bind(link_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
