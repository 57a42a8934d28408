//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`PgVisitRepository`] - PostgreSQL via SQLx
//! - [`InMemoryLinkRepository`] / [`InMemoryVisitRepository`] - Mutex-guarded
//!   in-process stores, used by tests and for running without a database

pub mod in_memory_link_repository;
pub mod in_memory_visit_repository;
pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use in_memory_link_repository::InMemoryLinkRepository;
pub use in_memory_visit_repository::InMemoryVisitRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;

use crate::error::AppError;
use serde_json::json;

/// Parses an opaque link id into its `BIGSERIAL` key.
///
/// Ids that are not decimal integers cannot exist in the table, so they
/// surface as [`AppError::NotFound`] rather than a validation failure.
pub(crate) fn parse_id(id: &str) -> Result<i64, AppError> {
    id.parse::<i64>()
        .map_err(|_| AppError::not_found("Link not found", json!({ "id": id })))
}
