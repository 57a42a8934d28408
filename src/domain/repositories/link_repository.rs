//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on write failure.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Fetches a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id, or if the id is
    /// not well-formed for this store.
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_by_id(&self, id: &str) -> Result<Link, AppError>;

    /// Replaces title, url and expiry of an existing link.
    ///
    /// The stored click counter is kept as is. Returns the link as stored
    /// after the write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `update.id` is empty.
    /// Returns [`AppError::NotFound`] if no link matches `update.id`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn update(&self, update: LinkUpdate) -> Result<Link, AppError>;

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Atomically adds one to the stored click counter.
    ///
    /// Implementations must serialize concurrent increments in the store
    /// itself; callers never read-modify-write the counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn increment_clicks(&self, id: &str) -> Result<(), AppError>;

    /// Deletes every link whose expiry is strictly before `now`.
    ///
    /// Returns the number of links removed. Zero matches is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
