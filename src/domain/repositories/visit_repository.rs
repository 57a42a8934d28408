//! Repository trait for visit analytics.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store for visit events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryVisitRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on write failure.
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError>;
}
