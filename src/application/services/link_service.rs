//! Link lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::cancellation::Cancellation;
use crate::domain::entities::{Link, LinkDraft, LinkUpdate, NewLink, NewVisit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Service type used by the HTTP layer, the sweeper, and the admin CLI.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn VisitRepository>;

/// Service enforcing the link lifecycle.
///
/// Owns creation defaults, update semantics, the visit protocol, and expiry
/// cleanup. Every store call runs under the caller's [`Cancellation`].
pub struct LinkService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L, V> LinkService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Creates a link from client input.
    ///
    /// `created_at` is set to the current time and `clicks` starts at 0,
    /// whatever the client sent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store rejects the write.
    /// Returns [`AppError::Cancelled`] if `cancel` fires first.
    pub async fn create_link(&self, cancel: &Cancellation, draft: LinkDraft) -> Result<Link, AppError> {
        let new_link = NewLink::from_draft(draft, Utc::now());
        let link = cancel.run(|| self.link_repository.create(new_link)).await?;

        tracing::debug!(id = %link.id, expires_at = %link.expires_at, "Link created");
        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn get_link(&self, cancel: &Cancellation, id: &str) -> Result<Link, AppError> {
        cancel.run(|| self.link_repository.get_by_id(id)).await
    }

    /// Replaces title, url and expiry of a link.
    ///
    /// The caller sets `update.id`, typically from the request path. The
    /// stored click counter is never touched.
    ///
    /// Concurrent updates of the same link are last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `update.id` is empty.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn update_link(
        &self,
        cancel: &Cancellation,
        update: LinkUpdate,
    ) -> Result<Link, AppError> {
        if update.id.trim().is_empty() {
            return Err(AppError::bad_request(
                "Missing link id",
                json!({ "field": "id" }),
            ));
        }

        cancel.run(|| self.link_repository.update(update)).await
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn delete_link(&self, cancel: &Cancellation, id: &str) -> Result<(), AppError> {
        cancel.run(|| self.link_repository.delete(id)).await?;

        tracing::debug!(id, "Link deleted");
        Ok(())
    }

    /// Counts a visit and returns the link with its updated counter.
    ///
    /// # Protocol
    ///
    /// 1. Atomically increment the click counter in the store
    /// 2. Record a [`NewVisit`] for analytics
    /// 3. Re-fetch the link
    ///
    /// If step 1 fails nothing is recorded. If step 2 fails the increment
    /// stays: the counter is authoritative and the visit log may undercount.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever step failed.
    pub async fn visit_link(&self, cancel: &Cancellation, id: &str) -> Result<Link, AppError> {
        cancel
            .run(|| self.link_repository.increment_clicks(id))
            .await?;

        let new_visit = NewVisit {
            link_id: id.to_string(),
            visited_at: Utc::now(),
        };

        if let Err(e) = cancel.run(|| self.visit_repository.create(new_visit)).await {
            tracing::warn!(link_id = id, error = %e, "Click counted but visit not recorded");
            return Err(e);
        }

        cancel.run(|| self.link_repository.get_by_id(id)).await
    }

    /// Deletes every link that expired before now.
    ///
    /// Returns the number of links removed. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn cleanup_expired_links(&self, cancel: &Cancellation) -> Result<u64, AppError> {
        let now = Utc::now();
        cancel.run(|| self.link_repository.delete_expired(now)).await
    }

    /// Checks that the link store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be reached.
    pub async fn ping(&self, cancel: &Cancellation) -> Result<(), AppError> {
        cancel.run(|| self.link_repository.ping()).await
    }
}
