//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct LinkTable {
    next_id: u64,
    links: HashMap<String, Link>,
}

/// Link store kept in a mutex-guarded map.
///
/// Every operation holds the lock for its whole read-modify-write, which
/// gives `increment_clicks` the same atomicity as the Postgres `UPDATE`.
/// Ids are sequential decimal strings starting at `"1"`.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    table: Mutex<LinkTable>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links currently stored.
    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.links.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, LinkTable>, AppError> {
        self.table
            .lock()
            .map_err(|_| AppError::storage("Link store lock poisoned", json!({})))
    }
}

fn link_not_found(id: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut table = self.lock()?;
        table.next_id += 1;

        let link = Link::new(
            table.next_id.to_string(),
            new_link.title,
            new_link.url,
            new_link.created_at,
            new_link.expires_at,
            new_link.clicks,
        );
        table.links.insert(link.id.clone(), link.clone());

        Ok(link)
    }

    async fn get_by_id(&self, id: &str) -> Result<Link, AppError> {
        self.lock()?
            .links
            .get(id)
            .cloned()
            .ok_or_else(|| link_not_found(id))
    }

    async fn update(&self, update: LinkUpdate) -> Result<Link, AppError> {
        if update.id.is_empty() {
            return Err(AppError::bad_request(
                "Missing link id",
                json!({ "field": "id" }),
            ));
        }

        let mut table = self.lock()?;
        let link = table
            .links
            .get_mut(&update.id)
            .ok_or_else(|| link_not_found(&update.id))?;

        link.title = update.title;
        link.url = update.url;
        link.expires_at = update.expires_at;

        Ok(link.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.lock()?
            .links
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| link_not_found(id))
    }

    async fn increment_clicks(&self, id: &str) -> Result<(), AppError> {
        let mut table = self.lock()?;
        let link = table.links.get_mut(id).ok_or_else(|| link_not_found(id))?;
        link.clicks += 1;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut table = self.lock()?;
        let before = table.links.len();
        table.links.retain(|_, link| !link.is_expired_at(now));
        Ok((before - table.links.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
