//! In-process implementation of visit repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Append-only visit log kept in memory.
#[derive(Default)]
pub struct InMemoryVisitRepository {
    visits: Mutex<Vec<Visit>>,
}

impl InMemoryVisitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded visits, oldest first.
    pub fn all(&self) -> Vec<Visit> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Returns the visits recorded for `link_id`.
    pub fn for_link(&self, link_id: &str) -> Vec<Visit> {
        self.all()
            .into_iter()
            .filter(|v| v.link_id == link_id)
            .collect()
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let mut visits = self
            .visits
            .lock()
            .map_err(|_| AppError::storage("Visit store lock poisoned", json!({})))?;

        let visit = Visit::new(
            (visits.len() + 1).to_string(),
            new_visit.link_id,
            new_visit.visited_at,
        );
        visits.push(visit.clone());

        Ok(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_visits_are_appended_per_link() {
        let repo = InMemoryVisitRepository::new();

        for link_id in ["1", "2", "1"] {
            repo.create(NewVisit {
                link_id: link_id.to_string(),
                visited_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.all().len(), 3);
        assert_eq!(repo.for_link("1").len(), 2);
        assert_eq!(repo.for_link("2")[0].id, "2");
    }
}
