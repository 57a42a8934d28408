//! Visit entity: an immutable analytics event.

use chrono::{DateTime, Utc};

/// A recorded visit of a link.
///
/// `link_id` is a plain reference. Visits outlive the link they point at
/// when that link is deleted or swept.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub id: String,
    pub link_id: String,
    pub visited_at: DateTime<Utc>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(id: String, link_id: String, visited_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link_id,
            visited_at,
        }
    }
}

/// Input data for recording a visit.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: String,
    pub visited_at: DateTime<Utc>,
}
