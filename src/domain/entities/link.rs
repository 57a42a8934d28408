//! Link entity representing a shareable, short-lived link.

use chrono::{DateTime, Utc};

/// A stored link with its click counter.
///
/// `id` is opaque: each store decides its format and assigns it on creation.
/// `clicks` only ever changes through the store's atomic increment.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: String,
        title: String,
        url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            title,
            url,
            created_at,
            expires_at,
            clicks,
        }
    }

    /// Returns true if the link expired strictly before `now`.
    ///
    /// A link whose expiry equals `now` is still live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Client-supplied fields for creating a link.
#[derive(Debug, Clone)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// A link ready to be persisted, minus the store-assigned id.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: i64,
}

impl NewLink {
    /// Initializes a record from a draft: `created_at` is `now`, `clicks` is 0.
    pub fn from_draft(draft: LinkDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            url: draft.url,
            created_at: now,
            expires_at: draft.expires_at,
            clicks: 0,
        }
    }
}

/// Replacement values for an existing link.
///
/// There is deliberately no `clicks` field: the stored counter survives
/// every update untouched.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub id: String,
    pub title: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(expires_at: DateTime<Utc>) -> Link {
        Link::new(
            "1".to_string(),
            "Docs".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            expires_at,
            0,
        )
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let now = Utc::now();

        assert!(sample(now - Duration::seconds(1)).is_expired_at(now));
        assert!(!sample(now).is_expired_at(now));
        assert!(!sample(now + Duration::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn test_new_link_from_draft() {
        let now = Utc::now();
        let draft = LinkDraft {
            title: "A".to_string(),
            url: "http://x".to_string(),
            expires_at: now + Duration::hours(24),
        };

        let new_link = NewLink::from_draft(draft, now);

        assert_eq!(new_link.title, "A");
        assert_eq!(new_link.url, "http://x");
        assert_eq!(new_link.created_at, now);
        assert_eq!(new_link.clicks, 0);
    }
}
