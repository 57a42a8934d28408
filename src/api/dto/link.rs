//! DTOs for link endpoints.
//!
//! Field names are camelCase on the wire, timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::{Link, LinkDraft, LinkUpdate};

/// Request body for `POST /links` and `PUT /links/{id}`.
///
/// ```json
/// { "title": "Docs", "url": "https://example.com", "expiresAt": "2026-12-31T23:59:59Z" }
/// ```
///
/// Other fields a client may echo back from a response (`id`, `clicks`,
/// `createdAt`) are accepted and ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[schema(example = "Docs")]
    pub title: String,
    #[schema(example = "https://example.com")]
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl LinkRequest {
    pub fn into_draft(self) -> LinkDraft {
        LinkDraft {
            title: self.title,
            url: self.url,
            expires_at: self.expires_at,
        }
    }

    /// Builds an update for `id`; the path id always wins.
    pub fn into_update(self, id: String) -> LinkUpdate {
        LinkUpdate {
            id,
            title: self.title,
            url: self.url,
            expires_at: self.expires_at,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[schema(example = "42")]
    pub id: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub clicks: i64,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            created_at: link.created_at,
            expires_at: link.expires_at,
            clicks: link.clicks,
        }
    }
}

/// Acknowledgement returned by `DELETE /links/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_ignores_client_counter_and_id() {
        let request: LinkRequest = serde_json::from_value(json!({
            "id": "999",
            "title": "A",
            "url": "http://x",
            "expiresAt": "2030-01-01T00:00:00Z",
            "clicks": 999
        }))
        .unwrap();

        let update = request.into_update("7".to_string());

        assert_eq!(update.id, "7");
        assert_eq!(update.title, "A");
    }

    #[test]
    fn test_request_requires_expiry() {
        let result = serde_json::from_value::<LinkRequest>(json!({
            "title": "A",
            "url": "http://x"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let now = Utc::now();
        let response = LinkResponse::from(Link::new(
            "1".to_string(),
            "A".to_string(),
            "http://x".to_string(),
            now,
            now,
            2,
        ));

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], "1");
        assert_eq!(value["clicks"], 2);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("expiresAt").is_some());
    }
}
