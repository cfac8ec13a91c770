//! Domain model structs shared between the stream and view layers.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be
//! handed directly to the UI layer over IPC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Globally unique record identifier.
///
/// Assigned at creation time, on the client for optimistic records so
/// the remote-confirmed copy can later be matched by id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity reference issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

/// Who created a record or comment.
///
/// Display fields travel with every record; they are not re-derivable
/// from the id alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Ordering direction for a subscription query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// Kind-specific record content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Payload {
    /// A chat message.
    Chat { text: String },
    /// A feed post.  `like_count` is the base engagement counter the
    /// post arrived with; local adjustments live in the overlay.
    Post {
        text: String,
        image_url: Option<String>,
        like_count: u32,
    },
}

impl Payload {
    pub fn text(&self) -> &str {
        match self {
            Payload::Chat { text } => text,
            Payload::Post { text, .. } => text,
        }
    }
}

/// A chat message or feed post, immutable once created.
///
/// `created_at` is the sole ordering key; ties are broken by the
/// stream provider's insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    pub payload: Payload,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A local-only comment layered on a post by the overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    pub author: Author,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = Record {
            id: RecordId::new(),
            created_at: Utc::now(),
            author: Author {
                id: UserId("u-1".into()),
                display_name: "Vera".into(),
                avatar_url: None,
            },
            payload: Payload::Post {
                text: "hello".into(),
                image_url: None,
                like_count: 3,
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        let restored: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn payload_text_for_both_kinds() {
        let chat = Payload::Chat {
            text: "hello".into(),
        };
        let post = Payload::Post {
            text: "world".into(),
            image_url: None,
            like_count: 3,
        };
        assert_eq!(chat.text(), "hello");
        assert_eq!(post.text(), "world");
    }
}
