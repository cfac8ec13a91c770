//! Chat screen core: optimistic sends reconciled against the live
//! message stream.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use courant_shared::{Payload, Record, RecordId, Session, SubscriptionError};
use courant_stream::{StreamEvent, StreamProvider};

use crate::buffer::OptimisticBuffer;
use crate::merge::merge;

/// UI-facing message shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub author_name: String,
    pub created_at: String,
}

impl MessageDto {
    fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.to_string(),
            text: record.payload.text().to_string(),
            author_id: record.author.id.to_string(),
            author_name: record.author.display_name.clone(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Mutable state for one chat screen instance.
///
/// Owned exclusively by that screen; the caller applies stream events
/// and user actions in arrival order on a single logical event queue,
/// so every method here is atomic with respect to the others.
pub struct ChatCore {
    collection: String,
    session: Session,
    buffer: OptimisticBuffer,
    snapshot: Vec<Record>,
    view: Vec<Record>,
    last_error: Option<SubscriptionError>,
}

impl ChatCore {
    pub fn new(collection: &str, session: Session) -> Self {
        Self {
            collection: collection.to_string(),
            session,
            buffer: OptimisticBuffer::new(),
            snapshot: Vec::new(),
            view: Vec::new(),
            last_error: None,
        }
    }

    /// Apply the next event from the live subscription.
    pub fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Snapshot(snapshot) => {
                self.buffer.reconcile(&snapshot);
                self.view = merge(&snapshot, self.buffer.records());
                self.snapshot = snapshot;
                self.last_error = None;
                debug!(
                    messages = self.view.len(),
                    pending = self.buffer.len(),
                    "chat view rebuilt"
                );
            }
            StreamEvent::Error(error) => {
                warn!(%error, "chat subscription error");
                self.last_error = Some(error);
            }
        }
    }

    /// Send a message: render it immediately and hand it to the
    /// provider without waiting for confirmation.
    pub fn send<P: StreamProvider>(&mut self, provider: &P, text: &str) -> RecordId {
        let record = Record {
            id: RecordId::new(),
            created_at: Utc::now(),
            author: self.session.user.clone(),
            payload: Payload::Chat {
                text: text.to_string(),
            },
        };
        let id = record.id;
        self.buffer.append(record.clone());
        self.view = merge(&self.snapshot, self.buffer.records());
        provider.write(&self.collection, record);
        debug!(%id, author = %self.session.user_id(), "message sent");
        id
    }

    /// The merged ordered view, newest first.
    pub fn view(&self) -> &[Record] {
        &self.view
    }

    pub fn messages(&self) -> Vec<MessageDto> {
        self.view.iter().map(MessageDto::from_record).collect()
    }

    /// The last provider failure, cleared by the next good snapshot.
    pub fn last_error(&self) -> Option<&SubscriptionError> {
        self.last_error.as_ref()
    }

    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }
}
