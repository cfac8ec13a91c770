//! In-process stream provider used by tests and demos.
//!
//! Implements the remote store's contract faithfully: the initial
//! snapshot arrives on subscribe, every write re-delivers the full
//! ordered sequence to each live subscriber, ordering is applied per
//! subscriber query with insertion order as the tiebreak.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use courant_shared::{OrderDirection, Record, SubscriptionError};

use crate::provider::{Query, StreamEvent, StreamProvider};
use crate::subscription::{SnapshotSender, Subscription};

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Record>>,
    subscribers: Vec<(Query, SnapshotSender)>,
}

/// Cloneable in-memory provider; all clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inject a connection failure for every live subscriber of
    /// `collection`, for exercising the error path.
    pub fn fail(&self, collection: &str, reason: &str) {
        let mut inner = self.lock();
        inner.subscribers.retain(|(query, sender)| {
            if query.collection != collection {
                return sender.is_alive();
            }
            sender.send(StreamEvent::Error(SubscriptionError::ConnectionFailed(
                reason.to_string(),
            )))
        });
    }

    /// Number of subscribers still registered, cancelled ones included
    /// until the next fan-out prunes them.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn snapshot_for(records: &[Record], query: &Query) -> Vec<Record> {
        let mut snapshot = records.to_vec();
        // Stable sort: insertion order is the tiebreak.
        match query.direction {
            OrderDirection::Ascending => snapshot.sort_by_key(|r| r.created_at),
            OrderDirection::Descending => {
                snapshot.sort_by_key(|r| std::cmp::Reverse(r.created_at))
            }
        }
        snapshot
    }
}

impl StreamProvider for MemoryStore {
    fn subscribe(&self, query: Query) -> Subscription {
        let (subscription, sender) = Subscription::channel();
        let mut inner = self.lock();
        let records = inner
            .collections
            .get(&query.collection)
            .cloned()
            .unwrap_or_default();
        sender.send(StreamEvent::Snapshot(Self::snapshot_for(&records, &query)));
        debug!(collection = %query.collection, "subscription opened");
        inner.subscribers.push((query, sender));
        subscription
    }

    fn write(&self, collection: &str, record: Record) {
        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
        let records = inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default();
        debug!(collection, total = records.len(), "record written");
        inner.subscribers.retain(|(query, sender)| {
            if query.collection != collection {
                return sender.is_alive();
            }
            sender.send(StreamEvent::Snapshot(Self::snapshot_for(&records, query)))
        });
    }
}
