//! The remote store's interface, as consumed by this core.
//!
//! The store itself is an external collaborator: it is only required
//! to deliver the *entire* current ordered sequence of records on
//! every change (full-snapshot semantics, never incremental diffs)
//! and to accept fire-and-forget writes.

use courant_shared::constants::ORDER_KEY_CREATED_AT;
use courant_shared::{OrderDirection, Record, SubscriptionError};

use crate::subscription::Subscription;

/// A subscription query: one collection, ordered by one field in one
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    pub order_by: String,
    pub direction: OrderDirection,
}

impl Query {
    /// Order a collection by `createdAt`, newest first — the shape
    /// both the chat and feed screens subscribe with.
    pub fn latest_first(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            order_by: ORDER_KEY_CREATED_AT.to_string(),
            direction: OrderDirection::Descending,
        }
    }
}

/// Events delivered on a live subscription.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// The complete current ordered sequence for the query.
    Snapshot(Vec<Record>),
    /// The provider reported a connection failure.  Non-fatal; the
    /// core surfaces it to the UI and leaves retry to the transport.
    Error(SubscriptionError),
}

/// A remote store consumed as an opaque ordered-stream provider.
pub trait StreamProvider {
    /// Open a live subscription for `query`.  The first snapshot
    /// reflects the collection's current contents; every later change
    /// re-delivers the full sequence.
    fn subscribe(&self, query: Query) -> Subscription;

    /// Fire-and-forget write.  Confirmation only ever arrives
    /// indirectly, as the record showing up in a later snapshot.
    fn write(&self, collection: &str, record: Record);
}
