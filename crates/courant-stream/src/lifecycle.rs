//! Binds a subscription to a screen's visible lifetime.
//!
//! The two types form a typestate pair: a detached [`ScreenLifecycle`]
//! is all a hidden screen holds, and activating it *consumes* it,
//! yielding an [`ActiveScreen`] that owns the one live subscription.
//! Activating twice without teardown therefore does not compile, and
//! teardown happens exactly once — explicitly via [`ActiveScreen::deactivate`]
//! or implicitly on drop.

use tracing::info;

use crate::provider::{Query, StreamEvent, StreamProvider};
use crate::subscription::Subscription;

/// A screen that is not currently visible.  Holds only its query.
#[derive(Debug, Clone)]
pub struct ScreenLifecycle {
    query: Query,
}

impl ScreenLifecycle {
    pub fn new(query: Query) -> Self {
        Self { query }
    }

    /// The screen became visible: open exactly one subscription.
    pub fn activate<P: StreamProvider>(self, provider: &P) -> ActiveScreen {
        info!(collection = %self.query.collection, "screen activated");
        let subscription = provider.subscribe(self.query.clone());
        ActiveScreen {
            query: self.query,
            subscription,
        }
    }
}

/// A visible screen holding the single live subscription.
#[derive(Debug)]
pub struct ActiveScreen {
    query: Query,
    subscription: Subscription,
}

impl ActiveScreen {
    /// Wait for the next event from the stream.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.subscription.next_event().await
    }

    /// Non-blocking poll, for synchronous event loops and tests.
    pub fn try_next(&mut self) -> Option<StreamEvent> {
        self.subscription.try_next()
    }

    /// The screen went invisible: cancel the subscription and hand
    /// back the detached lifecycle.  Re-activating later opens a
    /// fresh subscription; the cancelled one is never reused.
    pub fn deactivate(self) -> ScreenLifecycle {
        info!(collection = %self.query.collection, "screen deactivated");
        let query = self.query.clone();
        // Drop runs next and cancels the subscription.
        ScreenLifecycle { query }
    }
}

impl Drop for ActiveScreen {
    fn drop(&mut self) {
        self.subscription.cancel();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use courant_shared::{Author, Payload, Record, RecordId, UserId};

    use crate::memory::MemoryStore;

    use super::*;

    fn chat(text: &str) -> Record {
        Record {
            id: RecordId::new(),
            created_at: Utc::now(),
            author: Author {
                id: UserId("peer".into()),
                display_name: "Peer".into(),
                avatar_url: None,
            },
            payload: Payload::Chat { text: text.into() },
        }
    }

    #[test]
    fn activation_opens_and_teardown_closes() {
        let store = MemoryStore::new();
        let screen = ScreenLifecycle::new(Query::latest_first("chats"));

        let mut active = screen.activate(&store);
        assert!(matches!(active.try_next(), Some(StreamEvent::Snapshot(_))));

        let detached = active.deactivate();
        store.write("chats", chat("after teardown"));
        assert_eq!(store.subscriber_count(), 0);

        // Re-activation opens a fresh subscription with current data.
        let mut active = detached.activate(&store);
        match active.try_next() {
            Some(StreamEvent::Snapshot(records)) => assert_eq!(records.len(), 1),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[test]
    fn in_flight_snapshot_dies_with_teardown() {
        let store = MemoryStore::new();
        let mut active = ScreenLifecycle::new(Query::latest_first("chats")).activate(&store);
        assert!(active.try_next().is_some());

        // Queued but unconsumed at teardown: never applied anywhere.
        store.write("chats", chat("in flight"));
        let detached = active.deactivate();

        // The fresh subscription starts from the current contents, it
        // does not replay the orphaned delivery.
        let mut reopened = detached.activate(&store);
        match reopened.try_next() {
            Some(StreamEvent::Snapshot(records)) => assert_eq!(records.len(), 1),
            other => panic!("expected snapshot, got {other:?}"),
        }
        assert!(reopened.try_next().is_none());
    }

    #[test]
    fn drop_cancels_the_subscription() {
        let store = MemoryStore::new();
        {
            let _active = ScreenLifecycle::new(Query::latest_first("chats")).activate(&store);
        }
        store.write("chats", chat("nobody listening"));
        assert_eq!(store.subscriber_count(), 0);
    }
}
