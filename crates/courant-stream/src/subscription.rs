//! Subscription handles with idempotent cancellation.
//!
//! Snapshots travel over a tokio mpsc channel from the provider to
//! the subscribing screen.  A shared liveness flag makes `cancel()`
//! take effect immediately: events already queued when the flag flips
//! are dropped on the receiving side, and the provider stops sending
//! as soon as it observes the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::provider::StreamEvent;

/// Liveness flag shared between a subscription handle and the
/// provider's delivery side.  Cancelling is idempotent.
#[derive(Debug, Clone)]
pub struct CancelToken {
    alive: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop delivery.  Safe to call any number of times.
    pub fn cancel(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("subscription cancelled");
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender half handed to the provider.
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: mpsc::UnboundedSender<StreamEvent>,
    cancel: CancelToken,
}

impl SnapshotSender {
    /// Deliver an event unless the subscription was cancelled.
    ///
    /// Returns `false` when the subscriber is gone and should be
    /// pruned from the provider's fan-out list.
    pub fn send(&self, event: StreamEvent) -> bool {
        if !self.cancel.is_alive() {
            debug!("dropping event for cancelled subscription");
            return false;
        }
        self.tx.send(event).is_ok()
    }

    pub fn is_alive(&self) -> bool {
        self.cancel.is_alive() && !self.tx.is_closed()
    }
}

/// The receiving half of a live subscription.
///
/// Each subscription owns its channel and cancel token; concurrent
/// subscriptions to the same collection share nothing.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<StreamEvent>,
    cancel: CancelToken,
}

impl Subscription {
    /// Create a connected pair: the handle for the subscriber and the
    /// sender for the provider.
    pub fn channel() -> (Self, SnapshotSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelToken::new();
        let sender = SnapshotSender {
            tx,
            cancel: cancel.clone(),
        };
        (Self { rx, cancel }, sender)
    }

    /// Wait for the next event.  Returns `None` once the subscription
    /// is cancelled or the provider dropped its sender.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        if !self.cancel.is_alive() {
            return None;
        }
        let event = self.rx.recv().await;
        // An event that raced teardown is discarded, not applied.
        if self.cancel.is_alive() {
            event
        } else {
            None
        }
    }

    /// Non-blocking poll, used by synchronous event loops and tests.
    pub fn try_next(&mut self) -> Option<StreamEvent> {
        if !self.cancel.is_alive() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Stop delivery immediately.  Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_alive(&self) -> bool {
        self.cancel.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flow_until_cancelled() {
        let (mut sub, sender) = Subscription::channel();
        assert!(sender.send(StreamEvent::Snapshot(Vec::new())));
        assert!(matches!(sub.try_next(), Some(StreamEvent::Snapshot(_))));

        sub.cancel();
        assert!(!sender.send(StreamEvent::Snapshot(Vec::new())));
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let (sub, sender) = Subscription::channel();
        sub.cancel();
        sub.cancel();
        assert!(!sub.is_alive());
        assert!(!sender.is_alive());
    }

    #[test]
    fn queued_event_is_dropped_after_cancel() {
        let (mut sub, sender) = Subscription::channel();
        // Queued before teardown, must not be applied after it.
        assert!(sender.send(StreamEvent::Snapshot(Vec::new())));
        sub.cancel();
        assert!(sub.try_next().is_none());
    }
}
