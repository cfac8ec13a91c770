//! Unacknowledged local writes awaiting snapshot confirmation.

use std::collections::HashSet;

use tracing::debug;

use courant_shared::{Record, RecordId};

/// Records the user created locally that have not yet appeared in a
/// snapshot from the provider.
///
/// A buffered record becomes visible to the merge immediately and is
/// evicted exactly once its id shows up in a snapshot.  There is no
/// retry: a write that never lands simply stays buffered, visible
/// locally only.
#[derive(Debug, Default)]
pub struct OptimisticBuffer {
    pending: Vec<Record>,
}

impl OptimisticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a record for immediate display.  The record already
    /// carries its client-generated id, which is what the later
    /// remote-confirmed copy is matched on.
    pub fn append(&mut self, record: Record) {
        debug!(id = %record.id, "optimistic append");
        self.pending.push(record);
    }

    /// Evict every buffered record the snapshot now confirms; the
    /// rest are assumed still in flight and kept.
    pub fn reconcile(&mut self, snapshot: &[Record]) {
        if self.pending.is_empty() {
            return;
        }
        let confirmed: HashSet<RecordId> = snapshot.iter().map(|r| r.id).collect();
        let before = self.pending.len();
        self.pending.retain(|r| !confirmed.contains(&r.id));
        if self.pending.len() != before {
            debug!(
                confirmed = before - self.pending.len(),
                still_pending = self.pending.len(),
                "buffer reconciled"
            );
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use courant_shared::{Author, Payload, UserId};

    use super::*;

    fn chat(text: &str) -> Record {
        Record {
            id: RecordId::new(),
            created_at: Utc::now(),
            author: Author {
                id: UserId("me".into()),
                display_name: "Me".into(),
                avatar_url: None,
            },
            payload: Payload::Chat { text: text.into() },
        }
    }

    #[test]
    fn appended_records_are_visible() {
        let mut buffer = OptimisticBuffer::new();
        buffer.append(chat("hello"));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn confirmed_records_are_evicted() {
        let mut buffer = OptimisticBuffer::new();
        let sent = chat("hello");
        buffer.append(sent.clone());

        buffer.reconcile(&[sent]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn unconfirmed_records_stay_buffered() {
        let mut buffer = OptimisticBuffer::new();
        let confirmed = chat("landed");
        let lost = chat("never landed");
        buffer.append(confirmed.clone());
        buffer.append(lost.clone());

        buffer.reconcile(&[confirmed]);
        assert_eq!(buffer.records(), &[lost]);

        // Still there after further snapshots; no retry, no eviction.
        buffer.reconcile(&[chat("unrelated")]);
        assert_eq!(buffer.len(), 1);
    }
}
