//! Reconciliation of an authoritative snapshot with buffered
//! optimistic records into the single ordered view the UI renders.

use std::collections::HashSet;

use courant_shared::{Record, RecordId};

/// Merge `snapshot` with `buffer` into one sequence ordered by
/// `created_at` descending.
///
/// The snapshot is authoritative: a record present in both is
/// represented solely by the snapshot copy, and on equal timestamps
/// the stable sort keeps snapshot entries ahead of buffer entries.
/// The output never contains two entries with the same id.  Stateless
/// per call, O(n log n).
pub fn merge(snapshot: &[Record], buffer: &[Record]) -> Vec<Record> {
    let confirmed: HashSet<RecordId> = snapshot.iter().map(|r| r.id).collect();

    let mut view: Vec<Record> = Vec::with_capacity(snapshot.len() + buffer.len());
    view.extend_from_slice(snapshot);
    view.extend(
        buffer
            .iter()
            .filter(|r| !confirmed.contains(&r.id))
            .cloned(),
    );
    view.sort_by_key(|r| std::cmp::Reverse(r.created_at));
    view
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use courant_shared::{Author, Payload, UserId};

    use super::*;

    fn chat_at(secs: i64) -> Record {
        Record {
            id: RecordId::new(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            author: Author {
                id: UserId("me".into()),
                display_name: "Me".into(),
                avatar_url: None,
            },
            payload: Payload::Chat {
                text: format!("at {secs}"),
            },
        }
    }

    fn ids(view: &[Record]) -> Vec<RecordId> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn buffered_record_sorts_into_place() {
        // Snapshot [1@10, 2@5], optimistic 3@15 => [3, 1, 2].
        let snapshot = vec![chat_at(10), chat_at(5)];
        let pending = chat_at(15);

        let view = merge(&snapshot, std::slice::from_ref(&pending));
        assert_eq!(
            ids(&view),
            vec![pending.id, snapshot[0].id, snapshot[1].id]
        );
    }

    #[test]
    fn confirmed_record_appears_exactly_once() {
        let confirmed = chat_at(15);
        let snapshot = vec![confirmed.clone(), chat_at(10), chat_at(5)];

        let view = merge(&snapshot, std::slice::from_ref(&confirmed));
        assert_eq!(view.len(), 3);
        assert_eq!(view.iter().filter(|r| r.id == confirmed.id).count(), 1);
    }

    #[test]
    fn view_is_sorted_descending() {
        let snapshot = vec![chat_at(5), chat_at(20), chat_at(10)];
        let buffer = vec![chat_at(15), chat_at(1)];

        let view = merge(&snapshot, &buffer);
        let times: Vec<i64> = view.iter().map(|r| r.created_at.timestamp()).collect();
        assert_eq!(times, vec![20, 15, 10, 5, 1]);
    }

    #[test]
    fn snapshot_wins_timestamp_ties() {
        let from_snapshot = chat_at(7);
        let from_buffer = chat_at(7);

        let view = merge(
            std::slice::from_ref(&from_snapshot),
            std::slice::from_ref(&from_buffer),
        );
        assert_eq!(ids(&view), vec![from_snapshot.id, from_buffer.id]);
    }

    #[test]
    fn no_duplicate_ids_across_snapshot_sequences() {
        let mut buffer = vec![chat_at(30), chat_at(31)];
        let mut snapshot = vec![chat_at(10), chat_at(5)];

        for _ in 0..3 {
            let view = merge(&snapshot, &buffer);
            let unique: HashSet<RecordId> = view.iter().map(|r| r.id).collect();
            assert_eq!(unique.len(), view.len());

            // Next round: the provider confirms one buffered record.
            if let Some(record) = buffer.pop() {
                snapshot.insert(0, record);
            }
        }
    }
}
