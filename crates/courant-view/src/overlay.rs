//! Local-only engagement overlay keyed by record id.
//!
//! Likes, follows and comments never leave the device in this core:
//! they are layered on top of remote-sourced records at render time.
//! Because the store is keyed independently of the record stream, a
//! full-snapshot replace of a record's base fields never touches its
//! accumulated overlay — only a record vanishing from the view
//! entirely discards it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use courant_shared::{Author, Comment, Payload, Record, RecordId, ValidationError};

/// Local engagement state for one record.
///
/// Seeded on first touch from the record's payload counters; mutated
/// only through [`OverlayStore`], never replicated remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub is_following: bool,
    pub is_liked: bool,
    pub like_count: u32,
    pub comments: Vec<Comment>,
}

impl Engagement {
    /// Baseline for a record never touched locally: the counter the
    /// payload arrived with, everything else off.
    fn seed(record: &Record) -> Self {
        let like_count = match &record.payload {
            Payload::Post { like_count, .. } => *like_count,
            Payload::Chat { .. } => 0,
        };
        Self {
            is_following: false,
            is_liked: false,
            like_count,
            comments: Vec::new(),
        }
    }
}

/// A record plus its engagement, the unit the UI layer renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedPost {
    pub record: Record,
    pub engagement: Engagement,
}

/// Keyed store of engagement overlays.
///
/// Owned exclusively by the screen instance that created it; there is
/// no cross-screen sharing and no global registry.
#[derive(Debug, Default)]
pub struct OverlayStore {
    entries: HashMap<RecordId, Engagement>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, record: &Record) -> &mut Engagement {
        self.entries
            .entry(record.id)
            .or_insert_with(|| Engagement::seed(record))
    }

    /// Flip the liked state, moving the count by one either way.
    /// Calling twice restores the state before the first call.
    pub fn toggle_like(&mut self, record: &Record) {
        let engagement = self.entry_mut(record);
        if engagement.is_liked {
            engagement.is_liked = false;
            engagement.like_count = engagement.like_count.saturating_sub(1);
        } else {
            engagement.is_liked = true;
            engagement.like_count += 1;
        }
        debug!(id = %record.id, liked = engagement.is_liked, "like toggled");
    }

    /// Flip the following state.  No numeric side effect.
    pub fn toggle_follow(&mut self, record: &Record) {
        let engagement = self.entry_mut(record);
        engagement.is_following = !engagement.is_following;
        debug!(id = %record.id, following = engagement.is_following, "follow toggled");
    }

    /// Append a comment authored by the current session user.
    ///
    /// Whitespace-only text is rejected with a recoverable error and
    /// the comment sequence is left unchanged.
    pub fn add_comment(
        &mut self,
        record: &Record,
        text: &str,
        author: Author,
    ) -> Result<RecordId, ValidationError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        let comment = Comment {
            id: RecordId::new(),
            author,
            content: content.to_string(),
        };
        let id = comment.id;
        self.entry_mut(record).comments.push(comment);
        debug!(record = %record.id, comment = %id, "comment added");
        Ok(id)
    }

    /// Drop overlays for records no longer present anywhere in the
    /// view, bounding memory after record deletion upstream.
    pub fn retain(&mut self, live: &HashSet<RecordId>) {
        let before = self.entries.len();
        self.entries.retain(|id, _| live.contains(id));
        if self.entries.len() != before {
            debug!(discarded = before - self.entries.len(), "overlay garbage-collected");
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&Engagement> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pure decoration: base fields from the record, engagement from
    /// the overlay, the baseline seed for untouched records.  Never
    /// alters `id`, `created_at` or `author`.
    pub fn decorate(&self, records: &[Record]) -> Vec<DecoratedPost> {
        records
            .iter()
            .map(|record| DecoratedPost {
                record: record.clone(),
                engagement: self
                    .entries
                    .get(&record.id)
                    .cloned()
                    .unwrap_or_else(|| Engagement::seed(record)),
            })
            .collect()
    }
}
