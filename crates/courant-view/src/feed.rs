//! Feed screen core: live posts decorated with the local engagement
//! overlay.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use courant_shared::{Payload, Record, RecordId, Session, SubscriptionError, ValidationError};
use courant_stream::{StreamEvent, StreamProvider};

use crate::buffer::OptimisticBuffer;
use crate::composer::Composer;
use crate::merge::merge;
use crate::overlay::{DecoratedPost, OverlayStore};

/// Mutable state for one feed screen instance: the reconciled post
/// stream plus its local-only engagement overlay and comment
/// composer.
///
/// Owned exclusively by that screen; the caller applies stream events
/// and user actions in arrival order on a single logical event queue.
pub struct FeedCore {
    collection: String,
    session: Session,
    buffer: OptimisticBuffer,
    overlay: OverlayStore,
    composer: Composer,
    snapshot: Vec<Record>,
    view: Vec<Record>,
    last_error: Option<SubscriptionError>,
}

impl FeedCore {
    pub fn new(collection: &str, session: Session) -> Self {
        Self {
            collection: collection.to_string(),
            session,
            buffer: OptimisticBuffer::new(),
            overlay: OverlayStore::new(),
            composer: Composer::new(),
            snapshot: Vec::new(),
            view: Vec::new(),
            last_error: None,
        }
    }

    /// Apply the next event from the live subscription.
    ///
    /// On a snapshot: reconcile the buffer, rebuild the merged view,
    /// then garbage-collect overlays whose record is gone from the
    /// view entirely.  Overlays for records still present survive the
    /// replacement of their base fields.
    pub fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Snapshot(snapshot) => {
                self.buffer.reconcile(&snapshot);
                self.view = merge(&snapshot, self.buffer.records());
                self.snapshot = snapshot;

                let live: HashSet<RecordId> = self.view.iter().map(|r| r.id).collect();
                self.overlay.retain(&live);

                self.last_error = None;
                debug!(
                    posts = self.view.len(),
                    pending = self.buffer.len(),
                    overlays = self.overlay.len(),
                    "feed view rebuilt"
                );
            }
            StreamEvent::Error(error) => {
                warn!(%error, "feed subscription error");
                self.last_error = Some(error);
            }
        }
    }

    /// Create a post optimistically and hand it to the provider
    /// without waiting for confirmation.
    pub fn publish<P: StreamProvider>(
        &mut self,
        provider: &P,
        text: &str,
        image_url: Option<String>,
    ) -> RecordId {
        let record = Record {
            id: RecordId::new(),
            created_at: Utc::now(),
            author: self.session.user.clone(),
            payload: Payload::Post {
                text: text.to_string(),
                image_url,
                like_count: 0,
            },
        };
        let id = record.id;
        self.buffer.append(record.clone());
        self.view = merge(&self.snapshot, self.buffer.records());
        provider.write(&self.collection, record);
        debug!(%id, author = %self.session.user_id(), "post published");
        id
    }

    fn record(&self, id: RecordId) -> Option<Record> {
        self.view.iter().find(|r| r.id == id).cloned()
    }

    /// Like or unlike a post.  Taps on a post that just left the view
    /// are dropped with a warning.
    pub fn toggle_like(&mut self, id: RecordId) {
        match self.record(id) {
            Some(record) => self.overlay.toggle_like(&record),
            None => warn!(%id, "toggle_like on a record not in view"),
        }
    }

    /// Follow or unfollow a post's author (local-only).
    pub fn toggle_follow(&mut self, id: RecordId) {
        match self.record(id) {
            Some(record) => self.overlay.toggle_follow(&record),
            None => warn!(%id, "toggle_follow on a record not in view"),
        }
    }

    /// Open or collapse the comment composer for a post.
    pub fn toggle_composer(&mut self, id: RecordId) {
        self.composer.toggle(id);
    }

    pub fn set_draft(&mut self, text: &str) {
        self.composer.set_draft(text);
    }

    /// Submit `text` as a comment on post `id`.
    ///
    /// Empty text is a recoverable [`ValidationError`]; the comment
    /// sequence and the composer are left as they were.  On success
    /// the composer closes and the draft is cleared.
    pub fn add_comment(&mut self, id: RecordId, text: &str) -> Result<RecordId, ValidationError> {
        let record = self
            .record(id)
            .ok_or(ValidationError::UnknownRecord(id))?;
        let comment_id = self
            .overlay
            .add_comment(&record, text, self.session.user.clone())?;
        self.composer.reset();
        Ok(comment_id)
    }

    /// The decorated ordered sequence the UI renders, newest first.
    pub fn posts(&self) -> Vec<DecoratedPost> {
        self.overlay.decorate(&self.view)
    }

    /// The merged ordered view without decoration.
    pub fn view(&self) -> &[Record] {
        &self.view
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// The last provider failure, cleared by the next good snapshot.
    pub fn last_error(&self) -> Option<&SubscriptionError> {
        self.last_error.as_ref()
    }

    pub fn pending_count(&self) -> usize {
        self.buffer.len()
    }
}
