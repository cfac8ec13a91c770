//! # courant-view
//!
//! The reconciliation and overlay core: an optimistic write buffer
//! for records rendered before remote confirmation, the merge that
//! reconciles it with authoritative snapshots, a local-only
//! engagement overlay (likes, follows, comments), and the per-screen
//! cores that wire everything to the live stream.

pub mod buffer;
pub mod chat;
pub mod composer;
pub mod feed;
pub mod merge;
pub mod overlay;
pub mod sidebar;

pub use buffer::OptimisticBuffer;
pub use chat::{ChatCore, MessageDto};
pub use composer::{Composer, ComposerState};
pub use feed::FeedCore;
pub use merge::merge;
pub use overlay::{DecoratedPost, Engagement, OverlayStore};
pub use sidebar::{Sidebar, SidebarState};
