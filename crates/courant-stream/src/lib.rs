// Live snapshot subscription layer over an opaque remote store.

pub mod lifecycle;
pub mod memory;
pub mod provider;
pub mod subscription;

pub use lifecycle::{ActiveScreen, ScreenLifecycle};
pub use memory::MemoryStore;
pub use provider::{Query, StreamEvent, StreamProvider};
pub use subscription::{CancelToken, SnapshotSender, Subscription};
