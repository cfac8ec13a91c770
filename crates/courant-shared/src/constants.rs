/// Collection of chat messages on the stream provider.
pub const CHATS_COLLECTION: &str = "chats";

/// Collection of feed posts on the stream provider.
pub const POSTS_COLLECTION: &str = "posts";

/// The field every subscription orders by.
pub const ORDER_KEY_CREATED_AT: &str = "createdAt";

/// Sidebar open/close transition duration in milliseconds.
pub const SIDEBAR_TRANSITION_MS: u64 = 300;
