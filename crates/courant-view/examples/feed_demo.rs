//! End-to-end feed session against the in-memory provider.
//!
//! Run with `RUST_LOG=debug cargo run --example feed_demo` to watch
//! the reconciliation decisions as they happen.

use anyhow::Result;

use courant_shared::constants::POSTS_COLLECTION;
use courant_shared::{Author, Session, UserId};
use courant_stream::{MemoryStore, Query, ScreenLifecycle};
use courant_view::FeedCore;

fn session(id: &str, name: &str) -> Session {
    Session::new(Author {
        id: UserId(id.into()),
        display_name: name.into(),
        avatar_url: None,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = MemoryStore::new();

    let mut feed = FeedCore::new(POSTS_COLLECTION, session("u-vera", "Vera Mo"));
    let mut screen =
        ScreenLifecycle::new(Query::latest_first(POSTS_COLLECTION)).activate(&store);

    // A remote peer posts, then we post optimistically ourselves.
    let mut peer_feed = FeedCore::new(POSTS_COLLECTION, session("u-john", "John Doe"));
    peer_feed.publish(&store, "First post from the other side", None);

    let mine = feed.publish(&store, "Hello from Courant", None);
    feed.toggle_like(mine);

    // Drain everything the subscription delivered so far.
    while let Some(event) = screen.try_next() {
        feed.apply(event);
    }

    for post in feed.posts() {
        println!(
            "{}: {} ({} likes{})",
            post.record.author.display_name,
            post.record.payload.text(),
            post.engagement.like_count,
            if post.engagement.is_liked {
                ", liked by you"
            } else {
                ""
            },
        );
    }

    // Teardown cancels the subscription; a post made while the screen
    // is away only shows up on the next activation's snapshot.
    let detached = screen.deactivate();
    peer_feed.publish(&store, "Posted while the screen was away", None);

    let mut screen = detached.activate(&store);
    if let Some(event) = screen.next_event().await {
        feed.apply(event);
    }
    println!("after re-activation: {} posts", feed.posts().len());

    Ok(())
}
