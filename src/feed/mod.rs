//! Change feed - notifications for cache writes.
//!
//! Every write to a feed-connected cache produces a [`Change`] describing
//! what happened to which query key. Consumers pull changes off the feed and
//! react: refresh a view, re-render a table, forward to a websocket.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 InMemoryCache::with_feed             │
//! │   set / set_if_version / invalidate / remove         │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ publish(Change)
//!                            ▼
//! ┌──────────────────────────────────────────────────────┐
//! │              Publish + Poll Traits                   │
//! │  Publish: publish(change) / publish_batch(changes)   │
//! │  Poll: poll(timeout) / ack(id)                       │
//! └──────────────┬─────────────────────────┬─────────────┘
//!                ▼                         ▼
//!       ┌─────────────────┐      ┌──────────────────┐
//!       │  InMemoryFeed   │      │ external brokers │
//!       │   (included)    │      │   (bring your    │
//!       └─────────────────┘      │      own)        │
//!                                └──────────────────┘
//! ```
//!
//! Each subscriber created via [`Subscribable::new_subscriber`] keeps its own
//! read position over the shared change log, so independent consumers never
//! steal each other's notifications.

mod change;
mod memory;

#[cfg(feature = "emitter")]
mod emitter;

pub use change::{payload_serde, Change, ChangeKind, Poll, Publish, Subscribable};
pub use memory::InMemoryFeed;

#[cfg(feature = "emitter")]
pub use emitter::{CacheEmitter, EmittableFeed};

use std::error::Error;
use std::fmt;

/// Why a feed operation failed.
#[derive(Debug)]
pub enum FeedError {
    /// The broker connection dropped or never came up.
    Connection(String),
    /// The change payload would not serialize.
    SerializationFailed(String),
    /// The backend refused to take the change.
    Rejected(String),
    /// No acknowledgment arrived in time.
    Timeout,
    /// Whatever a broker driver needs to surface as-is.
    Backend(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Connection(msg) => write!(f, "feed connection failed: {}", msg),
            FeedError::SerializationFailed(msg) => write!(f, "change failed to serialize: {}", msg),
            FeedError::Rejected(msg) => write!(f, "feed rejected the change: {}", msg),
            FeedError::Timeout => write!(f, "timed out waiting on the feed"),
            FeedError::Backend(err) => write!(f, "feed backend error: {}", err),
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let FeedError::Backend(err) = self {
            Some(err.as_ref())
        } else {
            None
        }
    }
}
