//! In-memory feed for testing and single-process scenarios.

use std::sync::{Arc, Mutex, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use super::change::{Change, Poll, Publish, Subscribable};
use super::FeedError;
use crate::cache::QueryKey;

/// How long [`Poll::poll`] sleeps between checks of the log.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// In-memory change feed backed by an append-only log.
///
/// Thread-safe and cheap to clone; clones share the log. Use
/// [`Subscribable::new_subscriber`] to get an independent read position.
///
/// ## Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sagip::{InMemoryCache, InMemoryFeed, Poll};
///
/// let feed = Arc::new(InMemoryFeed::new());
/// let cache = InMemoryCache::with_feed(feed.clone());
///
/// cache.set(&QueryKey::new("markers"), &markers)?;
/// let change = feed.poll(10)?.unwrap();
/// assert_eq!(change.key.as_str(), "markers");
/// ```
#[derive(Clone, Default)]
pub struct InMemoryFeed {
    log: Arc<RwLock<Vec<Change>>>,
    cursor: Arc<Mutex<Cursor>>,
}

/// Per-subscriber state: where the next read lands and what was acked.
#[derive(Default)]
struct Cursor {
    next: usize,
    acked: Vec<String>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all changes in the log.
    pub fn changes(&self) -> Vec<Change> {
        self.log.read().unwrap().to_vec()
    }

    /// Get all changes published for one query key.
    pub fn for_key(&self, key: &QueryKey) -> Vec<Change> {
        self.changes().into_iter().filter(|c| &c.key == key).collect()
    }

    /// Get the total number of changes in the log.
    pub fn len(&self) -> usize {
        self.log.read().unwrap().len()
    }

    /// True when nothing has been published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get acknowledged change IDs.
    pub fn acknowledged(&self) -> Vec<String> {
        self.cursor.lock().unwrap().acked.clone()
    }

    /// Clear all changes from the log (useful for test cleanup).
    pub fn clear(&self) {
        self.log.write().unwrap().clear();
        *self.cursor.lock().unwrap() = Cursor::default();
    }

    /// Hand out the next unread change, if one is already in the log.
    fn try_next(&self) -> Option<Change> {
        let log = self.log.read().unwrap();
        let mut cursor = self.cursor.lock().unwrap();
        let change = log.get(cursor.next).cloned()?;
        cursor.next += 1;
        Some(change)
    }
}

impl Publish for InMemoryFeed {
    fn publish(&self, change: Change) -> Result<(), FeedError> {
        self.log.write().unwrap().push(change);
        Ok(())
    }

    fn publish_batch(&self, changes: Vec<Change>) -> Result<(), FeedError> {
        self.log.write().unwrap().extend(changes);
        Ok(())
    }
}

impl Poll for InMemoryFeed {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Change>, FeedError> {
        let timeout = Duration::from_millis(timeout_ms);
        let started = Instant::now();

        loop {
            if let Some(change) = self.try_next() {
                return Ok(Some(change));
            }
            if started.elapsed() >= timeout {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn ack(&self, change_id: &str) -> Result<(), FeedError> {
        self.cursor
            .lock()
            .unwrap()
            .acked
            .push(change_id.to_string());
        Ok(())
    }
}

impl Subscribable for InMemoryFeed {
    fn new_subscriber(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            cursor: Arc::default(),
        }
    }
}
