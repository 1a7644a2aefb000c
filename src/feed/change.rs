//! Core change type and feed traits.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::FeedError;
use crate::cache::QueryKey;

/// What a write did to a cache entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// The entry was written with fresh data
    Updated,
    /// The entry was marked stale, readers should refetch
    Invalidated,
    /// The entry was dropped entirely
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Updated => "updated",
            ChangeKind::Invalidated => "invalidated",
            ChangeKind::Removed => "removed",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A change notification published for one cache write.
///
/// Serializes to JSON with the payload as base64, so changes can travel
/// through text transports untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Change {
    /// Unique identifier for this change
    pub id: String,
    /// The query key that changed
    pub key: QueryKey,
    /// What happened to the entry
    pub kind: ChangeKind,
    /// The entry version after the write
    pub version: u64,
    /// The written bytes (empty for invalidations and removals)
    #[serde(with = "payload_serde")]
    pub payload: Vec<u8>,
    /// Optional metadata (correlation IDs, originating user, etc.)
    pub metadata: Option<Vec<(String, String)>>,
}

impl Change {
    pub fn new(
        id: impl Into<String>,
        key: QueryKey,
        kind: ChangeKind,
        version: u64,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            key,
            kind,
            version,
            payload,
            metadata: None,
        }
    }

    /// Build a change whose payload is `value` in bitcode form.
    pub fn encode<T: Serialize>(
        id: impl Into<String>,
        key: QueryKey,
        kind: ChangeKind,
        version: u64,
        value: &T,
    ) -> Result<Self, bitcode::Error> {
        Ok(Self::new(id, key, kind, version, bitcode::serialize(value)?))
    }

    /// Deserialize the payload back into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, bitcode::Error> {
        bitcode::deserialize(&self.payload)
    }

    /// Attach a metadata pair, keeping any pairs already present.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pairs = self.metadata.get_or_insert_default();
        pairs.push((key.into(), value.into()));
        self
    }
}

/// Serde adapter storing the binary payload as base64 in JSON.
pub mod payload_serde {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Write side of a change feed.
///
/// The included [`InMemoryFeed`](super::InMemoryFeed) covers tests and
/// single-process apps; broker-backed implementations plug in the same way.
pub trait Publish: Send + Sync {
    /// Append one change to the feed.
    fn publish(&self, change: Change) -> Result<(), FeedError>;

    /// Append several changes in order.
    ///
    /// The default loops over [`Publish::publish`]; feeds with a cheaper
    /// bulk path can override it.
    fn publish_batch(&self, changes: Vec<Change>) -> Result<(), FeedError> {
        for change in changes {
            self.publish(change)?;
        }
        Ok(())
    }
}

/// Read side of a change feed, pulled one change at a time.
///
/// For push delivery over the same changes, see
/// [`CacheEmitter`](super::CacheEmitter).
pub trait Poll: Send + Sync {
    /// Wait up to `timeout_ms` for the next unread change.
    fn poll(&self, timeout_ms: u64) -> Result<Option<Change>, FeedError>;

    /// Mark a change as handled.
    fn ack(&self, change_id: &str) -> Result<(), FeedError>;
}

/// Feeds that can fan out to more than one consumer.
pub trait Subscribable: Poll + Sized {
    /// Open another view of the same log with its own read position,
    /// so several consumers can walk the stream independently.
    fn new_subscriber(&self) -> Self;
}
