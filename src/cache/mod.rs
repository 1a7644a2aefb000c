//! Query cache - versioned key-value storage for fetched application data.
//!
//! The cache holds one value per [`QueryKey`], each with a version marker
//! that increments on every write. Values are anything serde can round-trip;
//! entity collections (`Vec<R>` where `R: Record`) get a typed accessor via
//! [`Collections::collection`].
//!
//! The cache is an explicit dependency: construct an [`InMemoryCache`] and
//! pass it (or a clone sharing the same storage) to whatever needs it.
//!
//! ## Example
//!
//! ```ignore
//! use sagip::{Collections, InMemoryCache, QueryKey, Record};
//!
//! let cache = InMemoryCache::new();
//! cache.set(&QueryKey::new("announcements"), &vec!["drill at 0900"])?;
//!
//! let markers = cache.collection::<Marker>();
//! markers.store(vec![flood_marker])?;
//! let loaded = markers.records()?;
//! ```

mod collections;
mod in_memory;
mod store;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Trait bound for anything storable in the cache.
pub trait CacheValue: Serialize + DeserializeOwned + Clone + Send + Sync {}

impl<T: Serialize + DeserializeOwned + Clone + Send + Sync> CacheValue for T {}

/// Trait for entity records stored in `Vec<R>` collections.
///
/// Derivable with `#[derive(Record)]` from `sagip_macros`.
pub trait Record: CacheValue {
    /// Collection this record belongs to, e.g. `"markers"`. Doubles as the
    /// query key under which the full collection is cached.
    const COLLECTION: &'static str;

    /// Stable identifier, unique within the collection.
    fn id(&self) -> &str;
}

/// An opaque, comparable token identifying one cache entry.
///
/// Built from a collection name plus an optional scope segment, rendered as
/// `"markers"` or `"reports:user-7"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    /// Key for a whole collection.
    pub fn new(collection: impl Into<String>) -> Self {
        QueryKey(collection.into())
    }

    /// Key for a scoped slice of a collection (e.g. one user's reports).
    pub fn scoped(collection: &str, scope: &str) -> Self {
        QueryKey(format!("{}:{}", collection, scope))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The collection segment (everything before the first `:`).
    pub fn collection(&self) -> &str {
        match self.0.split_once(':') {
            Some((collection, _)) => collection,
            None => &self.0,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cached data paired with the version counter that guards optimistic writes.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Why a cache operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A versioned write lost the race: the entry moved past `expected`.
    VersionConflict {
        key: QueryKey,
        expected: u64,
        actual: u64,
    },
    /// A value failed to encode or decode.
    Serde(String),
    /// The backing store itself failed.
    Storage(String),
    /// No entry under a key that was required to exist.
    Missing { key: QueryKey },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::VersionConflict { key, expected, actual } => {
                write!(f, "stale write to {}: expected v{}, found v{}", key, expected, actual)
            }
            CacheError::Serde(msg) => write!(f, "cache serialization error: {}", msg),
            CacheError::Storage(msg) => write!(f, "cache storage error: {}", msg),
            CacheError::Missing { key } => write!(f, "cache entry not found: {}", key),
        }
    }
}

impl std::error::Error for CacheError {}

pub use collections::{CollectionHandle, Collections};
pub use in_memory::InMemoryCache;
pub use store::CacheStore;
