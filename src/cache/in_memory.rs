use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::store::CacheStore;
use super::{CacheError, CacheValue, QueryKey, Versioned};
use crate::feed::{Change, ChangeKind, Publish};

#[derive(Clone)]
struct Entry {
    bytes: Vec<u8>,
    version: u64,
    stale: bool,
}

/// In-memory cache backed by a `HashMap`.
///
/// Values are stored as bitcode bytes, so raw reads and writes round-trip
/// entries bit for bit. Cloning the cache clones the handle, not the data;
/// all clones share the same storage.
///
/// Optionally announces every write on a change feed, see
/// [`InMemoryCache::with_feed`].
#[derive(Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<RwLock<Entries>>,
    feed: Option<FeedHook>,
}

type Entries = HashMap<QueryKey, Entry>;

#[derive(Clone)]
struct FeedHook {
    publisher: Arc<dyn Publish>,
    seq: Arc<AtomicU64>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that announces every write on the given feed.
    pub fn with_feed(publisher: Arc<dyn Publish>) -> Self {
        InMemoryCache {
            entries: Arc::default(),
            feed: Some(FeedHook {
                publisher,
                seq: Arc::new(AtomicU64::new(0)),
            }),
        }
    }

    /// Returns the number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.read_entries().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entries(&self) -> Result<RwLockReadGuard<'_, Entries>, CacheError> {
        self.entries
            .read()
            .map_err(|_| CacheError::Storage("lock poisoned".to_string()))
    }

    fn write_entries(&self) -> Result<RwLockWriteGuard<'_, Entries>, CacheError> {
        self.entries
            .write()
            .map_err(|_| CacheError::Storage("lock poisoned".to_string()))
    }

    fn announce(
        &self,
        key: &QueryKey,
        kind: ChangeKind,
        version: u64,
        payload: Vec<u8>,
    ) -> Result<(), CacheError> {
        if let Some(feed) = &self.feed {
            let seq = feed.seq.fetch_add(1, Ordering::SeqCst) + 1;
            let change = Change::new(format!("chg-{}", seq), key.clone(), kind, version, payload);
            feed.publisher
                .publish(change)
                .map_err(|e| CacheError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    fn write_bytes(&self, key: &QueryKey, bytes: Vec<u8>) -> Result<u64, CacheError> {
        let version = {
            let mut entries = self.write_entries()?;
            let entry = entries.entry(key.clone()).or_insert(Entry {
                bytes: Vec::new(),
                version: 0,
                stale: false,
            });
            entry.version += 1;
            entry.bytes = bytes.clone();
            entry.stale = false;
            entry.version
        };
        self.announce(key, ChangeKind::Updated, version, bytes)?;
        Ok(version)
    }
}

impl CacheStore for InMemoryCache {
    fn get<V: CacheValue>(&self, key: &QueryKey) -> Result<Option<Versioned<V>>, CacheError> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            Some(entry) if !entry.stale => {
                let data: V = bitcode::deserialize(&entry.bytes)
                    .map_err(|e| CacheError::Serde(e.to_string()))?;
                Ok(Some(Versioned {
                    data,
                    version: entry.version,
                }))
            }
            _ => Ok(None),
        }
    }

    fn set<V: CacheValue>(&self, key: &QueryKey, value: &V) -> Result<u64, CacheError> {
        let bytes = bitcode::serialize(value).map_err(|e| CacheError::Serde(e.to_string()))?;
        self.write_bytes(key, bytes)
    }

    fn set_if_version<V: CacheValue>(
        &self,
        key: &QueryKey,
        value: &V,
        expected: u64,
    ) -> Result<u64, CacheError> {
        let bytes = bitcode::serialize(value).map_err(|e| CacheError::Serde(e.to_string()))?;
        let version = {
            let mut entries = self.write_entries()?;
            match entries.get_mut(key) {
                Some(entry) => {
                    if expected != entry.version {
                        return Err(CacheError::VersionConflict {
                            key: key.clone(),
                            expected,
                            actual: entry.version,
                        });
                    }
                    entry.version += 1;
                    entry.bytes = bytes.clone();
                    entry.stale = false;
                    entry.version
                }
                None if expected == 0 => {
                    entries.insert(
                        key.clone(),
                        Entry {
                            bytes: bytes.clone(),
                            version: 1,
                            stale: false,
                        },
                    );
                    1
                }
                None => return Err(CacheError::Missing { key: key.clone() }),
            }
        };
        self.announce(key, ChangeKind::Updated, version, bytes)?;
        Ok(version)
    }

    fn get_raw(&self, key: &QueryKey) -> Result<Option<(Vec<u8>, u64)>, CacheError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| (entry.bytes.clone(), entry.version)))
    }

    fn set_raw(&self, key: &QueryKey, bytes: Vec<u8>) -> Result<u64, CacheError> {
        self.write_bytes(key, bytes)
    }

    fn version_of(&self, key: &QueryKey) -> Result<Option<u64>, CacheError> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).map(|entry| entry.version))
    }

    fn invalidate(&self, key: &QueryKey) -> Result<(), CacheError> {
        let announced = {
            let mut entries = self.write_entries()?;
            match entries.get_mut(key) {
                Some(entry) => {
                    entry.stale = true;
                    entry.bytes = Vec::new();
                    Some(entry.version)
                }
                None => None,
            }
        };
        if let Some(version) = announced {
            self.announce(key, ChangeKind::Invalidated, version, Vec::new())?;
        }
        Ok(())
    }

    fn remove(&self, key: &QueryKey) -> Result<bool, CacheError> {
        let removed = {
            let mut entries = self.write_entries()?;
            entries.remove(key).map(|entry| entry.version)
        };
        match removed {
            Some(version) => {
                self.announce(key, ChangeKind::Removed, version, Vec::new())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn keys(&self) -> Result<Vec<QueryKey>, CacheError> {
        let entries = self.read_entries()?;
        let mut keys: Vec<QueryKey> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
