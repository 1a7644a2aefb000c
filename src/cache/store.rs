use super::{CacheError, CacheValue, QueryKey, Versioned};

/// Storage interface for the query cache.
///
/// Implementations must be safe to share across threads; every method takes
/// `&self`. Typed methods serialize through the store's codec; raw methods
/// move the stored bytes untouched, which is what the mutation coordinator
/// uses to snapshot and restore entries exactly as they were.
pub trait CacheStore: Send + Sync {
    /// Reads a value. Returns `None` when the key is absent or invalidated.
    fn get<V: CacheValue>(&self, key: &QueryKey) -> Result<Option<Versioned<V>>, CacheError>;

    /// Writes a value unconditionally, bumping the entry version.
    /// Returns the new version.
    fn set<V: CacheValue>(&self, key: &QueryKey, value: &V) -> Result<u64, CacheError>;

    /// Writes a value only when the entry's current version matches
    /// `expected`. An `expected` of 0 asserts the entry does not exist yet.
    /// Returns the new version, or [`CacheError::VersionConflict`] /
    /// [`CacheError::Missing`] on mismatch.
    fn set_if_version<V: CacheValue>(
        &self,
        key: &QueryKey,
        value: &V,
        expected: u64,
    ) -> Result<u64, CacheError>;

    /// Reads the stored bytes and version without decoding.
    /// Returns `None` when the key is absent or invalidated.
    fn get_raw(&self, key: &QueryKey) -> Result<Option<(Vec<u8>, u64)>, CacheError>;

    /// Reads the entry's version counter, stale entries included.
    /// Returns `None` only when no entry exists at all.
    fn version_of(&self, key: &QueryKey) -> Result<Option<u64>, CacheError>;

    /// Writes pre-encoded bytes unconditionally, bumping the entry version.
    /// Returns the new version.
    fn set_raw(&self, key: &QueryKey, bytes: Vec<u8>) -> Result<u64, CacheError>;

    /// Marks an entry stale: reads return `None` until the next write, but
    /// the version counter survives so concurrent versioned writes still
    /// conflict. Invalidating an absent key is a no-op.
    fn invalidate(&self, key: &QueryKey) -> Result<(), CacheError>;

    /// Drops an entry entirely, version counter included.
    /// Returns whether an entry existed.
    fn remove(&self, key: &QueryKey) -> Result<bool, CacheError>;

    /// Lists every key with an entry, stale ones included.
    fn keys(&self) -> Result<Vec<QueryKey>, CacheError>;
}
