use std::marker::PhantomData;

use super::store::CacheStore;
use super::{CacheError, QueryKey, Record, Versioned};

/// Typed accessor for one record collection cached as a `Vec<R>`.
///
/// Borrow one from any store via [`Collections::collection`]:
///
/// ```ignore
/// let markers = cache.collection::<Marker>();
/// let version = markers.version()?;
/// markers.store_if(updated, version)?;
/// ```
pub struct CollectionHandle<'a, S, R> {
    store: &'a S,
    key: QueryKey,
    _marker: PhantomData<R>,
}

impl<'a, S: CacheStore, R: Record> CollectionHandle<'a, S, R> {
    pub fn new(store: &'a S) -> Self {
        CollectionHandle {
            store,
            key: QueryKey::new(R::COLLECTION),
            _marker: PhantomData,
        }
    }

    /// The query key this handle reads and writes.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Loads the collection with its version, `None` when not cached.
    pub fn load(&self) -> Result<Option<Versioned<Vec<R>>>, CacheError> {
        self.store.get(&self.key)
    }

    /// Loads the records, or an empty list when not cached.
    pub fn records(&self) -> Result<Vec<R>, CacheError> {
        Ok(self.load()?.map(|v| v.data).unwrap_or_default())
    }

    /// The entry's version counter, stale entries included, 0 when the
    /// collection was never cached.
    pub fn version(&self) -> Result<u64, CacheError> {
        Ok(self.store.version_of(&self.key)?.unwrap_or(0))
    }

    /// Loads records and version together for a read-modify-write.
    /// The version is read before the records, so a write that lands in
    /// between surfaces as a `store_if` conflict instead of being lost.
    pub fn for_update(&self) -> Result<(Vec<R>, u64), CacheError> {
        let version = self.version()?;
        Ok((self.records()?, version))
    }

    /// Finds one record by id.
    pub fn find(&self, id: &str) -> Result<Option<R>, CacheError> {
        Ok(self.records()?.into_iter().find(|r| r.id() == id))
    }

    /// Replaces the collection unconditionally. Returns the new version.
    pub fn store(&self, records: Vec<R>) -> Result<u64, CacheError> {
        self.store.set(&self.key, &records)
    }

    /// Replaces the collection only when the version still matches.
    /// An `expected` of 0 asserts the collection was never cached.
    pub fn store_if(&self, records: Vec<R>, expected: u64) -> Result<u64, CacheError> {
        self.store.set_if_version(&self.key, &records, expected)
    }

    /// Marks the cached collection stale.
    pub fn invalidate(&self) -> Result<(), CacheError> {
        self.store.invalidate(&self.key)
    }
}

/// Extension trait giving every store typed collection handles.
pub trait Collections: CacheStore + Sized {
    fn collection<R: Record>(&self) -> CollectionHandle<'_, Self, R> {
        CollectionHandle::new(self)
    }
}

impl<S: CacheStore> Collections for S {}
