use super::gate::{KeyGate, Permit};
use super::plan::{Outcome, Plan};
use super::{MutationError, RemoteError};
use crate::cache::{CacheError, CacheStore, CacheValue, QueryKey, Record};

// What the entry looked like before the optimistic write. Fresh snapshots
// carry the stored bytes untouched, so a rollback is byte-exact.
enum Snapshot {
    Fresh { bytes: Vec<u8>, version: u64 },
    Stale { version: u64 },
    Absent,
}

impl Snapshot {
    fn capture<C: CacheStore>(cache: &C, key: &QueryKey) -> Result<Self, CacheError> {
        if let Some((bytes, version)) = cache.get_raw(key)? {
            return Ok(Snapshot::Fresh { bytes, version });
        }
        Ok(match cache.version_of(key)? {
            Some(version) => Snapshot::Stale { version },
            None => Snapshot::Absent,
        })
    }

    fn version(&self) -> u64 {
        match self {
            Snapshot::Fresh { version, .. } | Snapshot::Stale { version } => *version,
            Snapshot::Absent => 0,
        }
    }
}

/// How the remote operation resolved, for [`Coordinator::execute`].
pub enum Confirmed<V> {
    /// The server agreed; keep the optimistic state as published.
    Keep,
    /// The server returned a canonical value; write it over the optimistic
    /// state.
    Replace(V),
}

/// Drives optimistic mutations against one cache.
///
/// The coordinator owns a [`KeyGate`], so mutations on the same query key
/// run one at a time while mutations on different keys proceed in parallel.
///
/// ## Example
///
/// ```ignore
/// let coordinator = Coordinator::new(cache.clone());
///
/// let in_flight = coordinator.begin(&key, |markers: Option<Vec<Marker>>| {
///     let mut markers = markers.unwrap_or_default();
///     markers.push(new_marker.clone());
///     markers
/// })?;
///
/// match backend.create_marker(&new_marker) {
///     Ok(created) => in_flight.confirm_with(&replace_temp(created))?,
///     Err(e) => {
///         in_flight.fail()?;
///         return Err(e.into());
///     }
/// }
/// ```
pub struct Coordinator<C> {
    cache: C,
    gate: KeyGate,
}

impl<C: CacheStore> Coordinator<C> {
    pub fn new(cache: C) -> Self {
        Coordinator {
            cache,
            gate: KeyGate::new(),
        }
    }

    /// Access the underlying cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Whether a mutation currently holds the key.
    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.gate.is_held(key)
    }

    /// Starts a mutation: takes the key's gate, snapshots the entry, applies
    /// the optimistic result, and returns the guard that settles it.
    ///
    /// Blocks while another mutation holds the same key. The optimistic
    /// closure receives the current cached value, `None` when the key is
    /// absent or invalidated.
    pub fn begin<V: CacheValue>(
        &self,
        key: &QueryKey,
        optimistic: impl FnOnce(Option<V>) -> V,
    ) -> Result<InFlight<'_, C>, MutationError> {
        let permit = self.gate.acquire(key)?;
        let snapshot = Snapshot::capture(&self.cache, key)?;
        let current = self.cache.get::<V>(key)?.map(|v| v.data);
        let next = optimistic(current);
        self.cache.set(key, &next)?;
        tracing::debug!(key = %key, "optimistic write applied");

        Ok(InFlight {
            cache: &self.cache,
            key: key.clone(),
            snapshot,
            _permit: Some(permit),
            done: false,
        })
    }

    /// Runs a whole mutation: optimistic write, remote operation, then
    /// confirm or rollback depending on the outcome.
    pub fn execute<V: CacheValue>(
        &self,
        key: &QueryKey,
        optimistic: impl FnOnce(Option<V>) -> V,
        remote: impl FnOnce() -> Result<Confirmed<V>, RemoteError>,
    ) -> Result<(), MutationError> {
        let in_flight = self.begin(key, optimistic)?;
        match remote() {
            Ok(Confirmed::Keep) => in_flight.confirm(),
            Ok(Confirmed::Replace(value)) => in_flight.confirm_with(&value).map(|_| ()),
            Err(remote_err) => {
                // a failed rollback outranks the remote error
                in_flight.fail()?;
                Err(MutationError::Remote(remote_err))
            }
        }
    }

    /// Runs a [`Plan`] against the collection of `R`: applies its optimistic
    /// step, calls the remote operation, and merges the server's outcome
    /// into whatever the collection holds by then.
    ///
    /// Returns the merged records on success. On remote failure the
    /// collection is rolled back and the error surfaces as
    /// [`MutationError::Remote`].
    pub fn run_plan<R: Record>(
        &self,
        plan: Plan<R>,
        remote: impl FnOnce() -> Result<Outcome<R>, RemoteError>,
    ) -> Result<Vec<R>, MutationError> {
        let key = QueryKey::new(R::COLLECTION);
        tracing::debug!(
            key = %key,
            kind = %plan.kind(),
            target = plan.target_id(),
            "running mutation plan"
        );

        let (optimistic, merge) = plan.into_parts();
        let in_flight = self.begin(&key, |records: Option<Vec<R>>| {
            optimistic(records.unwrap_or_default())
        })?;

        match remote() {
            Ok(outcome) => {
                let local: Vec<R> = self.cache.get(&key)?.map(|v| v.data).unwrap_or_default();
                let merged = merge(local, outcome);
                in_flight.confirm_with(&merged)?;
                Ok(merged)
            }
            Err(remote_err) => {
                in_flight.fail()?;
                Err(MutationError::Remote(remote_err))
            }
        }
    }
}

/// A mutation that has published its optimistic state but not yet settled.
///
/// Exactly one of [`confirm`](InFlight::confirm),
/// [`confirm_with`](InFlight::confirm_with) or [`fail`](InFlight::fail)
/// settles the guard. Dropping it unsettled restores the snapshot, so a
/// mutation abandoned mid-flight (early `?`, panic, dropped future) rolls
/// itself back instead of leaving optimistic data for readers.
///
/// The guard also holds the key's permit; the next mutation on this key is
/// admitted only once the guard settles or drops.
pub struct InFlight<'a, C: CacheStore> {
    cache: &'a C,
    key: QueryKey,
    snapshot: Snapshot,
    _permit: Option<Permit>,
    done: bool,
}

impl<'a, C: CacheStore> InFlight<'a, C> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// The entry version the snapshot was taken at, 0 when it was absent.
    pub fn snapshot_version(&self) -> u64 {
        self.snapshot.version()
    }

    /// Settles the mutation keeping the optimistic state as published.
    pub fn confirm(mut self) -> Result<(), MutationError> {
        tracing::debug!(key = %self.key, "mutation confirmed");
        self.finish();
        Ok(())
    }

    /// Settles the mutation by writing the merged value over the optimistic
    /// state. Returns the new entry version.
    ///
    /// If the write fails the snapshot is restored before the error returns.
    pub fn confirm_with<V: CacheValue>(mut self, value: &V) -> Result<u64, MutationError> {
        let version = self.cache.set(&self.key, value)?;
        tracing::debug!(key = %self.key, version, "mutation confirmed with merge");
        self.finish();
        Ok(version)
    }

    /// Settles the mutation by restoring the snapshot exactly as it was.
    pub fn fail(mut self) -> Result<(), MutationError> {
        let result = self.restore();
        tracing::debug!(key = %self.key, "mutation rolled back");
        self.finish();
        result.map_err(Into::into)
    }

    fn restore(&self) -> Result<(), CacheError> {
        match &self.snapshot {
            Snapshot::Fresh { bytes, .. } => {
                self.cache.set_raw(&self.key, bytes.clone()).map(|_| ())
            }
            Snapshot::Stale { .. } => self.cache.invalidate(&self.key),
            Snapshot::Absent => self.cache.remove(&self.key).map(|_| ()),
        }
    }

    fn finish(&mut self) {
        self.done = true;
        self._permit.take();
    }
}

impl<'a, C: CacheStore> Drop for InFlight<'a, C> {
    fn drop(&mut self) {
        if !self.done {
            tracing::warn!(key = %self.key, "mutation dropped unsettled, rolling back");
            if let Err(e) = self.restore() {
                tracing::warn!(key = %self.key, error = %e, "rollback on drop failed");
            }
            self.finish();
        }
    }
}
