//! Optimistic mutation coordination.
//!
//! A mutation against a cached query runs in three phases:
//!
//! 1. **begin** - take the key's gate, snapshot the current entry, apply the
//!    optimistic result locally so readers see it immediately
//! 2. **remote** - run the real operation against the backend
//! 3. **resolve** - on success, keep or merge the server's canonical answer;
//!    on failure, restore the snapshot exactly as it was
//!
//! [`Coordinator::begin`] returns an [`InFlight`] guard. Dropping the guard
//! without confirming rolls the entry back, so an abandoned mutation (early
//! return, panic, cancelled task) can never leave optimistic data behind.
//!
//! Mutations on the same key are serialized through a [`KeyGate`]; mutations
//! on different keys run independently.
//!
//! For record collections, [`Plan`] packages the optimistic and merge steps
//! of the common policies (create, update, delete, link, unlink) and
//! [`Coordinator::run_plan`] drives them end to end.

mod coordinator;
mod gate;
mod plan;

pub use coordinator::{Confirmed, Coordinator, InFlight};
pub use gate::{KeyGate, Permit};
pub use plan::{is_temp_id, temp_id, Memberships, Outcome, PatchOf, Plan, PlanKind};

use std::error::Error;
use std::fmt;

use crate::cache::CacheError;

/// Failure reported by the remote operation of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        RemoteError {
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for RemoteError {}

/// Error type for coordinated mutations.
#[derive(Debug)]
pub enum MutationError {
    /// The remote operation failed; the cache was rolled back.
    Remote(RemoteError),
    /// A cache read or write failed mid-mutation.
    Cache(CacheError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::Remote(e) => write!(f, "remote operation failed: {}", e),
            MutationError::Cache(e) => write!(f, "cache error during mutation: {}", e),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MutationError::Remote(e) => Some(e),
            MutationError::Cache(e) => Some(e),
        }
    }
}

impl From<CacheError> for MutationError {
    fn from(e: CacheError) -> Self {
        MutationError::Cache(e)
    }
}

impl From<RemoteError> for MutationError {
    fn from(e: RemoteError) -> Self {
        MutationError::Remote(e)
    }
}
