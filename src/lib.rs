mod cache;
mod feed;
mod mutation;
mod table;

pub mod domain;
pub mod handlers;
pub mod service;

pub use cache::{
    CacheError, CacheStore, CacheValue, CollectionHandle, Collections, InMemoryCache, QueryKey,
    Record, Versioned,
};
pub use feed::{
    payload_serde, Change, ChangeKind, FeedError, InMemoryFeed, Poll, Publish, Subscribable,
};
pub use mutation::{
    is_temp_id, temp_id, Confirmed, Coordinator, InFlight, KeyGate, Memberships, MutationError,
    Outcome, PatchOf, Permit, Plan, PlanKind, RemoteError,
};
pub use table::{
    group_by, sorted, CellValue, Columned, GroupStyle, GroupStyles, GroupedTable, Section,
    SectionView, SortDirection, SortState,
};

#[cfg(feature = "emitter")]
pub use feed::{CacheEmitter, EmittableFeed};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;

// Derive macros; the trait impls they expand to live in this crate
pub use sagip_macros::{Patch, Record};
