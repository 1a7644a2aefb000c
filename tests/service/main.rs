//! Command service integration tests: the full handler set dispatched
//! against an in-memory cache.

mod support;

mod flows;
mod roles;

#[cfg(feature = "http")]
mod http;
