//! Mutation coordination integration tests: optimistic apply, confirm,
//! rollback and per-key serialization over a shared cache.

mod support;

mod lifecycle;
mod rollback;
mod serialization;
