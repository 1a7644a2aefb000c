//! Request handlers for the coordination backend.
//!
//! One directory per record type, one file per command, following the
//! service handler convention (`COMMAND` / `guard` / `handle`). Handlers
//! are stateless passthroughs: validate the caller's session, validate
//! the input, perform one store write. A failing handler has applied
//! nothing.
//!
//! ## Role rules
//!
//! - `admin` may run every command.
//! - `rescuer` may manage markers and validate reports.
//! - Any authenticated user may submit reports.
//! - List commands require authentication only.
//!
//! ## Wiring
//!
//! ```ignore
//! use sagip::{handlers, register_handlers, service, InMemoryCache};
//!
//! let service = register_handlers!(
//!     service::Service::new(InMemoryCache::new()),
//!     handlers::markers::create,
//!     handlers::markers::list,
//!     handlers::reports::submit,
//! );
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::service::{Context, HandlerError};

pub mod announcements;
pub mod barangays;
pub mod evacuations;
pub mod markers;
pub mod reports;

/// Requires an authenticated caller whose role is one of `allowed`.
pub fn require_role<S>(ctx: &Context<S>, allowed: &[&str]) -> Result<(), HandlerError> {
    ctx.user_id()?;
    match ctx.role() {
        Some(role) if allowed.contains(&role) => Ok(()),
        Some(role) => Err(HandlerError::Forbidden(format!(
            "role {} may not run {}",
            role,
            ctx.command_name()
        ))),
        None => Err(HandlerError::Forbidden(format!(
            "no role in session for {}",
            ctx.command_name()
        ))),
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Mints a process-unique record id with the given prefix, `mkr-7` style.
pub fn mint_id(prefix: &str) -> String {
    format!("{}-{}", prefix, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}
