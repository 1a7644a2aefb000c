//! The command service: registry, dispatch, identity, and transports.
//!
//! The backend is a [`Service`] built over a cache store, with one handler
//! registered per command name. Handlers are plain functions reading a
//! [`Context`]; nothing here is async, so the same service serves HTTP (with
//! the `http` feature) or direct in-process dispatch in tests and tools.
//!
//! ```ignore
//! use sagip::{handlers, register_handlers, service, InMemoryCache};
//!
//! let svc = register_handlers!(
//!     service::Service::new(InMemoryCache::new()),
//!     handlers::markers::create,
//!     handlers::markers::list,
//! );
//!
//! let out = svc.dispatch("marker.list", serde_json::json!({}), session)?;
//! ```
//!
//! Handler modules follow one convention: a `COMMAND` name, a `guard` that
//! checks the payload shape, and a `handle` that does the work. See
//! [`crate::handlers`] for the full set.

mod context;
mod error;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::Session;

#[cfg(feature = "http")]
mod config;
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use config::ServiceConfig;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register convention-following handler modules on a service.
///
/// Every listed module path must export `COMMAND`, `guard`, and `handle`;
/// each becomes one `command_guarded` registration.
///
/// ```ignore
/// let svc = register_handlers!(
///     service::Service::new(InMemoryCache::new()),
///     handlers::reports::submit,
///     handlers::reports::validate,
///     handlers::reports::list,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {{
        let service = $service;
        $(
            let service = service.command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            );
        )+
        service
    }};
}
