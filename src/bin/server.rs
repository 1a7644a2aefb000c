//! Coordination backend server.
//!
//! Wires every handler into a command service over an in-memory cache and
//! serves it over HTTP. `RUST_LOG` controls log output, `SAGIP_HOST` and
//! `SAGIP_PORT` the listener address.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sagip::service::{self, ServiceConfig};
use sagip::{handlers, register_handlers, InMemoryCache};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::load();
    let svc = Arc::new(register_handlers!(
        service::Service::new(InMemoryCache::new()),
        handlers::markers::create,
        handlers::markers::update,
        handlers::markers::delete,
        handlers::markers::list,
        handlers::reports::submit,
        handlers::reports::validate,
        handlers::reports::list,
        handlers::barangays::create,
        handlers::barangays::update,
        handlers::barangays::delete,
        handlers::barangays::list,
        handlers::evacuations::create,
        handlers::evacuations::update,
        handlers::evacuations::delete,
        handlers::evacuations::link_barangay,
        handlers::evacuations::unlink_barangay,
        handlers::evacuations::list,
        handlers::announcements::publish,
        handlers::announcements::update,
        handlers::announcements::delete,
        handlers::announcements::list,
    ));

    service::serve(svc, &config.addr()).await
}
