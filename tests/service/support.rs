//! Shared fixtures for the service suite.

use std::collections::HashMap;

use sagip::service::{Service, Session};
use sagip::{handlers, register_handlers, InMemoryCache};

/// A service with every coordination command registered.
pub fn full_service() -> Service<InMemoryCache> {
    register_handlers!(
        Service::new(InMemoryCache::new()),
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
    )
}

/// Session for an authenticated user with a role.
pub fn session(user_id: &str, role: &str) -> Session {
    let mut vars = HashMap::new();
    vars.insert("x-user-id".to_string(), user_id.to_string());
    vars.insert("x-user-role".to_string(), role.to_string());
    Session::from_map(vars)
}
