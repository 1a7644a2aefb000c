//! Caller identity for a dispatched command.

use std::collections::HashMap;

/// Key under which the authenticated user's ID travels.
const USER_ID_KEY: &str = "x-user-id";
/// Key under which the authenticated user's role travels.
const USER_ROLE_KEY: &str = "x-user-role";

/// String variables describing the caller.
///
/// The service never authenticates anyone itself. An identity gateway in
/// front of it does, and forwards the verified claims as plain variables
/// (`x-user-id`, `x-user-role`, optionally `x-user-barangay`). Handlers
/// treat whatever is in here as already proven.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// A session with no claims at all, as an unauthenticated call has.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Look up one variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Insert or overwrite one variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// All variables, for transports that forward them wholesale.
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    /// The authenticated user's ID, when the gateway supplied one.
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_KEY)
    }

    /// The authenticated user's role, when the gateway supplied one.
    pub fn role(&self) -> Option<&str> {
        self.get(USER_ROLE_KEY)
    }
}
