//! Per-command handler context.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// Everything a handler sees for one command: the raw payload, the caller's
/// session, and the store the service was built over.
///
/// Handlers never own the store; they borrow it for the duration of the
/// dispatch, so `Context` is parameterized over the store type `S`.
pub struct Context<'a, S> {
    store: &'a S,
    command_name: String,
    input: Value,
    session: Session,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, store: &'a S) -> Self {
        Self {
            store,
            command_name,
            input,
            session,
        }
    }

    /// Name of the command being dispatched.
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The calling user's ID, or `Unauthorized` when the session has none.
    ///
    /// Every handler that touches data starts here.
    pub fn user_id(&self) -> Result<&str, HandlerError> {
        match self.session.user_id() {
            Some(id) => Ok(id),
            None => Err(HandlerError::Unauthorized(
                "missing user ID in session".to_string(),
            )),
        }
    }

    /// The calling user's role, when the session carries one.
    pub fn role(&self) -> Option<&str> {
        self.session.role()
    }

    pub fn store(&self) -> &S {
        self.store
    }

    /// Deserialize the payload into the handler's input type.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        T::deserialize(&self.input).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// The payload as it arrived, untyped.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// True when the payload has a top-level field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.input.get(name).is_some()
    }

    /// True when the payload has every one of these top-level fields.
    /// Guards use this to reject malformed input before the handler runs.
    pub fn has_fields(&self, names: &[&str]) -> bool {
        for name in names {
            if self.input.get(name).is_none() {
                return false;
            }
        }
        true
    }
}
