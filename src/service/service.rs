//! Command registry and dispatch.
//!
//! A `Service<S>` owns the store and a table of named handlers. Dispatch is
//! synchronous: look the command up, run its guard, run the handler. The
//! transports (HTTP, or a caller holding the service directly) all funnel
//! through [`Service::dispatch`].

use std::collections::HashMap;

use serde_json::{json, Value};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

/// What an identity gateway forwards after authenticating the caller.
///
/// ```json
/// {
///   "command": "marker.create",
///   "input": { "name": "Flooded underpass" },
///   "session_variables": { "x-user-id": "user-42" }
/// }
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    pub command: String,
    pub input: Value,
    /// Verified claims about the caller. Absent means unauthenticated.
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// A dispatched command's answer, ready for any transport to serialize.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandResponse {
    /// HTTP status semantics, also used by non-HTTP callers.
    pub status: u16,
    pub body: Value,
}

impl CommandResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(err: &HandlerError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }
}

type GuardFn<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type HandlerFn<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

struct Registration<S> {
    guard: Option<GuardFn<S>>,
    run: HandlerFn<S>,
}

/// Routes commands by name to registered handler functions.
///
/// Generic over the store type `S`; handlers reach it through
/// `ctx.store()`. Registration consumes and returns the service so a
/// whole backend reads as one builder chain (see `register_handlers!`).
pub struct Service<S> {
    store: S,
    handlers: HashMap<String, Registration<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
        }
    }

    fn register(mut self, name: &str, guard: Option<GuardFn<S>>, run: HandlerFn<S>) -> Self {
        self.handlers
            .insert(name.to_string(), Registration { guard, run });
        self
    }

    /// Register a handler for `name`.
    pub fn command<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, None, Box::new(handler))
    }

    /// Register a handler behind a guard.
    ///
    /// The guard sees the same context the handler would. When it returns
    /// `false` the handler never runs and the caller gets
    /// [`HandlerError::GuardRejected`].
    pub fn command_guarded<G, F>(self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, Some(Box::new(guard)), Box::new(handler))
    }

    /// Run one command: lookup, guard, handler, in that order.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let Some(registration) = self.handlers.get(command) else {
            return Err(HandlerError::UnknownCommand(command.to_string()));
        };

        tracing::debug!(command, "dispatching");
        let ctx = Context::new(command.to_string(), input, session, &self.store);

        match &registration.guard {
            Some(guard) if !guard(&ctx) => {
                Err(HandlerError::GuardRejected(command.to_string()))
            }
            _ => (registration.run)(&ctx),
        }
    }

    /// Run one command from a gateway payload, folding errors into the
    /// response instead of returning them.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(body) => CommandResponse::ok(body),
            Err(e) => CommandResponse::error(&e),
        }
    }

    /// Names of every registered command, in no particular order.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
