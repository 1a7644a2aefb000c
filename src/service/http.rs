//! HTTP transport over axum (the `http` feature).
//!
//! Two routes, nothing else:
//!
//! - `POST /:command` runs a command. The JSON body is the input; request
//!   headers become the session variables, so an identity gateway in front
//!   can inject `x-user-id` and friends.
//! - `GET /health` answers `{ "ok": true, "commands": [...] }`.
//!
//! [`router`] returns a bare `Router` for composing with other routes;
//! [`serve`] binds and runs it.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::service::{CommandRequest, Service};

/// An axum router dispatching every `POST /:command` through the service.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/:command", post(run_command))
        .with_state(service)
}

/// Bind `addr` (e.g. `"0.0.0.0:3000"`) and serve until the task is aborted.
pub async fn serve<S: Send + Sync + 'static>(
    service: Arc<Service<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let registered = service.commands().len();
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(commands = registered, "listening on {addr}");
    axum::serve(listener, app).await
}

async fn health<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> Json<Value> {
    Json(json!({ "ok": true, "commands": service.commands() }))
}

/// Folds path, body, and headers into a [`CommandRequest`] so HTTP calls and
/// gateway payloads take the identical dispatch path.
async fn run_command<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let request = CommandRequest {
        command,
        input,
        session_variables: claims(&headers),
    };
    let response = service.dispatch_request(&request);
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

/// Every readable header becomes a session variable. Header names arrive
/// lowercased, which is exactly the form `Session` keys on.
fn claims(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect()
}
