//! Hazard marker handlers.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::Collections;
use crate::domain::{Marker, MarkerPatch, NewMarker};
use crate::mutation::PatchOf;
use crate::service::{Context, HandlerError};

use super::{mint_id, require_role};

/// Roles allowed to create, update and delete markers.
const WRITE_ROLES: &[&str] = &["admin", "rescuer"];

pub mod create;
pub mod delete;
pub mod list;
pub mod update;
