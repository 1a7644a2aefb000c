//! Barangay registry handlers.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::Collections;
use crate::domain::{Barangay, BarangayPatch, NewBarangay};
use crate::mutation::PatchOf;
use crate::service::{Context, HandlerError};

use super::{mint_id, require_role};

const ADMIN_ONLY: &[&str] = &["admin"];

pub mod create;
pub mod delete;
pub mod list;
pub mod update;
