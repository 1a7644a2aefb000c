//! Evacuation center handlers, including barangay assignment.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::Collections;
use crate::domain::{EvacuationCenter, EvacuationPatch, NewEvacuation};
use crate::mutation::PatchOf;
use crate::service::{Context, HandlerError};

use super::{mint_id, require_role};

const ADMIN_ONLY: &[&str] = &["admin"];

/// Shared input for the link / unlink commands.
#[derive(Deserialize)]
pub struct LinkInput {
    pub id: String,
    pub barangay_id: String,
}

pub mod create;
pub mod delete;
pub mod link_barangay;
pub mod list;
pub mod unlink_barangay;
pub mod update;
