//! Citizen report handlers.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::Collections;
use crate::domain::{NewReport, Report, ReportStatus};
use crate::service::{Context, HandlerError};

use super::{mint_id, require_role};

/// Roles allowed to resolve a pending report.
const REVIEW_ROLES: &[&str] = &["admin", "rescuer"];

pub mod list;
pub mod submit;
pub mod validate;
