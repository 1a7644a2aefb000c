//! Announcement handlers.
//!
//! Publishing is admin work; `announcement.list` filters by audience, so
//! rescuers and residents only see what is addressed to them.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::Collections;
use crate::domain::{Announcement, AnnouncementPatch, NewAnnouncement};
use crate::mutation::PatchOf;
use crate::service::{Context, HandlerError};

use super::{mint_id, require_role};

const ADMIN_ONLY: &[&str] = &["admin"];

pub mod delete;
pub mod list;
pub mod publish;
pub mod update;
