use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_not_empty, ValidationError};
use crate::cache::Record;
use crate::mutation::PatchOf;

/// Who an announcement is addressed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Everyone,
    Rescuers,
    /// Residents of one barangay, by id.
    Barangay(String),
}

impl Audience {
    /// Whether a user with the given role and barangay sees this
    /// announcement.
    pub fn reaches(&self, role: &str, barangay_id: Option<&str>) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Rescuers => role == "rescuer" || role == "admin",
            Audience::Barangay(id) => barangay_id == Some(id.as_str()),
        }
    }
}

/// A broadcast announcement from the coordination team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub posted_by: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Announcement {
    const COLLECTION: &'static str = "announcements";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for publishing an announcement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    pub audience: Audience,
}

impl NewAnnouncement {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("title", &self.title)?;
        check_not_empty("body", &self.body)?;
        if let Audience::Barangay(id) = &self.audience {
            check_not_empty("audience", id)?;
        }
        Ok(())
    }

    pub fn into_record(self, id: impl Into<String>, posted_by: impl Into<String>) -> Announcement {
        Announcement {
            id: id.into(),
            title: self.title,
            body: self.body,
            audience: self.audience,
            posted_by: posted_by.into(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update for an announcement.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnnouncementPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub audience: Option<Audience>,
}

impl AnnouncementPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_not_empty("title", title)?;
        }
        if let Some(body) = &self.body {
            check_not_empty("body", body)?;
        }
        Ok(())
    }
}

impl PatchOf<Announcement> for AnnouncementPatch {
    fn apply_to(&self, record: &mut Announcement) {
        if let Some(value) = &self.title {
            record.title = value.clone();
        }
        if let Some(value) = &self.body {
            record.body = value.clone();
        }
        if let Some(value) = &self.audience {
            record.audience = value.clone();
        }
    }
}
