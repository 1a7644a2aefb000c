//! Record types for disaster-response coordination: hazard markers, citizen
//! reports, barangays, evacuation centers and announcements.
//!
//! Each record type implements [`Record`](crate::Record) with its collection
//! name, so the typed cache accessors and mutation plans work over it. The
//! `New*` and `*Patch` types are the validated boundary DTOs; construct
//! records from them rather than by hand.

mod announcement;
mod barangay;
mod evacuation;
mod marker;
mod report;

pub use announcement::{Announcement, AnnouncementPatch, Audience, NewAnnouncement};
pub use barangay::{Barangay, BarangayPatch, NewBarangay};
pub use evacuation::{EvacuationCenter, EvacuationPatch, NewEvacuation};
pub use marker::{marker_styles, Marker, MarkerCategory, MarkerPatch, NewMarker};
pub use report::{NewReport, Report, ReportStatus};

use std::fmt;

/// A DTO failed validation before any remote call or cache write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub(crate) fn check_not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "must not be empty"))
    } else {
        Ok(())
    }
}

pub(crate) fn check_latitude(lat: f64) -> Result<(), ValidationError> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "latitude",
            "must be between -90 and 90",
        ))
    }
}

pub(crate) fn check_longitude(lng: f64) -> Result<(), ValidationError> {
    if lng.is_finite() && (-180.0..=180.0).contains(&lng) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "longitude",
            "must be between -180 and 180",
        ))
    }
}
