use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_latitude, check_longitude, check_not_empty, ValidationError};
use crate::cache::Record;
use crate::table::{CellValue, Columned};

/// Review state of a citizen report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Validated,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Validated => "validated",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    /// Only pending reports accept a review decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, ReportStatus::Pending)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A citizen-submitted emergency report awaiting review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ReportStatus,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Report {
    const COLLECTION: &'static str = "reports";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Columned for Report {
    const COLUMNS: &'static [&'static str] = &[
        "description",
        "status",
        "latitude",
        "longitude",
        "submitted_by",
        "created_at",
    ];

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "description" => self.description.as_str().into(),
            "status" => self.status.as_str().into(),
            "latitude" => self.latitude.into(),
            "longitude" => self.longitude.into(),
            "submitted_by" => self.submitted_by.as_str().into(),
            "created_at" => self.created_at.into(),
            _ => CellValue::Missing,
        }
    }
}

/// Payload for submitting a report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewReport {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewReport {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("description", &self.description)?;
        check_latitude(self.latitude)?;
        check_longitude(self.longitude)?;
        Ok(())
    }

    /// New reports always start pending.
    pub fn into_record(self, id: impl Into<String>, submitted_by: impl Into<String>) -> Report {
        Report {
            id: id.into(),
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            status: ReportStatus::Pending,
            submitted_by: submitted_by.into(),
            created_at: Utc::now(),
        }
    }
}
