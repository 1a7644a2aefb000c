use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_latitude, check_longitude, check_not_empty, ValidationError};
use crate::cache::Record;
use crate::mutation::PatchOf;
use crate::table::{CellValue, Columned, GroupStyle, GroupStyles};

/// Hazard category a marker belongs to. Doubles as the grouping key in
/// marker tables and the icon selector on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Flood,
    Fire,
    Landslide,
    Earthquake,
    RoadBlock,
    Report,
}

impl MarkerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerCategory::Flood => "flood",
            MarkerCategory::Fire => "fire",
            MarkerCategory::Landslide => "landslide",
            MarkerCategory::Earthquake => "earthquake",
            MarkerCategory::RoadBlock => "road_block",
            MarkerCategory::Report => "report",
        }
    }
}

impl std::fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header styles for every marker category, with a neutral fallback for
/// category values this build does not know about.
pub fn marker_styles() -> GroupStyles {
    GroupStyles::new()
        .register("flood", GroupStyle::new("Flood", "water", "#1565c0"))
        .register("fire", GroupStyle::new("Fire", "flame", "#c62828"))
        .register("landslide", GroupStyle::new("Landslide", "mountain", "#6d4c41"))
        .register("earthquake", GroupStyle::new("Earthquake", "activity", "#4527a0"))
        .register("road_block", GroupStyle::new("Road Block", "barrier", "#ef6c00"))
        .register("report", GroupStyle::new("Citizen Report", "message", "#2e7d32"))
}

/// A geolocated hazard marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub category: MarkerCategory,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub reported_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Marker {
    const COLLECTION: &'static str = "markers";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Columned for Marker {
    const COLUMNS: &'static [&'static str] =
        &["name", "category", "latitude", "longitude", "created_at"];

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => self.name.as_str().into(),
            "category" => self.category.as_str().into(),
            "latitude" => self.latitude.into(),
            "longitude" => self.longitude.into(),
            "created_at" => self.created_at.into(),
            _ => CellValue::Missing,
        }
    }
}

/// Payload for creating a marker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMarker {
    pub category: MarkerCategory,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: String,
}

impl NewMarker {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("name", &self.name)?;
        check_latitude(self.latitude)?;
        check_longitude(self.longitude)?;
        Ok(())
    }

    pub fn into_record(self, id: impl Into<String>, reported_by: Option<String>) -> Marker {
        Marker {
            id: id.into(),
            category: self.category,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
            reported_by,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a marker; `Some` fields overwrite, `None` fields keep.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MarkerPatch {
    #[serde(default)]
    pub category: Option<MarkerCategory>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MarkerPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_not_empty("name", name)?;
        }
        if let Some(latitude) = self.latitude {
            check_latitude(latitude)?;
        }
        if let Some(longitude) = self.longitude {
            check_longitude(longitude)?;
        }
        Ok(())
    }
}

impl PatchOf<Marker> for MarkerPatch {
    fn apply_to(&self, record: &mut Marker) {
        if let Some(value) = &self.category {
            record.category = *value;
        }
        if let Some(value) = &self.name {
            record.name = value.clone();
        }
        if let Some(value) = &self.latitude {
            record.latitude = *value;
        }
        if let Some(value) = &self.longitude {
            record.longitude = *value;
        }
        if let Some(value) = &self.description {
            record.description = value.clone();
        }
    }
}
