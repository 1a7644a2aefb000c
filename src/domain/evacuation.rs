use serde::{Deserialize, Serialize};

use super::{check_latitude, check_longitude, check_not_empty, ValidationError};
use crate::cache::Record;
use crate::mutation::{Memberships, PatchOf};
use crate::table::{CellValue, Columned};

/// An evacuation center, linked to the barangays it serves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvacuationCenter {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: u32,
    /// Ids of the barangays this center serves.
    #[serde(default)]
    pub barangay_ids: Vec<String>,
}

impl Record for EvacuationCenter {
    const COLLECTION: &'static str = "evacuations";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Memberships for EvacuationCenter {
    fn members(&self) -> &[String] {
        &self.barangay_ids
    }

    fn set_members(&mut self, members: Vec<String>) {
        self.barangay_ids = members;
    }
}

impl Columned for EvacuationCenter {
    const COLUMNS: &'static [&'static str] =
        &["name", "capacity", "barangays", "latitude", "longitude"];

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => self.name.as_str().into(),
            "capacity" => self.capacity.into(),
            "barangays" => CellValue::Number(self.barangay_ids.len() as f64),
            "latitude" => self.latitude.into(),
            "longitude" => self.longitude.into(),
            _ => CellValue::Missing,
        }
    }
}

/// Payload for registering an evacuation center.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEvacuation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: u32,
    #[serde(default)]
    pub barangay_ids: Vec<String>,
}

impl NewEvacuation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("name", &self.name)?;
        check_latitude(self.latitude)?;
        check_longitude(self.longitude)?;
        if self.capacity == 0 {
            return Err(ValidationError::new("capacity", "must be at least 1"));
        }
        Ok(())
    }

    pub fn into_record(self, id: impl Into<String>) -> EvacuationCenter {
        EvacuationCenter {
            id: id.into(),
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            capacity: self.capacity,
            barangay_ids: self.barangay_ids,
        }
    }
}

/// Partial update for an evacuation center. Membership changes go through
/// the link/unlink operations, not the patch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvacuationPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl EvacuationPatch {
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
        if self.capacity == Some(0) {
            return Err(ValidationError::new("capacity", "must be at least 1"));
        }
        Ok(())
    }
}

impl PatchOf<EvacuationCenter> for EvacuationPatch {
    fn apply_to(&self, record: &mut EvacuationCenter) {
        if let Some(value) = &self.name {
            record.name = value.clone();
        }
        if let Some(value) = &self.latitude {
            record.latitude = *value;
        }
        if let Some(value) = &self.longitude {
            record.longitude = *value;
        }
        if let Some(value) = &self.capacity {
            record.capacity = *value;
        }
    }
}
