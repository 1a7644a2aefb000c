use serde::{Deserialize, Serialize};

use super::{check_not_empty, ValidationError};
use crate::cache::Record;
use crate::mutation::PatchOf;
use crate::table::{CellValue, Columned};

/// A barangay: the local administrative district markers and evacuation
/// centers are organized under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barangay {
    pub id: String,
    pub name: String,
    pub address: String,
    pub contact: String,
}

impl Record for Barangay {
    const COLLECTION: &'static str = "barangays";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Columned for Barangay {
    const COLUMNS: &'static [&'static str] = &["name", "address", "contact"];

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => self.name.as_str().into(),
            "address" => self.address.as_str().into(),
            "contact" => self.contact.as_str().into(),
            _ => CellValue::Missing,
        }
    }
}

/// Payload for registering a barangay.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewBarangay {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub contact: String,
}

impl NewBarangay {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("name", &self.name)?;
        check_not_empty("address", &self.address)?;
        Ok(())
    }

    pub fn into_record(self, id: impl Into<String>) -> Barangay {
        Barangay {
            id: id.into(),
            name: self.name,
            address: self.address,
            contact: self.contact,
        }
    }
}

/// Partial update for a barangay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BarangayPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl BarangayPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_not_empty("name", name)?;
        }
        if let Some(address) = &self.address {
            check_not_empty("address", address)?;
        }
        Ok(())
    }
}

impl PatchOf<Barangay> for BarangayPatch {
    fn apply_to(&self, record: &mut Barangay) {
        if let Some(value) = &self.name {
            record.name = value.clone();
        }
        if let Some(value) = &self.address {
            record.address = value.clone();
        }
        if let Some(value) = &self.contact {
            record.contact = value.clone();
        }
    }
}
