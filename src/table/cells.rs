use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// One renderable table cell.
///
/// Rows surface their fields as cell values so sorting works uniformly over
/// text, numeric and timestamp columns without knowing the row type.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
    /// The row has no value for this column. Missing cells sort after
    /// present ones in both directions.
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    // Mixed-type columns order by kind first so the comparison stays total.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Timestamp(_) => 2,
            CellValue::Missing => 3,
        }
    }

    /// Total order among present values; `Missing` compares equal to itself
    /// and after everything else.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Timestamp(a), CellValue::Timestamp(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellValue::Missing,
        }
    }
}

/// Row types that can surface their fields as table cells.
pub trait Columned {
    /// Column keys this row type renders, in display order.
    const COLUMNS: &'static [&'static str];

    /// The cell for one column key, [`CellValue::Missing`] for columns the
    /// row does not carry.
    fn cell(&self, column: &str) -> CellValue;
}
