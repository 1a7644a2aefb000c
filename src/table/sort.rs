use std::cmp::Ordering;

use super::cells::{CellValue, Columned};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which column a table is sorted by, if any.
///
/// Toggling the active column cycles ascending, then descending, then back
/// to unsorted; toggling a different column starts it ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn unsorted() -> Self {
        SortState { active: None }
    }

    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            active: Some((column.into(), direction)),
        }
    }

    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|(column, _)| column.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, direction)| *direction)
    }

    pub fn is_unsorted(&self) -> bool {
        self.active.is_none()
    }

    /// Advances the cycle for `column`.
    pub fn toggle(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some((active, SortDirection::Ascending)) if active == column => {
                Some((active, SortDirection::Descending))
            }
            Some((active, SortDirection::Descending)) if active == column => None,
            _ => Some((column.to_string(), SortDirection::Ascending)),
        };
    }
}

// Missing cells go last whichever way the column is sorted; the direction
// only reverses the order of present values.
pub(super) fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => a.compare(b).reverse(),
        },
    }
}

/// Orders rows by one column. The sort is stable: rows with equal cells
/// keep their relative input order.
pub fn sorted<'a, T: Columned>(
    rows: &'a [T],
    column: &str,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut out: Vec<&T> = rows.iter().collect();
    out.sort_by(|a, b| compare_cells(&a.cell(column), &b.cell(column), direction));
    out
}
