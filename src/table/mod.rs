//! Grouped table rendering for heterogeneous record collections.
//!
//! A [`GroupedTable`] partitions a flat collection into named groups by a
//! caller-supplied discriminator, keeps per-group collapse state, and sorts
//! rows within each group by the active [`SortState`] column. Sorting never
//! reorders the stored rows; [`GroupedTable::view`] computes the presented
//! order on demand, so clearing the sort returns to insertion order.
//!
//! ## Example
//!
//! ```ignore
//! let mut table = GroupedTable::build(markers, |m| m.category.to_string());
//!
//! table.toggle_sort("created_at");     // ascending
//! table.toggle_collapsed("flood");
//!
//! for section in table.view() {
//!     let style = styles.style_for(section.key);
//!     render_header(style, section.total, section.collapsed);
//!     for row in section.rows {
//!         render_row(row);
//!     }
//! }
//! ```

mod cells;
mod sort;
mod style;

pub use cells::{CellValue, Columned};
pub use sort::{sorted, SortDirection, SortState};
pub use style::{GroupStyle, GroupStyles};

use std::collections::HashMap;

/// Partitions items into groups keyed by `key_fn`.
///
/// Groups appear in first-seen order; items within a group keep their input
/// order. Every input item lands in exactly one group.
pub fn group_by<T>(items: Vec<T>, mut key_fn: impl FnMut(&T) -> String) -> Vec<(String, Vec<T>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// One group of rows with its collapse state.
pub struct Section<T> {
    key: String,
    rows: Vec<T>,
    collapsed: bool,
}

impl<T> Section<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Rows in insertion order, regardless of the active sort.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }
}

/// One section as presented: sorted rows, or none when collapsed.
pub struct SectionView<'a, T> {
    pub key: &'a str,
    pub collapsed: bool,
    /// Total row count, shown on collapsed headers too.
    pub total: usize,
    /// Rows in presented order; empty when the section is collapsed.
    pub rows: Vec<&'a T>,
}

/// A collection partitioned into collapsible, sortable sections.
pub struct GroupedTable<T> {
    sections: Vec<Section<T>>,
    sort: SortState,
}

impl<T: Columned> GroupedTable<T> {
    /// Groups `items` by `key_fn`; all sections start expanded, unsorted.
    pub fn build(items: Vec<T>, key_fn: impl FnMut(&T) -> String) -> Self {
        let sections = group_by(items, key_fn)
            .into_iter()
            .map(|(key, rows)| Section {
                key,
                rows,
                collapsed: false,
            })
            .collect();
        GroupedTable {
            sections,
            sort: SortState::unsorted(),
        }
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Advances the sort cycle for `column` across all sections.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort.toggle(column);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Flips one section's collapse state. Unknown keys are ignored.
    pub fn toggle_collapsed(&mut self, key: &str) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.key == key) {
            section.collapsed = !section.collapsed;
        }
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.collapsed)
            .unwrap_or(false)
    }

    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    /// Total rows across all sections, collapsed ones included.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes the presented sections: active sort applied within each
    /// expanded section, collapsed sections with their rows withheld.
    pub fn view(&self) -> Vec<SectionView<'_, T>> {
        self.sections
            .iter()
            .map(|section| {
                let rows = if section.collapsed {
                    Vec::new()
                } else {
                    match (self.sort.column(), self.sort.direction()) {
                        (Some(column), Some(direction)) => sorted(&section.rows, column, direction),
                        _ => section.rows.iter().collect(),
                    }
                };
                SectionView {
                    key: &section.key,
                    collapsed: section.collapsed,
                    total: section.rows.len(),
                    rows,
                }
            })
            .collect()
    }
}
