//! Search and sort over the record store.
//!
//! The [`FilteredView`] is an ordering of item indices. It never copies
//! records; search narrows it, sort permutes it.

use std::cmp::Ordering;

use super::config::{SearchField, SortDirection, SortSpec};
use super::item::ListRecord;
use super::store::ViewItem;

/// What [`FilteredView::sort`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    /// No sort columns configured, or no column chosen.
    Skipped,
    /// Already in the requested order.
    Unchanged,
    /// Same column, other direction: reversed in place.
    Reversed,
    /// Full sort by the column.
    Sorted,
}

/// Current search + sort ordering of the store.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    order: Vec<usize>,
    /// Column and direction the order currently reflects.
    applied_sort: Option<(usize, SortDirection)>,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item indices in display order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Item index displayed at `position`.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// Display position of item `index`, if it passes the current search.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    pub fn applied_sort(&self) -> Option<(usize, SortDirection)> {
        self.applied_sort
    }

    /// Show all `count` items in original order.
    pub fn reset_all(&mut self, count: usize) {
        self.order = (0..count).collect();
        self.applied_sort = None;
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.applied_sort = None;
    }

    /// Rebuild the ordering from scratch for `term`.
    ///
    /// The result is always in original order; callers re-apply sort.
    pub fn filter<R: ListRecord>(
        &mut self,
        items: &[ViewItem<R>],
        term: &str,
        fields: &[SearchField],
    ) {
        self.applied_sort = None;
        if term.is_empty() || fields.is_empty() {
            self.order = (0..items.len()).collect();
            return;
        }
        let needle = term.to_lowercase();
        self.order = items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(&item.record, &needle, fields))
            .map(|(index, _)| index)
            .collect();
    }

    /// Order by `specs[column]` in `direction`.
    pub fn sort<R: ListRecord>(
        &mut self,
        items: &[ViewItem<R>],
        specs: &[SortSpec],
        column: Option<usize>,
        direction: SortDirection,
    ) -> SortOutcome {
        let Some((column, spec)) = column.and_then(|c| specs.get(c).map(|s| (c, s))) else {
            return SortOutcome::Skipped;
        };

        match self.applied_sort {
            Some((applied, applied_dir)) if applied == column && applied_dir == direction => {
                return SortOutcome::Unchanged;
            }
            Some((applied, _)) if applied == column => {
                self.order.reverse();
                self.applied_sort = Some((column, direction));
                return SortOutcome::Reversed;
            }
            _ => {}
        }

        let keys: Vec<SortKey> = items
            .iter()
            .map(|item| SortKey::from_record(&item.record, spec))
            .collect();
        // `sort_by` is stable: ties keep their current relative order
        self.order.sort_by(|&a, &b| keys[a].compare(&keys[b]));
        if direction.is_descending() {
            self.order.reverse();
        }
        self.applied_sort = Some((column, direction));
        SortOutcome::Sorted
    }
}

/// Whether any of `fields` contains `needle` (already lowercase).
pub fn matches<R: ListRecord>(record: &R, needle: &str, fields: &[SearchField]) -> bool {
    fields.iter().any(|field| {
        record
            .field(&field.prop)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}

/// Sort key of one record for one column. Missing values sort first.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn from_record<R: ListRecord>(record: &R, spec: &SortSpec) -> Self {
        let Some(value) = record.field(&spec.prop) else {
            return SortKey::Missing;
        };
        if spec.numeric {
            value
                .trim()
                .parse::<f64>()
                .map(SortKey::Number)
                .unwrap_or(SortKey::Missing)
        } else {
            SortKey::Text(value.to_lowercase())
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}
