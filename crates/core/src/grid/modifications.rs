//! Tracking of user-edited slot positions.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::NaiveDate;

/// The set of `(date, slot index)` pairs the user changed since the last
/// load, save or reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationSet {
    slots: BTreeSet<(NaiveDate, usize)>,
}

impl ModificationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, index: usize) {
        self.slots.insert((date, index));
    }

    pub fn insert_range(&mut self, date: NaiveDate, indices: RangeInclusive<usize>) {
        self.slots.extend(indices.map(|index| (date, index)));
    }

    pub fn contains(&self, date: NaiveDate, index: usize) -> bool {
        self.slots.contains(&(date, index))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Distinct dates with at least one modified slot, ascending.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.slots.iter().map(|(date, _)| *date).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, usize)> {
        self.slots.iter()
    }
}
