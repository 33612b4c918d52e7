//! Per-position feature ranges
//!
//! A [`RangeTable`] holds one [`Range`] per feature position: entry `i`
//! describes the `i`-th stored coordinate of every vector, whatever index
//! that coordinate carries.

use crate::core::{Range, Result};
use crate::data::Dataset;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Ordered ranges, one per feature position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    ranges: Vec<Range>,
}

impl RangeTable {
    /// Create a table from ranges in position order
    pub fn new(ranges: Vec<Range>) -> Self {
        Self { ranges }
    }

    /// Compute the observed range of every feature position in `dataset`.
    ///
    /// Every vector must have the same number of coordinates; the first
    /// vector that does not yields a shape error. An empty dataset gives an
    /// empty table.
    pub fn fit(dataset: &Dataset) -> Result<Self> {
        let width = dataset.uniform_width()?;
        let mut records = dataset.iter();

        let mut ranges: Vec<Range> = match records.next() {
            Some(first) => first
                .coordinates
                .iter()
                .map(|c| Range::point(c.value))
                .collect(),
            None => return Ok(Self::default()),
        };

        for record in records {
            for (range, coordinate) in ranges.iter_mut().zip(record.coordinates) {
                range.include(coordinate.value);
            }
        }

        let table = Self { ranges };
        debug!(
            "Computed {} feature ranges over {} records",
            width,
            dataset.len()
        );
        let constant = table.constant_positions().count();
        if constant > 0 {
            warn!(
                "{constant} feature position(s) are constant and will scale to non-finite values"
            );
        }
        Ok(table)
    }

    /// Number of feature positions covered
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Range for feature position `position`
    pub fn get(&self, position: usize) -> Option<&Range> {
        self.ranges.get(position)
    }

    /// Iterate over ranges in position order
    pub fn iter(&self) -> std::slice::Iter<'_, Range> {
        self.ranges.iter()
    }

    /// Ranges as a slice in position order
    pub fn as_slice(&self) -> &[Range] {
        &self.ranges
    }

    /// Positions whose range has zero width
    pub fn constant_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, range)| range.is_constant())
            .map(|(position, _)| position)
    }

    /// Give back the underlying ranges
    pub fn into_inner(self) -> Vec<Range> {
        self.ranges
    }
}

impl From<Vec<Range>> for RangeTable {
    fn from(ranges: Vec<Range>) -> Self {
        Self::new(ranges)
    }
}

impl FromIterator<Range> for RangeTable {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RangeTable {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Convenience function: compute the range table of a dataset
pub fn compute_ranges(dataset: &Dataset) -> Result<RangeTable> {
    RangeTable::fit(dataset)
}
