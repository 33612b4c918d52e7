//! Linear per-position rescaling
//!
//! Each stored value is mapped with
//! `lower + (upper - lower) * (value - min) / (max - min)`
//! using the [`Range`](crate::core::Range) of its feature position.

use crate::core::{Result, ScaleError, TargetInterval};
use crate::data::Dataset;
use crate::scaling::RangeTable;
use log::debug;

/// Rescales datasets in place into a target interval
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearScaler {
    interval: TargetInterval,
}

impl LinearScaler {
    /// Create a scaler targeting `interval`
    pub fn new(interval: TargetInterval) -> Self {
        Self { interval }
    }

    /// Create a scaler targeting `[lower, upper]`
    pub fn with_bounds(lower: f64, upper: f64) -> Self {
        Self::new(TargetInterval::new(lower, upper))
    }

    /// The interval values are mapped into
    pub fn interval(&self) -> TargetInterval {
        self.interval
    }

    /// Scale `dataset` in place and return the ranges that were used.
    ///
    /// Supplied ranges are used as-is and handed back unchanged; without
    /// them the dataset's own ranges are computed first. Nothing is modified
    /// unless every vector can be scaled.
    pub fn scale(&self, dataset: &mut Dataset, ranges: Option<RangeTable>) -> Result<RangeTable> {
        let ranges = match ranges {
            Some(ranges) => ranges,
            None => RangeTable::fit(dataset)?,
        };
        self.scale_with(dataset, &ranges)?;
        Ok(ranges)
    }

    /// Scale `dataset` in place using `ranges`
    pub fn scale_with(&self, dataset: &mut Dataset, ranges: &RangeTable) -> Result<()> {
        let width = check_shape(dataset, ranges)?;
        let interval = self.interval;

        for i in 0..dataset.len() {
            for (coordinate, range) in dataset.vector_mut(i).iter_mut().zip(ranges) {
                coordinate.value = range.scale(coordinate.value, interval);
            }
        }

        debug!(
            "Scaled {} records x {} positions into [{}, {}]",
            dataset.len(),
            width,
            interval.lower,
            interval.upper
        );
        Ok(())
    }

    /// Undo [`scale_with`](Self::scale_with), mapping values back into `ranges`
    pub fn unscale(&self, dataset: &mut Dataset, ranges: &RangeTable) -> Result<()> {
        check_shape(dataset, ranges)?;
        let interval = self.interval;

        for i in 0..dataset.len() {
            for (coordinate, range) in dataset.vector_mut(i).iter_mut().zip(ranges) {
                coordinate.value = range.unscale(coordinate.value, interval);
            }
        }
        Ok(())
    }
}

/// Validate positional layout against the table, returning the shared width
pub(crate) fn check_shape(dataset: &Dataset, ranges: &RangeTable) -> Result<usize> {
    let width = dataset.uniform_width()?;
    if ranges.len() < width {
        return Err(ScaleError::InsufficientRanges {
            required: width,
            available: ranges.len(),
        });
    }
    Ok(width)
}

/// Convenience function: scale with computed ranges into `interval`
pub fn scale_dataset(dataset: &mut Dataset, interval: TargetInterval) -> Result<RangeTable> {
    LinearScaler::new(interval).scale(dataset, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinate, Range};
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn parse(data: &str) -> Dataset {
        Dataset::from_reader(Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_scale_known_value() {
        let mut dataset = parse("+1 1:5.0\n");
        let ranges = RangeTable::new(vec![Range::new(0.0, 10.0)]);

        LinearScaler::default()
            .scale(&mut dataset, Some(ranges))
            .unwrap();

        assert_eq!(dataset.vector(0)[0].value, 0.0);
    }

    #[test]
    fn test_scale_computes_ranges() {
        let mut dataset = parse("+1 1:0 2:-4\n-1 1:10 2:4\n+1 1:5 2:0\n");
        let ranges = LinearScaler::default().scale(&mut dataset, None).unwrap();

        assert_eq!(
            ranges.as_slice(),
            &[Range::new(0.0, 10.0), Range::new(-4.0, 4.0)]
        );
        let values: Vec<Vec<f64>> = dataset
            .iter()
            .map(|r| r.coordinates.iter().map(|c| c.value).collect())
            .collect();
        assert_eq!(values, vec![vec![-1.0, -1.0], vec![1.0, 1.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_scale_keeps_labels_and_indices() {
        let mut dataset = parse("3 7:1 2:3\n-2 7:2 2:5\n");
        LinearScaler::with_bounds(0.0, 1.0)
            .scale(&mut dataset, None)
            .unwrap();

        assert_eq!(dataset.labels(), &[3.0, -2.0]);
        let indices: Vec<usize> = dataset.vector(1).iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![7, 2]);
        assert_eq!(dataset.vector(1)[0].value, 1.0);
    }

    #[test]
    fn test_supplied_ranges_returned_unchanged() {
        let mut dataset = parse("+1 1:2 2:3\n");
        let supplied = RangeTable::new(vec![
            Range::new(0.0, 4.0),
            Range::new(1.0, 5.0),
            Range::new(9.0, 10.0),
        ]);

        let used = LinearScaler::default()
            .scale(&mut dataset, Some(supplied.clone()))
            .unwrap();

        assert_eq!(used, supplied);
        assert_eq!(dataset.vector(0)[0].value, 0.0);
        assert_eq!(dataset.vector(0)[1].value, 0.0);
    }

    #[test]
    fn test_insufficient_ranges_is_shape_error() {
        let mut dataset = parse("+1 1:2 2:3\n-1 1:1 2:1\n");
        let original = dataset.clone();
        let ranges = RangeTable::new(vec![Range::new(0.0, 4.0)]);

        let err = LinearScaler::default()
            .scale(&mut dataset, Some(ranges))
            .unwrap_err();

        assert!(matches!(
            err,
            ScaleError::InsufficientRanges {
                required: 2,
                available: 1
            }
        ));
        assert_eq!(dataset, original, "no values may change on failure");
    }

    #[test]
    fn test_ragged_dataset_with_supplied_ranges_is_rejected() {
        let mut dataset = parse("+1 1:2 2:3\n-1 1:1\n");
        let original = dataset.clone();
        let ranges = RangeTable::new(vec![Range::new(0.0, 4.0), Range::new(0.0, 4.0)]);

        let err = LinearScaler::default()
            .scale(&mut dataset, Some(ranges))
            .unwrap_err();

        assert!(err.is_shape_error());
        assert_eq!(dataset, original);
    }

    #[test]
    fn test_unscale_round_trip() {
        let data = "+1 1:0.3 2:-17.25 3:1e3\n-1 1:2.9 2:4.5 3:-250\n+1 1:1.7 2:0.0 3:12.125\n";
        let original = parse(data);
        let mut dataset = original.clone();
        let scaler = LinearScaler::with_bounds(-0.5, 2.0);

        let ranges = scaler.scale(&mut dataset, None).unwrap();
        scaler.unscale(&mut dataset, &ranges).unwrap();

        for (restored, expected) in dataset.iter().zip(original.iter()) {
            for (a, b) in restored.coordinates.iter().zip(expected.coordinates) {
                assert_eq!(a.index, b.index);
                assert_relative_eq!(a.value, b.value, epsilon = 1e-9, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_identity_scaling_reproduces_values() {
        let mut dataset = parse("+1 1:1\n-1 1:3\n+1 1:7\n");
        let original = dataset.clone();
        let ranges = RangeTable::new(vec![Range::new(1.0, 7.0)]);

        LinearScaler::with_bounds(1.0, 7.0)
            .scale(&mut dataset, Some(ranges))
            .unwrap();

        assert_eq!(dataset, original);
    }

    #[test]
    fn test_constant_feature_yields_non_finite() {
        // Zero-width ranges are not guarded: 0/0 and x/0 propagate.
        let mut dataset = parse("+1 1:4 2:1\n-1 1:4 2:2\n");
        let ranges = scale_dataset(&mut dataset, TargetInterval::default()).unwrap();

        assert!(ranges.get(0).unwrap().is_constant());
        assert!(dataset.vector(0)[0].value.is_nan());
        assert!(dataset.vector(1)[0].value.is_nan());
        assert_eq!(dataset.vector(0)[1].value, -1.0);

        let mut other = Dataset::new();
        other.push_record(1.0, vec![Coordinate::new(1, 5.0), Coordinate::new(2, 1.0)]);
        LinearScaler::default().scale_with(&mut other, &ranges).unwrap();
        assert!(other.vector(0)[0].value.is_infinite());
    }

    #[test]
    fn test_empty_dataset() {
        let mut dataset = Dataset::new();
        let ranges = LinearScaler::default().scale(&mut dataset, None).unwrap();
        assert!(ranges.is_empty());
    }
}
