//! Core type definitions for sparse datasets and scaling

use serde::{Deserialize, Serialize};

/// One stored (index, value) pair of a sparse vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Feature index as written in the input (1-based, positive)
    pub index: usize,
    /// Feature value
    pub value: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

/// Observed extent of one feature position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Create a range from explicit bounds
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Degenerate range covering a single value
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Widen the range so it covers `value`
    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Width of the range; zero for a constant feature
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the feature never varied
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    /// Map `value` from this range into `interval`.
    ///
    /// When the range coincides with `interval` the value is returned as is.
    /// Otherwise a constant range divides by zero and yields a non-finite result.
    pub fn scale(&self, value: f64, interval: TargetInterval) -> f64 {
        if self.min == interval.lower && self.max == interval.upper {
            return value;
        }
        interval.lower + interval.width() * (value - self.min) / (self.max - self.min)
    }

    /// Map a scaled value from `interval` back into this range
    pub fn unscale(&self, scaled: f64, interval: TargetInterval) -> f64 {
        self.min + (self.max - self.min) * (scaled - interval.lower) / interval.width()
    }
}

/// Output bounds every feature is linearly mapped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInterval {
    pub lower: f64,
    pub upper: f64,
}

impl TargetInterval {
    /// Create a new target interval
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Distance between the bounds
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Default for TargetInterval {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

/// Kernel parameters owned by whoever trains on the prepared data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KernelParams {
    /// RBF kernel width; 0 means unset
    pub gamma: f64,
}

impl KernelParams {
    /// Create parameters with an explicit gamma
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    /// Default an unset gamma to `1 / max_index`.
    ///
    /// Leaves an explicit gamma alone, and does nothing when no index was seen.
    pub fn with_default_gamma(mut self, max_index: usize) -> Self {
        if self.gamma == 0.0 && max_index > 0 {
            self.gamma = 1.0 / max_index as f64;
        }
        self
    }
}
