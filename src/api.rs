//! High-level API for scaling libsvm datasets
//!
//! Ties together parsing, range computation, linear scaling and range
//! files behind a small builder.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use svm_scale::api::Scaler;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Scale the training set into [0, 1] and remember the ranges
//! let train = Scaler::new()
//!     .with_bounds(0.0, 1.0)
//!     .save_to("train.range")
//!     .scale_file("train.libsvm")?;
//!
//! // Scale the test set with exactly the same parameters
//! let test = Scaler::new()
//!     .restore_from("train.range")
//!     .scale_file("test.libsvm")?;
//!
//! test.dataset.write_to(std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

use crate::core::{Result, TargetInterval};
use crate::data::Dataset;
use crate::persistence::SerializableRanges;
use crate::scaling::linear::check_shape;
use crate::scaling::{LinearScaler, RangeFile, RangeTable};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// On-disk encoding of scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFormat {
    /// Plain libsvm-style range file
    Text,
    /// JSON with provenance metadata
    Json,
}

impl RangeFormat {
    /// Pick the encoding from the file extension; anything but `.json` is text
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Load scaling parameters, choosing the codec from the extension
pub fn load_range_file<P: AsRef<Path>>(path: P) -> Result<RangeFile> {
    let path = path.as_ref();
    match RangeFormat::detect(path) {
        RangeFormat::Text => RangeFile::load(path),
        RangeFormat::Json => Ok(SerializableRanges::load_from_file(path)?.into_range_file()),
    }
}

/// Save scaling parameters, choosing the codec from the extension
pub fn save_range_file<P: AsRef<Path>>(path: P, file: &RangeFile) -> Result<()> {
    let path = path.as_ref();
    match RangeFormat::detect(path) {
        RangeFormat::Text => file.save(path),
        RangeFormat::Json => SerializableRanges::from(file).save_to_file(path),
    }
}

/// Parameters that a scaling run actually used
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOutcome {
    /// Ranges applied, either restored or computed
    pub ranges: RangeTable,
    /// Interval the values were mapped into
    pub interval: TargetInterval,
    /// Largest coordinate index in the scaled dataset
    pub max_index: usize,
}

impl ScaleOutcome {
    /// Package the parameters as a range file
    pub fn to_range_file(&self) -> RangeFile {
        RangeFile::new(self.ranges.clone(), self.interval)
    }
}

/// A dataset after scaling, with the parameters used
#[derive(Debug, Clone)]
pub struct ScaledDataset {
    pub dataset: Dataset,
    pub outcome: ScaleOutcome,
}

/// Scaling run configuration with builder pattern
#[derive(Debug, Clone, Default)]
pub struct Scaler {
    interval: TargetInterval,
    restore_from: Option<PathBuf>,
    save_to: Option<PathBuf>,
}

impl Scaler {
    /// Create a scaler targeting [-1, 1] with computed ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both target bounds
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.interval = TargetInterval::new(lower, upper);
        self
    }

    /// Set the lower target bound
    pub fn with_lower(mut self, lower: f64) -> Self {
        self.interval.lower = lower;
        self
    }

    /// Set the upper target bound
    pub fn with_upper(mut self, upper: f64) -> Self {
        self.interval.upper = upper;
        self
    }

    /// Restore ranges and interval from a saved file.
    ///
    /// The file's interval takes precedence over any explicit bounds.
    pub fn restore_from<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.restore_from = Some(path.into());
        self
    }

    /// Save the ranges that will be used to a file before scaling
    pub fn save_to<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.save_to = Some(path.into());
        self
    }

    /// Interval configured through the builder
    pub fn interval(&self) -> TargetInterval {
        self.interval
    }

    /// Scale `dataset` in place.
    ///
    /// Ranges are resolved, checked against the dataset and saved before any
    /// value is rewritten, so a failed save leaves `dataset` untouched.
    pub fn scale(&self, dataset: &mut Dataset) -> Result<ScaleOutcome> {
        let (restored, interval) = match &self.restore_from {
            Some(path) => {
                let file = load_range_file(path)?;
                info!(
                    "Restored {} ranges and interval [{}, {}] from {}",
                    file.ranges.len(),
                    file.interval.lower,
                    file.interval.upper,
                    path.display()
                );
                (Some(file.ranges), file.interval)
            }
            None => (None, self.interval),
        };

        let ranges = match restored {
            Some(ranges) => ranges,
            None => RangeTable::fit(dataset)?,
        };
        check_shape(dataset, &ranges)?;
        let outcome = ScaleOutcome {
            ranges,
            interval,
            max_index: dataset.max_index(),
        };

        if let Some(path) = &self.save_to {
            save_range_file(path, &outcome.to_range_file())?;
            info!("Saved {} ranges to {}", outcome.ranges.len(), path.display());
        }

        LinearScaler::new(interval).scale_with(dataset, &outcome.ranges)?;
        Ok(outcome)
    }

    /// Load a libsvm file and scale it
    pub fn scale_file<P: AsRef<Path>>(&self, path: P) -> Result<ScaledDataset> {
        let path = path.as_ref();
        let mut dataset = Dataset::from_file(path)?;
        debug!("Loaded {} records from {}", dataset.len(), path.display());

        let outcome = self.scale(&mut dataset)?;
        Ok(ScaledDataset { dataset, outcome })
    }
}
