//! JSON serialization of scaling parameters
//!
//! An alternative to the plain range file for callers that want the scaling
//! parameters alongside some provenance metadata.

use crate::core::{Range, Result, ScaleError, TargetInterval};
use crate::scaling::{RangeFile, RangeTable};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializable representation of a range file
#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableRanges {
    /// Interval the features were mapped into
    pub interval: TargetInterval,
    /// Per-position ranges, in position order
    pub ranges: Vec<Range>,
    /// Provenance metadata
    pub metadata: RangeMetadata,
}

/// Metadata for tracking and validation
#[derive(Debug, Serialize, Deserialize)]
pub struct RangeMetadata {
    /// Library version used to write the ranges
    pub library_version: String,
    /// Number of feature positions
    pub n_features: usize,
    /// Creation timestamp
    pub created_at: String,
}

impl SerializableRanges {
    /// Capture ranges and interval together with fresh metadata
    pub fn new(ranges: &RangeTable, interval: TargetInterval) -> Self {
        Self {
            interval,
            ranges: ranges.as_slice().to_vec(),
            metadata: RangeMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_features: ranges.len(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save to file as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ScaleError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| ScaleError::Serialization(e.to_string()))?;
        writer.flush().map_err(|e| ScaleError::io(path, e))?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScaleError::io(path, e))?;
        let reader = BufReader::new(file);
        let ranges: Self = serde_json::from_reader(reader)
            .map_err(|e| ScaleError::Serialization(e.to_string()))?;

        if ranges.metadata.n_features != ranges.ranges.len() {
            return Err(ScaleError::Serialization(format!(
                "metadata lists {} features but {} ranges are stored",
                ranges.metadata.n_features,
                ranges.ranges.len()
            )));
        }
        Ok(ranges)
    }

    /// Convert into the in-memory range file form
    pub fn into_range_file(self) -> RangeFile {
        RangeFile::new(RangeTable::new(self.ranges), self.interval)
    }
}

impl From<&RangeFile> for SerializableRanges {
    fn from(file: &RangeFile) -> Self {
        Self::new(&file.ranges, file.interval)
    }
}
