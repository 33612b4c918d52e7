//! Sparse libsvm dataset parsing and per-feature linear scaling
//!
//! Reads labeled sparse vectors in libsvm text format, rescales every
//! feature position into a target interval, and records the ranges used
//! so another dataset (typically a test set) can be scaled identically.

pub mod api;
pub mod core;
pub mod data;
pub mod persistence;
pub mod scaling;

// Re-export main types for convenience
pub use crate::api::{ScaleOutcome, ScaledDataset, Scaler};
pub use crate::core::*;
pub use crate::data::{Dataset, Record};
pub use crate::scaling::{LinearScaler, RangeFile, RangeTable};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
