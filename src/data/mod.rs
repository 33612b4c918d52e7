//! Sparse dataset model and its libsvm text encoding

pub mod dataset;
pub mod libsvm;

pub use self::dataset::{Dataset, Record};
pub use self::libsvm::{format_record, parse_line};
