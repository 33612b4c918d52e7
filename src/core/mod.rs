//! Core types and errors shared by parsing and scaling

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;
