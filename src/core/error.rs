//! Error types for dataset parsing and scaling

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What exactly was wrong with a malformed line or field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatReason {
    /// The first token of a record is not a float
    BadLabel,
    /// A coordinate token has no `:` or its index is not a positive integer
    BadIndex,
    /// A coordinate value is not a float
    BadValue,
    /// A range-file line has the wrong number of fields
    FieldCount { expected: usize, found: usize },
    /// A range-file field is not a float
    BadFloat,
    /// A range file ended before its target interval line
    MissingInterval,
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLabel => write!(f, "bad label"),
            Self::BadIndex => write!(f, "bad index"),
            Self::BadValue => write!(f, "bad value"),
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::BadFloat => write!(f, "bad float"),
            Self::MissingInterval => write!(f, "missing target interval"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScaleError {
    #[error("Format error at line {line}: {reason} ({token:?})")]
    Format {
        line: usize,
        reason: FormatReason,
        token: String,
    },

    #[error("Shape mismatch: vector {vector} has {found} coordinates, expected {expected}")]
    RaggedVector {
        vector: usize,
        expected: usize,
        found: usize,
    },

    #[error("Shape mismatch: {available} ranges supplied, {required} features need scaling")]
    InsufficientRanges { required: usize, available: usize },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScaleError {
    pub(crate) fn format(line: usize, reason: FormatReason, token: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason,
            token: token.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the malformed-input family of errors
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// True for errors caused by vectors that do not share a positional layout
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::RaggedVector { .. } | Self::InsufficientRanges { .. }
        )
    }

    /// The format reason, if this is a format error
    pub fn format_reason(&self) -> Option<FormatReason> {
        match self {
            Self::Format { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaleError>;
