//! In-memory sparse dataset
//!
//! All coordinates live in one flat buffer. Each record keeps an explicit
//! `(offset, len)` span into that buffer, so a vector ends where its span
//! says it does rather than at a marker coordinate.
//!
//! Coordinates are stored in input order. Feature *positions* (the ordinal
//! slot of a coordinate inside its vector) are what scaling aligns on, which
//! only makes sense when every vector has the same layout; see
//! [`Dataset::uniform_width`].

use crate::core::{Coordinate, Result, ScaleError};

/// Location of one vector inside the coordinate buffer
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    offset: usize,
    len: usize,
}

/// Ordered collection of labeled sparse vectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    labels: Vec<f64>,
    spans: Vec<Span>,
    coordinates: Vec<Coordinate>,
    max_index: usize,
}

/// Borrowed view of one labeled vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    pub label: f64,
    pub coordinates: &'a [Coordinate],
}

impl<'a> Record<'a> {
    /// Coordinates in ascending index order, as they are written out
    pub fn sorted_coordinates(&self) -> Vec<Coordinate> {
        let mut sorted = self.coordinates.to_vec();
        sorted.sort_by_key(|c| c.index);
        sorted
    }
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping its coordinates in the given order
    pub fn push_record<I>(&mut self, label: f64, coordinates: I)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let offset = self.coordinates.len();
        for coordinate in coordinates {
            self.max_index = self.max_index.max(coordinate.index);
            self.coordinates.push(coordinate);
        }
        self.labels.push(label);
        self.spans.push(Span {
            offset,
            len: self.coordinates.len() - offset,
        });
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Total number of stored coordinates across all records
    pub fn nnz(&self) -> usize {
        self.coordinates.len()
    }

    /// Largest coordinate index seen, 0 for a dataset without coordinates
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Labels in record order
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Get a single record
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn record(&self, i: usize) -> Record<'_> {
        Record {
            label: self.labels[i],
            coordinates: self.vector(i),
        }
    }

    /// Coordinates of record `i` in stored order
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn vector(&self, i: usize) -> &[Coordinate] {
        let span = self.spans[i];
        &self.coordinates[span.offset..span.offset + span.len]
    }

    /// Mutable coordinates of record `i`; only values are meant to change
    ///
    /// # Panics
    /// Panics if `i >= len()`
    pub fn vector_mut(&mut self, i: usize) -> &mut [Coordinate] {
        let span = self.spans[i];
        &mut self.coordinates[span.offset..span.offset + span.len]
    }

    /// Iterate over all records in order
    pub fn iter(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        (0..self.len()).map(move |i| self.record(i))
    }

    /// Coordinate count of each record, in order
    pub fn widths(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans.iter().map(|span| span.len)
    }

    /// Shared coordinate count of every record.
    ///
    /// Returns 0 for an empty dataset, and a shape error naming the first
    /// record whose count differs from the first record's.
    pub fn uniform_width(&self) -> Result<usize> {
        let mut widths = self.widths().enumerate();
        let expected = match widths.next() {
            Some((_, width)) => width,
            None => return Ok(0),
        };
        for (vector, found) in widths {
            if found != expected {
                return Err(ScaleError::RaggedVector {
                    vector,
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }

    /// Each record rendered as a libsvm line
    pub fn to_lines(&self) -> Vec<String> {
        self.iter().map(|record| super::libsvm::format_record(&record)).collect()
    }
}
