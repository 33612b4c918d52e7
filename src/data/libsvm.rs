//! LibSVM sparse text format
//!
//! Reads and writes datasets in the libsvm format:
//! label index:value index:value ...
//!
//! Example:
//! +1 1:0.5 3:1.2 7:0.8  # trailing comment
//! -1 2:0.3 5:2.1
//!
//! Everything from the first `#` on a line is ignored, and lines that are
//! empty after that are skipped. Indices keep their 1-based input values.

use crate::core::{Coordinate, FormatReason, Result, ScaleError};
use crate::data::{Dataset, Record};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

impl Dataset {
    /// Load a dataset from a libsvm format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScaleError::io(path, e))?;
        let reader = BufReader::new(file);
        Self::from_reader(reader).map_err(|e| match e {
            ScaleError::IoError(source) => ScaleError::io(path, source),
            other => other,
        })
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dataset = Dataset::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some((label, coordinates)) = parse_line(&line, line_num + 1)? {
                dataset.push_record(label, coordinates);
            }
        }

        debug!(
            "Parsed {} records with {} coordinates, max index {}",
            dataset.len(),
            dataset.nnz(),
            dataset.max_index()
        );

        Ok(dataset)
    }

    /// Write the dataset in libsvm format, one line per record
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        for record in self.iter() {
            writeln!(writer, "{}", format_record(&record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the dataset to a file in libsvm format
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ScaleError::io(path, e))?;
        self.write_to(file).map_err(|e| match e {
            ScaleError::IoError(source) => ScaleError::io(path, source),
            other => other,
        })
    }
}

/// Parse a single libsvm line.
///
/// `line_num` is 1-based and only used for error reporting. Returns `None`
/// for lines that hold nothing but whitespace or a comment.
pub fn parse_line(line: &str, line_num: usize) -> Result<Option<(f64, Vec<Coordinate>)>> {
    let content = line.split('#').next().unwrap_or("");
    let mut tokens = content.split_whitespace();

    let label_token = match tokens.next() {
        Some(token) => token,
        None => return Ok(None),
    };
    let label = label_token
        .parse::<f64>()
        .map_err(|_| ScaleError::format(line_num, FormatReason::BadLabel, label_token))?;

    let coordinates = tokens
        .map(|token| parse_coordinate(token, line_num))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some((label, coordinates)))
}

fn parse_coordinate(token: &str, line_num: usize) -> Result<Coordinate> {
    let (index, value) = token
        .split_once(':')
        .ok_or_else(|| ScaleError::format(line_num, FormatReason::BadIndex, token))?;

    let index = match index.parse::<usize>() {
        Ok(index) if index > 0 => index,
        _ => return Err(ScaleError::format(line_num, FormatReason::BadIndex, token)),
    };

    let value = value
        .parse::<f64>()
        .map_err(|_| ScaleError::format(line_num, FormatReason::BadValue, token))?;

    Ok(Coordinate::new(index, value))
}

/// Render one record with its coordinates in ascending index order
pub fn format_record(record: &Record<'_>) -> String {
    let mut line = record.label.to_string();
    for coordinate in record.sorted_coordinates() {
        line.push(' ');
        line.push_str(&format!("{}:{}", coordinate.index, coordinate.value));
    }
    line
}
