//! Range file codec
//!
//! A range file records the target interval and the per-position ranges
//! used for scaling, so another dataset can be scaled identically:
//!
//! ```text
//! x
//! -1 1
//! 1 0 10
//! 2 -3.5 4
//! ```
//!
//! The first line is a header and is ignored on read. The second holds the
//! target interval. Every further line holds a feature position followed by
//! that position's min and max; fields past the third are ignored.

use crate::core::{FormatReason, Range, Result, ScaleError, TargetInterval};
use crate::scaling::RangeTable;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const HEADER: &str = "x";

/// Target interval plus the ranges it was applied with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFile {
    pub interval: TargetInterval,
    pub ranges: RangeTable,
}

impl RangeFile {
    /// Create a range file from its parts
    pub fn new(ranges: RangeTable, interval: TargetInterval) -> Self {
        Self { interval, ranges }
    }

    /// Load a range file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScaleError::io(path, e))?;
        decode(BufReader::new(file)).map_err(|e| match e {
            ScaleError::IoError(source) => ScaleError::io(path, source),
            other => other,
        })
    }

    /// Write the range file to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ScaleError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        encode(&mut writer, &self.ranges, self.interval)
            .and_then(|_| writer.flush().map_err(ScaleError::from))
            .map_err(|e| match e {
                ScaleError::IoError(source) => ScaleError::io(path, source),
                other => other,
            })
    }
}

/// Read a range file from `reader`
pub fn decode<R: BufRead>(reader: R) -> Result<RangeFile> {
    let mut interval = None;
    let mut ranges = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = i + 1;

        match line_num {
            1 => continue,
            2 => interval = Some(parse_interval(&line, line_num)?),
            _ => ranges.push(parse_range(&line, line_num)?),
        }
    }

    let interval =
        interval.ok_or_else(|| ScaleError::format(2, FormatReason::MissingInterval, ""))?;
    debug!(
        "Decoded {} ranges with target [{}, {}]",
        ranges.len(),
        interval.lower,
        interval.upper
    );

    Ok(RangeFile {
        interval,
        ranges: RangeTable::new(ranges),
    })
}

/// Write `ranges` and `interval` to `writer` in range-file layout
pub fn encode<W: Write>(
    mut writer: W,
    ranges: &RangeTable,
    interval: TargetInterval,
) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "{} {}", interval.lower, interval.upper)?;
    for (position, range) in ranges.iter().enumerate() {
        writeln!(writer, "{} {} {}", position + 1, range.min, range.max)?;
    }
    Ok(())
}

/// Read a range file from `path`, returning `(ranges, interval)`
pub fn read_ranges_file<P: AsRef<Path>>(path: P) -> Result<(RangeTable, TargetInterval)> {
    let file = RangeFile::load(path)?;
    Ok((file.ranges, file.interval))
}

/// Write `ranges` and `interval` to `path`
pub fn write_ranges_file<P: AsRef<Path>>(
    path: P,
    ranges: &RangeTable,
    interval: TargetInterval,
) -> Result<()> {
    RangeFile::new(ranges.clone(), interval).save(path)
}

fn parse_interval(line: &str, line_num: usize) -> Result<TargetInterval> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(ScaleError::format(
            line_num,
            FormatReason::FieldCount {
                expected: 2,
                found: fields.len(),
            },
            line,
        ));
    }
    Ok(TargetInterval::new(
        parse_float(fields[0], line_num)?,
        parse_float(fields[1], line_num)?,
    ))
}

fn parse_range(line: &str, line_num: usize) -> Result<Range> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ScaleError::format(
            line_num,
            FormatReason::FieldCount {
                expected: 3,
                found: fields.len(),
            },
            line,
        ));
    }
    Ok(Range::new(
        parse_float(fields[1], line_num)?,
        parse_float(fields[2], line_num)?,
    ))
}

fn parse_float(field: &str, line_num: usize) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|_| ScaleError::format(line_num, FormatReason::BadFloat, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_basic() {
        let file = decode(Cursor::new("x\n-1 1\n1 0 10\n")).unwrap();

        assert_eq!(file.interval, TargetInterval::new(-1.0, 1.0));
        assert_eq!(file.ranges.as_slice(), &[Range::new(0.0, 10.0)]);
    }

    #[test]
    fn test_decode_ignores_header_and_extra_fields() {
        let data = "anything at all 1 2 3\n0 1\n7 -2.5 3 extra stuff\n8 1e-3 2e3\n";
        let file = decode(Cursor::new(data)).unwrap();

        assert_eq!(file.interval, TargetInterval::new(0.0, 1.0));
        assert_eq!(
            file.ranges.as_slice(),
            &[Range::new(-2.5, 3.0), Range::new(0.001, 2000.0)]
        );
    }

    #[test]
    fn test_decode_header_and_interval_only() {
        let file = decode(Cursor::new("x\n-1 1\n")).unwrap();
        assert!(file.ranges.is_empty());
    }

    #[test]
    fn test_decode_bad_interval_field_count() {
        for data in ["x\n-1\n", "x\n-1 1 2\n", "x\n\n1 0 1\n"] {
            let err = decode(Cursor::new(data)).unwrap_err();
            match err {
                ScaleError::Format {
                    line,
                    reason: FormatReason::FieldCount { expected, .. },
                    ..
                } => {
                    assert_eq!(line, 2);
                    assert_eq!(expected, 2);
                }
                other => panic!("expected field count error for {data:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_short_data_line() {
        let err = decode(Cursor::new("x\n-1 1\n1 0 10\n2 5\n")).unwrap_err();
        match err {
            ScaleError::Format {
                line,
                reason: FormatReason::FieldCount { expected, found },
                ..
            } => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected field count error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_blank_data_line() {
        let err = decode(Cursor::new("x\n-1 1\n1 0 10\n\n2 0 5\n")).unwrap_err();
        match err {
            ScaleError::Format {
                line,
                reason: FormatReason::FieldCount { expected, found },
                ..
            } => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 0);
            }
            other => panic!("expected field count error, got {other:?}"),
        }

        let err = decode(Cursor::new("x\n-1 1\n1 0 10\n  \t \n")).unwrap_err();
        assert_eq!(
            err.format_reason(),
            Some(FormatReason::FieldCount {
                expected: 3,
                found: 0
            })
        );
    }

    #[test]
    fn test_decode_bad_float() {
        let err = decode(Cursor::new("x\n-1 one\n")).unwrap_err();
        assert_eq!(err.format_reason(), Some(FormatReason::BadFloat));

        let err = decode(Cursor::new("x\n-1 1\n1 0 ten\n")).unwrap_err();
        assert_eq!(err.format_reason(), Some(FormatReason::BadFloat));
    }

    #[test]
    fn test_decode_missing_interval() {
        for data in ["", "x\n"] {
            let err = decode(Cursor::new(data)).unwrap_err();
            assert_eq!(err.format_reason(), Some(FormatReason::MissingInterval));
        }
    }

    #[test]
    fn test_encode_layout() {
        let ranges = RangeTable::new(vec![Range::new(0.0, 10.0), Range::new(-3.5, 4.0)]);
        let mut out = Vec::new();
        encode(&mut out, &ranges, TargetInterval::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "x\n-1 1\n1 0 10\n2 -3.5 4\n"
        );
    }

    #[test]
    fn test_encode_decode_exact() {
        let ranges = RangeTable::new(vec![
            Range::new(0.1, 0.30000000000000004),
            Range::new(-1e-300, 1.7976931348623157e308),
            Range::new(1.0 / 3.0, 2.0 / 3.0),
        ]);
        let interval = TargetInterval::new(-0.25, 1.0 / 7.0);

        let mut out = Vec::new();
        encode(&mut out, &ranges, interval).unwrap();
        let file = decode(Cursor::new(out)).unwrap();

        assert_eq!(file.ranges, ranges);
        assert_eq!(file.interval, interval);
    }

    #[test]
    fn test_save_and_load() {
        use tempfile::NamedTempFile;

        let ranges = RangeTable::new(vec![Range::new(2.0, 8.0)]);
        let interval = TargetInterval::new(0.0, 1.0);
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        write_ranges_file(temp_file.path(), &ranges, interval).unwrap();
        let (loaded_ranges, loaded_interval) = read_ranges_file(temp_file.path()).unwrap();

        assert_eq!(loaded_ranges, ranges);
        assert_eq!(loaded_interval, interval);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RangeFile::load("/non/existent/ranges.txt").unwrap_err();
        assert!(matches!(err, ScaleError::Io { .. }));
    }
}
