//! Small helpers shared by the CSV loaders

use crate::error::{FloodError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Build a CSV reader with trimmed fields and a header row
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader)
}

/// Open a file for loading, mapping failures to `DataUnavailable`
pub(crate) fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| FloodError::unavailable(path.display().to_string(), e.to_string()))
}

/// Position of a named column in the header row (case-insensitive)
pub(crate) fn column_index(headers: &StringRecord, name: &str, resource: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| FloodError::unavailable(resource, format!("missing column '{}'", name)))
}

/// Parse a numeric field; an empty field is a missing value (NaN)
pub(crate) fn parse_f64(field: &str, column: &str, line: u64, resource: &str) -> Result<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| {
        FloodError::unavailable(
            resource,
            format!("line {}: column '{}' is not a number: '{}'", line, column, field),
        )
    })
}

/// Line number of a record for error messages (1-based, header included)
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_case_insensitive() {
        let headers = StringRecord::from(vec!["Time", "LAT", "lon", "pr"]);
        assert_eq!(column_index(&headers, "time", "grid").unwrap(), 0);
        assert_eq!(column_index(&headers, "lat", "grid").unwrap(), 1);
        assert_eq!(column_index(&headers, "pr", "grid").unwrap(), 3);
        assert!(column_index(&headers, "tas", "grid").is_err());
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("1.5", "value", 2, "assets").unwrap(), 1.5);
        assert!(parse_f64("", "value", 2, "assets").unwrap().is_nan());
        assert!(parse_f64("abc", "value", 2, "assets").is_err());
    }
}
