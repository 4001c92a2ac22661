//! Load gridded precipitation from its flat (time, lat, lon, value) CSV extraction

use super::GridObservation;
use crate::error::{FloodError, Result};
use crate::tabular::{column_index, csv_reader, line_of, open_input, parse_f64};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

const RESOURCE: &str = "precipitation grid";

/// Load all observations of `variable` from a grid CSV file
pub fn load_grid<P: AsRef<Path>>(path: P, variable: &str) -> Result<Vec<GridObservation>> {
    let path = path.as_ref();
    let reader = open_input(path)?;
    let observations = load_grid_from_reader(reader, variable).map_err(|e| match e {
        FloodError::DataUnavailable { reason, .. } => {
            FloodError::unavailable(path.display().to_string(), reason)
        }
        other => other,
    })?;
    log::info!(
        "Loaded {} '{}' observations from {}",
        observations.len(),
        variable,
        path.display()
    );
    Ok(observations)
}

/// Load all observations of `variable` from any CSV reader
///
/// The header must contain `time`, `lat`, `lon` and the variable column.
pub fn load_grid_from_reader<R: Read>(reader: R, variable: &str) -> Result<Vec<GridObservation>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?
        .clone();

    let time_idx = column_index(&headers, "time", RESOURCE)?;
    let lat_idx = column_index(&headers, "lat", RESOURCE)?;
    let lon_idx = column_index(&headers, "lon", RESOURCE)?;
    let value_idx = column_index(&headers, variable, RESOURCE).map_err(|_| {
        FloodError::unavailable(RESOURCE, format!("variable '{}' not present", variable))
    })?;

    let mut observations = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?;
        let line = line_of(&record);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let time = parse_date(field(time_idx)).ok_or_else(|| {
            FloodError::unavailable(
                RESOURCE,
                format!("line {}: unrecognized time '{}'", line, field(time_idx)),
            )
        })?;
        let lat = parse_f64(field(lat_idx), "lat", line, RESOURCE)?;
        let lon = parse_f64(field(lon_idx), "lon", line, RESOURCE)?;
        let value = parse_f64(field(value_idx), variable, line, RESOURCE)?;

        observations.push(GridObservation::new(time, lat, lon, value));
    }

    Ok(observations)
}

/// Parse a calendar date, accepting plain dates and date-times (time of day dropped)
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
