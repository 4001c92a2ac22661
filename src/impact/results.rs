//! Yearly result rows and the accumulating result table

use crate::error::{FloodError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Impact of one asset in one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAssetResult {
    pub asset_id: usize,
    pub year: i32,
    /// Mean of all daily window intensities in the year
    pub mean_intensity: f64,
    /// Mean of event-day intensities; None when the year had no event day
    pub mean_event_intensity: Option<f64>,
    /// Number of days at or above the threshold
    pub exceedance_count: u32,
    /// Compounded yearly damage ratio in [0, 1]
    pub damage_ratio: f64,
    /// damage_ratio * asset value
    pub impact_value: f64,
    pub lat: f64,
    pub lon: f64,
    pub asset_value: f64,
}

/// Exported row layout
#[derive(Debug, Serialize)]
struct OutputRow {
    row_index: usize,
    year: i32,
    #[serde(rename = "Mean")]
    mean: Option<f64>,
    #[serde(rename = "Mean_event")]
    mean_event: Option<f64>,
    #[serde(rename = "Exceeds_Threshold")]
    exceeds_threshold: u32,
    #[serde(rename = "Impact")]
    impact: Option<f64>,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    id: usize,
    asset_value: f64,
}

/// Undefined values are written as empty cells
fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

impl OutputRow {
    fn new(row_index: usize, row: &YearlyAssetResult) -> Self {
        Self {
            row_index,
            year: row.year,
            mean: defined(row.mean_intensity),
            mean_event: row.mean_event_intensity.and_then(defined),
            exceeds_threshold: row.exceedance_count,
            impact: defined(row.impact_value),
            latitude: row.lat,
            longitude: row.lon,
            id: row.asset_id,
            asset_value: row.asset_value,
        }
    }
}

/// Accumulates result batches in insertion order and exports them
#[derive(Debug, Clone, Default)]
pub struct ResultSink {
    rows: Vec<YearlyAssetResult>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one asset's rows
    pub fn append(&mut self, rows: impl IntoIterator<Item = YearlyAssetResult>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[YearlyAssetResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of impact values over all rows, skipping undefined values
    pub fn total_impact(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.impact_value)
            .filter(|v| !v.is_nan())
            .sum()
    }

    /// Write all rows as CSV with a leading 0-based `row_index` column
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (idx, row) in self.rows.iter().enumerate() {
            wtr.serialize(OutputRow::new(idx, row))?;
        }
        if self.rows.is_empty() {
            // serialize() emits the header with the first row only
            wtr.write_record([
                "row_index", "year", "Mean", "Mean_event", "Exceeds_Threshold",
                "Impact", "Latitude", "Longitude", "id", "asset_value",
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write all rows to a CSV file
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| FloodError::unavailable(path.display().to_string(), e.to_string()))?;
        self.write_csv(file)?;
        log::info!("Wrote {} result rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(asset_id: usize, year: i32, events: u32) -> YearlyAssetResult {
        let damage_ratio = if events == 0 { 0.0 } else { 0.5 };
        YearlyAssetResult {
            asset_id,
            year,
            mean_intensity: 12.5,
            mean_event_intensity: (events > 0).then_some(55.0),
            exceedance_count: events,
            damage_ratio,
            impact_value: damage_ratio * 1000.0,
            lat: 19.5,
            lon: -99.25,
            asset_value: 1000.0,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut sink = ResultSink::new();
        sink.append(vec![row(0, 2030, 1), row(0, 2031, 0)]);
        sink.append(vec![row(1, 2030, 2)]);

        let keys: Vec<(usize, i32)> = sink.rows().iter().map(|r| (r.asset_id, r.year)).collect();
        assert_eq!(keys, vec![(0, 2030), (0, 2031), (1, 2030)]);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.total_impact(), 1000.0);
    }

    #[test]
    fn test_write_csv_layout() {
        let mut sink = ResultSink::new();
        sink.append(vec![row(0, 2030, 1), row(3, 2031, 0)]);

        let mut buf = Vec::new();
        sink.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "row_index,year,Mean,Mean_event,Exceeds_Threshold,Impact,Latitude,Longitude,id,asset_value"
        );
        assert_eq!(lines[1], "0,2030,12.5,55.0,1,500.0,19.5,-99.25,0,1000.0");
        // undefined event mean is an empty cell
        assert_eq!(lines[2], "1,2031,12.5,,0,0.0,19.5,-99.25,3,1000.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_sink_writes_header() {
        let mut buf = Vec::new();
        ResultSink::new().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("row_index,year,Mean"));
        assert_eq!(text.lines().count(), 1);
    }
}
