//! Run parameters for an impact analysis
//!
//! Defaults reproduce the reference scenario: years 2023-2100, a one degree
//! window and a 50 mm/day flood threshold on the `pr` variable.

use crate::error::{FloodError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parameters for a single impact run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactConfig {
    /// First calendar year included in the analysis (inclusive)
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Last calendar year included in the analysis (inclusive)
    #[serde(default = "default_end_year")]
    pub end_year: i32,

    /// Half-width of the square window around each asset, in degrees
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Daily intensity at or above which a day counts as a flood event (mm/day)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Hazard category used to select the damage curve
    #[serde(default = "default_hazard")]
    pub hazard: String,

    /// Name of the precipitation variable in the grid source
    #[serde(default = "default_variable")]
    pub variable: String,
}

fn default_start_year() -> i32 { 2023 }
fn default_end_year() -> i32 { 2100 }
fn default_radius() -> f64 { 1.0 }
fn default_threshold() -> f64 { 50.0 }
fn default_hazard() -> String { "Flood".to_string() }
fn default_variable() -> String { "pr".to_string() }

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            radius: default_radius(),
            threshold: default_threshold(),
            hazard: default_hazard(),
            variable: default_variable(),
        }
    }
}

impl ImpactConfig {
    /// Read a config from JSON; missing fields take their defaults
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| FloodError::unavailable(path.display().to_string(), e.to_string()))?;
        Self::from_json_reader(BufReader::new(file))
    }
}
