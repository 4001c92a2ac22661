//! Load damage curves filtered to one hazard category

use super::{DamageCurve, DamageCurvePoint};
use crate::error::{FloodError, Result};
use crate::tabular::{column_index, csv_reader, line_of, open_input, parse_f64};
use std::io::Read;
use std::path::Path;

const RESOURCE: &str = "damage curves";

/// Load the curve for `hazard` from a CSV file with `peril`, `intensity`, `mdr` columns
pub fn load_damage_curve<P: AsRef<Path>>(path: P, hazard: &str) -> Result<DamageCurve> {
    let path = path.as_ref();
    let reader = open_input(path)?;
    let curve = load_damage_curve_from_reader(reader, hazard).map_err(|e| match e {
        FloodError::DataUnavailable { reason, .. } => {
            FloodError::unavailable(path.display().to_string(), reason)
        }
        other => other,
    })?;
    log::info!(
        "Loaded '{}' damage curve with {} points from {}",
        hazard,
        curve.points().len(),
        path.display()
    );
    Ok(curve)
}

/// Load the curve for `hazard` from any CSV reader
pub fn load_damage_curve_from_reader<R: Read>(reader: R, hazard: &str) -> Result<DamageCurve> {
    let mut rdr = csv_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?
        .clone();

    let peril_idx = column_index(&headers, "peril", RESOURCE)?;
    let intensity_idx = column_index(&headers, "intensity", RESOURCE)?;
    let mdr_idx = column_index(&headers, "mdr", RESOURCE)?;

    let mut matched = 0usize;
    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?;
        if record.get(peril_idx) != Some(hazard) {
            continue;
        }
        matched += 1;

        let line = line_of(&record);
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let intensity = parse_f64(field(intensity_idx), "intensity", line, RESOURCE)?;
        let mdr = parse_f64(field(mdr_idx), "mdr", line, RESOURCE)?;
        points.push(DamageCurvePoint::new(intensity, mdr));
    }

    if matched == 0 {
        return Err(FloodError::unavailable(
            RESOURCE,
            format!("no rows for hazard '{}'", hazard),
        ));
    }

    DamageCurve::new(hazard, points)
}
