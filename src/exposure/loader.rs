//! Load the asset table (value, latitude, longitude by column position)

use super::Asset;
use crate::error::{FloodError, Result};
use crate::tabular::{csv_reader, line_of, open_input, parse_f64};
use std::io::Read;
use std::path::Path;

const RESOURCE: &str = "asset table";

/// Load assets from a CSV file
pub fn load_assets<P: AsRef<Path>>(path: P) -> Result<Vec<Asset>> {
    let path = path.as_ref();
    let reader = open_input(path)?;
    let assets = load_assets_from_reader(reader).map_err(|e| match e {
        FloodError::DataUnavailable { reason, .. } => {
            FloodError::unavailable(path.display().to_string(), reason)
        }
        other => other,
    })?;
    log::info!("Loaded {} assets from {}", assets.len(), path.display());
    Ok(assets)
}

/// Load assets from any CSV reader
///
/// The first three columns are value, latitude and longitude regardless of
/// their header names. Asset ids are the 0-based data row positions.
pub fn load_assets_from_reader<R: Read>(reader: R) -> Result<Vec<Asset>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?;
    if headers.len() < 3 {
        return Err(FloodError::unavailable(
            RESOURCE,
            format!("expected at least 3 columns (value, latitude, longitude), found {}", headers.len()),
        ));
    }

    let mut assets = Vec::new();
    for (id, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| FloodError::unavailable(RESOURCE, e.to_string()))?;
        let line = line_of(&record);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let value = parse_f64(field(0), "value", line, RESOURCE)?;
        let lat = parse_f64(field(1), "latitude", line, RESOURCE)?;
        let lon = parse_f64(field(2), "longitude", line, RESOURCE)?;

        assets.push(Asset::new(id, value, lat, lon));
    }

    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_assets_positional() {
        let data = "\
Value,Latitud,Longitud,Name
1000000,19.43,-99.13,CDMX
250000.5,25.67,-100.31,MTY
";
        let assets = load_assets_from_reader(data.as_bytes()).expect("valid assets");

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0], Asset::new(0, 1_000_000.0, 19.43, -99.13));
        assert_eq!(assets[1].id, 1);
        assert_eq!(assets[1].value, 250_000.5);
    }

    #[test]
    fn test_missing_cell_loads_as_nan() {
        let data = "value,lat,lon\n100,,5\n";
        let assets = load_assets_from_reader(data.as_bytes()).expect("loads");
        assert!(assets[0].lat.is_nan());
        assert!(assets[0].validate().is_err());
    }

    #[test]
    fn test_too_few_columns() {
        let data = "value,lat\n100,5\n";
        assert!(matches!(
            load_assets_from_reader(data.as_bytes()),
            Err(FloodError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        let data = "value,lat,lon\nlots,1,2\n";
        let err = load_assets_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'value'"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_assets("/nonexistent/assets.csv"),
            Err(FloodError::DataUnavailable { .. })
        ));
    }
}
