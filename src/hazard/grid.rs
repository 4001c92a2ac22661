//! Per-cell daily series indexed by latitude for window lookups

use super::GridObservation;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Daily series of a single grid cell
#[derive(Debug, Clone)]
pub struct GridCell {
    pub lat: f64,
    pub lon: f64,
    /// (date, value) pairs sorted by date
    pub series: Vec<(NaiveDate, f64)>,
}

/// Inclusive square window test in degrees (not a geodesic distance)
pub fn in_window(cell_lat: f64, cell_lon: f64, lat: f64, lon: f64, radius: f64) -> bool {
    cell_lat >= lat - radius
        && cell_lat <= lat + radius
        && cell_lon >= lon - radius
        && cell_lon <= lon + radius
}

/// Observations restricted to an analysis period and grouped by cell
///
/// Cells are sorted by latitude so a window only scans the latitude band it covers.
#[derive(Debug, Clone, Default)]
pub struct HazardGrid {
    cells: Vec<GridCell>,
    observation_count: usize,
}

impl HazardGrid {
    /// Build the grid from observations whose calendar year is in [start_year, end_year]
    pub fn from_observations<I>(observations: I, start_year: i32, end_year: i32) -> Self
    where
        I: IntoIterator<Item = GridObservation>,
    {
        let mut index: HashMap<(u64, u64), usize> = HashMap::new();
        let mut cells: Vec<GridCell> = Vec::new();
        let mut observation_count = 0;
        let mut dropped = 0;

        for obs in observations {
            let year = obs.time.year();
            if year < start_year || year > end_year {
                continue;
            }
            if !obs.lat.is_finite() || !obs.lon.is_finite() {
                dropped += 1;
                continue;
            }
            // + 0.0 folds -0.0 into 0.0 so both land in the same cell
            let key = ((obs.lat + 0.0).to_bits(), (obs.lon + 0.0).to_bits());
            let idx = *index.entry(key).or_insert_with(|| {
                cells.push(GridCell {
                    lat: obs.lat + 0.0,
                    lon: obs.lon + 0.0,
                    series: Vec::new(),
                });
                cells.len() - 1
            });
            cells[idx].series.push((obs.time, obs.value));
            observation_count += 1;
        }

        if dropped > 0 {
            log::warn!("Dropped {} observations with non-finite coordinates", dropped);
        }

        for cell in &mut cells {
            cell.series.sort_by_key(|(date, _)| *date);
        }
        cells.sort_by(|a, b| a.lat.total_cmp(&b.lat).then(a.lon.total_cmp(&b.lon)));

        log::debug!(
            "Hazard grid: {} cells, {} observations in {}-{}",
            cells.len(),
            observation_count,
            start_year,
            end_year
        );

        Self { cells, observation_count }
    }

    /// Cells inside the inclusive square window of half-width `radius` around (lat, lon)
    pub fn cells_in_window(&self, lat: f64, lon: f64, radius: f64) -> impl Iterator<Item = &GridCell> {
        let lat_min = lat - radius;
        let lat_max = lat + radius;
        let start = self.cells.partition_point(|c| c.lat < lat_min);
        self.cells[start..]
            .iter()
            .take_while(move |c| c.lat <= lat_max)
            .filter(move |c| in_window(c.lat, c.lon, lat, lon, radius))
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn observation_count(&self) -> usize {
        self.observation_count
    }
}
