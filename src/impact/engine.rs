//! Core per-asset impact estimation
//!
//! For each asset the engine averages the grid cells inside its square window
//! day by day, marks days at or above the threshold as flood events, reduces
//! the days to calendar years and converts the mean event intensity into a
//! compounded yearly damage ratio.

use super::{ResultSink, YearlyAssetResult};
use crate::config::ImpactConfig;
use crate::error::{FloodError, Result};
use crate::exposure::Asset;
use crate::hazard::{GridObservation, HazardGrid};
use crate::vulnerability::DamageCurve;
use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Probability that at least one of `exceedances` independent events, each
/// causing damage with ratio `base_ratio`, occurs: 1 - (1 - r)^n
///
/// Zero exceedances give exactly 0, even when `base_ratio` is undefined.
pub fn compound_damage_ratio(base_ratio: f64, exceedances: u32) -> f64 {
    if exceedances == 0 {
        return 0.0;
    }
    1.0 - (1.0 - base_ratio).powf(exceedances as f64)
}

/// An asset that produced no rows, with the reason
#[derive(Debug)]
pub struct SkippedAsset {
    pub asset_id: usize,
    pub error: FloodError,
}

/// Output of a full run over the asset table
#[derive(Debug, Default)]
pub struct ImpactRun {
    pub results: ResultSink,
    pub skipped: Vec<SkippedAsset>,
}

/// Running sums for one calendar year of one asset
#[derive(Debug, Default)]
struct YearAccumulator {
    sum: f64,
    valid_days: u32,
    event_sum: f64,
    events: u32,
}

impl YearAccumulator {
    fn add_day(&mut self, value: f64, threshold: f64) {
        if value.is_nan() {
            return;
        }
        self.sum += value;
        self.valid_days += 1;
        if value >= threshold {
            self.event_sum += value;
            self.events += 1;
        }
    }

    fn mean_intensity(&self) -> f64 {
        if self.valid_days == 0 {
            f64::NAN
        } else {
            self.sum / self.valid_days as f64
        }
    }

    fn mean_event_intensity(&self) -> Option<f64> {
        (self.events > 0).then(|| self.event_sum / self.events as f64)
    }
}

/// Impact engine over a shared, read-only grid and damage curve
#[derive(Debug, Clone)]
pub struct ImpactEstimator {
    grid: HazardGrid,
    curve: DamageCurve,
    config: ImpactConfig,
}

impl ImpactEstimator {
    /// Create an engine from a grid already restricted to the analysis period
    pub fn new(grid: HazardGrid, curve: DamageCurve, config: ImpactConfig) -> Self {
        Self { grid, curve, config }
    }

    /// Create an engine from raw observations, keeping only the configured years
    pub fn from_observations(
        observations: Vec<GridObservation>,
        curve: DamageCurve,
        config: ImpactConfig,
    ) -> Self {
        let grid = HazardGrid::from_observations(observations, config.start_year, config.end_year);
        Self::new(grid, curve, config)
    }

    pub fn grid(&self) -> &HazardGrid {
        &self.grid
    }

    /// Mean intensity per day across the grid cells in the asset's window
    ///
    /// NaN cell values are skipped; a day whose cells are all NaN averages to NaN.
    /// Returns `NoObservationsInWindow` if no cell lies inside the window.
    pub fn daily_window_means(&self, asset: &Asset) -> Result<BTreeMap<NaiveDate, f64>> {
        let mut totals: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
        let mut cells = 0usize;

        for cell in self.grid.cells_in_window(asset.lat, asset.lon, self.config.radius) {
            cells += 1;
            for &(date, value) in &cell.series {
                let entry = totals.entry(date).or_insert((0.0, 0));
                if !value.is_nan() {
                    entry.0 += value;
                    entry.1 += 1;
                }
            }
        }

        if cells == 0 {
            return Err(FloodError::NoObservationsInWindow { asset_id: asset.id });
        }
        log::debug!("Asset {}: {} cells, {} days in window", asset.id, cells, totals.len());

        Ok(totals
            .into_iter()
            .map(|(date, (sum, n))| {
                let mean = if n == 0 { f64::NAN } else { sum / n as f64 };
                (date, mean)
            })
            .collect())
    }

    /// Yearly impact rows for one asset, ascending by year
    pub fn estimate_asset(&self, asset: &Asset) -> Result<Vec<YearlyAssetResult>> {
        asset.validate()?;
        let daily = self.daily_window_means(asset)?;

        let mut years: BTreeMap<i32, YearAccumulator> = BTreeMap::new();
        for (date, value) in daily {
            years
                .entry(date.year())
                .or_default()
                .add_day(value, self.config.threshold);
        }

        let rows = years
            .into_iter()
            .map(|(year, acc)| {
                let mean_event_intensity = acc.mean_event_intensity();
                let base_ratio = mean_event_intensity
                    .map(|x| self.curve.interpolate(x))
                    .unwrap_or(f64::NAN);
                let damage_ratio = compound_damage_ratio(base_ratio, acc.events);

                YearlyAssetResult {
                    asset_id: asset.id,
                    year,
                    mean_intensity: acc.mean_intensity(),
                    mean_event_intensity,
                    exceedance_count: acc.events,
                    damage_ratio,
                    impact_value: damage_ratio * asset.value,
                    lat: asset.lat,
                    lon: asset.lon,
                    asset_value: asset.value,
                }
            })
            .collect();

        Ok(rows)
    }

    /// Estimate every asset in parallel; results keep asset order
    pub fn run(&self, assets: &[Asset]) -> Result<ImpactRun> {
        self.run_with_progress(assets, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `progress(done, total)` after each asset
    ///
    /// `done` counts completed assets; with parallel workers the calls are not
    /// ordered by asset id.
    pub fn run_with_progress<F>(&self, assets: &[Asset], progress: F) -> Result<ImpactRun>
    where
        F: Fn(usize, usize) + Sync,
    {
        let total = assets.len();
        let done = AtomicUsize::new(0);

        let outcomes: Vec<Result<Vec<YearlyAssetResult>>> = assets
            .par_iter()
            .map(|asset| {
                let outcome = self.estimate_asset(asset);
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                progress(n, total);
                outcome
            })
            .collect();

        let run = collect_outcomes(assets, outcomes)?;
        log::info!(
            "Estimated {} assets: {} rows, {} skipped",
            total,
            run.results.len(),
            run.skipped.len()
        );
        Ok(run)
    }
}

/// Merge per-asset outcomes in asset order
///
/// Asset-scoped errors are logged and the asset skipped; any other error aborts the run.
fn collect_outcomes(
    assets: &[Asset],
    outcomes: Vec<Result<Vec<YearlyAssetResult>>>,
) -> Result<ImpactRun> {
    let mut run = ImpactRun::default();
    for (asset, outcome) in assets.iter().zip(outcomes) {
        match outcome {
            Ok(rows) => run.results.append(rows),
            Err(error) if error.is_asset_scoped() => {
                log::warn!("Skipping asset {}: {}", asset.id, error);
                run.skipped.push(SkippedAsset { asset_id: asset.id, error });
            }
            Err(error) => return Err(error),
        }
    }
    Ok(run)
}
