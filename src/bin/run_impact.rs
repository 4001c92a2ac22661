//! Run the flood impact analysis for an asset table
//!
//! Loads the precipitation grid, the asset table and the damage curve, estimates
//! yearly impacts for every asset and writes the results table.

use anyhow::{Context, Result};
use clap::Parser;
use flood_impact::{
    exposure::load_assets,
    hazard::load_grid,
    vulnerability::load_damage_curve,
    ImpactConfig, ImpactEstimator, PortfolioSummary,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_impact", about = "Estimate yearly flood impacts for located assets")]
struct Args {
    /// Flat precipitation grid CSV (time, lat, lon, <variable>)
    #[arg(long)]
    grid: PathBuf,

    /// Asset table CSV (value, latitude, longitude)
    #[arg(long)]
    assets: PathBuf,

    /// Damage curve CSV (peril, intensity, mdr)
    #[arg(long)]
    curve: PathBuf,

    /// Results CSV to write
    #[arg(long, default_value = "flood_impact_results.csv")]
    output: PathBuf,

    /// Optional yearly portfolio summary CSV
    #[arg(long)]
    summary_output: Option<PathBuf>,

    /// JSON file with run parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long)]
    end_year: Option<i32>,

    /// Window half-width in degrees
    #[arg(long)]
    radius: Option<f64>,

    /// Flood event threshold (mm/day)
    #[arg(long)]
    threshold: Option<f64>,

    /// Damage curve hazard category
    #[arg(long)]
    hazard: Option<String>,

    /// Precipitation variable name in the grid
    #[arg(long)]
    variable: Option<String>,
}

impl Args {
    fn impact_config(&self) -> Result<ImpactConfig> {
        let mut config = match &self.config {
            Some(path) => ImpactConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => ImpactConfig::default(),
        };
        if let Some(v) = self.start_year { config.start_year = v; }
        if let Some(v) = self.end_year { config.end_year = v; }
        if let Some(v) = self.radius { config.radius = v; }
        if let Some(v) = self.threshold { config.threshold = v; }
        if let Some(v) = &self.hazard { config.hazard = v.clone(); }
        if let Some(v) = &self.variable { config.variable = v.clone(); }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.impact_config()?;

    let start = Instant::now();
    println!(
        "Years {}-{}, radius {} deg, threshold {}, hazard '{}'",
        config.start_year, config.end_year, config.radius, config.threshold, config.hazard
    );

    println!("Loading precipitation grid from {}...", args.grid.display());
    let observations = load_grid(&args.grid, &config.variable)
        .with_context(|| format!("Failed to load grid {}", args.grid.display()))?;
    println!("Loaded {} observations in {:?}", observations.len(), start.elapsed());

    let assets = load_assets(&args.assets)
        .with_context(|| format!("Failed to load assets {}", args.assets.display()))?;
    let curve = load_damage_curve(&args.curve, &config.hazard)
        .with_context(|| format!("Failed to load damage curve {}", args.curve.display()))?;
    println!("Loaded {} assets and {} curve points", assets.len(), curve.points().len());

    let estimator = ImpactEstimator::from_observations(observations, curve, config);
    println!(
        "Grid: {} cells, {} observations in range",
        estimator.grid().cell_count(),
        estimator.grid().observation_count()
    );

    println!("Running impact estimation...");
    let run_start = Instant::now();
    let step = (assets.len() / 10).max(1);
    let run = estimator
        .run_with_progress(&assets, |done, total| {
            if done % step == 0 || done == total {
                println!("  {}/{} assets", done, total);
            }
        })
        .context("Impact estimation aborted")?;
    println!("Estimation complete in {:?}", run_start.elapsed());

    run.results
        .export(&args.output)
        .with_context(|| format!("Failed to write results {}", args.output.display()))?;
    println!("Output written to {}", args.output.display());

    let summary = PortfolioSummary::from_results(run.results.rows());
    if let Some(path) = &args.summary_output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        summary.write_csv(file)?;
        println!("Summary written to {}", path.display());
    }

    println!("\nPortfolio Summary:");
    println!("  Rows: {}, skipped assets: {}", run.results.len(), run.skipped.len());
    for skipped in &run.skipped {
        println!("    asset {}: {}", skipped.asset_id, skipped.error);
    }
    println!("  Total impact: {:.2}", run.results.total_impact());
    if let Some(worst) = summary.worst_year() {
        println!(
            "  Worst year: {} impact={:.2} ({} of {} assets with events)",
            worst.year, worst.total_impact, worst.assets_with_events, worst.assets
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
