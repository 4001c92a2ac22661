//! Flood Impact - Batch flood-damage estimation for geographically located assets
//!
//! This library provides:
//! - Loading of gridded daily precipitation projections (flat CSV extraction)
//! - Exposure (asset) tables and hazard damage curves
//! - Per-asset spatial aggregation, exceedance event detection and yearly damage
//! - Result export and portfolio-level yearly summaries

pub mod error;
pub mod config;
pub mod hazard;
pub mod exposure;
pub mod vulnerability;
pub mod impact;

mod tabular;

// Re-export commonly used types
pub use error::{FloodError, Result};
pub use config::ImpactConfig;
pub use hazard::{GridObservation, HazardGrid};
pub use exposure::Asset;
pub use vulnerability::{DamageCurve, DamageCurvePoint};
pub use impact::{ImpactEstimator, ImpactRun, ResultSink, YearlyAssetResult, PortfolioSummary};
