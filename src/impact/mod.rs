//! Impact engine: per-asset aggregation, event detection, damage and export

mod engine;
mod results;
mod summary;

pub use engine::{ImpactEstimator, ImpactRun, SkippedAsset, compound_damage_ratio};
pub use results::{YearlyAssetResult, ResultSink};
pub use summary::{PortfolioSummary, PortfolioYear};
