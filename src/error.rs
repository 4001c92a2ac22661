//! Error types shared by the loaders and the impact engine

use thiserror::Error;

/// Errors raised while loading inputs or estimating impacts
#[derive(Error, Debug)]
pub enum FloodError {
    /// A required input could not be opened, is missing a column, or is malformed
    #[error("data unavailable: {resource}: {reason}")]
    DataUnavailable { resource: String, reason: String },

    /// The damage curve has no usable points after filtering to the hazard
    #[error("damage curve for hazard '{hazard}' has no usable points")]
    EmptyCurve { hazard: String },

    /// The asset's spatial window matched no grid cell in the analysis period
    #[error("asset {asset_id}: no grid observations inside the spatial window")]
    NoObservationsInWindow { asset_id: usize },

    /// The asset row cannot be evaluated (e.g. non-finite coordinates)
    #[error("asset {asset_id}: {reason}")]
    InvalidAsset { asset_id: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FloodError {
    pub(crate) fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is scoped to a single asset; the run skips such assets
    /// and aborts on anything else
    pub fn is_asset_scoped(&self) -> bool {
        matches!(
            self,
            Self::NoObservationsInWindow { .. } | Self::InvalidAsset { .. }
        )
    }
}

/// Convenience alias for `Result<T, FloodError>`
pub type Result<T> = std::result::Result<T, FloodError>;
