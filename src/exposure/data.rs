//! Exposed asset record

use crate::error::{FloodError, Result};

/// A located asset exposed to the hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    /// 0-based row position in the asset table
    pub id: usize,
    /// Monetary value at risk
    pub value: f64,
    pub lat: f64,
    pub lon: f64,
}

impl Asset {
    pub fn new(id: usize, value: f64, lat: f64, lon: f64) -> Self {
        Self { id, value, lat, lon }
    }

    /// Check the asset can be evaluated; ranges are not enforced, only finiteness
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| FloodError::InvalidAsset {
            asset_id: self.id,
            reason: reason.to_string(),
        };
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(invalid("non-finite coordinates"));
        }
        if !self.value.is_finite() {
            return Err(invalid("non-finite value"));
        }
        Ok(())
    }
}
