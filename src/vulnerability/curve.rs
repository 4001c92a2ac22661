//! Damage curve with clamped linear interpolation

use crate::error::{FloodError, Result};

/// One support point of a damage curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageCurvePoint {
    /// Hazard intensity (mm/day for precipitation)
    pub intensity: f64,
    /// Mean damage ratio, conventionally in [0, 1]
    pub mdr: f64,
}

impl DamageCurvePoint {
    pub fn new(intensity: f64, mdr: f64) -> Self {
        Self { intensity, mdr }
    }
}

/// Damage curve for a single hazard, sorted ascending by intensity
#[derive(Debug, Clone)]
pub struct DamageCurve {
    hazard: String,
    points: Vec<DamageCurvePoint>,
}

impl DamageCurve {
    /// Build a curve from support points in any order
    ///
    /// Points with a non-finite intensity or mdr are discarded. Fails with
    /// `EmptyCurve` if none remain.
    pub fn new(hazard: impl Into<String>, points: Vec<DamageCurvePoint>) -> Result<Self> {
        let hazard = hazard.into();
        let mut points: Vec<DamageCurvePoint> = points
            .into_iter()
            .filter(|p| p.intensity.is_finite() && p.mdr.is_finite())
            .collect();
        if points.is_empty() {
            return Err(FloodError::EmptyCurve { hazard });
        }
        // stable, so duplicate intensities keep their source order
        points.sort_by(|a, b| a.intensity.total_cmp(&b.intensity));
        Ok(Self { hazard, points })
    }

    pub fn hazard(&self) -> &str {
        &self.hazard
    }

    pub fn points(&self) -> &[DamageCurvePoint] {
        &self.points
    }

    /// Mean damage ratio at `intensity`
    ///
    /// Linear between support points, clamped to the first/last mdr outside the
    /// intensity domain. NaN in, NaN out.
    pub fn interpolate(&self, intensity: f64) -> f64 {
        if intensity.is_nan() {
            return f64::NAN;
        }
        // new() guarantees at least one point
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if intensity <= first.intensity {
            return first.mdr;
        }
        if intensity >= last.intensity {
            return last.mdr;
        }

        let upper = self.points.partition_point(|p| p.intensity <= intensity);
        let lo = self.points[upper - 1];
        let hi = self.points[upper];
        let t = (intensity - lo.intensity) / (hi.intensity - lo.intensity);
        lo.mdr + t * (hi.mdr - lo.mdr)
    }
}
