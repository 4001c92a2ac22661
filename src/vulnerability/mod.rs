//! Vulnerability: hazard damage curves (intensity to mean damage ratio)

mod curve;
pub mod loader;

pub use curve::{DamageCurve, DamageCurvePoint};
pub use loader::{load_damage_curve, load_damage_curve_from_reader};
