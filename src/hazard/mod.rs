//! Hazard data: gridded daily precipitation observations and their spatial index

mod data;
pub mod loader;
pub mod grid;

pub use data::{GridObservation, normalize_longitude};
pub use loader::{load_grid, load_grid_from_reader};
pub use grid::{HazardGrid, GridCell};
