//! Exposure data structures and asset table loading

mod data;
pub mod loader;

pub use data::Asset;
pub use loader::{load_assets, load_assets_from_reader};
