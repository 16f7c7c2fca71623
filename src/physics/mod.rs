//! Physics module for the wormhole simulation
//!
//! Contains the embedding-diagram shape model and the fixed-step
//! null-geodesic integrator shared by both rendering pipelines.

pub mod constants;
pub mod geodesics;
pub mod wormhole;

// Re-export commonly used items
pub use constants::*;
pub use geodesics::{GeodesicIntegrator, GeodesicState};
pub use wormhole::Wormhole;
