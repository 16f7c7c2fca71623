//! Global constants for the simulation.
//!
//! The metric is dimensionless: lengths share the unit of the throat
//! radius and the affine parameter carries no physical time.

// ---------------------------------------------------------------------------
// Numerical / Integration Constants
// ---------------------------------------------------------------------------
pub const DEFAULT_STEP_SIZE: f64 = 0.01; // Affine-parameter step for frame renders
pub const DEFAULT_ITERATIONS: usize = 1000; // Fixed step count per ray
pub const POLE_EPSILON: f64 = 1e-6; // Keeps theta off the coordinate poles

// ---------------------------------------------------------------------------
// Default Shape Parameters (render pipeline)
// ---------------------------------------------------------------------------
pub const DEFAULT_THROAT_RADIUS: f64 = 1.0; // rho
pub const DEFAULT_TRANSITION_LENGTH: f64 = 2.0; // a
pub const DEFAULT_MASS_PARAM: f64 = 0.01; // M

// ---------------------------------------------------------------------------
// Ray-Path Pipeline Defaults
// ---------------------------------------------------------------------------
pub const PATH_STEP_SIZE: f64 = 0.1;
pub const PATH_ITERATIONS: usize = 100;
pub const PATH_GRID_SIZE: usize = 10; // Rays per grid axis
pub const PATH_THROAT_RADIUS: f64 = 0.1;
pub const PATH_TRANSITION_LENGTH: f64 = 0.1;
pub const PATH_OBSERVER_L: f64 = 10.0;

// ---------------------------------------------------------------------------
// Observer Defaults
// ---------------------------------------------------------------------------
pub const DEFAULT_VFOV_DEG: f64 = 90.0;
pub const DEFAULT_OBSERVER_L: f64 = 3.0;
