//! Global constants for gk-core

/// Default number of sample points produced when discretizing a shape
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Absolute tolerance (meters) used when comparing points and vectors
pub const POINT_TOLERANCE: f64 = 1e-12;

/// Relative tolerance for the equal-radius check on arc endpoints
pub const ARC_RADIUS_TOLERANCE: f64 = 1e-9;

/// Squared-length threshold below which a direction is treated as zero
pub const DIRECTION_EPSILON: f64 = 1e-24;

/// Upper bound on iterations of the arithmetic-geometric mean
pub const AGM_MAX_ITERATIONS: usize = 64;
