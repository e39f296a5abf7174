//! Geometry kernel core types
//!
//! This crate provides:
//! - Measurement types (lengths and angles with unit conversion)
//! - 2D/3D points and vectors backed by `glam`
//! - Reference frames mapping sketch coordinates into world space
//! - The shared geometry error type
//! - Sketch configuration loaded from RON files

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod math;
pub mod units;

// Re-exports for convenience
pub use config::{ConfigError, RadiusCheck, SketchConfig};
pub use error::{GeometryError, GeometryResult, ensure_finite, ensure_positive};
pub use frame::Frame;
pub use math::{Point2D, Point3D, UnitVector3D, Vector2D, Vector3D};
pub use units::{
    Angle, AngleUnit, Dimension, Distance, IntoAngle, IntoDistance, LengthUnit, Quantity, Unit,
};
