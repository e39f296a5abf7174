//! Geometry error kinds
//!
//! Every fallible constructor in the kernel reports one of these. Errors are
//! raised at the call that detects the violation and are never retried.

use thiserror::Error;

use crate::math::Point2D;
use crate::units::{Dimension, Unit};

/// Error type for shape, frame and quantity construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A geometric parameter violates its domain (e.g. non-positive radius)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two points that must differ coincide, or two directions are parallel
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A quantity has the wrong physical dimension
    #[error("Unit mismatch: expected a {expected} quantity, got unit '{found}'")]
    UnitMismatch {
        /// Dimension the caller required
        expected: Dimension,
        /// Unit that was supplied
        found: Unit,
    },

    /// A value is not of the accepted semantic type
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Name of the accepted type
        expected: &'static str,
        /// Description of what was supplied
        found: String,
    },
}

impl GeometryError {
    /// Shorthand for an [`GeometryError::InvalidParameter`]
    pub fn invalid(message: impl Into<String>) -> Self {
        GeometryError::InvalidParameter(message.into())
    }

    /// Shorthand for a [`GeometryError::DegenerateGeometry`]
    pub fn degenerate(message: impl Into<String>) -> Self {
        GeometryError::DegenerateGeometry(message.into())
    }

    /// Shorthand for a [`GeometryError::TypeMismatch`]
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        GeometryError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Fail with [`GeometryError::InvalidParameter`] unless `value` is strictly positive.
///
/// `what` names the parameter in the message, e.g. "Radius".
pub fn ensure_positive(value: f64, what: &str) -> GeometryResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "{what} must be a real positive value, got {value}"
        )))
    }
}

/// Fail with [`GeometryError::InvalidParameter`] when a coordinate of `point` is NaN or infinite.
pub fn ensure_finite(point: Point2D, what: &str) -> GeometryResult<()> {
    if point.0.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "'{what}' must have finite coordinates, got {point}"
        )))
    }
}
