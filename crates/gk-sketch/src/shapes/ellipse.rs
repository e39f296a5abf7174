//! Ellipse

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::constants::AGM_MAX_ITERATIONS;
use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, IntoDistance, Point2D, Point3D,
    ensure_finite, ensure_positive,
};

use super::{ShapeGeometry, finite_rotation};
use super::boundary::{linspace, place, to_local};

/// An ellipse given by center, semi-axes and the angle of its major axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EllipseData")]
pub struct Ellipse {
    center: Point2D,
    semi_major: Distance,
    semi_minor: Distance,
    rotation: Angle,
    frame: Frame,
}

impl Ellipse {
    /// Create an axis-aligned ellipse
    ///
    /// Both semi-axes must be positive lengths and `semi_major >= semi_minor`.
    pub fn new(
        center: Point2D,
        semi_major: impl IntoDistance,
        semi_minor: impl IntoDistance,
    ) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        let semi_major = semi_major.into_distance()?;
        let semi_minor = semi_minor.into_distance()?;
        ensure_positive(semi_major.as_meters(), "Semi-major axis")?;
        ensure_positive(semi_minor.as_meters(), "Semi-minor axis")?;
        if semi_major.as_meters() < semi_minor.as_meters() {
            return Err(GeometryError::invalid(format!(
                "Semi-major axis ({semi_major}) is shorter than the semi-minor axis ({semi_minor})"
            )));
        }
        Ok(Self {
            center,
            semi_major,
            semi_minor,
            rotation: Angle::ZERO,
            frame: Frame::default(),
        })
    }

    /// Rotate the major axis counterclockwise from the sketch x axis
    pub fn with_rotation(self, rotation: Angle) -> Self {
        Self { rotation, ..self }
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn semi_major(&self) -> Distance {
        self.semi_major
    }

    pub fn semi_minor(&self) -> Distance {
        self.semi_minor
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// `sqrt(1 - (b/a)²)`, zero for a circle
    pub fn eccentricity(&self) -> f64 {
        let ratio = self.semi_minor.as_meters() / self.semi_major.as_meters();
        (1.0 - ratio * ratio).sqrt()
    }

    /// Distance from the center to either focus
    pub fn linear_eccentricity(&self) -> Distance {
        let (a, b) = (self.semi_major.as_meters(), self.semi_minor.as_meters());
        Distance::meters((a * a - b * b).sqrt())
    }

    /// Half the chord through a focus, perpendicular to the major axis
    pub fn semi_latus_rectum(&self) -> Distance {
        let (a, b) = (self.semi_major.as_meters(), self.semi_minor.as_meters());
        Distance::meters(b * b / a)
    }
}

#[derive(Deserialize)]
struct EllipseData {
    center: Point2D,
    semi_major: Distance,
    semi_minor: Distance,
    rotation: Angle,
    frame: Frame,
}

impl TryFrom<EllipseData> for Ellipse {
    type Error = GeometryError;

    fn try_from(data: EllipseData) -> GeometryResult<Self> {
        Ok(Ellipse::new(data.center, data.semi_major, data.semi_minor)?
            .with_rotation(finite_rotation(data.rotation)?)
            .anchored(data.frame))
    }
}

/// Ellipse circumference from the Gauss arithmetic-geometric mean series
///
/// `P = 2π / AGM(a, b) · (a² − Σ 2^(n−1) c_n²)` with `c_0² = a² − b²`. The
/// series converges quadratically; the loop stops once `c_n` is below machine
/// precision relative to `a`.
fn agm_perimeter(a: f64, b: f64) -> f64 {
    let mut an = a;
    let mut bn = b;
    let mut weight = 0.5;
    let mut sum = weight * (a * a - b * b);

    for _ in 0..AGM_MAX_ITERATIONS {
        let cn = (an - bn) / 2.0;
        if cn.abs() <= f64::EPSILON * a {
            break;
        }
        let next_a = (an + bn) / 2.0;
        let next_b = (an * bn).sqrt();
        weight *= 2.0;
        sum += weight * cn * cn;
        an = next_a;
        bn = next_b;
    }

    TAU / an * (a * a - sum)
}

impl ShapeGeometry for Ellipse {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        PI * self.semi_major.as_meters() * self.semi_minor.as_meters()
    }

    fn perimeter(&self) -> f64 {
        agm_perimeter(self.semi_major.as_meters(), self.semi_minor.as_meters())
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let (a, b) = (self.semi_major.as_meters(), self.semi_minor.as_meters());
        let rotation = self.rotation.as_radians();
        linspace(0.0, TAU, count)
            .map(|theta| {
                let on_axes = DVec2::new(a * theta.cos(), b * theta.sin());
                to_local(place(on_axes, self.center.0, rotation))
            })
            .collect()
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gk_core::{Quantity, Unit};

    #[test]
    fn test_ellipse_metrics() {
        let ellipse = Ellipse::new(Point2D::ORIGIN, 2.0, 1.0).unwrap();
        assert_relative_eq!(ellipse.area(), 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(ellipse.eccentricity(), 3.0_f64.sqrt() / 2.0, epsilon = 1e-15);
        assert_relative_eq!(ellipse.linear_eccentricity().as_meters(), 3.0_f64.sqrt());
        assert_relative_eq!(ellipse.semi_latus_rectum().as_meters(), 0.5);
        assert_relative_eq!(ellipse.perimeter(), 9.6884482205477, epsilon = 1e-10);
    }

    #[test]
    fn test_ellipse_perimeter_of_circle() {
        let ellipse = Ellipse::new(Point2D::ORIGIN, 3.0, 3.0).unwrap();
        assert_relative_eq!(ellipse.perimeter(), 6.0 * PI, epsilon = 1e-12);
        assert_eq!(ellipse.eccentricity(), 0.0);
    }

    #[test]
    fn test_ellipse_validation() {
        assert!(matches!(
            Ellipse::new(Point2D::ORIGIN, 1.0, 2.0),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Ellipse::new(Point2D::ORIGIN, -1.0, 0.5),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Ellipse::new(Point2D::ORIGIN, 1.0, 0.0),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Ellipse::new(Point2D::ORIGIN, 2.0, Quantity::new(1.0, Unit::Second)),
            Err(GeometryError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_rotated_sampling() {
        let ellipse = Ellipse::new(Point2D::new(1.0, 1.0), 2.0, 1.0)
            .unwrap()
            .with_rotation(Angle::degrees(90.0));
        let points = ellipse.local_points(5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], Point3D::new(1.0, 3.0, 0.0));
        assert_eq!(points[1], Point3D::new(0.0, 1.0, 0.0));
        assert_eq!(ellipse.local_points(1), vec![Point3D::new(1.0, 3.0, 0.0)]);
    }
}
