//! Regular polygon

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, IntoDistance, Point2D, Point3D,
    ensure_finite, ensure_positive,
};

use super::{ShapeGeometry, finite_rotation};
use super::boundary::{closed_polyline, place, sample_path, to_local};

/// A regular polygon described by its inscribed circle
///
/// With no rotation the bottom side is horizontal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonData")]
pub struct Polygon {
    center: Point2D,
    inner_radius: Distance,
    n_sides: usize,
    rotation: Angle,
    frame: Frame,
}

impl Polygon {
    /// Create a polygon with `n_sides >= 3` around a positive inradius
    pub fn new(
        center: Point2D,
        inner_radius: impl IntoDistance,
        n_sides: usize,
    ) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        let inner_radius = inner_radius.into_distance()?;
        if n_sides < 3 {
            return Err(GeometryError::invalid(format!(
                "A polygon needs at least 3 sides, got {n_sides}"
            )));
        }
        ensure_positive(inner_radius.as_meters(), "Inner radius")?;
        Ok(Self {
            center,
            inner_radius,
            n_sides,
            rotation: Angle::ZERO,
            frame: Frame::default(),
        })
    }

    pub fn with_rotation(self, rotation: Angle) -> Self {
        Self { rotation, ..self }
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn inner_radius(&self) -> Distance {
        self.inner_radius
    }

    pub fn n_sides(&self) -> usize {
        self.n_sides
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// Length of one side, `2 r tan(π/n)`
    pub fn side_length(&self) -> Distance {
        self.inner_radius * (2.0 * self.half_angle().tan())
    }

    /// Radius of the circumscribed circle, `r / cos(π/n)`
    pub fn circumradius(&self) -> Distance {
        self.inner_radius / self.half_angle().cos()
    }

    /// Corner points in counterclockwise order, starting at the bottom right
    pub fn vertices(&self) -> Vec<Point2D> {
        self.vertex_offsets()
            .into_iter()
            .map(|v| Point2D(place(v, self.center.0, self.rotation.as_radians())))
            .collect()
    }

    fn half_angle(&self) -> f64 {
        PI / self.n_sides as f64
    }

    fn vertex_offsets(&self) -> Vec<DVec2> {
        let n = self.n_sides as f64;
        let circumradius = self.circumradius().as_meters();
        (0..self.n_sides)
            .map(|k| {
                let angle = -FRAC_PI_2 + PI / n + TAU * k as f64 / n;
                DVec2::new(angle.cos(), angle.sin()) * circumradius
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct PolygonData {
    center: Point2D,
    inner_radius: Distance,
    n_sides: usize,
    rotation: Angle,
    frame: Frame,
}

impl TryFrom<PolygonData> for Polygon {
    type Error = GeometryError;

    fn try_from(data: PolygonData) -> GeometryResult<Self> {
        Ok(Polygon::new(data.center, data.inner_radius, data.n_sides)?
            .with_rotation(finite_rotation(data.rotation)?)
            .anchored(data.frame))
    }
}

impl ShapeGeometry for Polygon {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        let r = self.inner_radius.as_meters();
        self.n_sides as f64 * r * r * self.half_angle().tan()
    }

    fn perimeter(&self) -> f64 {
        self.n_sides as f64 * self.side_length().as_meters()
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let rotation = self.rotation.as_radians();
        sample_path(&closed_polyline(&self.vertex_offsets()), count)
            .into_iter()
            .map(|p| to_local(place(p, self.center.0, rotation)))
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

    #[test]
    fn test_square() {
        let square = Polygon::new(Point2D::ORIGIN, 1.0, 4).unwrap();
        assert_relative_eq!(square.area(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(square.side_length().as_meters(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            square.perimeter(),
            4.0 * square.side_length().as_meters()
        );
        assert_relative_eq!(square.circumradius().as_meters(), 2.0_f64.sqrt(), epsilon = 1e-12);

        let vertices = square.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0], Point2D::new(1.0, -1.0));
        assert_eq!(vertices[2], Point2D::new(-1.0, 1.0));
    }

    #[test]
    fn test_hexagon() {
        let hexagon = Polygon::new(Point2D::new(5.0, 5.0), 2.0, 6).unwrap();
        let expected_area = 6.0 * 4.0 * (PI / 6.0).tan();
        assert_relative_eq!(hexagon.area(), expected_area, epsilon = 1e-12);
        for vertex in hexagon.vertices() {
            assert_relative_eq!(
                vertex.distance_to(hexagon.center()),
                hexagon.circumradius().as_meters(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_polygon_validation() {
        assert!(matches!(
            Polygon::new(Point2D::ORIGIN, 1.0, 2),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Polygon::new(Point2D::ORIGIN, 0.0, 5),
            Err(GeometryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_polygon_sampling() {
        let square = Polygon::new(Point2D::ORIGIN, 1.0, 4)
            .unwrap()
            .with_rotation(Angle::degrees(45.0));
        let points = square.local_points(9);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], points[8]);
        assert_eq!(points[0], Point3D::new(2.0_f64.sqrt(), 0.0, 0.0));
        assert_eq!(points[2], Point3D::new(0.0, 2.0_f64.sqrt(), 0.0));
        assert_eq!(square.local_points(1).len(), 1);
        assert!(square.local_points(0).is_empty());
    }
}
