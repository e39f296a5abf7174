//! Triangle

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{Frame, GeometryError, GeometryResult, Point2D, Point3D, ensure_finite};

use super::ShapeGeometry;
use super::boundary::{closed_polyline, loop_length, sample_path, signed_area, to_local};

/// A triangle through three arbitrary points
///
/// Collinear or coincident vertices are accepted and give zero area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TriangleData")]
pub struct Triangle {
    vertices: [Point2D; 3],
    frame: Frame,
}

impl Triangle {
    /// Create a triangle; only non-finite coordinates are rejected
    pub fn new(p1: Point2D, p2: Point2D, p3: Point2D) -> GeometryResult<Self> {
        ensure_finite(p1, "p1")?;
        ensure_finite(p2, "p2")?;
        ensure_finite(p3, "p3")?;
        Ok(Self {
            vertices: [p1, p2, p3],
            frame: Frame::default(),
        })
    }

    pub fn vertices(&self) -> [Point2D; 3] {
        self.vertices
    }

    /// Sides p1→p2, p2→p3, p3→p1
    pub fn sides(&self) -> [(Point2D, Point2D); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    fn raw(&self) -> [DVec2; 3] {
        self.vertices.map(|p| p.0)
    }
}

#[derive(Deserialize)]
struct TriangleData {
    vertices: [Point2D; 3],
    frame: Frame,
}

impl TryFrom<TriangleData> for Triangle {
    type Error = GeometryError;

    fn try_from(data: TriangleData) -> GeometryResult<Self> {
        let [p1, p2, p3] = data.vertices;
        Ok(Triangle::new(p1, p2, p3)?.anchored(data.frame))
    }
}

impl ShapeGeometry for Triangle {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        signed_area(&self.raw()).abs()
    }

    fn perimeter(&self) -> f64 {
        loop_length(&self.raw())
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        sample_path(&closed_polyline(&self.raw()), count)
            .into_iter()
            .map(to_local)
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
    fn test_right_triangle() {
        let triangle = Triangle::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(0.0, 4.0),
        )
        .unwrap();
        assert_relative_eq!(triangle.area(), 6.0);
        assert_relative_eq!(triangle.perimeter(), 12.0);
        assert_eq!(
            triangle.sides()[2],
            (Point2D::new(0.0, 4.0), Point2D::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_clockwise_vertices_have_positive_area() {
        let triangle = Triangle::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 4.0),
            Point2D::new(3.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(triangle.area(), 6.0);
    }

    #[test]
    fn test_degenerate_triangle() {
        let triangle = Triangle::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(triangle.area(), 0.0);
        assert_eq!(triangle.local_points(7).len(), 7);
    }

    #[test]
    fn test_triangle_sampling() {
        let triangle = Triangle::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(0.0, 4.0),
        )
        .unwrap();
        let points = triangle.local_points(13);
        assert_eq!(points[0], Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(points[3], Point3D::new(3.0, 0.0, 0.0));
        assert_eq!(points[12], points[0]);
    }

    #[test]
    fn test_rejects_nan_vertex() {
        let result = Triangle::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(0.0, 4.0),
        );
        assert!(matches!(result, Err(GeometryError::InvalidParameter(_))));
    }
}
