//! Parametric 2D shapes
//!
//! Every shape validates its parameters on construction, owns a copy of the
//! [`Frame`] it is placed in, and can be sampled into points in frame
//! coordinates (`z = 0`) or projected into world space.

mod arc;
mod boundary;
mod box_shape;
mod circle;
mod ellipse;
mod polygon;
mod segment;
mod slot;
mod trapezoid;
mod triangle;

pub use arc::Arc;
pub use box_shape::BoxShape;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use polygon::Polygon;
pub use segment::Segment;
pub use slot::Slot;
pub use trapezoid::Trapezoid;
pub use triangle::Triangle;

use serde::{Deserialize, Serialize};

use gk_core::{Angle, Frame, GeometryError, GeometryResult, IntoAngle, Point2D, Point3D};

/// Convert a rotation, rejecting NaN and infinite angles
pub(crate) fn finite_rotation(rotation: impl IntoAngle) -> GeometryResult<Angle> {
    let rotation = rotation.into_angle()?;
    if rotation.as_radians().is_finite() {
        Ok(rotation)
    } else {
        Err(GeometryError::invalid(format!(
            "Rotation must be finite, got {rotation}"
        )))
    }
}

/// Metrics and sampling shared by every shape
pub trait ShapeGeometry {
    /// Frame the shape's local coordinates live in
    fn frame(&self) -> &Frame;

    /// The same shape placed in another frame
    fn anchored(self, frame: Frame) -> Self
    where
        Self: Sized;

    /// Enclosed area in square meters (zero for open shapes)
    fn area(&self) -> f64;

    /// Boundary length in meters (the curve length for open shapes)
    fn perimeter(&self) -> f64;

    /// `count` ordered boundary points in frame coordinates
    ///
    /// Zero yields no points and one yields the start point. Closed shapes
    /// repeat their first point at the end.
    fn local_points(&self, count: usize) -> Vec<Point3D>;

    /// Whether the boundary returns to its start
    fn is_closed(&self) -> bool;

    fn is_open(&self) -> bool {
        !self.is_closed()
    }

    /// Boundary points mapped into world space
    fn points(&self, count: usize) -> impl Iterator<Item = Point3D> {
        let frame = *self.frame();
        self.local_points(count)
            .into_iter()
            .map(move |p| frame.local_to_global(p))
    }
}

/// Any sketch shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Slot(Slot),
    Box(BoxShape),
    Triangle(Triangle),
    Trapezoid(Trapezoid),
    Segment(Segment),
    Arc(Arc),
}

impl Shape {
    /// Get the variant name
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "Circle",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Polygon(_) => "Polygon",
            Shape::Slot(_) => "Slot",
            Shape::Box(_) => "Box",
            Shape::Triangle(_) => "Triangle",
            Shape::Trapezoid(_) => "Trapezoid",
            Shape::Segment(_) => "Segment",
            Shape::Arc(_) => "Arc",
        }
    }

    /// First point of an open shape
    pub fn start_point(&self) -> Option<Point2D> {
        match self {
            Shape::Segment(segment) => Some(segment.start()),
            Shape::Arc(arc) => Some(arc.start()),
            _ => None,
        }
    }

    /// Last point of an open shape
    pub fn end_point(&self) -> Option<Point2D> {
        match self {
            Shape::Segment(segment) => Some(segment.end()),
            Shape::Arc(arc) => Some(arc.end()),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn DynGeometry {
        match self {
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polygon(s) => s,
            Shape::Slot(s) => s,
            Shape::Box(s) => s,
            Shape::Triangle(s) => s,
            Shape::Trapezoid(s) => s,
            Shape::Segment(s) => s,
            Shape::Arc(s) => s,
        }
    }
}

/// Object-safe subset of [`ShapeGeometry`] used for dispatch
trait DynGeometry {
    fn frame(&self) -> &Frame;
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
    fn local_points(&self, count: usize) -> Vec<Point3D>;
    fn is_closed(&self) -> bool;
}

impl<T: ShapeGeometry> DynGeometry for T {
    fn frame(&self) -> &Frame {
        ShapeGeometry::frame(self)
    }

    fn area(&self) -> f64 {
        ShapeGeometry::area(self)
    }

    fn perimeter(&self) -> f64 {
        ShapeGeometry::perimeter(self)
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        ShapeGeometry::local_points(self, count)
    }

    fn is_closed(&self) -> bool {
        ShapeGeometry::is_closed(self)
    }
}

impl ShapeGeometry for Shape {
    fn frame(&self) -> &Frame {
        self.inner().frame()
    }

    fn anchored(self, frame: Frame) -> Self {
        match self {
            Shape::Circle(s) => Shape::Circle(s.anchored(frame)),
            Shape::Ellipse(s) => Shape::Ellipse(s.anchored(frame)),
            Shape::Polygon(s) => Shape::Polygon(s.anchored(frame)),
            Shape::Slot(s) => Shape::Slot(s.anchored(frame)),
            Shape::Box(s) => Shape::Box(s.anchored(frame)),
            Shape::Triangle(s) => Shape::Triangle(s.anchored(frame)),
            Shape::Trapezoid(s) => Shape::Trapezoid(s.anchored(frame)),
            Shape::Segment(s) => Shape::Segment(s.anchored(frame)),
            Shape::Arc(s) => Shape::Arc(s.anchored(frame)),
        }
    }

    fn area(&self) -> f64 {
        self.inner().area()
    }

    fn perimeter(&self) -> f64 {
        self.inner().perimeter()
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        self.inner().local_points(count)
    }

    fn is_closed(&self) -> bool {
        self.inner().is_closed()
    }
}

/// `From<T> for Shape`, `TryFrom<Shape> for T` and a borrowing `Shape::as_*`
/// accessor for each variant
macro_rules! shape_conversions {
    ($($variant:ident($ty:ty) => $accessor:ident),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$variant(shape)
                }
            }

            impl TryFrom<Shape> for $ty {
                type Error = GeometryError;

                fn try_from(shape: Shape) -> GeometryResult<Self> {
                    match shape {
                        Shape::$variant(inner) => Ok(inner),
                        other => Err(GeometryError::type_mismatch(
                            stringify!($variant),
                            other.type_name(),
                        )),
                    }
                }
            }
        )*

        impl Shape {
            $(
                #[doc = concat!("Borrow as a `", stringify!($variant), "`, failing for any other variant")]
                pub fn $accessor(&self) -> GeometryResult<&$ty> {
                    match self {
                        Shape::$variant(inner) => Ok(inner),
                        other => Err(GeometryError::type_mismatch(
                            stringify!($variant),
                            other.type_name(),
                        )),
                    }
                }
            )*
        }
    };
}

shape_conversions! {
    Circle(Circle) => as_circle,
    Ellipse(Ellipse) => as_ellipse,
    Polygon(Polygon) => as_polygon,
    Slot(Slot) => as_slot,
    Box(BoxShape) => as_box,
    Triangle(Triangle) => as_triangle,
    Trapezoid(Trapezoid) => as_trapezoid,
    Segment(Segment) => as_segment,
    Arc(Arc) => as_arc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sample_shapes() -> Vec<Shape> {
        vec![
            Circle::new(Point2D::ORIGIN, 1.0).unwrap().into(),
            Ellipse::new(Point2D::ORIGIN, 2.0, 1.0).unwrap().into(),
            Polygon::new(Point2D::ORIGIN, 1.0, 5).unwrap().into(),
            Slot::new(Point2D::ORIGIN, 2.0, 1.0).unwrap().into(),
            BoxShape::new(Point2D::ORIGIN, 2.0, 1.0).unwrap().into(),
            Triangle::new(
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(0.0, 1.0),
            )
            .unwrap()
            .into(),
            Trapezoid::new(4.0, 1.0, PI / 3.0, PI / 3.0, Point2D::ORIGIN)
                .unwrap()
                .into(),
            Segment::new(Point2D::ORIGIN, Point2D::new(1.0, 1.0))
                .unwrap()
                .into(),
            Arc::new(
                Point2D::ORIGIN,
                Point2D::new(1.0, 0.0),
                Point2D::new(0.0, 1.0),
                false,
            )
            .unwrap()
            .into(),
        ]
    }

    #[test]
    fn test_closedness() {
        for shape in sample_shapes() {
            let open = matches!(shape, Shape::Segment(_) | Shape::Arc(_));
            assert_eq!(shape.is_open(), open, "{}", shape.type_name());
            assert_eq!(shape.start_point().is_some(), open);
        }
    }

    #[test]
    fn test_sample_counts() {
        for shape in sample_shapes() {
            assert!(ShapeGeometry::local_points(&shape, 0).is_empty());
            assert_eq!(ShapeGeometry::local_points(&shape, 1).len(), 1);
            let points = ShapeGeometry::local_points(&shape, 100);
            assert_eq!(points.len(), 100, "{}", shape.type_name());
            if ShapeGeometry::is_closed(&shape) {
                assert_eq!(points[0], points[99], "{}", shape.type_name());
            }
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        for shape in sample_shapes() {
            let first: Vec<[f64; 3]> = ShapeGeometry::local_points(&shape, 100).iter().map(|p| p.to_array()).collect();
            let second: Vec<[f64; 3]> = ShapeGeometry::local_points(&shape, 100).iter().map(|p| p.to_array()).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_dispatch_matches_variant() {
        let circle = Circle::new(Point2D::ORIGIN, 2.0).unwrap();
        let shape = Shape::from(circle.clone());
        assert_relative_eq!(ShapeGeometry::area(&shape), ShapeGeometry::area(&circle));
        assert_relative_eq!(ShapeGeometry::perimeter(&shape), ShapeGeometry::perimeter(&circle));
        assert_eq!(shape.type_name(), "Circle");
    }

    #[test]
    fn test_downcasts() {
        let shape: Shape = Circle::new(Point2D::ORIGIN, 2.0).unwrap().into();
        assert!(shape.as_circle().is_ok());
        assert!(matches!(
            shape.as_segment(),
            Err(GeometryError::TypeMismatch { expected: "Segment", .. })
        ));
        assert!(Circle::try_from(shape.clone()).is_ok());
        assert!(matches!(
            Ellipse::try_from(shape),
            Err(GeometryError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_anchored_projection() {
        let shape: Shape = Segment::new(Point2D::new(1.0, 0.0), Point2D::new(2.0, 0.0))
            .unwrap()
            .into();
        let shape = shape.anchored(Frame::zx());
        assert_eq!(*ShapeGeometry::frame(&shape), Frame::zx());
        let points: Vec<Point3D> = shape.points(2).collect();
        assert_eq!(points, vec![Point3D::new(0.0, 0.0, 1.0), Point3D::new(0.0, 0.0, 2.0)]);
    }
}
