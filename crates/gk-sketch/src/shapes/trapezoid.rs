//! Trapezoid

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, IntoAngle, IntoDistance, Point2D,
    Point3D, ensure_finite, ensure_positive,
};

use super::{ShapeGeometry, finite_rotation};
use super::boundary::{closed_polyline, loop_length, place, sample_path, signed_area, to_local};

/// A trapezoid standing on its bottom base
///
/// `angle1` and `angle2` are the interior angles at the bottom-left and
/// bottom-right corners. The top edge is not required to keep a positive
/// length; sharp base angles on a tall trapezoid make the sides cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrapezoidData")]
pub struct Trapezoid {
    center: Point2D,
    width: Distance,
    height: Distance,
    angle1: Angle,
    angle2: Angle,
    rotation: Angle,
    frame: Frame,
}

impl Trapezoid {
    pub fn new(
        width: impl IntoDistance,
        height: impl IntoDistance,
        angle1: impl IntoAngle,
        angle2: impl IntoAngle,
        center: Point2D,
    ) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        let width = width.into_distance()?;
        let height = height.into_distance()?;
        let angle1 = angle1.into_angle()?;
        let angle2 = angle2.into_angle()?;
        ensure_positive(width.as_meters(), "Width")?;
        ensure_positive(height.as_meters(), "Height")?;
        for angle in [angle1, angle2] {
            let radians = angle.as_radians();
            if !(radians > 0.0 && radians < PI) {
                return Err(GeometryError::invalid(format!(
                    "Base angles must lie strictly between 0 and 180 degrees, got {angle}"
                )));
            }
        }
        Ok(Self {
            center,
            width,
            height,
            angle1,
            angle2,
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

    /// Length of the bottom base
    pub fn width(&self) -> Distance {
        self.width
    }

    pub fn height(&self) -> Distance {
        self.height
    }

    pub fn angle1(&self) -> Angle {
        self.angle1
    }

    pub fn angle2(&self) -> Angle {
        self.angle2
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// Length of the top edge; negative when the sides cross
    pub fn top_width(&self) -> Distance {
        let h = self.height.as_meters();
        Distance::meters(
            self.width.as_meters()
                - h / self.angle1.as_radians().tan()
                - h / self.angle2.as_radians().tan(),
        )
    }

    /// Corners counterclockwise from the bottom left
    pub fn vertices(&self) -> [Point2D; 4] {
        let rotation = self.rotation.as_radians();
        self.vertex_offsets()
            .map(|v| Point2D(place(v, self.center.0, rotation)))
    }

    fn vertex_offsets(&self) -> [DVec2; 4] {
        let (w, h) = (self.width.as_meters(), self.height.as_meters());
        let left_inset = h / self.angle1.as_radians().tan();
        let right_inset = h / self.angle2.as_radians().tan();
        [
            DVec2::new(-w / 2.0, -h / 2.0),
            DVec2::new(w / 2.0, -h / 2.0),
            DVec2::new(w / 2.0 - right_inset, h / 2.0),
            DVec2::new(-w / 2.0 + left_inset, h / 2.0),
        ]
    }
}

#[derive(Deserialize)]
struct TrapezoidData {
    center: Point2D,
    width: Distance,
    height: Distance,
    angle1: Angle,
    angle2: Angle,
    rotation: Angle,
    frame: Frame,
}

impl TryFrom<TrapezoidData> for Trapezoid {
    type Error = GeometryError;

    fn try_from(data: TrapezoidData) -> GeometryResult<Self> {
        Ok(
            Trapezoid::new(data.width, data.height, data.angle1, data.angle2, data.center)?
                .with_rotation(finite_rotation(data.rotation)?)
                .anchored(data.frame),
        )
    }
}

impl ShapeGeometry for Trapezoid {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        signed_area(&self.vertex_offsets()).abs()
    }

    fn perimeter(&self) -> f64 {
        loop_length(&self.vertex_offsets())
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
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

    #[test]
    fn test_isosceles_trapezoid() {
        let trapezoid = Trapezoid::new(6.0, 2.0, FRAC_PI_4, FRAC_PI_4, Point2D::ORIGIN).unwrap();
        assert_relative_eq!(trapezoid.top_width().as_meters(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(trapezoid.area(), 8.0, epsilon = 1e-12);
        let side = 2.0 * 2.0_f64.sqrt();
        assert_relative_eq!(trapezoid.perimeter(), 6.0 + 2.0 + 2.0 * side, epsilon = 1e-12);
        assert_eq!(trapezoid.vertices()[3], Point2D::new(-1.0, 1.0));
    }

    #[test]
    fn test_right_angles_give_a_box() {
        let trapezoid = Trapezoid::new(4.0, 3.0, FRAC_PI_2, FRAC_PI_2, Point2D::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(trapezoid.area(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(trapezoid.perimeter(), 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_crossing_sides_are_accepted() {
        let trapezoid = Trapezoid::new(10.0, 8.0, FRAC_PI_4, FRAC_PI_8, Point2D::new(10.0, -10.0));
        assert!(trapezoid.is_ok());
        assert!(trapezoid.unwrap().top_width().as_meters() < 0.0);
    }

    #[test]
    fn test_trapezoid_validation() {
        assert!(matches!(
            Trapezoid::new(0.0, 1.0, FRAC_PI_4, FRAC_PI_4, Point2D::ORIGIN),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Trapezoid::new(1.0, -1.0, FRAC_PI_4, FRAC_PI_4, Point2D::ORIGIN),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Trapezoid::new(1.0, 1.0, 0.0, FRAC_PI_4, Point2D::ORIGIN),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Trapezoid::new(1.0, 1.0, "45 mm", FRAC_PI_4, Point2D::ORIGIN),
            Err(GeometryError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_degree_angles() {
        let trapezoid = Trapezoid::new("6 m", "200 cm", "45 deg", "45 deg", Point2D::ORIGIN).unwrap();
        assert_relative_eq!(trapezoid.area(), 8.0, epsilon = 1e-9);
    }
}
