//! Slot (stadium)

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, IntoDistance, Point2D, Point3D,
    ensure_finite, ensure_positive,
};

use super::{ShapeGeometry, finite_rotation};
use super::boundary::{Piece, place, sample_path, to_local};

/// A `width × height` rectangle capped at both ends by semicircles of
/// diameter `height`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlotData")]
pub struct Slot {
    center: Point2D,
    width: Distance,
    height: Distance,
    rotation: Angle,
    frame: Frame,
}

impl Slot {
    pub fn new(
        center: Point2D,
        width: impl IntoDistance,
        height: impl IntoDistance,
    ) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        let width = width.into_distance()?;
        let height = height.into_distance()?;
        ensure_positive(width.as_meters(), "Width")?;
        ensure_positive(height.as_meters(), "Height")?;
        Ok(Self {
            center,
            width,
            height,
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

    /// Length of the straight sides
    pub fn width(&self) -> Distance {
        self.width
    }

    /// Distance between the straight sides, also the cap diameter
    pub fn height(&self) -> Distance {
        self.height
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    fn boundary(&self) -> [Piece; 4] {
        let half_w = self.width.as_meters() / 2.0;
        let r = self.height.as_meters() / 2.0;
        [
            Piece::Line {
                start: DVec2::new(-half_w, -r),
                end: DVec2::new(half_w, -r),
            },
            Piece::Arc {
                center: DVec2::new(half_w, 0.0),
                radius: r,
                start_angle: -FRAC_PI_2,
                sweep: PI,
            },
            Piece::Line {
                start: DVec2::new(half_w, r),
                end: DVec2::new(-half_w, r),
            },
            Piece::Arc {
                center: DVec2::new(-half_w, 0.0),
                radius: r,
                start_angle: FRAC_PI_2,
                sweep: PI,
            },
        ]
    }
}

#[derive(Deserialize)]
struct SlotData {
    center: Point2D,
    width: Distance,
    height: Distance,
    rotation: Angle,
    frame: Frame,
}

impl TryFrom<SlotData> for Slot {
    type Error = GeometryError;

    fn try_from(data: SlotData) -> GeometryResult<Self> {
        Ok(Slot::new(data.center, data.width, data.height)?
            .with_rotation(finite_rotation(data.rotation)?)
            .anchored(data.frame))
    }
}

impl ShapeGeometry for Slot {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        let (w, h) = (self.width.as_meters(), self.height.as_meters());
        w * h + PI * (h / 2.0) * (h / 2.0)
    }

    fn perimeter(&self) -> f64 {
        2.0 * self.width.as_meters() + PI * self.height.as_meters()
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let rotation = self.rotation.as_radians();
        let mut points = sample_path(&self.boundary(), count);
        // Close the loop exactly on the first point
        if count > 1 {
            points[count - 1] = points[0];
        }
        points
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
    use gk_core::GeometryError;

    #[test]
    fn test_slot_metrics() {
        let slot = Slot::new(Point2D::ORIGIN, 4.0, 2.0).unwrap();
        assert_relative_eq!(slot.area(), 8.0 + PI, epsilon = 1e-12);
        assert_relative_eq!(slot.perimeter(), 8.0 + 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_slot_validation() {
        assert!(matches!(
            Slot::new(Point2D::ORIGIN, -4.0, 2.0),
            Err(GeometryError::InvalidParameter(_))
        ));
        assert!(matches!(
            Slot::new(Point2D::ORIGIN, 4.0, 0.0),
            Err(GeometryError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_slot_sampling_stays_on_boundary() {
        let slot = Slot::new(Point2D::new(10.0, 0.0), 4.0, 2.0).unwrap();
        let points = slot.local_points(50);
        assert_eq!(points.len(), 50);
        assert_eq!(points[0], Point3D::new(8.0, -1.0, 0.0));
        assert_eq!(points[0], points[49]);

        for p in &points {
            let x = p.x() - 10.0;
            let y = p.y();
            if x.abs() <= 2.0 {
                assert_relative_eq!(y.abs(), 1.0, epsilon = 1e-9);
            } else {
                let cap = DVec2::new(x.abs() - 2.0, y);
                assert_relative_eq!(cap.length(), 1.0, epsilon = 1e-9);
            }
        }
    }
}
