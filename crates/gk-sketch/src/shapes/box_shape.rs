//! Rectangular box

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, IntoDistance, Point2D, Point3D,
    ensure_finite, ensure_positive,
};

use super::{ShapeGeometry, finite_rotation};
use super::boundary::{closed_polyline, place, sample_path, to_local};

/// A rectangle centered on a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxShapeData")]
pub struct BoxShape {
    center: Point2D,
    width: Distance,
    height: Distance,
    rotation: Angle,
    frame: Frame,
}

impl BoxShape {
    /// Create a box; width and height must be positive lengths
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

    pub fn width(&self) -> Distance {
        self.width
    }

    pub fn height(&self) -> Distance {
        self.height
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// Corners counterclockwise from the bottom left
    pub fn corners(&self) -> [Point2D; 4] {
        self.corner_offsets()
            .map(|c| Point2D(place(c, self.center.0, self.rotation.as_radians())))
    }

    fn corner_offsets(&self) -> [DVec2; 4] {
        let half = DVec2::new(self.width.as_meters(), self.height.as_meters()) / 2.0;
        [
            DVec2::new(-half.x, -half.y),
            DVec2::new(half.x, -half.y),
            DVec2::new(half.x, half.y),
            DVec2::new(-half.x, half.y),
        ]
    }
}

#[derive(Deserialize)]
struct BoxShapeData {
    center: Point2D,
    width: Distance,
    height: Distance,
    rotation: Angle,
    frame: Frame,
}

impl TryFrom<BoxShapeData> for BoxShape {
    type Error = GeometryError;

    fn try_from(data: BoxShapeData) -> GeometryResult<Self> {
        Ok(BoxShape::new(data.center, data.width, data.height)?
            .with_rotation(finite_rotation(data.rotation)?)
            .anchored(data.frame))
    }
}

impl ShapeGeometry for BoxShape {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        self.width.as_meters() * self.height.as_meters()
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width.as_meters() + self.height.as_meters())
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let rotation = self.rotation.as_radians();
        sample_path(&closed_polyline(&self.corner_offsets()), count)
            .into_iter()
            .map(|p| to_local(place(p, self.center.0, rotation)))
            .collect()
    }

    fn is_closed(&self) -> bool {
        true
    }
}
