//! Circle

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Distance, Frame, GeometryError, GeometryResult, IntoDistance, Point2D, Point3D, ensure_finite,
    ensure_positive,
};

use super::ShapeGeometry;
use super::boundary::{linspace, to_local};

/// A circle given by center and radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleData")]
pub struct Circle {
    center: Point2D,
    radius: Distance,
    frame: Frame,
}

impl Circle {
    /// Create a circle, failing unless the radius is a positive length
    pub fn new(center: Point2D, radius: impl IntoDistance) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        let radius = radius.into_distance()?;
        ensure_positive(radius.as_meters(), "Radius")?;
        Ok(Self {
            center,
            radius,
            frame: Frame::default(),
        })
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn radius(&self) -> Distance {
        self.radius
    }

    pub fn diameter(&self) -> Distance {
        self.radius * 2.0
    }
}

#[derive(Deserialize)]
struct CircleData {
    center: Point2D,
    radius: Distance,
    frame: Frame,
}

impl TryFrom<CircleData> for Circle {
    type Error = GeometryError;

    fn try_from(data: CircleData) -> GeometryResult<Self> {
        Ok(Circle::new(data.center, data.radius)?.anchored(data.frame))
    }
}

impl ShapeGeometry for Circle {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        let r = self.radius.as_meters();
        PI * r * r
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius.as_meters()
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let r = self.radius.as_meters();
        linspace(0.0, TAU, count)
            .map(|theta| to_local(self.center.0 + DVec2::new(theta.cos(), theta.sin()) * r))
            .collect()
    }

    fn is_closed(&self) -> bool {
        true
    }
}
