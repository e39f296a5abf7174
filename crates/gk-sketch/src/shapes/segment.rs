//! Straight line segment

use serde::{Deserialize, Serialize};

use gk_core::{
    Distance, Frame, GeometryError, GeometryResult, Point2D, Point3D, Vector2D, ensure_finite,
};

use super::ShapeGeometry;
use super::boundary::{linspace, to_local};

/// A segment between two distinct points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentData")]
pub struct Segment {
    start: Point2D,
    end: Point2D,
    frame: Frame,
}

impl Segment {
    /// Create a segment, failing when both points coincide
    pub fn new(start: Point2D, end: Point2D) -> GeometryResult<Self> {
        ensure_finite(start, "start")?;
        ensure_finite(end, "end")?;
        if start == end {
            return Err(GeometryError::degenerate(format!(
                "Segment start and end are both {start}"
            )));
        }
        Ok(Self {
            start,
            end,
            frame: Frame::default(),
        })
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn end(&self) -> Point2D {
        self.end
    }

    pub fn length(&self) -> Distance {
        Distance::meters(self.start.distance_to(self.end))
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vector2D {
        self.start.vector_to(self.end)
    }
}

#[derive(Deserialize)]
struct SegmentData {
    start: Point2D,
    end: Point2D,
    frame: Frame,
}

impl TryFrom<SegmentData> for Segment {
    type Error = GeometryError;

    fn try_from(data: SegmentData) -> GeometryResult<Self> {
        Ok(Segment::new(data.start, data.end)?.anchored(data.frame))
    }
}

impl ShapeGeometry for Segment {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn anchored(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }

    fn area(&self) -> f64 {
        0.0
    }

    fn perimeter(&self) -> f64 {
        self.length().as_meters()
    }

    fn local_points(&self, count: usize) -> Vec<Point3D> {
        let (start, end) = (self.start.0, self.end.0);
        let mut points: Vec<Point3D> = linspace(0.0, 1.0, count)
            .map(|t| to_local(start + (end - start) * t))
            .collect();
        if count > 1 {
            points[count - 1] = to_local(end);
        }
        points
    }

    fn is_closed(&self) -> bool {
        false
    }
}
