//! Circular arc

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use gk_core::{
    Angle, Distance, Frame, GeometryError, GeometryResult, Point2D, Point3D, RadiusCheck,
    ensure_finite,
};

use super::ShapeGeometry;
use super::boundary::{linspace, to_local};

/// An arc around `center` from `start` to `end`
///
/// The sweep is measured in the requested direction and always lies in
/// `[0, 2π)`. Under [`RadiusCheck::Skip`] the end point may sit at its own
/// radius; the curve then blends linearly between the two radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArcData", into = "ArcData")]
pub struct Arc {
    center: Point2D,
    start: Point2D,
    end: Point2D,
    clockwise: bool,
    radius_check: RadiusCheck,
    start_radius: f64,
    end_radius: f64,
    start_angle: f64,
    sweep: f64,
    frame: Frame,
}

impl Arc {
    /// Create an arc whose end points must share one radius
    pub fn new(
        center: Point2D,
        start: Point2D,
        end: Point2D,
        clockwise: bool,
    ) -> GeometryResult<Self> {
        Self::with_radius_check(center, start, end, clockwise, RadiusCheck::default())
    }

    /// Create an arc under an explicit radius policy
    pub fn with_radius_check(
        center: Point2D,
        start: Point2D,
        end: Point2D,
        clockwise: bool,
        check: RadiusCheck,
    ) -> GeometryResult<Self> {
        ensure_finite(center, "center")?;
        ensure_finite(start, "start")?;
        ensure_finite(end, "end")?;
        if start == center {
            return Err(GeometryError::degenerate(format!(
                "Arc start {start} coincides with its center"
            )));
        }
        if end == center {
            return Err(GeometryError::degenerate(format!(
                "Arc end {end} coincides with its center"
            )));
        }
        if start == end {
            return Err(GeometryError::degenerate(format!(
                "Arc start and end are both {start}"
            )));
        }

        let to_start = center.vector_to(start);
        let to_end = center.vector_to(end);
        let start_radius = to_start.norm();
        let mut end_radius = to_end.norm();
        match check {
            RadiusCheck::Enforce { .. } => {
                if !check.accepts(start_radius, end_radius) {
                    return Err(GeometryError::invalid(format!(
                        "Arc end points are at different distances from the center ({start_radius} and {end_radius})"
                    )));
                }
                end_radius = start_radius;
            }
            RadiusCheck::Skip => {}
        }

        let start_angle = to_start.angle();
        let sweep = sweep_angle(start_angle, to_end.angle(), clockwise);

        Ok(Self {
            center,
            start,
            end,
            clockwise,
            radius_check: check,
            start_radius,
            end_radius,
            start_angle,
            sweep,
            frame: Frame::default(),
        })
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn end(&self) -> Point2D {
        self.end
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Radius policy the arc was validated under
    pub fn radius_check(&self) -> RadiusCheck {
        self.radius_check
    }

    /// Distance from the center to the start point
    pub fn radius(&self) -> Distance {
        Distance::meters(self.start_radius)
    }

    /// Distance from the center to the end point
    pub fn end_radius(&self) -> Distance {
        Distance::meters(self.end_radius)
    }

    /// Unsigned angle swept from start to end
    pub fn sweep(&self) -> Angle {
        Angle::radians(self.sweep)
    }

    pub fn start_angle(&self) -> Angle {
        Angle::radians(self.start_angle)
    }

    pub fn end_angle(&self) -> Angle {
        Angle::radians(self.start_angle + self.signed_sweep())
    }

    /// Length along the curve
    pub fn length(&self) -> Distance {
        Distance::meters(blended_length(self.start_radius, self.end_radius, self.sweep))
    }

    fn signed_sweep(&self) -> f64 {
        if self.clockwise { -self.sweep } else { self.sweep }
    }
}

/// Stored form; radii, start angle and sweep are recomputed on load
#[derive(Clone, Serialize, Deserialize)]
struct ArcData {
    center: Point2D,
    start: Point2D,
    end: Point2D,
    clockwise: bool,
    radius_check: RadiusCheck,
    frame: Frame,
}

impl From<Arc> for ArcData {
    fn from(arc: Arc) -> Self {
        Self {
            center: arc.center,
            start: arc.start,
            end: arc.end,
            clockwise: arc.clockwise,
            radius_check: arc.radius_check,
            frame: arc.frame,
        }
    }
}

impl TryFrom<ArcData> for Arc {
    type Error = GeometryError;

    fn try_from(data: ArcData) -> GeometryResult<Self> {
        Ok(Arc::with_radius_check(
            data.center,
            data.start,
            data.end,
            data.clockwise,
            data.radius_check,
        )?
        .anchored(data.frame))
    }
}

/// Sweep from `start_angle` to `end_angle` in the given direction, in `[0, 2π)`
fn sweep_angle(start_angle: f64, end_angle: f64, clockwise: bool) -> f64 {
    let raw = if clockwise {
        start_angle - end_angle
    } else {
        end_angle - start_angle
    };
    let sweep = raw.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if sweep >= TAU { 0.0 } else { sweep }
}

/// Length of a curve whose radius moves linearly from `r0` to `r1` over `sweep`
fn blended_length(r0: f64, r1: f64, sweep: f64) -> f64 {
    let dr = r1 - r0;
    if dr.abs() <= 1e-12 * r0.max(r1) {
        return 0.5 * (r0 + r1) * sweep;
    }
    if sweep == 0.0 {
        return dr.abs();
    }
    // (1/dr) ∫ sqrt(dr² + sweep² r²) dr over [r0, r1]
    let c2 = dr * dr;
    let antiderivative = |r: f64| {
        let q = (c2 + sweep * sweep * r * r).sqrt();
        r * q / 2.0 + c2 / (2.0 * sweep) * (sweep * r / dr.abs()).asinh()
    };
    (antiderivative(r1) - antiderivative(r0)) / dr
}

impl ShapeGeometry for Arc {
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
        let signed = self.signed_sweep();
        let mut points: Vec<Point3D> = linspace(0.0, 1.0, count)
            .map(|t| {
                let angle = self.start_angle + signed * t;
                let radius = self.start_radius + (self.end_radius - self.start_radius) * t;
                to_local(self.center.0 + DVec2::new(angle.cos(), angle.sin()) * radius)
            })
            .collect();
        if let Some(first) = points.first_mut() {
            *first = self.start.extend();
        }
        if count > 1 {
            points[count - 1] = self.end.extend();
        }
        points
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_sweep_direction() {
        let center = Point2D::new(3.0, 0.0);
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(3.0, 3.0);

        let ccw = Arc::new(center, start, end, false).unwrap();
        assert_relative_eq!(ccw.sweep().as_radians(), 3.0 * FRAC_PI_2, epsilon = 1e-12);

        let cw = Arc::new(center, start, end, true).unwrap();
        assert_relative_eq!(cw.sweep().as_radians(), FRAC_PI_2, epsilon = 1e-12);

        let back = Arc::new(center, end, start, true).unwrap();
        assert_relative_eq!(back.sweep().as_radians(), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_half_circle() {
        let arc = Arc::new(
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, -10.0),
            false,
        )
        .unwrap();
        assert_relative_eq!(arc.sweep().as_radians(), PI, epsilon = 1e-12);
        assert_relative_eq!(arc.radius().as_meters(), 10.0);
        assert_relative_eq!(arc.length().as_meters(), 10.0 * PI, epsilon = 1e-12);
        assert_eq!(arc.area(), 0.0);
        assert!(arc.is_open());

        let points = arc.local_points(3);
        assert_eq!(points[0], Point3D::new(10.0, 10.0, 0.0));
        assert_eq!(points[1], Point3D::new(0.0, 0.0, 0.0));
        assert_eq!(points[2], Point3D::new(10.0, -10.0, 0.0));
    }

    #[test]
    fn test_sweep_stays_below_full_turn() {
        for (start, end) in [(0.0, -1e-18), (-1e-18, 0.0), (PI, -PI)] {
            for clockwise in [false, true] {
                let sweep = sweep_angle(start, end, clockwise);
                assert!((0.0..TAU).contains(&sweep));
            }
        }
    }

    #[test]
    fn test_degenerate_arcs() {
        let center = Point2D::new(1.0, 1.0);
        assert!(matches!(
            Arc::new(center, center, Point2D::new(2.0, 1.0), false),
            Err(GeometryError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            Arc::new(center, Point2D::new(2.0, 1.0), Point2D::new(2.0, 1.0), false),
            Err(GeometryError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_radius_policy() {
        let center = Point2D::ORIGIN;
        let start = Point2D::new(1.0, 0.0);
        let end = Point2D::new(0.0, 2.0);

        assert!(matches!(
            Arc::new(center, start, end, false),
            Err(GeometryError::InvalidParameter(_))
        ));

        let arc = Arc::with_radius_check(center, start, end, false, RadiusCheck::Skip).unwrap();
        assert_relative_eq!(arc.end_radius().as_meters(), 2.0);
        let points = arc.local_points(3);
        assert_eq!(points[2], Point3D::new(0.0, 2.0, 0.0));
        let mid = DVec2::new(points[1].x(), points[1].y());
        assert_relative_eq!(mid.length(), 1.5, epsilon = 1e-12);

        // Bounded by the straight radial blend and the outer quarter circle
        let length = arc.length().as_meters();
        assert!(length > 1.5 * FRAC_PI_2);
        assert!(length < 2.0 * FRAC_PI_2 + 1.0);
    }

    #[test]
    fn test_blended_length_limits() {
        assert_relative_eq!(blended_length(2.0, 2.0, PI), 2.0 * PI);
        assert_relative_eq!(blended_length(1.0, 3.0, 0.0), 2.0);
        // Nearly equal radii converge on the circular length
        assert_relative_eq!(blended_length(2.0, 2.0 + 1e-6, PI), 2.0 * PI, epsilon = 1e-5);
    }

    #[test]
    fn test_nan_points() {
        let result = Arc::new(
            Point2D::new(f64::NAN, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            false,
        );
        assert!(matches!(result, Err(GeometryError::InvalidParameter(_))));
    }

    #[test]
    fn test_deserialize_recomputes_sweep() {
        let arc = Arc::new(
            Point2D::ORIGIN,
            Point2D::new(3.0, 4.0),
            Point2D::new(-4.0, 3.0),
            true,
        )
        .unwrap();
        let text = ron::to_string(&arc).unwrap();
        assert!(!text.contains("sweep"));
        let loaded: Arc = ron::from_str(&text).unwrap();
        assert_relative_eq!(loaded.sweep().as_radians(), arc.sweep().as_radians());
        assert_relative_eq!(loaded.radius().as_meters(), 5.0);
        assert_eq!(loaded.radius_check(), RadiusCheck::default());

        let moved_end = ArcData {
            end: Point2D::new(-6.0, 3.0),
            ..ArcData::from(arc)
        };
        let text = ron::to_string(&moved_end).unwrap();
        assert!(ron::from_str::<Arc>(&text).is_err());

        let lenient = ArcData {
            radius_check: RadiusCheck::Skip,
            ..moved_end
        };
        let text = ron::to_string(&lenient).unwrap();
        let spiral: Arc = ron::from_str(&text).unwrap();
        assert_relative_eq!(spiral.end_radius().as_meters(), 45f64.sqrt());
    }
}
