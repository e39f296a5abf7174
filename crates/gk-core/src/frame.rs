//! Reference frames
//!
//! A [`Frame`] embeds 2D sketch coordinates into 3D world space: an origin plus
//! an orthonormal, right-handed basis whose first two axes span the plane.

use glam::{DAffine3, DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::DIRECTION_EPSILON;
use crate::error::{GeometryError, GeometryResult};
use crate::math::{Point2D, Point3D, UnitVector3D, Vector3D};

/// An origin and orthonormal basis in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameData", into = "FrameData")]
pub struct Frame {
    origin: Point3D,
    dir_x: UnitVector3D,
    dir_y: UnitVector3D,
    dir_z: UnitVector3D,
}

/// Stored form; the normal is derived again on load
#[derive(Serialize, Deserialize)]
struct FrameData {
    origin: Point3D,
    dir_x: Vector3D,
    dir_y: Vector3D,
}

impl From<Frame> for FrameData {
    fn from(frame: Frame) -> Self {
        Self {
            origin: frame.origin,
            dir_x: frame.dir_x.to_vector(),
            dir_y: frame.dir_y.to_vector(),
        }
    }
}

impl TryFrom<FrameData> for Frame {
    type Error = GeometryError;

    fn try_from(data: FrameData) -> GeometryResult<Self> {
        Frame::new(data.origin, data.dir_x, data.dir_y)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::xy()
    }
}

impl Frame {
    /// Build a frame from an origin and two in-plane directions
    ///
    /// `dir_x` is kept as the first axis; `dir_y` is orthogonalized against it.
    /// Fails when either direction is zero or the two are parallel.
    pub fn new(origin: Point3D, dir_x: Vector3D, dir_y: Vector3D) -> GeometryResult<Self> {
        if !origin.0.is_finite() {
            return Err(GeometryError::invalid(format!(
                "Frame origin must be finite, got {:?}",
                origin.to_array()
            )));
        }
        let normal = dir_x.cross(dir_y);
        if dir_x.is_zero() || dir_y.is_zero() || normal.0.length_squared() <= DIRECTION_EPSILON {
            return Err(GeometryError::degenerate(
                "Reference vectors must be linearly independent",
            ));
        }

        let i = UnitVector3D::new(dir_x)?;
        let in_plane = dir_y.0 - i.as_dvec3() * dir_y.0.dot(i.as_dvec3());
        let j = UnitVector3D::new(Vector3D(in_plane))?;
        let k = UnitVector3D::new(Vector3D(i.as_dvec3().cross(j.as_dvec3())))?;

        Ok(Self {
            origin,
            dir_x: i,
            dir_y: j,
            dir_z: k,
        })
    }

    /// World XY plane at the origin
    pub fn xy() -> Self {
        Self::axis_aligned(UnitVector3D::X, UnitVector3D::Y, UnitVector3D::Z)
    }

    /// World YZ plane at the origin
    pub fn yz() -> Self {
        Self::axis_aligned(UnitVector3D::Y, UnitVector3D::Z, UnitVector3D::X)
    }

    /// World ZX plane at the origin
    pub fn zx() -> Self {
        Self::axis_aligned(UnitVector3D::Z, UnitVector3D::X, UnitVector3D::Y)
    }

    fn axis_aligned(dir_x: UnitVector3D, dir_y: UnitVector3D, dir_z: UnitVector3D) -> Self {
        Self {
            origin: Point3D::ORIGIN,
            dir_x,
            dir_y,
            dir_z,
        }
    }

    /// Same orientation, moved to a new origin
    pub fn with_origin(self, origin: Point3D) -> Self {
        Self { origin, ..self }
    }

    /// Origin of the frame
    pub fn origin(&self) -> Point3D {
        self.origin
    }

    /// First in-plane axis
    pub fn dir_x(&self) -> UnitVector3D {
        self.dir_x
    }

    /// Second in-plane axis
    pub fn dir_y(&self) -> UnitVector3D {
        self.dir_y
    }

    /// Plane normal (`dir_x × dir_y`)
    pub fn normal(&self) -> UnitVector3D {
        self.dir_z
    }

    /// Rotation part of the local-to-global transform
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_cols(
            self.dir_x.as_dvec3(),
            self.dir_y.as_dvec3(),
            self.dir_z.as_dvec3(),
        )
    }

    /// Full local-to-global transform
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.rotation(), self.origin.0)
    }

    /// Map a point from frame coordinates to world coordinates
    pub fn local_to_global(&self, local: Point3D) -> Point3D {
        Point3D(self.origin.0 + self.rotation() * local.0)
    }

    /// Map a world point into frame coordinates
    pub fn global_to_local(&self, global: Point3D) -> Point3D {
        let offset: DVec3 = global.0 - self.origin.0;
        // The basis is orthonormal, so the inverse rotation is the transpose.
        Point3D(self.rotation().transpose() * offset)
    }

    /// Place a sketch point into world space
    pub fn project(&self, point: Point2D) -> Point3D {
        self.local_to_global(point.extend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_xy_is_identity() {
        let frame = Frame::xy();
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(frame.local_to_global(p), p);
        assert_eq!(frame.normal(), UnitVector3D::Z);
    }

    #[test]
    fn test_named_planes_are_right_handed() {
        for frame in [Frame::xy(), Frame::yz(), Frame::zx()] {
            let cross = frame.dir_x().cross(frame.dir_y());
            assert_eq!(cross, frame.normal().to_vector());
        }
    }

    #[test]
    fn test_linearly_dependent_directions() {
        let result = Frame::new(
            Point3D::ORIGIN,
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(-2.0, 0.0, 0.0),
        );
        assert!(matches!(result, Err(GeometryError::DegenerateGeometry(_))));

        let result = Frame::new(
            Point3D::ORIGIN,
            Vector3D::new(0.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_orthogonalizes_second_direction() {
        let frame = Frame::new(
            Point3D::ORIGIN,
            Vector3D::new(2.0, 0.0, 0.0),
            Vector3D::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(frame.dir_x().dot(frame.dir_y()), 0.0, epsilon = 1e-15);
        assert_eq!(frame.dir_y(), UnitVector3D::Y);
    }

    #[test]
    fn test_projection_round_trip() {
        let frame = Frame::new(
            Point3D::new(1.0, 2.0, 3.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        )
        .unwrap();

        let world = frame.project(Point2D::new(4.0, 5.0));
        assert_eq!(world, Point3D::new(1.0, 6.0, 8.0));
        assert_eq!(frame.global_to_local(world), Point3D::new(4.0, 5.0, 0.0));

        let affine = frame.to_affine().transform_point3(DVec3::new(4.0, 5.0, 0.0));
        assert!(affine.abs_diff_eq(world.0, 1e-12));
    }

    #[test]
    fn test_non_finite_input() {
        let result = Frame::new(
            Point3D::new(f64::NAN, 0.0, 0.0),
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
        );
        assert!(matches!(result, Err(GeometryError::InvalidParameter(_))));

        let result = Frame::new(
            Point3D::ORIGIN,
            Vector3D::new(f64::NAN, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rebuilds_basis() {
        let skewed = FrameData {
            origin: Point3D::new(1.0, 2.0, 3.0),
            dir_x: Vector3D::new(2.0, 0.0, 0.0),
            dir_y: Vector3D::new(1.0, 5.0, 0.0),
        };
        let text = ron::to_string(&skewed).unwrap();
        let frame: Frame = ron::from_str(&text).unwrap();
        assert_eq!(frame.dir_x(), UnitVector3D::X);
        assert_eq!(frame.dir_y(), UnitVector3D::Y);
        assert_eq!(frame.normal(), UnitVector3D::Z);
        assert_eq!(frame.origin(), Point3D::new(1.0, 2.0, 3.0));

        let parallel = FrameData {
            origin: Point3D::ORIGIN,
            dir_x: Vector3D::new(1.0, 0.0, 0.0),
            dir_y: Vector3D::new(3.0, 0.0, 0.0),
        };
        let text = ron::to_string(&parallel).unwrap();
        assert!(ron::from_str::<Frame>(&text).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let frame = Frame::new(
            Point3D::new(0.5, 0.0, -1.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let text = ron::to_string(&frame).unwrap();
        assert_eq!(ron::from_str::<Frame>(&text).unwrap(), frame);
    }
}
