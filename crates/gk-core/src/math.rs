//! Points and vectors
//!
//! Thin wrappers over `glam` double-precision types. Coordinates are stored in
//! meters; equality is tolerant (see [`POINT_TOLERANCE`]).

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DIRECTION_EPSILON, POINT_TOLERANCE};
use crate::error::{GeometryError, GeometryResult};
use crate::units::{Distance, LengthUnit};

/// A point in sketch (2D) space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point2D(pub DVec2);

impl Point2D {
    /// The origin
    pub const ORIGIN: Point2D = Point2D(DVec2::ZERO);

    /// Create a point from coordinates in meters
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Create a point from coordinates in the given unit
    pub fn with_unit(x: f64, y: f64, unit: LengthUnit) -> Self {
        let scale = unit.meters_per_unit();
        Self::new(x * scale, y * scale)
    }

    /// X coordinate in meters
    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Y coordinate in meters
    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// X coordinate as a distance
    pub fn x_distance(self) -> Distance {
        Distance::meters(self.0.x)
    }

    /// Y coordinate as a distance
    pub fn y_distance(self) -> Distance {
        Distance::meters(self.0.y)
    }

    /// Euclidean distance to another point (meters)
    #[inline]
    pub fn distance_to(self, other: Point2D) -> f64 {
        self.0.distance(other.0)
    }

    /// Vector from this point to `other`
    #[inline]
    pub fn vector_to(self, other: Point2D) -> Vector2D {
        Vector2D(other.0 - self.0)
    }

    /// Lift into 3D with z = 0
    #[inline]
    pub fn extend(self) -> Point3D {
        Point3D(self.0.extend(0.0))
    }

    /// Tolerant comparison with an explicit tolerance
    pub fn approx_eq(self, other: Point2D, tolerance: f64) -> bool {
        self.0.abs_diff_eq(other.0, tolerance)
    }
}

impl PartialEq for Point2D {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, POINT_TOLERANCE)
    }
}

impl From<DVec2> for Point2D {
    fn from(value: DVec2) -> Self {
        Self(value)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(value: [f64; 2]) -> Self {
        Self(DVec2::from_array(value))
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0.x, self.0.y)
    }
}

impl FromStr for Point2D {
    type Err = GeometryError;

    /// Accepts `"[x, y]"`, `"(x, y)"`, `"x, y"` or `"x y"` in meters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mismatch = || GeometryError::type_mismatch("Point2D", format!("'{s}'"));
        let body = s
            .trim()
            .trim_start_matches(['[', '('])
            .trim_end_matches([']', ')']);
        let coords = body
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().map_err(|_| mismatch()))
            .collect::<GeometryResult<Vec<f64>>>()?;
        match coords.as_slice() {
            [x, y] if x.is_finite() && y.is_finite() => Ok(Point2D::new(*x, *y)),
            _ => Err(mismatch()),
        }
    }
}

impl Add<Vector2D> for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Vector2D) -> Point2D {
        Point2D(self.0 + rhs.0)
    }
}

impl Sub<Vector2D> for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Vector2D) -> Point2D {
        Point2D(self.0 - rhs.0)
    }
}

impl Sub for Point2D {
    type Output = Vector2D;

    fn sub(self, rhs: Point2D) -> Vector2D {
        Vector2D(self.0 - rhs.0)
    }
}

/// A displacement in sketch (2D) space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2D(pub DVec2);

impl Vector2D {
    /// Create a vector from components in meters
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Vector from `start` to `end`
    #[inline]
    pub fn from_points(start: Point2D, end: Point2D) -> Self {
        Self(end.0 - start.0)
    }

    /// X component
    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Y component
    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(self) -> f64 {
        self.0.length()
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.0.dot(other.0)
    }

    /// Z component of the 3D cross product
    #[inline]
    pub fn cross(self, other: Vector2D) -> f64 {
        self.0.perp_dot(other.0)
    }

    /// Polar angle in (-π, π]
    #[inline]
    pub fn angle(self) -> f64 {
        self.0.y.atan2(self.0.x)
    }

    /// Whether the vector is (numerically) zero
    pub fn is_zero(self) -> bool {
        self.0.length_squared() <= DIRECTION_EPSILON
    }
}

impl PartialEq for Vector2D {
    fn eq(&self, other: &Self) -> bool {
        self.0.abs_diff_eq(other.0, POINT_TOLERANCE)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D(self.0 + rhs.0)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D(self.0 * rhs)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D(-self.0)
    }
}

/// A point in world (3D) space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point3D(pub DVec3);

impl Point3D {
    /// The origin
    pub const ORIGIN: Point3D = Point3D(DVec3::ZERO);

    /// Create a point from coordinates in meters
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// X coordinate
    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Y coordinate
    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Z coordinate
    #[inline]
    pub fn z(self) -> f64 {
        self.0.z
    }

    /// Coordinates as an array
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        self.0.to_array()
    }

    /// Tolerant comparison with an explicit tolerance
    pub fn approx_eq(self, other: Point3D, tolerance: f64) -> bool {
        self.0.abs_diff_eq(other.0, tolerance)
    }
}

impl PartialEq for Point3D {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, POINT_TOLERANCE)
    }
}

impl From<DVec3> for Point3D {
    fn from(value: DVec3) -> Self {
        Self(value)
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;

    fn add(self, rhs: Vector3D) -> Point3D {
        Point3D(self.0 + rhs.0)
    }
}

impl Sub for Point3D {
    type Output = Vector3D;

    fn sub(self, rhs: Point3D) -> Vector3D {
        Vector3D(self.0 - rhs.0)
    }
}

/// A displacement in world (3D) space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3D(pub DVec3);

impl Vector3D {
    /// Create a vector from components
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(self) -> f64 {
        self.0.length()
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Vector3D) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product
    #[inline]
    pub fn cross(self, other: Vector3D) -> Vector3D {
        Vector3D(self.0.cross(other.0))
    }

    /// Whether the vector is (numerically) zero
    pub fn is_zero(self) -> bool {
        self.0.length_squared() <= DIRECTION_EPSILON
    }
}

impl PartialEq for Vector3D {
    fn eq(&self, other: &Self) -> bool {
        self.0.abs_diff_eq(other.0, POINT_TOLERANCE)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f64) -> Vector3D {
        Vector3D(self.0 * rhs)
    }
}

/// A normalized 3D direction
///
/// Deserialization goes through [`UnitVector3D::new`], so stored components
/// are renormalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Vector3D", into = "Vector3D")]
pub struct UnitVector3D(DVec3);

impl UnitVector3D {
    /// +X direction
    pub const X: UnitVector3D = UnitVector3D(DVec3::X);
    /// +Y direction
    pub const Y: UnitVector3D = UnitVector3D(DVec3::Y);
    /// +Z direction
    pub const Z: UnitVector3D = UnitVector3D(DVec3::Z);

    /// Normalize `vector`; fails for a zero or non-finite vector
    pub fn new(vector: Vector3D) -> GeometryResult<Self> {
        if !vector.0.is_finite() {
            return Err(GeometryError::invalid(format!(
                "Direction components must be finite, got {:?}",
                vector.0.to_array()
            )));
        }
        if vector.is_zero() {
            return Err(GeometryError::degenerate(
                "A zero vector has no direction",
            ));
        }
        Ok(Self(vector.0.normalize()))
    }

    /// Normalize the given components
    pub fn from_xyz(x: f64, y: f64, z: f64) -> GeometryResult<Self> {
        Self::new(Vector3D::new(x, y, z))
    }

    /// Underlying glam vector
    #[inline]
    pub fn as_dvec3(self) -> DVec3 {
        self.0
    }

    /// As a plain vector
    #[inline]
    pub fn to_vector(self) -> Vector3D {
        Vector3D(self.0)
    }

    /// Dot product with another direction
    #[inline]
    pub fn dot(self, other: UnitVector3D) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product (not normalized)
    #[inline]
    pub fn cross(self, other: UnitVector3D) -> Vector3D {
        Vector3D(self.0.cross(other.0))
    }
}

impl TryFrom<Vector3D> for UnitVector3D {
    type Error = GeometryError;

    fn try_from(vector: Vector3D) -> GeometryResult<Self> {
        Self::new(vector)
    }
}

impl From<UnitVector3D> for Vector3D {
    fn from(direction: UnitVector3D) -> Self {
        direction.to_vector()
    }
}

impl PartialEq for UnitVector3D {
    fn eq(&self, other: &Self) -> bool {
        self.0.abs_diff_eq(other.0, POINT_TOLERANCE)
    }
}
