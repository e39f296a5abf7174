//! Measurement types
//!
//! Lengths are carried as [`Distance`] and angles as [`Angle`]; both keep the
//! value in a canonical unit (meters, radians) and remember the unit they were
//! created in for display. Loosely typed values arrive as a [`Quantity`], which
//! is checked for the right [`Dimension`] before use.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::POINT_TOLERANCE;
use crate::error::{GeometryError, GeometryResult};

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Length
    Length,
    /// Plane angle
    Angle,
    /// Temperature
    Temperature,
    /// Mass
    Mass,
    /// Time
    Time,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Length => "length",
            Dimension::Angle => "angle",
            Dimension::Temperature => "temperature",
            Dimension::Mass => "mass",
            Dimension::Time => "time",
        };
        f.write_str(name)
    }
}

/// Any unit the measurement layer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // ============== Length ==============
    /// Meter
    Meter,
    /// Kilometer
    Kilometer,
    /// Centimeter
    Centimeter,
    /// Millimeter
    Millimeter,
    /// Micrometer
    Micrometer,
    /// International inch
    Inch,
    /// International foot
    Foot,
    /// International yard
    Yard,

    // ============== Angle ==============
    /// Radian
    Radian,
    /// Degree
    Degree,

    // ============== Other ==============
    /// Kelvin
    Kelvin,
    /// Degree Celsius
    Celsius,
    /// Degree Fahrenheit
    Fahrenheit,
    /// Kilogram
    Kilogram,
    /// Gram
    Gram,
    /// Second
    Second,
}

impl Unit {
    /// Physical dimension of this unit
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Meter
            | Unit::Kilometer
            | Unit::Centimeter
            | Unit::Millimeter
            | Unit::Micrometer
            | Unit::Inch
            | Unit::Foot
            | Unit::Yard => Dimension::Length,
            Unit::Radian | Unit::Degree => Dimension::Angle,
            Unit::Kelvin | Unit::Celsius | Unit::Fahrenheit => Dimension::Temperature,
            Unit::Kilogram | Unit::Gram => Dimension::Mass,
            Unit::Second => Dimension::Time,
        }
    }

    /// Short symbol used for display and parsing
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Micrometer => "um",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::Yard => "yd",
            Unit::Radian => "rad",
            Unit::Degree => "deg",
            Unit::Kelvin => "K",
            Unit::Celsius => "degC",
            Unit::Fahrenheit => "degF",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Second => "s",
        }
    }

    /// Look a unit up by symbol or name
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        let unit = match symbol.trim() {
            "m" | "meter" | "meters" | "metre" | "metres" => Unit::Meter,
            "km" | "kilometer" | "kilometers" => Unit::Kilometer,
            "cm" | "centimeter" | "centimeters" => Unit::Centimeter,
            "mm" | "millimeter" | "millimeters" => Unit::Millimeter,
            "um" | "µm" | "micrometer" | "micrometers" => Unit::Micrometer,
            "in" | "inch" | "inches" => Unit::Inch,
            "ft" | "foot" | "feet" => Unit::Foot,
            "yd" | "yard" | "yards" => Unit::Yard,
            "rad" | "radian" | "radians" => Unit::Radian,
            "deg" | "°" | "degree" | "degrees" => Unit::Degree,
            "K" | "kelvin" => Unit::Kelvin,
            "degC" | "°C" | "celsius" => Unit::Celsius,
            "degF" | "°F" | "fahrenheit" => Unit::Fahrenheit,
            "kg" | "kilogram" | "kilograms" => Unit::Kilogram,
            "g" | "gram" | "grams" => Unit::Gram,
            "s" | "second" | "seconds" => Unit::Second,
            _ => return None,
        };
        Some(unit)
    }

    /// The length unit this corresponds to, if any
    pub fn as_length(self) -> Option<LengthUnit> {
        match self {
            Unit::Meter => Some(LengthUnit::Meter),
            Unit::Kilometer => Some(LengthUnit::Kilometer),
            Unit::Centimeter => Some(LengthUnit::Centimeter),
            Unit::Millimeter => Some(LengthUnit::Millimeter),
            Unit::Micrometer => Some(LengthUnit::Micrometer),
            Unit::Inch => Some(LengthUnit::Inch),
            Unit::Foot => Some(LengthUnit::Foot),
            Unit::Yard => Some(LengthUnit::Yard),
            _ => None,
        }
    }

    /// The angle unit this corresponds to, if any
    pub fn as_angle(self) -> Option<AngleUnit> {
        match self {
            Unit::Radian => Some(AngleUnit::Radian),
            Unit::Degree => Some(AngleUnit::Degree),
            _ => None,
        }
    }

    /// Convert a magnitude in this unit to the base unit of its dimension
    /// (m, rad, K, kg, s)
    fn to_base(self, value: f64) -> f64 {
        match self {
            Unit::Celsius => value + 273.15,
            Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + 273.15,
            _ => value * self.scale(),
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            Unit::Celsius => value - 273.15,
            Unit::Fahrenheit => (value - 273.15) * 9.0 / 5.0 + 32.0,
            _ => value / self.scale(),
        }
    }

    fn scale(self) -> f64 {
        if let Some(length) = self.as_length() {
            return length.meters_per_unit();
        }
        if let Some(angle) = self.as_angle() {
            return angle.radians_per_unit();
        }
        match self {
            Unit::Gram => 1e-3,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Units of length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Meter (canonical)
    #[default]
    Meter,
    /// Kilometer
    Kilometer,
    /// Centimeter
    Centimeter,
    /// Millimeter
    Millimeter,
    /// Micrometer
    Micrometer,
    /// Inch
    Inch,
    /// Foot
    Foot,
    /// Yard
    Yard,
}

impl LengthUnit {
    /// How many meters one of this unit is
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Kilometer => 1e3,
            LengthUnit::Centimeter => 1e-2,
            LengthUnit::Millimeter => 1e-3,
            LengthUnit::Micrometer => 1e-6,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
            LengthUnit::Yard => 0.9144,
        }
    }
}

impl From<LengthUnit> for Unit {
    fn from(unit: LengthUnit) -> Self {
        match unit {
            LengthUnit::Meter => Unit::Meter,
            LengthUnit::Kilometer => Unit::Kilometer,
            LengthUnit::Centimeter => Unit::Centimeter,
            LengthUnit::Millimeter => Unit::Millimeter,
            LengthUnit::Micrometer => Unit::Micrometer,
            LengthUnit::Inch => Unit::Inch,
            LengthUnit::Foot => Unit::Foot,
            LengthUnit::Yard => Unit::Yard,
        }
    }
}

/// Units of plane angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    /// Radian (canonical)
    #[default]
    Radian,
    /// Degree
    Degree,
}

impl AngleUnit {
    /// How many radians one of this unit is
    pub fn radians_per_unit(self) -> f64 {
        match self {
            AngleUnit::Radian => 1.0,
            AngleUnit::Degree => std::f64::consts::PI / 180.0,
        }
    }
}

impl From<AngleUnit> for Unit {
    fn from(unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Radian => Unit::Radian,
            AngleUnit::Degree => Unit::Degree,
        }
    }
}

/// A magnitude with an arbitrary unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value expressed in `unit`
    pub magnitude: f64,
    /// Unit of the magnitude
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Dimension of the quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Convert to another unit of the same dimension
    pub fn convert_to(&self, unit: Unit) -> GeometryResult<Quantity> {
        if unit.dimension() != self.dimension() {
            return Err(GeometryError::UnitMismatch {
                expected: self.dimension(),
                found: unit,
            });
        }
        let base = self.unit.to_base(self.magnitude);
        Ok(Quantity::new(unit.from_base(base), unit))
    }

    /// Interpret this quantity as a length
    pub fn to_distance(&self) -> GeometryResult<Distance> {
        let unit = self.unit.as_length().ok_or(GeometryError::UnitMismatch {
            expected: Dimension::Length,
            found: self.unit,
        })?;
        Ok(Distance::new(self.magnitude, unit))
    }

    /// Interpret this quantity as an angle
    pub fn to_angle(&self) -> GeometryResult<Angle> {
        let unit = self.unit.as_angle().ok_or(GeometryError::UnitMismatch {
            expected: Dimension::Angle,
            found: self.unit,
        })?;
        Ok(Angle::new(self.magnitude, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

impl FromStr for Quantity {
    type Err = GeometryError;

    /// Parse `"<number> <unit>"`, with or without the space. A bare number is
    /// read as meters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(magnitude) = text.parse::<f64>() {
            return Ok(Quantity::new(magnitude, Unit::Meter));
        }

        // Try every split point; the number must parse and the rest must be a unit.
        // Scanning all candidates keeps exponents like "1e3mm" working.
        for (index, _) in text.char_indices().skip(1) {
            let (number, symbol) = text.split_at(index);
            if let (Ok(magnitude), Some(unit)) =
                (number.trim().parse::<f64>(), Unit::from_symbol(symbol))
            {
                return Ok(Quantity::new(magnitude, unit));
            }
        }

        Err(GeometryError::type_mismatch("quantity", format!("'{s}'")))
    }
}

/// A length, stored in meters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distance {
    meters: f64,
    unit: LengthUnit,
}

impl Distance {
    /// Zero length in meters
    pub const ZERO: Distance = Distance {
        meters: 0.0,
        unit: LengthUnit::Meter,
    };

    /// Create a distance from a value in the given unit
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self {
            meters: value * unit.meters_per_unit(),
            unit,
        }
    }

    /// Create a distance in meters
    pub fn meters(value: f64) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    /// Create a distance in millimeters
    pub fn millimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimeter)
    }

    /// Create a distance in centimeters
    pub fn centimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Centimeter)
    }

    /// Create a distance from a loosely typed quantity
    pub fn from_quantity(quantity: Quantity) -> GeometryResult<Self> {
        quantity.to_distance()
    }

    /// Value in the canonical unit (meters)
    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    /// Value expressed in the unit the distance was created with
    pub fn value(&self) -> f64 {
        self.value_in(self.unit)
    }

    /// Unit the distance was created with
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Value expressed in an arbitrary length unit
    pub fn value_in(&self, unit: LengthUnit) -> f64 {
        self.meters / unit.meters_per_unit()
    }

    /// Same length, displayed in another unit
    pub fn to_unit(self, unit: LengthUnit) -> Self {
        Self {
            meters: self.meters,
            unit,
        }
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Self {
            meters: self.meters.abs(),
            unit: self.unit,
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        (self.meters - other.meters).abs() <= POINT_TOLERANCE
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self == other {
            Some(std::cmp::Ordering::Equal)
        } else {
            self.meters.partial_cmp(&other.meters)
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), Unit::from(self.unit))
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance {
            meters: self.meters + rhs.meters,
            unit: self.unit,
        }
    }
}

impl Sub for Distance {
    type Output = Distance;

    fn sub(self, rhs: Distance) -> Distance {
        Distance {
            meters: self.meters - rhs.meters,
            unit: self.unit,
        }
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;

    fn mul(self, rhs: f64) -> Distance {
        Distance {
            meters: self.meters * rhs,
            unit: self.unit,
        }
    }
}

impl Mul<Distance> for f64 {
    type Output = Distance;

    fn mul(self, rhs: Distance) -> Distance {
        rhs * self
    }
}

impl Div<f64> for Distance {
    type Output = Distance;

    fn div(self, rhs: f64) -> Distance {
        Distance {
            meters: self.meters / rhs,
            unit: self.unit,
        }
    }
}

impl Neg for Distance {
    type Output = Distance;

    fn neg(self) -> Distance {
        Distance {
            meters: -self.meters,
            unit: self.unit,
        }
    }
}

/// A plane angle, stored in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// Zero angle
    pub const ZERO: Angle = Angle { radians: 0.0 };

    /// Create an angle from a value in the given unit
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Self {
            radians: value * unit.radians_per_unit(),
        }
    }

    /// Create an angle in radians
    pub fn radians(value: f64) -> Self {
        Self { radians: value }
    }

    /// Create an angle in degrees
    pub fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degree)
    }

    /// Create an angle from a loosely typed quantity
    pub fn from_quantity(quantity: Quantity) -> GeometryResult<Self> {
        quantity.to_angle()
    }

    /// Value in radians
    pub fn as_radians(&self) -> f64 {
        self.radians
    }

    /// Value in degrees
    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

/// Conversion into a [`Distance`], failing for non-length quantities
///
/// Plain numbers are read as meters.
pub trait IntoDistance {
    /// Perform the conversion
    fn into_distance(self) -> GeometryResult<Distance>;
}

impl IntoDistance for Distance {
    fn into_distance(self) -> GeometryResult<Distance> {
        Ok(self)
    }
}

impl IntoDistance for f64 {
    fn into_distance(self) -> GeometryResult<Distance> {
        Ok(Distance::meters(self))
    }
}

impl IntoDistance for Quantity {
    fn into_distance(self) -> GeometryResult<Distance> {
        self.to_distance()
    }
}

impl IntoDistance for &str {
    fn into_distance(self) -> GeometryResult<Distance> {
        self.parse::<Quantity>()?.to_distance()
    }
}

/// Conversion into an [`Angle`], failing for non-angle quantities
///
/// Plain numbers are read as radians.
pub trait IntoAngle {
    /// Perform the conversion
    fn into_angle(self) -> GeometryResult<Angle>;
}

impl IntoAngle for Angle {
    fn into_angle(self) -> GeometryResult<Angle> {
        Ok(self)
    }
}

impl IntoAngle for f64 {
    fn into_angle(self) -> GeometryResult<Angle> {
        Ok(Angle::radians(self))
    }
}

impl IntoAngle for Quantity {
    fn into_angle(self) -> GeometryResult<Angle> {
        self.to_angle()
    }
}

impl IntoAngle for &str {
    fn into_angle(self) -> GeometryResult<Angle> {
        self.parse::<Quantity>()?.to_angle()
    }
}
