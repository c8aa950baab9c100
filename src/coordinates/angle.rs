//! # Angle Representation Module
//!
//! Angles are kept in the unit they were created with (degrees or radians) so
//! that catalogue constants, which are published in degrees, round-trip
//! exactly. Conversion only happens when the other unit is requested.
//!
//! ## Examples
//!
//! ```rust
//! use solarfield::coordinates::angle::Angle;
//!
//! let pole_ra = Angle::from_degrees(299.36);
//! assert_eq!(pole_ra.to_degrees(), 299.36);
//!
//! let node = Angle::from_radians(7.0).normalized();
//! assert!(node.to_radians() < std::f64::consts::TAU);
//! ```

use std::f64::consts::{PI, TAU};

/// Internal representation format for angle values
#[derive(Debug, Clone, Copy, PartialEq)]
enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in radians
    Radians(f64),
}

/// An angular measurement that preserves the unit it was created in
///
/// Converting an exact zero never multiplies by the conversion factor, so
/// `-0.0` artifacts cannot appear from a unit change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    angle: AngleFormat,
}

/// Multiply unless the value is exactly zero
fn convert(value: f64, factor: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value * factor
    }
}

impl Angle {
    /// Creates an angle from a value in degrees
    ///
    /// ```rust
    /// use solarfield::coordinates::angle::Angle;
    ///
    /// let right_angle = Angle::from_degrees(90.0);
    /// assert_eq!(right_angle.to_degrees(), 90.0);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Returns the angle value in degrees
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Radians(rad) => convert(rad, 180.0 / PI),
        }
    }

    /// Returns the angle value in radians
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => convert(deg, PI / 180.0),
            AngleFormat::Radians(rad) => rad,
        }
    }

    /// The same angle reduced to one full turn, `[0, 360°)`, keeping the unit
    pub fn normalized(&self) -> Angle {
        match self.angle {
            AngleFormat::Degrees(deg) => Angle::from_degrees(wrap(deg, 360.0)),
            AngleFormat::Radians(rad) => Angle::from_radians(wrap(rad, TAU)),
        }
    }
}

/// `rem_euclid` that never returns the modulus itself
fn wrap(value: f64, full: f64) -> f64 {
    let r = value.rem_euclid(full);
    if r >= full {
        0.0
    } else {
        r
    }
}
