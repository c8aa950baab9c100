//! Rotational pole orientation of solar system bodies
//!
//! Pole catalogues (IAU WGCCRE reports) give the direction of a body's north
//! pole as a right ascension and declination in the J2000 equatorial frame.
//! Orbits and ring geometry live in the VSOP87 frame, so the pole is rotated
//! once through [`J2000_TO_VSOP87`] and re-expressed as the two angles that
//! place a body's equator relative to the ecliptic:
//!
//! - **obliquity**: tilt of the body's equator against the ecliptic
//! - **ascending node**: ecliptic longitude where the equator crosses the
//!   ecliptic going north
//!
//! This is the only frame change in the crate's core.

use crate::constants::{DEG2RAD, TAU};
use crate::coordinates::{Angle, Spherical};
use crate::framelib::inertial::{Equatorial, InertialFrame};
use crate::framelib::J2000_TO_VSOP87;
use nalgebra::{Matrix3, Rotation3, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Orientation of a body's equator relative to the VSOP87 ecliptic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleOrientation {
    /// Tilt of the equator against the ecliptic in radians, `[0, π]`
    pub obliquity: f64,
    /// Ecliptic longitude of the equator's ascending node in radians, `[0, 2π)`
    pub ascending_node: f64,
}

impl PoleOrientation {
    /// Equator coincides with the ecliptic
    pub const ECLIPTIC: PoleOrientation = PoleOrientation {
        obliquity: 0.0,
        ascending_node: 0.0,
    };

    /// Derive obliquity and ascending node from a J2000 pole RA/Dec
    ///
    /// ```rust
    /// use solarfield::coordinates::Angle;
    /// use solarfield::rotation::PoleOrientation;
    ///
    /// let neptune = PoleOrientation::from_pole(Angle::from_degrees(299.36), Angle::from_degrees(43.46));
    /// assert!((neptune.obliquity - 0.489152978736078).abs() < 1e-12);
    /// assert!((neptune.ascending_node - 0.8593144058841349).abs() < 1e-12);
    /// ```
    pub fn from_pole(ra: Angle, dec: Angle) -> Self {
        let equatorial = Equatorial {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
        .to_vector();
        Self::from_vsop87_pole(&(*J2000_TO_VSOP87 * equatorial))
    }

    /// Orientation from a pole direction already expressed in VSOP87
    ///
    /// A pole on the ecliptic pole itself has no defined node longitude; the
    /// spherical conversion reports longitude 0, giving a node of 90°.
    pub fn from_vsop87_pole(pole: &Vector3<f64>) -> Self {
        let s = Spherical::from_vector(pole);
        PoleOrientation {
            obliquity: FRAC_PI_2 - s.lat,
            ascending_node: Angle::from_radians(s.lon + FRAC_PI_2).normalized().to_radians(),
        }
    }

    /// Unit vector of the north pole in the VSOP87 frame
    pub fn pole_vector(&self) -> Vector3<f64> {
        self.equator_to_vsop87() * Vector3::z()
    }

    /// Rotation taking body-equatorial vectors into the VSOP87 frame
    ///
    /// The body-equatorial x axis points at the ascending node and z at the
    /// north pole: `Rz(node) · Rx(obliquity)`.
    pub fn equator_to_vsop87(&self) -> Matrix3<f64> {
        let node = Rotation3::from_axis_angle(&Vector3::z_axis(), self.ascending_node);
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), self.obliquity);
        (node * tilt).into_inner()
    }
}

impl Default for PoleOrientation {
    fn default() -> Self {
        PoleOrientation::ECLIPTIC
    }
}

/// Catalogued spin elements of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationElements {
    /// Sidereal rotation period in days; negative for retrograde spin
    pub period: f64,
    /// Rotation angle at `epoch` in degrees
    pub offset: f64,
    /// JDE at which `offset` applies
    pub epoch: f64,
    pub pole_ra: Angle,
    pub pole_dec: Angle,
    orientation: PoleOrientation,
}

impl RotationElements {
    pub fn new(period: f64, offset: f64, epoch: f64, pole_ra: Angle, pole_dec: Angle) -> Self {
        RotationElements {
            period,
            offset,
            epoch,
            pole_ra,
            pole_dec,
            orientation: PoleOrientation::from_pole(pole_ra, pole_dec),
        }
    }

    /// Non-rotating body whose equator lies in the ecliptic
    pub fn fixed() -> Self {
        RotationElements {
            period: 0.0,
            offset: 0.0,
            epoch: crate::constants::J2000,
            pole_ra: Angle::from_degrees(270.0),
            pole_dec: Angle::from_degrees(90.0 - crate::constants::VSOP87_OBLIQUITY_DEG),
            orientation: PoleOrientation::ECLIPTIC,
        }
    }

    pub fn orientation(&self) -> PoleOrientation {
        self.orientation
    }

    /// Rotation angle (prime meridian from the ascending node) at `jde`, radians in `[0, 2π)`
    pub fn rotation_angle(&self, jde: f64) -> f64 {
        if self.period == 0.0 {
            return (self.offset * DEG2RAD).rem_euclid(TAU);
        }
        let degrees = self.offset + 360.0 * (jde - self.epoch) / self.period;
        Angle::from_degrees(degrees).normalized().to_radians()
    }
}
