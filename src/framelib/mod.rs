//! Reference frames and the fixed rotations between them
//!
//! Only two frames matter for the solar system core: the mean equator and
//! equinox of J2000 (where pole catalogues are published) and the VSOP87
//! frame, the heliocentric ecliptic and equinox of J2000 in which every orbit
//! is evaluated.

pub mod inertial;

pub use inertial::{Ecliptic, Equatorial, InertialFrame};

use crate::constants::{DEG2RAD, VSOP87_EQUINOX_OFFSET_DEG, VSOP87_OBLIQUITY_DEG};
use lazy_static::lazy_static;
use nalgebra::{Matrix3, Rotation3, Vector3};

lazy_static! {
    /// Rotation from J2000 equatorial (FK5) coordinates to the VSOP87 frame
    ///
    /// `Rx(-ε) · Rz(0.0000275°)`: a tiny equinox offset about the equatorial
    /// pole followed by the tilt onto the ecliptic.
    pub static ref J2000_TO_VSOP87: Matrix3<f64> = {
        let tilt = Rotation3::from_axis_angle(&Vector3::x_axis(), -VSOP87_OBLIQUITY_DEG * DEG2RAD);
        let offset = Rotation3::from_axis_angle(&Vector3::z_axis(), VSOP87_EQUINOX_OFFSET_DEG * DEG2RAD);
        (tilt * offset).into_inner()
    };

    /// Inverse of [`struct@J2000_TO_VSOP87`]
    pub static ref VSOP87_TO_J2000: Matrix3<f64> = J2000_TO_VSOP87.transpose();
}

/// Rotate an equatorial J2000 vector into the VSOP87 frame
pub fn j2000_to_vsop87(v: &Vector3<f64>) -> Vector3<f64> {
    *J2000_TO_VSOP87 * v
}

/// Rotate a VSOP87 vector into equatorial J2000
pub fn vsop87_to_j2000(v: &Vector3<f64>) -> Vector3<f64> {
    *VSOP87_TO_J2000 * v
}
