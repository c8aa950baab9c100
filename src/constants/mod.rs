//! Constants module for solar system calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers (per IAU 2012 Resolution B2)
pub const AU_KM: f64 = 149_597_870.700;
/// Parsec in astronomical units
pub const PARSEC_AU: f64 = 206_264.806_247_096_36;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days per Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Days per Julian millennium, the time unit of the VSOP87 series
pub const JULIAN_MILLENNIUM: f64 = 365_250.0;
/// TT minus TAI in seconds
pub const TT_MINUS_TAI_S: f64 = 32.184;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Frame rotation J2000 equatorial -> VSOP87
/// Obliquity of the ecliptic used by the VSOP87 frame, in degrees
pub const VSOP87_OBLIQUITY_DEG: f64 = 23.439_280_305_555_555_6;
/// Rotation about the equatorial pole between FK5 J2000 and VSOP87, in degrees
pub const VSOP87_EQUINOX_OFFSET_DEG: f64 = 0.000_027_5;

// Photometry
/// Apparent visual magnitude of the Sun seen from 1 AU
pub const SUN_MAGNITUDE_AT_1AU: f64 = -26.73;
/// Absolute visual magnitude of the Sun
pub const SUN_ABSOLUTE_MAGNITUDE: f64 = 4.83;

// Sun
/// Solar equatorial radius in kilometers
pub const SUN_RADIUS_KM: f64 = 696_000.0;

// Earth constants
/// Earth's equatorial radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_378.1366;

/// Mean Earth–Moon distance in kilometers
pub const MOON_MEAN_DISTANCE_KM: f64 = 384_400.0;

/// Convert kilometers to astronomical units
pub fn km_to_au(km: f64) -> f64 {
    km / AU_KM
}

/// Convert astronomical units to kilometers
pub fn au_to_km(au: f64) -> f64 {
    au * AU_KM
}
