use super::{J2000_TO_VSOP87, VSOP87_TO_J2000};
use crate::coordinates::{angle_between, Spherical};
use nalgebra::Vector3;

/// Spherical direction in an inertial frame
pub trait InertialFrame: Sized {
    fn to_vector(&self) -> Vector3<f64>;
    fn from_vector(v: &Vector3<f64>) -> Self;

    fn angle_between(&self, other: &Self) -> f64 {
        angle_between(&self.to_vector(), &other.to_vector())
    }
}

// Equatorial coordinates (RA/Dec), mean equator and equinox of J2000
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Equatorial {
    pub ra: f64,  // Right ascension in radians
    pub dec: f64, // Declination in radians
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Equatorial {
            ra: ra.rem_euclid(2.0 * std::f64::consts::PI),
            dec,
        }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }
}

// Ecliptic coordinates in the VSOP87 frame
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ecliptic {
    pub lon: f64, // Ecliptic longitude in radians
    pub lat: f64, // Ecliptic latitude in radians
}

impl InertialFrame for Equatorial {
    fn to_vector(&self) -> Vector3<f64> {
        Spherical::direction(self.ra, self.dec).to_vector()
    }

    fn from_vector(v: &Vector3<f64>) -> Self {
        let s = Spherical::from_vector(v);
        Equatorial {
            ra: s.lon,
            dec: s.lat,
        }
    }
}

impl InertialFrame for Ecliptic {
    fn to_vector(&self) -> Vector3<f64> {
        Spherical::direction(self.lon, self.lat).to_vector()
    }

    fn from_vector(v: &Vector3<f64>) -> Self {
        let s = Spherical::from_vector(v);
        Ecliptic {
            lon: s.lon,
            lat: s.lat,
        }
    }
}

impl From<Equatorial> for Ecliptic {
    fn from(eq: Equatorial) -> Ecliptic {
        Ecliptic::from_vector(&(*J2000_TO_VSOP87 * eq.to_vector()))
    }
}

impl From<Ecliptic> for Equatorial {
    fn from(ec: Ecliptic) -> Equatorial {
        Equatorial::from_vector(&(*VSOP87_TO_J2000 * ec.to_vector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_equatorial_normalizes_ra() {
        let eq = Equatorial::new(-0.5, 0.1);
        assert_relative_eq!(eq.ra, 2.0 * PI - 0.5);
    }

    #[test]
    fn test_vernal_equinox_is_shared() {
        // The equinox direction lies on both the equator and the ecliptic
        let ec: Ecliptic = Equatorial::new(0.0, 0.0).into();
        assert_relative_eq!(ec.lat, 0.0, epsilon = 1e-6);
        assert!(ec.lon < 1e-6 || ec.lon > 2.0 * PI - 1e-6);
    }

    #[test]
    fn test_ecliptic_pole_in_equatorial() {
        // North ecliptic pole sits at RA 18h, Dec 90° - ε
        let eq: Equatorial = Ecliptic { lon: 0.0, lat: FRAC_PI_2 }.into();
        assert_relative_eq!(eq.ra.to_degrees(), 270.0, epsilon = 1e-3);
        assert_relative_eq!(eq.dec.to_degrees(), 66.560_719_694, epsilon = 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let original = Equatorial::from_degrees(123.4, -45.6);
        let ec: Ecliptic = original.into();
        let back: Equatorial = ec.into();
        assert_relative_eq!(back.ra, original.ra, epsilon = 1e-12);
        assert_relative_eq!(back.dec, original.dec, epsilon = 1e-12);
        assert_relative_eq!(original.angle_between(&back), 0.0, epsilon = 1e-7);
    }
}
