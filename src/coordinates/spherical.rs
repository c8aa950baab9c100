//! # Spherical Coordinate Module
//!
//! Conversions between rectangular `nalgebra::Vector3<f64>` vectors and
//! spherical (longitude, latitude, distance) triples. The same conventions
//! serve equatorial (RA/Dec) and ecliptic (λ/β) frames:
//!
//! - `x = r cos(lat) cos(lon)`
//! - `y = r cos(lat) sin(lon)`
//! - `z = r sin(lat)`
//!
//! Longitude comes back in `[0, 2π)` and latitude in `[-π/2, π/2]`. A vector on
//! the polar axis has no defined longitude; it is reported as exactly 0 so the
//! result is never NaN.

use nalgebra::Vector3;
use std::f64::consts::TAU;

/// Position on a sphere with optional radial distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Longitude (or right ascension) in radians, `[0, 2π)`
    pub lon: f64,
    /// Latitude (or declination) in radians, `[-π/2, π/2]`
    pub lat: f64,
    /// Distance from the origin, 1.0 for directions
    pub distance: f64,
}

impl Spherical {
    /// Create a unit-distance direction
    pub fn direction(lon: f64, lat: f64) -> Self {
        Spherical {
            lon,
            lat,
            distance: 1.0,
        }
    }

    /// Convert a rectangular vector to spherical coordinates
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    /// use solarfield::coordinates::Spherical;
    ///
    /// let pole = Spherical::from_vector(&Vector3::new(0.0, 0.0, 2.0));
    /// assert_eq!(pole.lon, 0.0);
    /// assert!((pole.lat - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    /// assert_eq!(pole.distance, 2.0);
    /// ```
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let distance = v.norm();
        if distance == 0.0 {
            return Spherical {
                lon: 0.0,
                lat: 0.0,
                distance: 0.0,
            };
        }

        let r_xy = (v.x * v.x + v.y * v.y).sqrt();
        let lat = v.z.atan2(r_xy);
        let lon = if r_xy == 0.0 {
            0.0
        } else {
            let lon = v.y.atan2(v.x);
            if lon < 0.0 {
                lon + TAU
            } else {
                lon
            }
        };

        Spherical { lon, lat, distance }
    }

    /// Convert back to a rectangular vector
    pub fn to_vector(&self) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        Vector3::new(
            self.distance * cos_lat * cos_lon,
            self.distance * cos_lat * sin_lon,
            self.distance * sin_lat,
        )
    }
}

/// Angle between two vectors in radians, `[0, π]`
///
/// Zero-length input yields 0.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let mag_product = a.norm() * b.norm();
    if mag_product == 0.0 {
        return 0.0;
    }
    (a.dot(b) / mag_product).clamp(-1.0, 1.0).acos()
}
