//! Major planets from the VSOP87A series
//!
//! The coefficient tables come from the `vsop87` crate; VSOP87A gives
//! heliocentric rectangular coordinates in AU referred to the ecliptic and
//! equinox of J2000, which is exactly the frame the rest of the crate uses.

use super::{central_difference, Orbit, StateVector};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use vsop87::vsop87a;
use vsop87::RectangularCoordinates;

/// Step for the velocity difference quotient, days
const VELOCITY_STEP_DAYS: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MajorPlanet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl MajorPlanet {
    pub const ALL: [MajorPlanet; 8] = [
        MajorPlanet::Mercury,
        MajorPlanet::Venus,
        MajorPlanet::Earth,
        MajorPlanet::Mars,
        MajorPlanet::Jupiter,
        MajorPlanet::Saturn,
        MajorPlanet::Uranus,
        MajorPlanet::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MajorPlanet::Mercury => "Mercury",
            MajorPlanet::Venus => "Venus",
            MajorPlanet::Earth => "Earth",
            MajorPlanet::Mars => "Mars",
            MajorPlanet::Jupiter => "Jupiter",
            MajorPlanet::Saturn => "Saturn",
            MajorPlanet::Uranus => "Uranus",
            MajorPlanet::Neptune => "Neptune",
        }
    }

    /// Mean J2000 semi-major axis (AU), eccentricity and sidereal period (days)
    fn mean_elements(&self) -> (f64, f64, f64) {
        match self {
            MajorPlanet::Mercury => (0.387_099_27, 0.205_635_93, 87.969),
            MajorPlanet::Venus => (0.723_335_66, 0.006_776_72, 224.701),
            MajorPlanet::Earth => (1.000_002_61, 0.016_711_23, 365.256),
            MajorPlanet::Mars => (1.523_710_34, 0.093_394_10, 686.980),
            MajorPlanet::Jupiter => (5.202_887_00, 0.048_386_24, 4_332.59),
            MajorPlanet::Saturn => (9.536_675_94, 0.053_861_79, 10_759.22),
            MajorPlanet::Uranus => (19.189_164_64, 0.047_257_44, 30_688.5),
            MajorPlanet::Neptune => (30.069_922_76, 0.008_590_48, 60_182.0),
        }
    }

    fn series(&self, jde: f64) -> RectangularCoordinates {
        match self {
            MajorPlanet::Mercury => vsop87a::mercury(jde),
            MajorPlanet::Venus => vsop87a::venus(jde),
            MajorPlanet::Earth => vsop87a::earth(jde),
            MajorPlanet::Mars => vsop87a::mars(jde),
            MajorPlanet::Jupiter => vsop87a::jupiter(jde),
            MajorPlanet::Saturn => vsop87a::saturn(jde),
            MajorPlanet::Uranus => vsop87a::uranus(jde),
            MajorPlanet::Neptune => vsop87a::neptune(jde),
        }
    }
}

impl fmt::Display for MajorPlanet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vsop87Orbit {
    planet: MajorPlanet,
}

impl Vsop87Orbit {
    pub fn new(planet: MajorPlanet) -> Self {
        Vsop87Orbit { planet }
    }

    pub fn planet(&self) -> MajorPlanet {
        self.planet
    }

    fn position(&self, jde: f64) -> Vector3<f64> {
        let c = self.planet.series(jde);
        Vector3::new(c.x, c.y, c.z)
    }
}

impl Orbit for Vsop87Orbit {
    fn position_at(&self, jde: f64) -> StateVector {
        StateVector::new(
            self.position(jde),
            central_difference(|t| self.position(t), jde, VELOCITY_STEP_DAYS),
        )
    }

    fn semi_major_axis(&self) -> f64 {
        self.planet.mean_elements().0
    }

    fn eccentricity(&self) -> f64 {
        self.planet.mean_elements().1
    }

    fn sidereal_period(&self) -> f64 {
        self.planet.mean_elements().2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_earth_at_j2000() {
        let state = Vsop87Orbit::new(MajorPlanet::Earth).position_at(J2000);
        // VSOP87A check values (Bretagnon & Francou, vsop87.chk), Earth at JD 2451545.0
        assert_relative_eq!(state.position.x, -0.177_135_458_6, epsilon = 1e-8);
        assert_relative_eq!(state.position.y, 0.967_241_623_7, epsilon = 1e-8);
        assert!((-6.4e-6..-1.4e-6).contains(&state.position.z), "z = {}", state.position.z);
    }

    #[test]
    fn test_earth_velocity_is_about_one_degree_per_day() {
        let state = Vsop87Orbit::new(MajorPlanet::Earth).position_at(J2000);
        // ~29.8 km/s ≈ 0.0172 AU/day
        assert_relative_eq!(state.velocity.norm(), 0.0172, epsilon = 5e-4);
        // Prograde: angular momentum points to the ecliptic north pole
        assert!(state.position.cross(&state.velocity).z > 0.0);
    }

    #[rstest]
    #[case(MajorPlanet::Mercury)]
    #[case(MajorPlanet::Venus)]
    #[case(MajorPlanet::Mars)]
    #[case(MajorPlanet::Jupiter)]
    #[case(MajorPlanet::Saturn)]
    #[case(MajorPlanet::Uranus)]
    #[case(MajorPlanet::Neptune)]
    fn test_distance_near_semi_major_axis(#[case] planet: MajorPlanet) {
        let orbit = Vsop87Orbit::new(planet);
        let r = orbit.position_at(2_460_000.5).distance();
        let a = orbit.semi_major_axis();
        let e = orbit.eccentricity();
        assert!(r > a * (1.0 - e) * 0.99 && r < a * (1.0 + e) * 1.01, "{planet}: r = {r}");
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let orbit = Vsop87Orbit::new(MajorPlanet::Mars);
        let a = orbit.position_at(2_455_197.5);
        let b = orbit.position_at(2_455_197.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_planet_names() {
        assert_eq!(MajorPlanet::ALL.len(), 8);
        assert_eq!(MajorPlanet::Jupiter.to_string(), "Jupiter");
        let parsed: MajorPlanet = serde_json::from_str("\"neptune\"").unwrap();
        assert_eq!(parsed, MajorPlanet::Neptune);
    }
}
