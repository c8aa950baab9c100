//! Periodic series orbits
//!
//! The VSOP87 family of planetary theories expresses each rectangular
//! coordinate as a Poisson series in the time `t`, measured in Julian
//! millennia of TT from J2000:
//!
//! ```text
//! X(t) = Σ_α t^α Σ_k A_k cos(B_k + C_k t)
//! ```
//!
//! This module evaluates such a series from an arbitrary [`SeriesTable`].
//! The coefficient values themselves are opaque data: a table can be built in
//! code or loaded from JSON, one `[A, B, C]` triple per term, one list of
//! terms per power α.

use super::{Orbit, StateVector};
use crate::constants::JULIAN_MILLENNIUM;
use crate::time::julian_millennia;
use crate::Result;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One `A cos(B + C t)` term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct PeriodicTerm {
    /// Amplitude `A` (AU)
    pub amplitude: f64,
    /// Phase `B` (radians)
    pub phase: f64,
    /// Frequency `C` (radians per Julian millennium)
    pub frequency: f64,
}

impl PeriodicTerm {
    pub const fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        PeriodicTerm {
            amplitude,
            phase,
            frequency,
        }
    }
}

impl From<(f64, f64, f64)> for PeriodicTerm {
    fn from((amplitude, phase, frequency): (f64, f64, f64)) -> Self {
        PeriodicTerm::new(amplitude, phase, frequency)
    }
}

impl From<PeriodicTerm> for (f64, f64, f64) {
    fn from(term: PeriodicTerm) -> Self {
        (term.amplitude, term.phase, term.frequency)
    }
}

/// Terms for the three rectangular coordinates, grouped by power of `t`
///
/// `x[α]` holds the terms multiplied by `t^α` for the x coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    pub x: Vec<Vec<PeriodicTerm>>,
    pub y: Vec<Vec<PeriodicTerm>>,
    pub z: Vec<Vec<PeriodicTerm>>,
}

impl SeriesTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Total number of terms across all coordinates and powers
    pub fn term_count(&self) -> usize {
        [&self.x, &self.y, &self.z]
            .iter()
            .flat_map(|coord| coord.iter())
            .map(Vec::len)
            .sum()
    }

    /// Position (AU) and its derivative (AU per millennium) at time `t` in millennia
    pub fn evaluate(&self, t: f64) -> (Vector3<f64>, Vector3<f64>) {
        let (x, dx) = sum_coordinate(&self.x, t);
        let (y, dy) = sum_coordinate(&self.y, t);
        let (z, dz) = sum_coordinate(&self.z, t);
        (Vector3::new(x, y, z), Vector3::new(dx, dy, dz))
    }
}

/// Value and time derivative of one coordinate's series
fn sum_coordinate(powers: &[Vec<PeriodicTerm>], t: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut rate = 0.0;
    // t^α and α·t^(α-1), built up incrementally
    let mut t_pow = 1.0;
    let mut t_pow_prev = 0.0;

    for (alpha, terms) in powers.iter().enumerate() {
        let mut sum = 0.0;
        let mut sum_rate = 0.0;
        for term in terms {
            let (sin, cos) = (term.phase + term.frequency * t).sin_cos();
            sum += term.amplitude * cos;
            sum_rate -= term.amplitude * term.frequency * sin;
        }
        value += t_pow * sum;
        rate += t_pow * sum_rate + alpha as f64 * t_pow_prev * sum;

        t_pow_prev = t_pow;
        t_pow *= t;
    }

    (value, rate)
}

/// Orbit evaluated from a [`SeriesTable`]
///
/// Velocity is the analytic derivative of the series, so position and
/// velocity always belong to the same instant.
#[derive(Debug, Clone)]
pub struct SeriesOrbit {
    table: Arc<SeriesTable>,
    semi_major_axis: f64,
    eccentricity: f64,
    sidereal_period: f64,
}

impl SeriesOrbit {
    pub fn new(table: impl Into<Arc<SeriesTable>>) -> Self {
        SeriesOrbit {
            table: table.into(),
            semi_major_axis: 0.0,
            eccentricity: 0.0,
            sidereal_period: 0.0,
        }
    }

    /// Attach the descriptive mean elements shown alongside the orbit
    pub fn with_elements(mut self, semi_major_axis: f64, eccentricity: f64, sidereal_period: f64) -> Self {
        self.semi_major_axis = semi_major_axis;
        self.eccentricity = eccentricity;
        self.sidereal_period = sidereal_period;
        self
    }

    pub fn table(&self) -> &SeriesTable {
        &self.table
    }
}

impl Orbit for SeriesOrbit {
    fn position_at(&self, jde: f64) -> StateVector {
        let (position, rate) = self.table.evaluate(julian_millennia(jde));
        StateVector::new(position, rate / JULIAN_MILLENNIUM)
    }

    fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn sidereal_period(&self) -> f64 {
        self.sidereal_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use crate::orbit::central_difference;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;
    use std::io::Write;

    /// Circular unit orbit with a one-year period plus a secular drift in z
    fn circular_table() -> SeriesTable {
        let n = TAU * 1000.0; // one revolution per year, radians per millennium
        SeriesTable {
            x: vec![vec![PeriodicTerm::new(1.0, 0.0, n)]],
            y: vec![vec![PeriodicTerm::new(1.0, -TAU / 4.0, n)]],
            z: vec![vec![], vec![PeriodicTerm::new(0.01, 0.0, 0.0)]],
        }
    }

    #[test]
    fn test_epoch_normalization() {
        // At J2000, t = 0 and only the α = 0 terms contribute A cos B
        let orbit = SeriesOrbit::new(circular_table());
        let state = orbit.position_at(J2000);
        assert_relative_eq!(state.position, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_quarter_period() {
        let orbit = SeriesOrbit::new(circular_table());
        let state = orbit.position_at(J2000 + 365.25 / 4.0);
        assert_relative_eq!(state.position.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.position.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_secular_term() {
        let orbit = SeriesOrbit::new(circular_table());
        let state = orbit.position_at(J2000 + JULIAN_MILLENNIUM);
        assert_relative_eq!(state.position.z, 0.01, epsilon = 1e-15);
        assert_relative_eq!(state.velocity.z, 0.01 / JULIAN_MILLENNIUM, epsilon = 1e-18);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let table = SeriesTable {
            x: vec![
                vec![PeriodicTerm::new(0.38, 0.3, 26087.9), PeriodicTerm::new(0.04, 1.1, 52175.8)],
                vec![PeriodicTerm::new(0.002, 2.0, 26087.9)],
                vec![PeriodicTerm::new(1e-4, 0.7, 0.0)],
            ],
            y: vec![vec![PeriodicTerm::new(0.38, -1.2, 26087.9)]],
            z: vec![vec![PeriodicTerm::new(0.05, 0.4, 26087.9)]],
        };
        let orbit = SeriesOrbit::new(table);
        let jde = 2_458_849.5;
        let analytic = orbit.position_at(jde).velocity;
        let numeric = central_difference(|t| orbit.position_at(t).position, jde, 1e-3);
        assert_relative_eq!(analytic, numeric, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_of_circular_orbit() {
        let orbit = SeriesOrbit::new(circular_table());
        let speed = orbit.position_at(J2000 + 10.0).velocity.xy().norm();
        assert_relative_eq!(speed, TAU / 365.25, epsilon = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let orbit = SeriesOrbit::new(circular_table());
        let a = orbit.position_at(2_460_123.456_789);
        let b = orbit.position_at(2_460_123.456_789);
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_table_is_origin() {
        let orbit = SeriesOrbit::new(SeriesTable::default());
        assert_eq!(orbit.position_at(2_451_000.0), StateVector::zero());
    }

    #[test]
    fn test_json_table() {
        let json = r#"{
            "x": [[[1.0, 0.0, 6283.0]], [[0.5, 0.0, 0.0]]],
            "y": [[[1.0, -1.5707963267948966, 6283.0]]],
            "z": []
        }"#;
        let table = SeriesTable::from_json_str(json).unwrap();
        assert_eq!(table.term_count(), 3);
        assert_eq!(table.x[1][0], PeriodicTerm::new(0.5, 0.0, 0.0));

        let round_trip: SeriesTable = serde_json::from_str(&serde_json::to_string(&table).unwrap()).unwrap();
        assert_eq!(round_trip, table);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"x": [[[2.0, 0.0, 0.0]]], "y": [], "z": []}}"#).unwrap();
        let table = SeriesTable::from_json_file(file.path()).unwrap();
        let orbit = SeriesOrbit::new(table).with_elements(2.0, 0.0, 1000.0);
        assert_eq!(orbit.position_at(J2000).position.x, 2.0);
        assert_eq!(orbit.semi_major_axis(), 2.0);
        assert_eq!(orbit.sidereal_period(), 1000.0);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(SeriesTable::from_json_str("{\"x\": 3}").is_err());
    }
}
