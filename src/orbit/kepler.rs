//! Precessing Keplerian ellipse
//!
//! Used for bodies whose motion is well described by mean elements: Pluto
//! around the Sun (elements on the J2000 ecliptic) and the small moons of
//! Mars (elements on Mars' equator). The reference plane is given as a
//! [`PoleOrientation`], so a moon's elements are rotated into the VSOP87
//! frame through its parent's pole.

use super::{Orbit, StateVector};
use crate::constants::{DEG2RAD, TAU};
use crate::rotation::PoleOrientation;
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Gaussian gravitational constant as a mean motion, degrees/day at 1 AU
pub const GAUSSIAN_MEAN_MOTION_DEG: f64 = 0.985_607_668_6;

/// Sidereal period in days of a heliocentric orbit with semi-major axis `a` AU
pub fn heliocentric_period(a: f64) -> f64 {
    360.0 / (GAUSSIAN_MEAN_MOTION_DEG / a.powf(1.5))
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeplerOrbit {
    /// AU
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    ascending_node: f64,
    arg_of_periapsis: f64,
    mean_anomaly_at_epoch: f64,
    epoch: f64,
    /// Days
    period: f64,
    /// Rates of the node and periapsis, radians/day
    node_rate: f64,
    apse_rate: f64,
    reference: PoleOrientation,
}

impl KeplerOrbit {
    /// Ellipse from classical elements, angles in degrees
    ///
    /// `semi_major_axis` in AU, `epoch` is the JDE at which
    /// `mean_anomaly_deg` holds, `period` the sidereal period in days.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        arg_of_periapsis_deg: f64,
        mean_anomaly_deg: f64,
        epoch: f64,
        period: f64,
    ) -> Self {
        KeplerOrbit {
            semi_major_axis,
            eccentricity,
            inclination: inclination_deg * DEG2RAD,
            ascending_node: ascending_node_deg * DEG2RAD,
            arg_of_periapsis: arg_of_periapsis_deg * DEG2RAD,
            mean_anomaly_at_epoch: mean_anomaly_deg * DEG2RAD,
            epoch,
            period,
            node_rate: 0.0,
            apse_rate: 0.0,
            reference: PoleOrientation::ECLIPTIC,
        }
    }

    /// Measure the elements against a body's equator instead of the ecliptic
    pub fn with_reference(mut self, reference: PoleOrientation) -> Self {
        self.reference = reference;
        self
    }

    /// Let the node and periapsis circulate
    ///
    /// Periods are in days; a negative period regresses. Zero disables.
    pub fn with_precession(mut self, node_period: f64, apse_period: f64) -> Self {
        self.node_rate = rate(node_period);
        self.apse_rate = rate(apse_period);
        self
    }

    pub fn reference(&self) -> PoleOrientation {
        self.reference
    }

    /// Orbit plane orientation at `jde`: perifocal → VSOP87
    fn orientation(&self, dt: f64) -> Matrix3<f64> {
        let node = self.ascending_node + self.node_rate * dt;
        let peri = self.arg_of_periapsis + self.apse_rate * dt;
        let perifocal = Rotation3::from_axis_angle(&Vector3::z_axis(), node)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inclination)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), peri);
        self.reference.equator_to_vsop87() * perifocal.into_inner()
    }
}

impl Orbit for KeplerOrbit {
    /// The velocity ignores the slow turning of the orbit plane, which is
    /// several hundred times slower than the mean motion for every
    /// catalogued body.
    fn position_at(&self, jde: f64) -> StateVector {
        let dt = jde - self.epoch;
        let e = self.eccentricity;
        let a = self.semi_major_axis;
        let n = TAU / self.period;

        let m = self.mean_anomaly_at_epoch + n * dt;
        let ea = eccentric_anomaly(e, m);
        let (sin_e, cos_e) = ea.sin_cos();
        let b = a * (1.0 - e * e).sqrt();

        let position = Vector3::new(a * (cos_e - e), b * sin_e, 0.0);
        let ea_rate = n / (1.0 - e * cos_e);
        let velocity = Vector3::new(-a * sin_e * ea_rate, b * cos_e * ea_rate, 0.0);

        let rot = self.orientation(dt);
        StateVector::new(rot * position, rot * velocity)
    }

    fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn sidereal_period(&self) -> f64 {
        self.period
    }
}

fn rate(period: f64) -> f64 {
    if period == 0.0 {
        0.0
    } else {
        TAU / period
    }
}

/// Solve Kepler's equation `E − e sin E = M` for an elliptic orbit by Newton iteration
pub(crate) fn eccentric_anomaly(e: f64, m: f64) -> f64 {
    let m = m.rem_euclid(TAU);
    if e == 0.0 {
        return m;
    }

    let mut ea = if e > 0.8 { std::f64::consts::PI } else { m + e * m.sin() };
    for _ in 0..50 {
        let f = ea - e * ea.sin() - m;
        let d_ea = f / (1.0 - e * ea.cos());
        ea -= d_ea;
        if d_ea.abs() < 1e-14 {
            break;
        }
    }
    ea
}
