//! Orbit models for solar system bodies
//!
//! An [`Orbit`] maps a Julian Ephemeris Day to a position and velocity in the
//! VSOP87 frame (ecliptic and equinox of J2000), in AU and AU/day, relative
//! to the body's parent. The planet aggregate adds the parent chain to obtain
//! heliocentric vectors, so moons only ever describe their motion around the
//! planet they belong to.
//!
//! # Implementations
//!
//! - [`Stationary`]: the root of the hierarchy, always at the origin
//! - [`Vsop87Orbit`]: major planets from the VSOP87A series
//! - [`SeriesOrbit`]: any body described by a table of periodic terms
//! - [`KeplerOrbit`]: precessing ellipse in the ecliptic or a parent's equator
//! - [`LunarOrbit`]: the Moon from a truncated ELP-2000/82 series
//!
//! All of them are pure functions of `jde`: no caching, no interior
//! mutability, safe to share across threads.

pub mod kepler;
pub mod lunar;
pub mod series;
pub mod vsop87;

pub use kepler::KeplerOrbit;
pub use lunar::LunarOrbit;
pub use series::{PeriodicTerm, SeriesOrbit, SeriesTable};
pub use vsop87::{MajorPlanet, Vsop87Orbit};

use nalgebra::Vector3;
use std::fmt::Debug;
use std::ops::Add;

/// Position and velocity at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Position in AU
    pub position: Vector3<f64>,
    /// Velocity in AU/day
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    pub fn zero() -> Self {
        StateVector {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Distance from the origin in AU
    pub fn distance(&self) -> f64 {
        self.position.norm()
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, other: StateVector) -> StateVector {
        StateVector {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

/// Trajectory of a body around its parent
pub trait Orbit: Debug + Send + Sync {
    /// Parent-relative position (AU) and velocity (AU/day) at `jde`, VSOP87 frame
    fn position_at(&self, jde: f64) -> StateVector;

    /// Mean semi-major axis in AU, for display
    fn semi_major_axis(&self) -> f64 {
        0.0
    }

    /// Mean eccentricity, for display
    fn eccentricity(&self) -> f64 {
        0.0
    }

    /// Sidereal period in days, for display
    fn sidereal_period(&self) -> f64 {
        0.0
    }
}

/// The hierarchy root: permanently at the origin
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stationary;

impl Orbit for Stationary {
    fn position_at(&self, _jde: f64) -> StateVector {
        StateVector::zero()
    }
}

/// Symmetric difference quotient of a position function, per day
pub(crate) fn central_difference<F>(position: F, jde: f64, step: f64) -> Vector3<f64>
where
    F: Fn(f64) -> Vector3<f64>,
{
    (position(jde + step) - position(jde - step)) / (2.0 * step)
}
