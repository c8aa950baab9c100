//! A single solar system body and its ring

use crate::magnitude::{BodyKind, Photometry};
use crate::orbit::{Orbit, StateVector, Stationary};
use crate::rotation::{PoleOrientation, RotationElements};
use crate::{Result, SolarfieldError};
use std::fmt;

/// Index of a body inside its [`SolarSystem`](super::SolarSystem)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Planetary ring system, radii in km from the body center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    inner_radius_km: f64,
    outer_radius_km: f64,
}

impl Ring {
    pub fn new(inner_radius_km: f64, outer_radius_km: f64) -> Result<Self> {
        if !(inner_radius_km >= 0.0 && outer_radius_km > inner_radius_km) {
            return Err(SolarfieldError::Config(format!(
                "ring radii must satisfy 0 <= inner < outer, got {inner_radius_km} and {outer_radius_km}"
            )));
        }
        Ok(Ring {
            inner_radius_km,
            outer_radius_km,
        })
    }

    pub fn inner_radius_km(&self) -> f64 {
        self.inner_radius_km
    }

    pub fn outer_radius_km(&self) -> f64 {
        self.outer_radius_km
    }

    /// Overall extent of the ring: its outer radius
    pub fn size(&self) -> f64 {
        self.outer_radius_km
    }
}

/// A solar system body: physical constants, orbit, spin and photometry
#[derive(Debug)]
pub struct Planet {
    name: String,
    kind: BodyKind,
    radius_km: f64,
    oblateness: f64,
    albedo: f64,
    ring: Option<Ring>,
    pub(crate) parent: Option<BodyId>,
    orbit: Box<dyn Orbit>,
    rotation: RotationElements,
    absolute_magnitude: Option<f64>,
    mean_opposition_magnitude: Option<f64>,
}

impl Planet {
    pub fn builder(name: impl Into<String>, kind: BodyKind, radius_km: f64) -> PlanetBuilder {
        PlanetBuilder {
            name: name.into(),
            kind,
            radius_km,
            oblateness: 0.0,
            albedo: 0.0,
            ring: None,
            parent: None,
            orbit: Box::new(Stationary),
            rotation: RotationElements::fixed(),
            absolute_magnitude: None,
            mean_opposition_magnitude: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Mean equatorial radius in km
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn oblateness(&self) -> f64 {
        self.oblateness
    }

    pub fn albedo(&self) -> f64 {
        self.albedo
    }

    pub fn ring(&self) -> Option<&Ring> {
        self.ring.as_ref()
    }

    /// The body this one orbits; `None` for the root
    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn orbit(&self) -> &dyn Orbit {
        self.orbit.as_ref()
    }

    pub fn rotation(&self) -> &RotationElements {
        &self.rotation
    }

    /// Equator orientation derived from the catalogued pole
    pub fn pole(&self) -> PoleOrientation {
        self.rotation.orientation()
    }

    pub fn absolute_magnitude(&self) -> Option<f64> {
        self.absolute_magnitude
    }

    pub fn mean_opposition_magnitude(&self) -> Option<f64> {
        self.mean_opposition_magnitude
    }

    pub fn photometry(&self) -> Photometry {
        Photometry {
            kind: self.kind,
            albedo: self.albedo,
            radius_km: self.radius_km,
            absolute_magnitude: self.absolute_magnitude,
        }
    }

    /// Position relative to the parent body
    pub fn position_at(&self, jde: f64) -> StateVector {
        self.orbit.position_at(jde)
    }
}

/// Collects a body's properties; [`build`](Self::build) checks them
#[derive(Debug)]
pub struct PlanetBuilder {
    name: String,
    kind: BodyKind,
    radius_km: f64,
    oblateness: f64,
    albedo: f64,
    ring: Option<Ring>,
    parent: Option<BodyId>,
    orbit: Box<dyn Orbit>,
    rotation: RotationElements,
    absolute_magnitude: Option<f64>,
    mean_opposition_magnitude: Option<f64>,
}

impl PlanetBuilder {
    pub fn oblateness(mut self, oblateness: f64) -> Self {
        self.oblateness = oblateness;
        self
    }

    pub fn albedo(mut self, albedo: f64) -> Self {
        self.albedo = albedo;
        self
    }

    pub fn ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn orbit(mut self, orbit: impl Orbit + 'static) -> Self {
        self.orbit = Box::new(orbit);
        self
    }

    pub fn rotation(mut self, rotation: RotationElements) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn absolute_magnitude(mut self, magnitude: f64) -> Self {
        self.absolute_magnitude = Some(magnitude);
        self
    }

    pub fn mean_opposition_magnitude(mut self, magnitude: f64) -> Self {
        self.mean_opposition_magnitude = Some(magnitude);
        self
    }

    pub fn build(self) -> Result<Planet> {
        let invalid = |reason: String| SolarfieldError::InvalidBody {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if !(self.radius_km > 0.0 && self.radius_km.is_finite()) {
            return Err(invalid(format!("radius must be positive, got {}", self.radius_km)));
        }
        if !(0.0..1.0).contains(&self.oblateness) {
            return Err(invalid(format!("oblateness must lie in [0, 1), got {}", self.oblateness)));
        }
        if !(self.albedo >= 0.0 && self.albedo.is_finite()) {
            return Err(invalid(format!("albedo must be non-negative, got {}", self.albedo)));
        }
        if let Some(ring) = &self.ring {
            if ring.inner_radius_km() < self.radius_km {
                return Err(invalid("ring starts inside the body".to_string()));
            }
        }

        Ok(Planet {
            name: self.name,
            kind: self.kind,
            radius_km: self.radius_km,
            oblateness: self.oblateness,
            albedo: self.albedo,
            ring: self.ring,
            parent: self.parent,
            orbit: self.orbit,
            rotation: self.rotation,
            absolute_magnitude: self.absolute_magnitude,
            mean_opposition_magnitude: self.mean_opposition_magnitude,
        })
    }
}
