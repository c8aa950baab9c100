//! Solar system bodies and their hierarchy
//!
//! A [`SolarSystem`] owns every [`Planet`] in an arena; bodies refer to
//! their parent through a [`BodyId`] index. Each body's orbit describes its
//! motion around that parent, so a heliocentric position is the sum of the
//! orbit vectors along the chain from the root (the Sun) down to the body.
//!
//! ```rust
//! use solarfield::magnitude::ApparentMagnitudeAlgorithm;
//! use solarfield::planetlib::SolarSystem;
//!
//! let system = SolarSystem::default_catalogue().unwrap();
//! let earth = system.find("Earth").unwrap();
//! let jupiter = system.find("jupiter").unwrap();
//!
//! let jde = 2_460_000.5;
//! let mag = system.visual_magnitude(jupiter, earth, jde, ApparentMagnitudeAlgorithm::ExplanatorySupplement2013);
//! assert!(mag < -1.5 && mag > -3.0);
//! ```

mod body;
mod catalogue;

pub use body::{BodyId, Planet, PlanetBuilder, Ring};

use crate::constants::km_to_au;
use crate::magnitude::{
    compute_visual_magnitude, ring_tilt_sin, shadow_factor, ApparentMagnitudeAlgorithm, MagnitudeInputs,
};
use crate::orbit::StateVector;
use crate::{Result, SolarfieldError};
use log::{debug, warn};
use nalgebra::Vector3;
use std::collections::HashMap;

/// Geometry of a target seen from an observer body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Heliocentric target position, AU
    pub target: Vector3<f64>,
    /// Heliocentric observer position, AU
    pub observer: Vector3<f64>,
    /// Phase angle, distances and distance modulus for the magnitude model
    pub inputs: MagnitudeInputs,
}

impl Observation {
    /// Observer → target vector in the VSOP87 frame, AU
    pub fn relative_position(&self) -> Vector3<f64> {
        self.target - self.observer
    }

    /// Observer–target distance, AU
    pub fn distance(&self) -> f64 {
        self.inputs.observer_body_dist_sq.sqrt()
    }

    /// Sun–observer–target angle in radians
    pub fn elongation(&self) -> f64 {
        crate::coordinates::angle_between(&-self.observer, &self.relative_position())
    }
}

/// Arena of bodies indexed by [`BodyId`]
#[derive(Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<Planet>,
    by_name: HashMap<String, BodyId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sun, planets, Pluto, the Moon and the Martian moons
    pub fn default_catalogue() -> Result<Self> {
        catalogue::build()
    }

    /// Insert a body; its parent must already be present
    ///
    /// Exactly one body may lack a parent, and that root must sit at the
    /// origin. Names are unique, compared case-insensitively.
    pub fn add(&mut self, planet: Planet) -> Result<BodyId> {
        let invalid = |reason: &str| SolarfieldError::InvalidBody {
            name: planet.name().to_string(),
            reason: reason.to_string(),
        };

        let key = planet.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(invalid("a body with this name already exists"));
        }

        match planet.parent() {
            Some(parent) if parent.0 >= self.bodies.len() => {
                return Err(invalid("parent is not part of this system"));
            }
            Some(_) => {}
            None => {
                if self.root().is_some() {
                    return Err(invalid("system already has a root body"));
                }
                if planet.position_at(crate::constants::J2000).distance() != 0.0 {
                    return Err(invalid("root body must stay at the origin"));
                }
            }
        }

        let id = BodyId(self.bodies.len());
        debug!("adding {} as {} (parent {:?})", planet.name(), id, planet.parent());
        self.by_name.insert(key, id);
        self.bodies.push(planet);
        Ok(id)
    }

    /// Look a body up by name, ignoring case
    pub fn find(&self, name: &str) -> Result<BodyId> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| SolarfieldError::BodyNotFound(name.to_string()))
    }

    /// # Panics
    ///
    /// If `id` was issued by a different system.
    pub fn get(&self, id: BodyId) -> &Planet {
        &self.bodies[id.0]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Planet)> {
        self.bodies.iter().enumerate().map(|(i, p)| (BodyId(i), p))
    }

    /// The body without a parent
    pub fn root(&self) -> Option<BodyId> {
        self.iter().find(|(_, p)| p.parent().is_none()).map(|(id, _)| id)
    }

    /// Bodies whose parent is `id`
    pub fn children(&self, id: BodyId) -> Vec<BodyId> {
        self.iter()
            .filter(|(_, p)| p.parent() == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Chain of ids from the root down to `id`
    fn lineage(&self, id: BodyId) -> Vec<BodyId> {
        let mut chain = vec![id];
        let mut current = self.get(id).parent();
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent();
        }
        chain.reverse();
        chain
    }

    /// Heliocentric position (AU) and velocity (AU/day), VSOP87 frame
    ///
    /// Parents are evaluated before their children, each at the same `jde`.
    pub fn heliocentric_state(&self, id: BodyId, jde: f64) -> StateVector {
        self.lineage(id)
            .into_iter()
            .fold(StateVector::zero(), |acc, body| acc + self.get(body).position_at(jde))
    }

    /// Position of `target` relative to `observer`, both at `jde`
    pub fn observe(&self, target: BodyId, observer: BodyId, jde: f64) -> Observation {
        let target_pos = self.heliocentric_state(target, jde).position;
        let observer_pos = self.heliocentric_state(observer, jde).position;
        let body = self.get(target);

        let mut inputs = MagnitudeInputs::from_geometry(&target_pos, &observer_pos);

        if body.ring().is_some() {
            inputs = inputs.with_ring_tilt_sin(ring_tilt_sin(&body.pole().pole_vector(), &target_pos, &observer_pos));
        }

        // Moons can hide in their planet's shadow; planets orbit the root directly
        if let Some(parent) = body.parent() {
            let parent_body = self.get(parent);
            if let Some(root) = parent_body.parent().and_then(|_| self.root()) {
                let parent_pos = self.heliocentric_state(parent, jde).position;
                inputs = inputs.with_shadow_factor(shadow_factor(
                    &target_pos,
                    &parent_pos,
                    km_to_au(body.radius_km()),
                    km_to_au(parent_body.radius_km()),
                    km_to_au(self.get(root).radius_km()),
                ));
            }
        }

        Observation {
            target: target_pos,
            observer: observer_pos,
            inputs,
        }
    }

    /// Above-atmosphere visual magnitude of `target` seen from `observer`
    ///
    /// Published per-body formulas apply only when the observer is the Earth.
    /// A body observing itself has no defined magnitude and yields NaN.
    pub fn visual_magnitude(
        &self,
        target: BodyId,
        observer: BodyId,
        jde: f64,
        algorithm: ApparentMagnitudeAlgorithm,
    ) -> f64 {
        if target == observer {
            warn!("{} cannot observe itself", self.get(target).name());
            return f64::NAN;
        }
        let observation = self.observe(target, observer, jde);
        compute_visual_magnitude(
            &self.get(target).photometry(),
            self.get(observer).kind(),
            algorithm,
            &observation.inputs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{au_to_km, J2000};
    use crate::magnitude::{generic_magnitude, BodyKind, TOTAL_ECLIPSE_FACTOR};
    use crate::orbit::{KeplerOrbit, Orbit};
    use approx::assert_relative_eq;
    use std::thread;

    fn catalogue() -> SolarSystem {
        SolarSystem::default_catalogue().unwrap()
    }

    #[test]
    fn test_catalogue_contents() {
        let system = catalogue();
        assert_eq!(system.len(), 13);
        let sun = system.root().unwrap();
        assert_eq!(system.get(sun).name(), "Sun");
        assert_eq!(system.children(sun).len(), 9);

        let mars = system.find("MARS").unwrap();
        let moons: Vec<_> = system.children(mars).into_iter().map(|id| system.get(id).name()).collect();
        assert_eq!(moons, vec!["Phobos", "Deimos"]);

        let saturn = system.get(system.find("Saturn").unwrap());
        assert_eq!(saturn.ring().map(Ring::size), Some(136_775.0));
    }

    #[test]
    fn test_unknown_body() {
        let system = catalogue();
        assert!(matches!(system.find("Vulcan"), Err(SolarfieldError::BodyNotFound(name)) if name == "Vulcan"));
    }

    #[test]
    fn test_neptune_catalogue_pole() {
        let system = catalogue();
        let pole = system.get(system.find("Neptune").unwrap()).pole();
        assert_relative_eq!(pole.obliquity, 0.489152978736078, epsilon = 1e-12);
        assert_relative_eq!(pole.ascending_node, 0.8593144058841349, epsilon = 1e-12);
    }

    #[test]
    fn test_full_moon_brightness_agrees_across_algorithms() {
        // Full Moon of 2024 January 25
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let moon = system.find("Moon").unwrap();
        let jde = 2_460_335.25;
        assert!(system.observe(moon, earth, jde).inputs.phase_angle.to_degrees() < 8.0);

        for algorithm in ApparentMagnitudeAlgorithm::ALL {
            let mag = system.visual_magnitude(moon, earth, jde, algorithm);
            assert!((-13.5..-12.0).contains(&mag), "{algorithm}: full Moon at {mag}");
        }
    }

    #[test]
    fn test_sun_is_origin() {
        let system = catalogue();
        let sun = system.find("Sun").unwrap();
        assert_eq!(system.heliocentric_state(sun, 2_459_000.5), StateVector::zero());
    }

    #[test]
    fn test_moon_composes_with_earth() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let moon = system.find("Moon").unwrap();
        let jde = 2_448_724.5;

        let earth_state = system.heliocentric_state(earth, jde);
        let moon_state = system.heliocentric_state(moon, jde);
        let geocentric = au_to_km((moon_state.position - earth_state.position).norm());
        assert_relative_eq!(geocentric, 368_409.7, epsilon = 10.0);
        assert_relative_eq!(
            moon_state.velocity - earth_state.velocity,
            system.get(moon).position_at(jde).velocity,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_phobos_stays_close_to_mars() {
        let system = catalogue();
        let mars = system.find("Mars").unwrap();
        let phobos = system.find("Phobos").unwrap();
        let separation = system.heliocentric_state(phobos, J2000).position - system.heliocentric_state(mars, J2000).position;
        let km = au_to_km(separation.norm());
        assert!((9_200.0..9_520.0).contains(&km), "Phobos at {km} km");
        // Nearly in Mars' equator
        let pole = system.get(mars).pole().pole_vector();
        assert!(separation.normalize().dot(&pole).abs() < 0.03);
    }

    #[test]
    fn test_neptune_override_from_earth() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let neptune = system.find("Neptune").unwrap();
        let jde = 2_460_000.5;
        let observation = system.observe(neptune, earth, jde);
        let mag = system.visual_magnitude(neptune, earth, jde, ApparentMagnitudeAlgorithm::ExplanatorySupplement2013);
        assert_eq!(mag, -6.87 + observation.inputs.d);
        assert!((7.5..8.2).contains(&mag), "Neptune at {mag}");
    }

    #[test]
    fn test_other_observers_use_generic() {
        let system = catalogue();
        let mars = system.find("Mars").unwrap();
        let jupiter = system.find("Jupiter").unwrap();
        let jde = 2_460_000.5;
        let observation = system.observe(jupiter, mars, jde);
        let mag = system.visual_magnitude(jupiter, mars, jde, ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984);
        assert_eq!(mag, generic_magnitude(0.538, 71_492.0, &observation.inputs));
    }

    #[test]
    fn test_venus_brighter_than_saturn() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let jde = 2_460_000.5;
        for alg in ApparentMagnitudeAlgorithm::ALL {
            let venus = system.visual_magnitude(system.find("Venus").unwrap(), earth, jde, alg);
            let saturn = system.visual_magnitude(system.find("Saturn").unwrap(), earth, jde, alg);
            assert!(venus < saturn, "{alg}: Venus {venus}, Saturn {saturn}");
        }
    }

    #[test]
    fn test_sun_from_earth() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let sun = system.find("Sun").unwrap();
        let mag = system.visual_magnitude(sun, earth, J2000, ApparentMagnitudeAlgorithm::Generic);
        assert_relative_eq!(mag, -26.75, epsilon = 0.1);
    }

    #[test]
    fn test_self_observation_is_nan() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        assert!(system.visual_magnitude(earth, earth, J2000, ApparentMagnitudeAlgorithm::Generic).is_nan());
    }

    #[test]
    fn test_satellite_in_umbra_is_eclipsed() {
        #[derive(Debug)]
        struct Behind;
        impl Orbit for Behind {
            fn position_at(&self, _jde: f64) -> StateVector {
                StateVector::new(Vector3::new(km_to_au(400_000.0), 0.0, 0.0), Vector3::zeros())
            }
        }
        #[derive(Debug)]
        struct Fixed;
        impl Orbit for Fixed {
            fn position_at(&self, _jde: f64) -> StateVector {
                StateVector::new(Vector3::new(5.2, 0.0, 0.0), Vector3::zeros())
            }
        }

        let mut system = SolarSystem::new();
        let sun = system
            .add(Planet::builder("Sun", BodyKind::Sun, crate::constants::SUN_RADIUS_KM).build().unwrap())
            .unwrap();
        let planet = system
            .add(Planet::builder("Giant", BodyKind::Other, 71_492.0).parent(sun).orbit(Fixed).build().unwrap())
            .unwrap();
        let moon = system
            .add(Planet::builder("Moonlet", BodyKind::Other, 1_800.0).albedo(0.6).parent(planet).orbit(Behind).build().unwrap())
            .unwrap();

        let observation = system.observe(moon, sun, J2000);
        assert_eq!(observation.inputs.shadow_factor, TOTAL_ECLIPSE_FACTOR);
        let planet_observation = system.observe(planet, sun, J2000);
        assert_eq!(planet_observation.inputs.shadow_factor, 1.0);
    }

    #[test]
    fn test_add_rejects_bad_hierarchy() {
        let mut system = SolarSystem::new();
        let sun = system.add(Planet::builder("Sun", BodyKind::Sun, 696_000.0).build().unwrap()).unwrap();

        let second_root = Planet::builder("Other Sun", BodyKind::Sun, 696_000.0).build().unwrap();
        assert!(system.add(second_root).is_err());

        let duplicate = Planet::builder("sun", BodyKind::Other, 1.0).parent(sun).build().unwrap();
        assert!(system.add(duplicate).is_err());

        let orphan = Planet::builder("Orphan", BodyKind::Other, 1.0).parent(BodyId(7)).build().unwrap();
        assert!(system.add(orphan).is_err());

        let mut empty = SolarSystem::new();
        let moving_root = Planet::builder("Wanderer", BodyKind::Other, 1.0)
            .orbit(KeplerOrbit::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, J2000, 365.25))
            .build()
            .unwrap();
        assert!(empty.add(moving_root).is_err());
    }

    #[test]
    fn test_concurrent_evaluation_matches_sequential() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let targets: Vec<BodyId> = system.iter().map(|(id, _)| id).filter(|id| *id != earth).collect();
        let jde = 2_461_000.25;
        let alg = ApparentMagnitudeAlgorithm::ExplanatorySupplement2013;

        let sequential: Vec<f64> = targets.iter().map(|t| system.visual_magnitude(*t, earth, jde, alg)).collect();

        let parallel: Vec<f64> = thread::scope(|scope| {
            let handles: Vec<_> = targets
                .iter()
                .map(|t| {
                    let system = &system;
                    scope.spawn(move || system.visual_magnitude(*t, earth, jde, alg))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_elongation_of_opposition() {
        let system = catalogue();
        let earth = system.find("Earth").unwrap();
        let mars = system.find("Mars").unwrap();
        let observation = system.observe(mars, earth, J2000);
        let elongation = observation.elongation();
        assert!((0.0..=std::f64::consts::PI).contains(&elongation));
        assert_relative_eq!(observation.distance(), observation.relative_position().norm(), epsilon = 1e-12);
    }
}
