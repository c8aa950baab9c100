//! Apparent visual magnitudes of solar system bodies
//!
//! Five published photometric models are supported, selected with
//! [`ApparentMagnitudeAlgorithm`]:
//!
//! - Müller (1893), the classic Potsdam photometry
//! - the Astronomical Almanac (1984)
//! - the Explanatory Supplement to the Astronomical Almanac (1992)
//! - the Explanatory Supplement, 3rd edition (2013)
//! - a generic Lambert-sphere model driven by albedo and radius
//!
//! The first four only cover the bodies they publish formulas for, and only
//! make sense for an observer on Earth. Every other combination falls back to
//! the generic model, which every body supports.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use solarfield::magnitude::{
//!     compute_visual_magnitude, ApparentMagnitudeAlgorithm, BodyKind, MagnitudeInputs, Photometry,
//! };
//!
//! let earth = Vector3::new(1.0, 0.0, 0.0);
//! let neptune = Vector3::new(-30.0, 0.5, 0.0);
//! let inputs = MagnitudeInputs::from_geometry(&neptune, &earth);
//!
//! let body = Photometry::new(BodyKind::Neptune, 0.41, 24_764.0);
//! let mag = compute_visual_magnitude(
//!     &body,
//!     BodyKind::Earth,
//!     ApparentMagnitudeAlgorithm::ExplanatorySupplement2013,
//!     &inputs,
//! );
//! assert_eq!(mag, -6.87 + inputs.d);
//! ```

use crate::constants::{km_to_au, MOON_MEAN_DISTANCE_KM, PARSEC_AU, SUN_ABSOLUTE_MAGNITUDE, SUN_MAGNITUDE_AT_1AU};
use crate::SolarfieldError;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Linear flux factor for a satellite completely inside its parent's umbra
pub const TOTAL_ECLIPSE_FACTOR: f64 = 1e-9;

/// Published photometric model used for planet and moon magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApparentMagnitudeAlgorithm {
    #[serde(rename = "mueller_1893")]
    Mueller1893,
    #[serde(rename = "astronomical_almanac_1984")]
    AstronomicalAlmanac1984,
    #[serde(rename = "explanatory_supplement_1992")]
    ExplanatorySupplement1992,
    #[serde(rename = "explanatory_supplement_2013")]
    ExplanatorySupplement2013,
    #[serde(rename = "generic")]
    Generic,
}

impl ApparentMagnitudeAlgorithm {
    pub const ALL: [ApparentMagnitudeAlgorithm; 5] = [
        ApparentMagnitudeAlgorithm::Mueller1893,
        ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984,
        ApparentMagnitudeAlgorithm::ExplanatorySupplement1992,
        ApparentMagnitudeAlgorithm::ExplanatorySupplement2013,
        ApparentMagnitudeAlgorithm::Generic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ApparentMagnitudeAlgorithm::Mueller1893 => "mueller_1893",
            ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984 => "astronomical_almanac_1984",
            ApparentMagnitudeAlgorithm::ExplanatorySupplement1992 => "explanatory_supplement_1992",
            ApparentMagnitudeAlgorithm::ExplanatorySupplement2013 => "explanatory_supplement_2013",
            ApparentMagnitudeAlgorithm::Generic => "generic",
        }
    }
}

impl Default for ApparentMagnitudeAlgorithm {
    fn default() -> Self {
        ApparentMagnitudeAlgorithm::ExplanatorySupplement2013
    }
}

impl fmt::Display for ApparentMagnitudeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ApparentMagnitudeAlgorithm {
    type Err = SolarfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == wanted)
            .ok_or_else(|| SolarfieldError::UnknownAlgorithm(s.to_string()))
    }
}

/// Which published formulas apply to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Moon,
    Io,
    Europa,
    Ganymede,
    Callisto,
    /// Any body without published formulas
    Other,
}

impl BodyKind {
    /// Magnitude from the body's own published formula, if it declares one for `algorithm`
    ///
    /// Phase coefficients are per degree of phase angle `i`.
    pub fn override_magnitude(&self, algorithm: ApparentMagnitudeAlgorithm, inputs: &MagnitudeInputs) -> Option<f64> {
        use ApparentMagnitudeAlgorithm::*;
        use BodyKind::*;

        let d = inputs.d;
        let i = inputs.phase_angle.to_degrees();
        let rings = saturn_ring_term(inputs.ring_tilt_sin);

        let mag = match (self, algorithm) {
            (Mercury, Mueller1893) => {
                let x = i - 50.0;
                -1.16 + d + 0.02838 * x + 0.0001023 * x * x
            }
            (Mercury, AstronomicalAlmanac1984 | ExplanatorySupplement1992) => {
                -0.42 + d + 0.038 * i - 0.000273 * i * i + 2e-6 * i * i * i
            }
            (Mercury, ExplanatorySupplement2013) => -0.60 + d + 0.0498 * i - 0.000488 * i * i + 3e-6 * i * i * i,

            (Venus, Mueller1893) => -4.00 + d + 0.01322 * i + 4.247e-7 * i * i * i,
            (Venus, AstronomicalAlmanac1984 | ExplanatorySupplement1992) => {
                -4.40 + d + 0.0009 * i + 0.000239 * i * i - 6.5e-7 * i * i * i
            }
            (Venus, ExplanatorySupplement2013) => -4.47 + d + 0.0103 * i + 0.000057 * i * i + 1.3e-7 * i * i * i,

            (Mars, Mueller1893) => -1.30 + d + 0.01486 * i,
            (Mars, AstronomicalAlmanac1984 | ExplanatorySupplement1992 | ExplanatorySupplement2013) => {
                -1.52 + d + 0.016 * i
            }

            (Jupiter, Mueller1893) => -8.93 + d,
            (Jupiter, AstronomicalAlmanac1984 | ExplanatorySupplement1992 | ExplanatorySupplement2013) => {
                -9.40 + d + 0.005 * i
            }

            (Saturn, Mueller1893) => -8.68 + d + 0.044 * i + rings,
            (Saturn, AstronomicalAlmanac1984 | ExplanatorySupplement1992 | ExplanatorySupplement2013) => {
                -8.88 + d + 0.044 * i + rings
            }

            (Uranus, Mueller1893) => -6.85 + d,
            (Uranus, AstronomicalAlmanac1984) => -7.19 + d,
            (Uranus, ExplanatorySupplement1992) => -7.19 + d + 0.0028 * i,
            (Uranus, ExplanatorySupplement2013) => -7.19 + d + 0.002 * i,

            (Neptune, Mueller1893) => -7.05 + d,
            (Neptune, AstronomicalAlmanac1984 | ExplanatorySupplement1992 | ExplanatorySupplement2013) => -6.87 + d,

            (Pluto, Mueller1893) => -1.0 + d,
            (Pluto, AstronomicalAlmanac1984) => -1.01 + d,
            (Pluto, ExplanatorySupplement1992) => -1.00 + d + 0.041 * i,
            (Pluto, ExplanatorySupplement2013) => -1.01 + d + 0.041 * i,

            // −12.73 is the full Moon at its mean distance, not at 1 AU
            (Moon, AstronomicalAlmanac1984 | ExplanatorySupplement1992 | ExplanatorySupplement2013) => {
                -12.73 + d - 5.0 * km_to_au(MOON_MEAN_DISTANCE_KM).log10() + 0.026 * i.abs() + 4e-9 * i.powi(4)
            }

            (Io, ExplanatorySupplement2013) => -1.68 + d + i * (0.046 - 0.0010 * i),
            (Europa, ExplanatorySupplement2013) => -1.41 + d + i * (0.0312 - 0.00125 * i),
            (Ganymede, ExplanatorySupplement2013) => -2.09 + d + i * (0.0323 - 0.00066 * i),
            (Callisto, ExplanatorySupplement2013) => -1.05 + d + 0.078 * i,

            _ => return None,
        };
        Some(mag)
    }
}

/// Photometric constants of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photometry {
    pub kind: BodyKind,
    /// Geometric albedo
    pub albedo: f64,
    /// Mean radius in km
    pub radius_km: f64,
    /// Absolute magnitude, used for the Sun
    pub absolute_magnitude: Option<f64>,
}

impl Photometry {
    pub fn new(kind: BodyKind, albedo: f64, radius_km: f64) -> Self {
        Photometry {
            kind,
            albedo,
            radius_km,
            absolute_magnitude: None,
        }
    }
}

/// Geometry the magnitude formulas consume
///
/// Squared distances are in AU². `d` is `5 log10(r Δ)` with `r` the
/// Sun–body and `Δ` the observer–body distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeInputs {
    /// Sun–body–observer angle in radians
    pub phase_angle: f64,
    pub cos_phase_angle: f64,
    /// Sun–observer distance squared
    pub observer_dist_sq: f64,
    /// Sun–body distance squared
    pub body_dist_sq: f64,
    /// Observer–body distance squared
    pub observer_body_dist_sq: f64,
    pub d: f64,
    /// Fraction of sunlight reaching the body, 1 when unshadowed
    pub shadow_factor: f64,
    /// Sine of the ring-plane tilt toward the observer, Saturn only
    pub ring_tilt_sin: f64,
}

impl MagnitudeInputs {
    /// Inputs for a body and an observer at heliocentric positions (AU)
    pub fn from_geometry(body: &Vector3<f64>, observer: &Vector3<f64>) -> Self {
        let observer_dist_sq = observer.norm_squared();
        let body_dist_sq = body.norm_squared();
        let observer_body_dist_sq = (body - observer).norm_squared();

        let denominator = 2.0 * (observer_body_dist_sq * body_dist_sq).sqrt();
        let cos_phase_angle = if denominator > 0.0 {
            ((observer_body_dist_sq + body_dist_sq - observer_dist_sq) / denominator).clamp(-1.0, 1.0)
        } else {
            1.0
        };

        MagnitudeInputs {
            phase_angle: cos_phase_angle.acos(),
            cos_phase_angle,
            observer_dist_sq,
            body_dist_sq,
            observer_body_dist_sq,
            d: 5.0 * (observer_body_dist_sq * body_dist_sq).sqrt().log10(),
            shadow_factor: 1.0,
            ring_tilt_sin: 0.0,
        }
    }

    pub fn with_shadow_factor(self, shadow_factor: f64) -> Self {
        MagnitudeInputs { shadow_factor, ..self }
    }

    pub fn with_ring_tilt_sin(self, ring_tilt_sin: f64) -> Self {
        MagnitudeInputs { ring_tilt_sin, ..self }
    }
}

/// Visual magnitude of a body above the atmosphere
///
/// Published per-body formulas are used only for an observer on Earth and
/// only for the algorithms the body declares; everything else takes the
/// generic Lambert-sphere model.
pub fn compute_visual_magnitude(
    body: &Photometry,
    observer: BodyKind,
    algorithm: ApparentMagnitudeAlgorithm,
    inputs: &MagnitudeInputs,
) -> f64 {
    if body.kind == BodyKind::Sun {
        let absolute = body.absolute_magnitude.unwrap_or(SUN_ABSOLUTE_MAGNITUDE);
        return sun_magnitude(absolute, inputs.observer_body_dist_sq.sqrt());
    }

    if observer == BodyKind::Earth {
        if let Some(mag) = body.kind.override_magnitude(algorithm, inputs) {
            return mag;
        }
    }

    if algorithm != ApparentMagnitudeAlgorithm::Generic {
        debug!("{:?} has no {} formula for this observer, using generic", body.kind, algorithm);
    }
    generic_magnitude(body.albedo, body.radius_km, inputs)
}

/// Lambert sphere magnitude
///
/// Phase function of a Lambertian sphere (Russell 1916; Explanatory
/// Supplement 1992 §7.4):
///
/// ```text
/// p(α) = (1 − α/π) cos α + sin α / π
/// F    = (2/3) · albedo · R² · p(α) / (r² Δ²) · shadowFactor
/// m    = −26.73 − 2.5 log10 F
/// ```
///
/// with `R` the body radius in AU, `r` and `Δ` the Sun–body and observer–body
/// distances. `F` is the flux relative to the Sun at 1 AU. The shadow factor
/// multiplies this linear flux before the logarithm is taken, so an eclipsed
/// body dims by `−2.5 log10(shadowFactor)`. The magnitude is infinite at
/// α = π.
pub fn generic_magnitude(albedo: f64, radius_km: f64, inputs: &MagnitudeInputs) -> f64 {
    let alpha = inputs.phase_angle;
    let phase = (1.0 - alpha / PI) * inputs.cos_phase_angle + alpha.sin() / PI;
    let radius = km_to_au(radius_km);
    let flux = 2.0 * albedo * radius * radius * phase / (3.0 * inputs.body_dist_sq * inputs.observer_body_dist_sq)
        * inputs.shadow_factor;
    SUN_MAGNITUDE_AT_1AU - 2.5 * flux.log10()
}

/// Apparent magnitude of the Sun from `distance` AU
pub fn sun_magnitude(absolute_magnitude: f64, distance: f64) -> f64 {
    let parsecs = distance / PARSEC_AU;
    absolute_magnitude + 5.0 * (parsecs.log10() - 1.0)
}

/// Brightening of Saturn by its rings for ring-plane tilt `sin B`
pub fn saturn_ring_term(ring_tilt_sin: f64) -> f64 {
    -2.6 * ring_tilt_sin.abs() + 1.25 * ring_tilt_sin * ring_tilt_sin
}

/// Sine of the ring-plane elevation of the observer, seen from the body
pub fn ring_tilt_sin(pole: &Vector3<f64>, body: &Vector3<f64>, observer: &Vector3<f64>) -> f64 {
    let to_observer = observer - body;
    let length = to_observer.norm() * pole.norm();
    if length == 0.0 {
        0.0
    } else {
        pole.dot(&to_observer) / length
    }
}

/// Fraction of sunlight reaching a satellite near its parent's shadow cone
///
/// Positions are heliocentric in AU, radii in AU. Returns 1 when the
/// satellite is on the sunward side or clear of the umbra,
/// [`TOTAL_ECLIPSE_FACTOR`] when the whole disk is inside, and the uncovered
/// fraction of a circular segment in between.
pub fn shadow_factor(
    satellite: &Vector3<f64>,
    parent: &Vector3<f64>,
    radius: f64,
    parent_radius: f64,
    sun_radius: f64,
) -> f64 {
    let parent_rq = parent.norm_squared();
    let pos_dot_parent = satellite.dot(parent);
    if parent_rq == 0.0 || pos_dot_parent <= parent_rq || radius <= 0.0 {
        return 1.0;
    }

    let sun_minus_parent = sun_radius - parent_radius;
    let quot = pos_dot_parent / parent_rq;
    let off_axis_sq = (satellite.norm_squared() - pos_dot_parent * quot).max(0.0);

    // Distance from the satellite center to the umbra border, positive inside
    let depth = sun_radius
        - sun_minus_parent * quot
        - ((1.0 - sun_minus_parent / parent_rq.sqrt()) * off_axis_sq).sqrt();

    if depth >= radius {
        TOTAL_ECLIPSE_FACTOR
    } else if depth > -radius {
        let x = depth / radius;
        (0.5 - (x.asin() + x * (1.0 - x * x).sqrt()) / PI).max(TOTAL_ECLIPSE_FACTOR)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{km_to_au, SUN_RADIUS_KM};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn inputs_at(phase_deg: f64, d: f64) -> MagnitudeInputs {
        let alpha = phase_deg.to_radians();
        MagnitudeInputs {
            phase_angle: alpha,
            cos_phase_angle: alpha.cos(),
            observer_dist_sq: 1.0,
            body_dist_sq: 25.0,
            observer_body_dist_sq: 16.0,
            d,
            shadow_factor: 1.0,
            ring_tilt_sin: 0.0,
        }
    }

    #[test]
    fn test_neptune_es2013_is_exact() {
        let body = Photometry::new(BodyKind::Neptune, 0.41, 24_764.0);
        for d in [-1.0, 0.0, 7.391_253, 12.5] {
            let mag = compute_visual_magnitude(
                &body,
                BodyKind::Earth,
                ApparentMagnitudeAlgorithm::ExplanatorySupplement2013,
                &inputs_at(1.7, d),
            );
            assert_eq!(mag, -6.87 + d);
        }
    }

    #[test]
    fn test_generic_fainter_with_distance() {
        let mut previous = f64::NEG_INFINITY;
        for delta in [0.5, 1.0, 2.0, 4.0, 30.0] {
            let inputs = MagnitudeInputs {
                observer_body_dist_sq: delta * delta,
                ..inputs_at(20.0, 0.0)
            };
            let mag = generic_magnitude(0.3, 3000.0, &inputs);
            assert!(mag > previous, "magnitude must increase with distance");
            previous = mag;
        }
    }

    #[test]
    fn test_generic_fainter_with_phase() {
        let full = generic_magnitude(0.3, 3000.0, &inputs_at(0.0, 0.0));
        let half = generic_magnitude(0.3, 3000.0, &inputs_at(90.0, 0.0));
        // p(90°) = 1/π
        assert_relative_eq!(half - full, 2.5 * PI.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_shadow_factor_is_linear_flux() {
        let lit = generic_magnitude(0.12, 1737.4, &inputs_at(5.0, 0.0));
        let dimmed = generic_magnitude(0.12, 1737.4, &inputs_at(5.0, 0.0).with_shadow_factor(0.01));
        assert_relative_eq!(dimmed - lit, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_generic_moon_brightness() {
        // Full Moon through the Lambert model lands around magnitude −12
        let inputs = MagnitudeInputs::from_geometry(&Vector3::new(1.00257, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0));
        let mag = generic_magnitude(0.12, 1737.4, &inputs);
        assert!((-13.0..-11.5).contains(&mag), "mag = {mag}");
    }

    #[test]
    fn test_moon_override_at_mean_distance() {
        // Sun at 1 AU, Moon at its mean distance and zero phase: exactly the published −12.73
        let earth = Vector3::new(1.0, 0.0, 0.0);
        let moon = earth + Vector3::new(km_to_au(MOON_MEAN_DISTANCE_KM), 0.0, 0.0);
        let inputs = MagnitudeInputs::from_geometry(&moon, &earth);
        let expected = -12.73 + 5.0 * moon.norm().log10();
        for alg in [
            ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984,
            ApparentMagnitudeAlgorithm::ExplanatorySupplement1992,
            ApparentMagnitudeAlgorithm::ExplanatorySupplement2013,
        ] {
            let mag = BodyKind::Moon.override_magnitude(alg, &inputs).unwrap_or(f64::NAN);
            assert_relative_eq!(mag, expected, epsilon = 1e-9);
        }
    }

    #[rstest]
    #[case(BodyKind::Neptune, ApparentMagnitudeAlgorithm::Mueller1893, -7.05)]
    #[case(BodyKind::Jupiter, ApparentMagnitudeAlgorithm::Mueller1893, -8.93)]
    #[case(BodyKind::Uranus, ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984, -7.19)]
    #[case(BodyKind::Pluto, ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984, -1.01)]
    #[case(BodyKind::Neptune, ApparentMagnitudeAlgorithm::ExplanatorySupplement1992, -6.87)]
    fn test_phase_independent_overrides(
        #[case] kind: BodyKind,
        #[case] algorithm: ApparentMagnitudeAlgorithm,
        #[case] intercept: f64,
    ) {
        let mag = kind.override_magnitude(algorithm, &inputs_at(3.0, 2.0));
        assert_eq!(mag, Some(intercept + 2.0));
    }

    #[test]
    fn test_phase_dependent_overrides() {
        let inputs = inputs_at(10.0, 1.0);
        let mars = BodyKind::Mars.override_magnitude(ApparentMagnitudeAlgorithm::ExplanatorySupplement2013, &inputs);
        assert_relative_eq!(mars.unwrap_or(f64::NAN), -1.52 + 1.0 + 0.16, epsilon = 1e-12);

        let mercury = BodyKind::Mercury.override_magnitude(ApparentMagnitudeAlgorithm::Mueller1893, &inputs_at(50.0, 0.0));
        assert_relative_eq!(mercury.unwrap_or(f64::NAN), -1.16, epsilon = 1e-12);

        let io = BodyKind::Io.override_magnitude(ApparentMagnitudeAlgorithm::ExplanatorySupplement2013, &inputs);
        assert_relative_eq!(io.unwrap_or(f64::NAN), -1.68 + 1.0 + 10.0 * (0.046 - 0.010), epsilon = 1e-12);
    }

    #[test]
    fn test_unlisted_combinations_fall_through() {
        let inputs = inputs_at(10.0, 1.0);
        assert_eq!(BodyKind::Io.override_magnitude(ApparentMagnitudeAlgorithm::Mueller1893, &inputs), None);
        assert_eq!(BodyKind::Moon.override_magnitude(ApparentMagnitudeAlgorithm::Mueller1893, &inputs), None);
        assert_eq!(BodyKind::Other.override_magnitude(ApparentMagnitudeAlgorithm::ExplanatorySupplement2013, &inputs), None);
        for alg in ApparentMagnitudeAlgorithm::ALL {
            assert_eq!(BodyKind::Neptune.override_magnitude(ApparentMagnitudeAlgorithm::Generic, &inputs), None);
            assert_eq!(BodyKind::Earth.override_magnitude(alg, &inputs), None);
        }

        let phobos = Photometry::new(BodyKind::Other, 0.071, 11.1);
        let mag = compute_visual_magnitude(&phobos, BodyKind::Earth, ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984, &inputs);
        assert_eq!(mag, generic_magnitude(0.071, 11.1, &inputs));
    }

    #[test]
    fn test_overrides_only_from_earth() {
        let body = Photometry::new(BodyKind::Neptune, 0.41, 24_764.0);
        let inputs = inputs_at(1.0, 7.0);
        let from_mars = compute_visual_magnitude(&body, BodyKind::Mars, ApparentMagnitudeAlgorithm::ExplanatorySupplement2013, &inputs);
        assert_eq!(from_mars, generic_magnitude(0.41, 24_764.0, &inputs));
    }

    #[test]
    fn test_saturn_rings_brighten() {
        let inputs = inputs_at(5.0, 9.0);
        let edge_on = BodyKind::Saturn.override_magnitude(ApparentMagnitudeAlgorithm::ExplanatorySupplement2013, &inputs);
        let open = BodyKind::Saturn.override_magnitude(
            ApparentMagnitudeAlgorithm::ExplanatorySupplement2013,
            &inputs.with_ring_tilt_sin(0.45),
        );
        assert_relative_eq!(saturn_ring_term(0.45), -2.6 * 0.45 + 1.25 * 0.2025);
        assert!(open < edge_on);
    }

    #[test]
    fn test_sun_magnitude_at_one_au() {
        assert_relative_eq!(sun_magnitude(SUN_ABSOLUTE_MAGNITUDE, 1.0), -26.74, epsilon = 0.01);
        let sun = Photometry::new(BodyKind::Sun, 0.0, SUN_RADIUS_KM);
        let inputs = MagnitudeInputs::from_geometry(&Vector3::zeros(), &Vector3::new(0.0, 5.2, 0.0));
        let from_jupiter = compute_visual_magnitude(&sun, BodyKind::Jupiter, ApparentMagnitudeAlgorithm::Generic, &inputs);
        assert_relative_eq!(from_jupiter, sun_magnitude(SUN_ABSOLUTE_MAGNITUDE, 5.2), epsilon = 1e-12);
    }

    #[test]
    fn test_geometry() {
        // Body at quadrature seen from the Sun's side
        let inputs = MagnitudeInputs::from_geometry(&Vector3::new(0.0, 1.0, 0.0), &Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(inputs.phase_angle, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(inputs.d, 0.0, epsilon = 1e-12);
        assert_eq!(inputs.shadow_factor, 1.0);

        let opposition = MagnitudeInputs::from_geometry(&Vector3::new(5.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(opposition.phase_angle, 0.0, epsilon = 1e-7);
        assert_relative_eq!(opposition.d, 5.0 * 20f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_ring_tilt() {
        let pole = Vector3::new(0.0, 0.0, 1.0);
        let body = Vector3::new(9.0, 0.0, 0.0);
        let above = Vector3::new(1.0, 0.0, 8.0);
        assert_relative_eq!(ring_tilt_sin(&pole, &body, &above), (PI / 4.0).sin(), epsilon = 1e-12);
        assert_eq!(ring_tilt_sin(&pole, &body, &body), 0.0);
    }

    #[test]
    fn test_shadow_factor() {
        let parent = Vector3::new(5.2, 0.0, 0.0);
        let parent_radius = km_to_au(71_492.0);
        let radius = km_to_au(1_821.6);
        let sun_radius = km_to_au(SUN_RADIUS_KM);
        let orbit = km_to_au(421_800.0);

        // Directly behind the planet
        let behind = parent + Vector3::new(orbit, 0.0, 0.0);
        assert_eq!(shadow_factor(&behind, &parent, radius, parent_radius, sun_radius), TOTAL_ECLIPSE_FACTOR);

        // In front of the planet
        let front = parent - Vector3::new(orbit, 0.0, 0.0);
        assert_eq!(shadow_factor(&front, &parent, radius, parent_radius, sun_radius), 1.0);

        // Behind but far off axis
        let clear = parent + Vector3::new(orbit * 0.2, orbit, 0.0);
        assert_eq!(shadow_factor(&clear, &parent, radius, parent_radius, sun_radius), 1.0);
    }

    #[test]
    fn test_shadow_factor_partial_is_continuous() {
        let parent = Vector3::new(5.2, 0.0, 0.0);
        let parent_radius = km_to_au(71_492.0);
        let radius = km_to_au(1_821.6);
        let sun_radius = km_to_au(SUN_RADIUS_KM);
        let behind = km_to_au(421_800.0);

        let mut previous = TOTAL_ECLIPSE_FACTOR;
        for step in 0..200 {
            let offset = parent_radius * (0.9 + step as f64 * 0.001);
            let s = shadow_factor(&(parent + Vector3::new(behind, offset, 0.0)), &parent, radius, parent_radius, sun_radius);
            assert!((0.0..=1.0).contains(&s));
            assert!(s + 1e-12 >= previous, "leaving the umbra must brighten");
            previous = s;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_algorithm_names() {
        for alg in ApparentMagnitudeAlgorithm::ALL {
            assert_eq!(alg.to_string().parse::<ApparentMagnitudeAlgorithm>().unwrap(), alg);
            let json = serde_json::to_string(&alg).unwrap();
            assert_eq!(json, format!("\"{alg}\""));
        }
        assert!(matches!(
            "bogus".parse::<ApparentMagnitudeAlgorithm>(),
            Err(SolarfieldError::UnknownAlgorithm(_))
        ));
    }
}
