//! Built-in bodies
//!
//! Physical data from the NASA planetary fact sheets, poles and prime
//! meridians from the IAU WGCCRE 2015 report (J2000 values), Mars satellite
//! elements from Sinclair (1989) as used by the Explanatory Supplement, and
//! Pluto's mean elements from Standish (1992).

use super::{Planet, Ring, SolarSystem};
use crate::constants::{km_to_au, EARTH_RADIUS_KM, J2000, SUN_ABSOLUTE_MAGNITUDE, SUN_RADIUS_KM};
use crate::coordinates::Angle;
use crate::magnitude::BodyKind;
use crate::orbit::kepler::heliocentric_period;
use crate::orbit::{KeplerOrbit, LunarOrbit, MajorPlanet, Vsop87Orbit};
use crate::rotation::RotationElements;
use crate::Result;
use log::debug;

const JULIAN_YEAR: f64 = 365.25;

/// Epoch of the Mars satellite elements, 1950 January 1.0 TT
const MARS_SATELLITE_EPOCH: f64 = 2_433_282.5;

/// Spin elements from a pole RA/Dec (degrees), period (days) and prime meridian at J2000 (degrees)
fn spin(ra: f64, dec: f64, period: f64, w0: f64) -> RotationElements {
    RotationElements::new(period, w0, J2000, Angle::from_degrees(ra), Angle::from_degrees(dec))
}

struct PlanetRow {
    planet: MajorPlanet,
    kind: BodyKind,
    radius_km: f64,
    oblateness: f64,
    albedo: f64,
    rotation: (f64, f64, f64, f64),
    absolute_magnitude: f64,
    mean_opposition_magnitude: Option<f64>,
}

#[rustfmt::skip]
const PLANETS: [PlanetRow; 8] = [
    PlanetRow { planet: MajorPlanet::Mercury, kind: BodyKind::Mercury, radius_km: 2_439.7, oblateness: 0.0, albedo: 0.142,
        rotation: (281.0103, 61.4155, 58.6462, 329.5988), absolute_magnitude: -0.613, mean_opposition_magnitude: None },
    PlanetRow { planet: MajorPlanet::Venus, kind: BodyKind::Venus, radius_km: 6_051.8, oblateness: 0.0, albedo: 0.689,
        rotation: (272.76, 67.16, -243.0226, 160.20), absolute_magnitude: -4.384, mean_opposition_magnitude: None },
    PlanetRow { planet: MajorPlanet::Earth, kind: BodyKind::Earth, radius_km: EARTH_RADIUS_KM, oblateness: 0.003_353, albedo: 0.434,
        rotation: (0.0, 90.0, 0.997_269_68, 190.147), absolute_magnitude: -3.99, mean_opposition_magnitude: None },
    PlanetRow { planet: MajorPlanet::Mars, kind: BodyKind::Mars, radius_km: 3_396.19, oblateness: 0.005_89, albedo: 0.170,
        rotation: (317.269_202, 54.432_516, 1.025_956_76, 176.049_863), absolute_magnitude: -1.601, mean_opposition_magnitude: Some(-2.01) },
    PlanetRow { planet: MajorPlanet::Jupiter, kind: BodyKind::Jupiter, radius_km: 71_492.0, oblateness: 0.064_87, albedo: 0.538,
        rotation: (268.056_595, 64.495_303, 0.413_538, 284.95), absolute_magnitude: -9.395, mean_opposition_magnitude: Some(-2.70) },
    PlanetRow { planet: MajorPlanet::Saturn, kind: BodyKind::Saturn, radius_km: 60_268.0, oblateness: 0.097_96, albedo: 0.499,
        rotation: (40.589, 83.537, 0.444_009, 38.90), absolute_magnitude: -8.914, mean_opposition_magnitude: Some(0.67) },
    PlanetRow { planet: MajorPlanet::Uranus, kind: BodyKind::Uranus, radius_km: 25_559.0, oblateness: 0.022_93, albedo: 0.488,
        rotation: (257.311, -15.175, -0.718_33, 203.81), absolute_magnitude: -7.110, mean_opposition_magnitude: Some(5.52) },
    PlanetRow { planet: MajorPlanet::Neptune, kind: BodyKind::Neptune, radius_km: 24_764.0, oblateness: 0.017_08, albedo: 0.442,
        rotation: (299.36, 43.46, 0.671_25, 249.978), absolute_magnitude: -7.00, mean_opposition_magnitude: Some(7.84) },
];

/// Sun, the eight major planets, Pluto, the Moon and the moons of Mars
pub(super) fn build() -> Result<SolarSystem> {
    let mut system = SolarSystem::new();

    let sun = system.add(
        Planet::builder("Sun", BodyKind::Sun, SUN_RADIUS_KM)
            .rotation(spin(286.13, 63.87, 25.38, 84.176))
            .absolute_magnitude(SUN_ABSOLUTE_MAGNITUDE)
            .build()?,
    )?;

    for row in PLANETS.iter() {
        let (ra, dec, period, w0) = row.rotation;
        let mut builder = Planet::builder(row.planet.name(), row.kind, row.radius_km)
            .oblateness(row.oblateness)
            .albedo(row.albedo)
            .parent(sun)
            .orbit(Vsop87Orbit::new(row.planet))
            .rotation(spin(ra, dec, period, w0))
            .absolute_magnitude(row.absolute_magnitude);
        if let Some(mag) = row.mean_opposition_magnitude {
            builder = builder.mean_opposition_magnitude(mag);
        }
        if row.planet == MajorPlanet::Saturn {
            // C ring inner edge to A ring outer edge
            builder = builder.ring(Ring::new(74_658.0, 136_775.0)?);
        }
        system.add(builder.build()?)?;
    }

    let pluto_a = 39.482_116_75;
    system.add(
        Planet::builder("Pluto", BodyKind::Pluto, 1_188.3)
            .albedo(0.52)
            .parent(sun)
            .orbit(KeplerOrbit::new(
                pluto_a,
                0.248_827_30,
                17.140_012_06,
                110.303_936_84,
                113.764_979_45,
                14.860_122_04,
                J2000,
                heliocentric_period(pluto_a),
            ))
            .rotation(spin(132.993, -6.163, -6.387_23, 302.695))
            .absolute_magnitude(-1.01)
            .mean_opposition_magnitude(15.12)
            .build()?,
    )?;

    let earth = system.find("Earth")?;
    system.add(
        Planet::builder("Moon", BodyKind::Moon, 1_738.1)
            .oblateness(0.0012)
            .albedo(0.12)
            .parent(earth)
            .orbit(LunarOrbit::new())
            .rotation(spin(269.9949, 66.5392, 27.321_661, 38.3213))
            .absolute_magnitude(0.21)
            .mean_opposition_magnitude(-12.74)
            .build()?,
    )?;

    let mars = system.find("Mars")?;
    let mars_equator = system.get(mars).pole();
    system.add(
        Planet::builder("Phobos", BodyKind::Other, 11.08)
            .albedo(0.071)
            .parent(mars)
            .orbit(
                KeplerOrbit::new(km_to_au(9_376.0), 0.0151, 1.075, 207.784, 150.057, 91.059, MARS_SATELLITE_EPOCH, 0.318_9)
                    .with_reference(mars_equator)
                    .with_precession(-1.1 * JULIAN_YEAR, 1.1 * JULIAN_YEAR),
            )
            .rotation(spin(317.670_716_57, 52.886_272_66, 0.318_910_2, 35.187_7))
            .absolute_magnitude(11.8)
            .mean_opposition_magnitude(11.8)
            .build()?,
    )?;
    system.add(
        Planet::builder("Deimos", BodyKind::Other, 6.2)
            .albedo(0.068)
            .parent(mars)
            .orbit(
                KeplerOrbit::new(km_to_au(23_458.0), 0.0002, 1.788, 24.525, 260.729, 325.329, MARS_SATELLITE_EPOCH, 1.262_4)
                    .with_reference(mars_equator)
                    .with_precession(-54.5 * JULIAN_YEAR, 54.5 * JULIAN_YEAR),
            )
            .rotation(spin(316.657_058_08, 53.509_920_33, 1.262_44, 79.399_32))
            .absolute_magnitude(12.89)
            .mean_opposition_magnitude(12.89)
            .build()?,
    )?;

    debug!("built default catalogue with {} bodies", system.len());
    Ok(system)
}
