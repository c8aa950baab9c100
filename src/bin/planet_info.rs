//! Solar System Body Information Tool
//!
//! Prints the heliocentric position, the geometry seen from an observer
//! body, the rotation pole and the visual magnitude of a body at a given
//! instant. With `--altitude` the magnitude is also pushed through
//! refraction and atmospheric extinction.
//!
//! Usage:
//!   cargo run --bin planet_info -- Saturn --date 2024-09-08T00:00:00Z --altitude 25

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use log::info;
use nalgebra::Vector3;
use solarfield::constants::au_to_km;
use solarfield::framelib::inertial::{Equatorial, InertialFrame};
use solarfield::framelib::vsop87_to_j2000;
use solarfield::time::{jde_from_utc, julian_day};
use solarfield::{ApparentMagnitudeAlgorithm, ObservingConfig, SolarSystem};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Solar System Body Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shows position, pole orientation and visual magnitude of a solar system body",
    long_about = None
)]
struct Args {
    /// Body to describe, e.g. "Jupiter" or "Phobos"
    #[arg(required_unless_present = "list")]
    body: Option<String>,

    /// UTC instant in RFC 3339 form; defaults to now
    #[arg(long)]
    date: Option<DateTime<Utc>>,

    /// Julian Ephemeris Day, overrides --date
    #[arg(long)]
    jde: Option<f64>,

    /// Body the observer stands on, overrides the configuration
    #[arg(short, long)]
    observer: Option<String>,

    /// Magnitude algorithm, overrides the configuration
    #[arg(short, long)]
    algorithm: Option<ApparentMagnitudeAlgorithm>,

    /// JSON observing configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Geometric altitude of the body above the horizon in degrees
    #[arg(long, allow_hyphen_values = true)]
    altitude: Option<f64>,

    /// List the known bodies and exit
    #[arg(short, long, action = ArgAction::SetTrue)]
    list: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<24}{}", format!("{}:", name), value);
}

fn list_bodies(system: &SolarSystem) {
    print_section_header("Known bodies");
    for (_, body) in system.iter() {
        let parent = body.parent().map(|p| system.get(p).name()).unwrap_or("-");
        println!("{:<10} orbits {:<8} radius {:>10.1} km", body.name(), parent, body.radius_km());
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ObservingConfig::from_json_file(path)?,
        None => ObservingConfig::default(),
    };
    if let Some(observer) = &args.observer {
        config.observer = observer.clone();
    }
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }

    let system = SolarSystem::default_catalogue()?;
    if args.list {
        list_bodies(&system);
        return Ok(());
    }

    let name = args.body.as_deref().unwrap_or_default();
    let target = system.find(name)?;
    let observer = system.find(&config.observer)?;
    let body = system.get(target);

    let jde = match (args.jde, args.date) {
        (Some(jde), _) => jde,
        (None, Some(date)) => jde_from_utc(&date),
        (None, None) => jde_from_utc(&Utc::now()),
    };
    info!("evaluating {} from {} at JDE {jde}", body.name(), config.observer);

    println!("{} seen from {}", body.name(), system.get(observer).name());
    println!("-------------------------------------------------------");
    print_named_value("JDE", format!("{jde:.6}"));
    if let Some(date) = args.date {
        print_named_value("JD (UTC)", format!("{:.6}", julian_day(&date)));
    }

    print_section_header("Orbit");
    let state = system.heliocentric_state(target, jde);
    let p = state.position;
    let v = state.velocity;
    print_named_value("Heliocentric position", format!("{:+.9} {:+.9} {:+.9} AU", p.x, p.y, p.z));
    print_named_value("Heliocentric velocity", format!("{:+.9} {:+.9} {:+.9} AU/d", v.x, v.y, v.z));
    print_named_value("Sun distance", format!("{:.6} AU", state.distance()));
    let orbit = body.orbit();
    if orbit.sidereal_period() > 0.0 {
        print_named_value("Semi-major axis", format!("{:.8} AU", orbit.semi_major_axis()));
        print_named_value("Eccentricity", format!("{:.8}", orbit.eccentricity()));
        print_named_value("Sidereal period", format!("{:.4} d", orbit.sidereal_period()));
    }

    if target != observer {
        print_section_header("Observation");
        let observation = system.observe(target, observer, jde);
        let radec = Equatorial::from_vector(&vsop87_to_j2000(&observation.relative_position()));
        let distance = observation.distance();
        print_named_value("RA (J2000)", format!("{:.5}°", radec.ra.to_degrees()));
        print_named_value("Dec (J2000)", format!("{:+.5}°", radec.dec.to_degrees()));
        if distance < 0.01 {
            print_named_value("Distance", format!("{:.1} km", au_to_km(distance)));
        } else {
            print_named_value("Distance", format!("{distance:.6} AU"));
        }
        print_named_value("Phase angle", format!("{:.3}°", observation.inputs.phase_angle.to_degrees()));
        print_named_value("Elongation", format!("{:.3}°", observation.elongation().to_degrees()));
        if observation.inputs.shadow_factor < 1.0 {
            print_named_value("Shadow factor", format!("{:.3e}", observation.inputs.shadow_factor));
        }
    }

    print_section_header("Rotation");
    let pole = body.pole();
    let rotation = body.rotation();
    print_named_value(
        "Pole (J2000)",
        format!("RA {:.4}°, Dec {:+.4}°", rotation.pole_ra.to_degrees(), rotation.pole_dec.to_degrees()),
    );
    print_named_value("Obliquity", format!("{:.6} rad", pole.obliquity));
    print_named_value("Ascending node", format!("{:.6} rad", pole.ascending_node));
    if rotation.period != 0.0 {
        print_named_value("Rotation angle", format!("{:.3}°", rotation.rotation_angle(jde).to_degrees()));
    }

    if target == observer {
        return Ok(());
    }

    print_section_header("Photometry");
    let magnitude = system.visual_magnitude(target, observer, jde, config.algorithm);
    print_named_value("Algorithm", config.algorithm);
    print_named_value("Visual magnitude", format!("{magnitude:+.2}"));
    if let Some(mag) = body.mean_opposition_magnitude() {
        print_named_value("Mean opposition", format!("{mag:+.2}"));
    }

    if let Some(altitude) = args.altitude {
        let alt = altitude.to_radians();
        let geometric = Vector3::new(alt.cos(), 0.0, alt.sin());
        let apparent = config.refraction().forward(&geometric);
        let extinction = config.extinction();
        let apparent_alt = (apparent.z / apparent.norm()).asin().to_degrees();
        print_named_value("Apparent altitude", format!("{apparent_alt:.4}°"));
        print_named_value(
            "Extinction",
            format!("k = {} mag/airmass, below horizon: {}", extinction.coefficient(), extinction.mode()),
        );
        print_named_value("Observed magnitude", format!("{:+.2}", extinction.forward(&apparent, magnitude)));
    }

    Ok(())
}
