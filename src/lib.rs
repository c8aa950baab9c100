//! Solarfield: positions, poles and brightness of solar system bodies
//!
//! The crate evaluates where a planet or moon is at a given Julian Ephemeris
//! Day, how its rotation pole is oriented, how bright it appears to an
//! observer on another body, and how much of that light survives the trip
//! through Earth's atmosphere.
//!
//! ```rust
//! use nalgebra::Vector3;
//! use solarfield::atmosphere::Extinction;
//! use solarfield::magnitude::ApparentMagnitudeAlgorithm;
//! use solarfield::planetlib::SolarSystem;
//!
//! let system = SolarSystem::default_catalogue()?;
//! let earth = system.find("Earth")?;
//! let saturn = system.find("Saturn")?;
//!
//! let mag = system.visual_magnitude(saturn, earth, 2_460_200.5, ApparentMagnitudeAlgorithm::AstronomicalAlmanac1984);
//!
//! // Thirty degrees above the horizon
//! let alt_az = Vector3::new(0.866, 0.0, 0.5);
//! let observed = Extinction::default().forward(&alt_az, mag);
//! assert!(observed > mag);
//! # Ok::<(), solarfield::SolarfieldError>(())
//! ```

use thiserror::Error;

pub mod atmosphere;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod framelib;
pub mod magnitude;
pub mod orbit;
pub mod planetlib;
pub mod rotation;
pub mod time;
pub mod units;

pub use atmosphere::{Extinction, Refraction, UndergroundMode};
pub use config::ObservingConfig;
pub use magnitude::ApparentMagnitudeAlgorithm;
pub use orbit::{Orbit, StateVector};
pub use planetlib::{BodyId, Planet, SolarSystem};

/// Main error type for the solarfield library
#[derive(Debug, Error)]
pub enum SolarfieldError {
    #[error("Body not found: {0}")]
    BodyNotFound(String),

    #[error("Invalid body {name}: {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown magnitude algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type for solarfield operations
pub type Result<T> = std::result::Result<T, SolarfieldError>;
