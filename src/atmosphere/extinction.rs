//! Atmospheric extinction
//!
//! Light from a body loses `k · X` magnitudes on its way through the
//! atmosphere, where `k` is the site's extinction coefficient (mag/airmass)
//! and `X` the airmass along the line of sight.

use log::warn;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SolarfieldError;

/// Airmass reported below the horizon in [`UndergroundMode::Max`]
///
/// A practical "fully extinguished" sentinel, not a physically derived value.
/// Downstream comparisons may rely on the exact number.
pub const MAX_UNDERGROUND_AIRMASS: f64 = 42.0;

/// Cosine of the zenith angle below which a body counts as underground (about 2° below the horizon)
pub const UNDERGROUND_COS_Z: f64 = -0.035;

/// Default visual extinction coefficient for a good site, mag/airmass
pub const DEFAULT_EXTINCTION_COEFFICIENT: f64 = 0.13;

/// How airmass behaves for objects more than ~2° below the horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndergroundMode {
    /// No extinction at all
    Zero,
    /// Saturate at [`MAX_UNDERGROUND_AIRMASS`]
    Max,
    /// Reflect the depth below the horizon back above it
    Mirror,
}

impl Default for UndergroundMode {
    fn default() -> Self {
        UndergroundMode::Max
    }
}

impl fmt::Display for UndergroundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UndergroundMode::Zero => "zero",
            UndergroundMode::Max => "max",
            UndergroundMode::Mirror => "mirror",
        };
        f.write_str(name)
    }
}

impl FromStr for UndergroundMode {
    type Err = SolarfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(UndergroundMode::Zero),
            "max" => Ok(UndergroundMode::Max),
            "mirror" => Ok(UndergroundMode::Mirror),
            other => Err(SolarfieldError::Config(format!(
                "unknown underground extinction mode '{other}'"
            ))),
        }
    }
}

/// Extinction model: coefficient plus below-horizon policy
///
/// ```rust
/// use nalgebra::Vector3;
/// use solarfield::atmosphere::Extinction;
///
/// let ext = Extinction::default();
/// let zenith = Vector3::new(0.0, 0.0, 1.0);
/// let dimmed = ext.forward(&zenith, 1.0);
/// assert!((dimmed - 1.13).abs() < 1e-3);
/// assert!((ext.backward(&zenith, dimmed) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extinction {
    coefficient: f64,
    mode: UndergroundMode,
}

impl Extinction {
    pub fn new(coefficient: f64, mode: UndergroundMode) -> Self {
        if coefficient < 0.0 {
            warn!("negative extinction coefficient {coefficient} brightens objects near the horizon");
        }
        Extinction { coefficient, mode }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn mode(&self) -> UndergroundMode {
        self.mode
    }

    pub fn with_coefficient(self, coefficient: f64) -> Self {
        Extinction::new(coefficient, self.mode)
    }

    pub fn with_mode(self, mode: UndergroundMode) -> Self {
        Extinction { mode, ..self }
    }

    /// Airmass for a given cosine of the zenith angle
    ///
    /// With `apparent_zenith` the angle is the refracted one and Rozenberg
    /// (1966) applies; otherwise the geometric angle and Young (1994).
    pub fn airmass(&self, cos_z: f64, apparent_zenith: bool) -> f64 {
        let mut cz = cos_z;
        if cz < UNDERGROUND_COS_Z {
            match self.mode {
                UndergroundMode::Zero => return 0.0,
                UndergroundMode::Max => return MAX_UNDERGROUND_AIRMASS,
                UndergroundMode::Mirror => {
                    cz = (UNDERGROUND_COS_Z - (cz - UNDERGROUND_COS_Z)).min(1.0);
                }
            }
        }

        if apparent_zenith {
            // Rozenberg 1966, reaches 40 at the horizon
            1.0 / (cz + 0.025 * (-11.0 * cz).exp())
        } else {
            // Young 1994
            let numerator = (1.002432 * cz + 0.148386) * cz + 0.0096467;
            let denominator = ((cz + 0.149864) * cz + 0.0102963) * cz + 0.000303978;
            numerator / denominator
        }
    }

    /// Dim a magnitude for a body at `alt_az` (z is up)
    ///
    /// `alt_az` need not be a unit vector: only its direction is used, the
    /// zenith cosine being `z / |alt_az|`. A zero vector is treated as
    /// lying on the horizon.
    pub fn forward(&self, alt_az: &Vector3<f64>, magnitude: f64) -> f64 {
        magnitude + self.extinction_at(alt_az)
    }

    /// Undo [`forward`](Self::forward): above-atmosphere magnitude from an observed one
    ///
    /// Like `forward`, accepts a direction of any length.
    pub fn backward(&self, alt_az: &Vector3<f64>, magnitude: f64) -> f64 {
        magnitude - self.extinction_at(alt_az)
    }

    fn extinction_at(&self, alt_az: &Vector3<f64>) -> f64 {
        self.airmass(cos_zenith(alt_az), false) * self.coefficient
    }
}

impl Default for Extinction {
    fn default() -> Self {
        Extinction {
            coefficient: DEFAULT_EXTINCTION_COEFFICIENT,
            mode: UndergroundMode::default(),
        }
    }
}

/// Vertical component of the direction, i.e. cos of the zenith angle
fn cos_zenith(alt_az: &Vector3<f64>) -> f64 {
    let length = alt_az.norm();
    if length == 0.0 {
        alt_az.z
    } else {
        alt_az.z / length
    }
}
