//! Observing configuration
//!
//! Site and photometry settings loaded from JSON. Every field is optional;
//! missing ones take the defaults below.
//!
//! ```json
//! {
//!   "observer": "Earth",
//!   "algorithm": "explanatory_supplement_2013",
//!   "extinction_coefficient": 0.2,
//!   "underground_mode": "mirror",
//!   "pressure_mbar": 850.0,
//!   "temperature_celsius": -5.0
//! }
//! ```

use crate::atmosphere::extinction::DEFAULT_EXTINCTION_COEFFICIENT;
use crate::atmosphere::{Extinction, Refraction, UndergroundMode};
use crate::magnitude::ApparentMagnitudeAlgorithm;
use crate::units::{Pressure, Temperature, ABSOLUTE_ZERO_C};
use crate::{Result, SolarfieldError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservingConfig {
    /// Name of the body the observer stands on
    pub observer: String,
    pub algorithm: ApparentMagnitudeAlgorithm,
    /// Magnitudes per airmass
    pub extinction_coefficient: f64,
    pub underground_mode: UndergroundMode,
    pub pressure_mbar: f64,
    pub temperature_celsius: f64,
}

impl Default for ObservingConfig {
    fn default() -> Self {
        ObservingConfig {
            observer: "Earth".to_string(),
            algorithm: ApparentMagnitudeAlgorithm::default(),
            extinction_coefficient: DEFAULT_EXTINCTION_COEFFICIENT,
            underground_mode: UndergroundMode::default(),
            pressure_mbar: Pressure::STANDARD.millibar(),
            temperature_celsius: Temperature::default().celsius(),
        }
    }
}

impl ObservingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ObservingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject physically impossible values, warn about odd ones
    pub fn validate(&self) -> Result<()> {
        if !self.extinction_coefficient.is_finite() {
            return Err(SolarfieldError::Config("extinction coefficient must be finite".to_string()));
        }
        if !self.pressure_mbar.is_finite() || self.pressure_mbar < 0.0 {
            return Err(SolarfieldError::Config(format!(
                "pressure must be a non-negative number of millibars, got {}",
                self.pressure_mbar
            )));
        }
        if !(self.temperature_celsius > ABSOLUTE_ZERO_C) {
            return Err(SolarfieldError::Config(format!(
                "temperature {} °C is below absolute zero",
                self.temperature_celsius
            )));
        }
        if self.pressure_mbar == 0.0 {
            warn!("pressure is 0 mbar, refraction is disabled");
        }
        if self.extinction_coefficient < 0.0 {
            warn!("negative extinction coefficient {}", self.extinction_coefficient);
        }
        Ok(())
    }

    pub fn extinction(&self) -> Extinction {
        Extinction::new(self.extinction_coefficient, self.underground_mode)
    }

    pub fn refraction(&self) -> Refraction {
        Refraction::new(
            Pressure::from_millibar(self.pressure_mbar),
            Temperature::from_celsius(self.temperature_celsius),
        )
    }
}
