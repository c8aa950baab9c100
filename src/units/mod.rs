//! Atmospheric unit types
//!
//! Thin immutable wrappers around `f64` for the site conditions consumed by
//! the refraction model. Each type stores one canonical unit (millibar for
//! pressure, degrees Celsius for temperature) and converts on request.
//!
//! Multiplicative conversions of an exact zero return `0.0` untouched, so a
//! zero reading never turns into `-0.0` on the way through a negative factor.

use serde::{Deserialize, Serialize};

/// Millibars per inch of mercury
const MBAR_PER_INHG: f64 = 33.863_886_666_7;
/// Millibars per millimetre of mercury
const MBAR_PER_MMHG: f64 = 1.333_223_684_2;

/// Absolute zero expressed in degrees Celsius
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

fn scale(value: f64, factor: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value * factor
    }
}

/// Atmospheric pressure, stored in millibar (identical to hectopascal)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pressure(f64);

impl Pressure {
    /// Standard sea-level pressure
    pub const STANDARD: Pressure = Pressure(1013.25);

    pub fn from_millibar(mbar: f64) -> Self {
        Pressure(mbar)
    }

    pub fn from_hectopascal(hpa: f64) -> Self {
        Pressure(hpa)
    }

    pub fn from_inches_hg(inhg: f64) -> Self {
        Pressure(scale(inhg, MBAR_PER_INHG))
    }

    pub fn from_mm_hg(mmhg: f64) -> Self {
        Pressure(scale(mmhg, MBAR_PER_MMHG))
    }

    pub fn millibar(&self) -> f64 {
        self.0
    }

    pub fn hectopascal(&self) -> f64 {
        self.0
    }

    pub fn inches_hg(&self) -> f64 {
        scale(self.0, 1.0 / MBAR_PER_INHG)
    }

    pub fn mm_hg(&self) -> f64 {
        scale(self.0, 1.0 / MBAR_PER_MMHG)
    }
}

impl Default for Pressure {
    fn default() -> Self {
        Pressure::STANDARD
    }
}

/// Air temperature, stored in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Temperature(celsius)
    }

    pub fn from_kelvin(kelvin: f64) -> Self {
        Temperature(kelvin + ABSOLUTE_ZERO_C)
    }

    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Temperature(scale(fahrenheit - 32.0, 5.0 / 9.0))
    }

    pub fn celsius(&self) -> f64 {
        self.0
    }

    pub fn kelvin(&self) -> f64 {
        self.0 - ABSOLUTE_ZERO_C
    }

    pub fn fahrenheit(&self) -> f64 {
        scale(self.0, 9.0 / 5.0) + 32.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature(10.0)
    }
}
