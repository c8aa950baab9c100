//! Atmospheric refraction
//!
//! Converts between geometric (true) and apparent altitudes of an alt-az
//! direction vector. The forward direction uses Saemundsson (1986), the
//! backward direction Bennett (1982), both as given in Meeus, *Astronomical
//! Algorithms* ch. 16, scaled by the site pressure and temperature.
//!
//! Near and below the horizon both formulas blow up, so below a cut-off
//! altitude the correction fades linearly to zero across a transition band.
//! The result is the refracted direction fed to [`Extinction`](super::Extinction).

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::units::{Pressure, Temperature};
use log::warn;
use nalgebra::Vector3;

/// Lowest geometric altitude receiving the full Saemundsson correction, degrees
const MIN_GEO_ALTITUDE_DEG: f64 = -3.54;
/// Lowest apparent altitude receiving the full Bennett correction, degrees
const MIN_APP_ALTITUDE_DEG: f64 = -3.21;
/// Width of the fade-out band below the geometric cut-off, degrees
const TRANSITION_WIDTH_GEO_DEG: f64 = 1.46;
/// Width of the fade-out band below the apparent cut-off, degrees
const TRANSITION_WIDTH_APP_DEG: f64 = 1.79;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    pressure: Pressure,
    temperature: Temperature,
    /// `P/1010 · 283/(273+T) / 60`, converts the formulas' arcminutes to degrees
    press_temp_corr: f64,
}

impl Refraction {
    pub fn new(pressure: Pressure, temperature: Temperature) -> Self {
        if pressure.millibar() < 0.0 {
            warn!("negative pressure {} mbar, refraction disabled", pressure.millibar());
        }
        let mbar = pressure.millibar().max(0.0);
        Refraction {
            pressure,
            temperature,
            press_temp_corr: mbar / 1010.0 * 283.0 / (273.0 + temperature.celsius()) / 60.0,
        }
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Refraction in degrees to add to a geometric altitude (Saemundsson)
    fn saemundsson(&self, geo_alt_deg: f64) -> f64 {
        self.press_temp_corr
            * (1.02 / ((geo_alt_deg + 10.3 / (geo_alt_deg + 5.11)) * DEG2RAD).tan() + 0.0019279)
    }

    /// Refraction in degrees to subtract from an apparent altitude (Bennett)
    fn bennett(&self, app_alt_deg: f64) -> f64 {
        self.press_temp_corr
            * (1.0 / ((app_alt_deg + 7.31 / (app_alt_deg + 4.4)) * DEG2RAD).tan() + 0.0013515)
    }

    /// Apparent altitude in degrees for a geometric one
    pub fn apparent_altitude(&self, geo_alt_deg: f64) -> f64 {
        if geo_alt_deg > MIN_GEO_ALTITUDE_DEG {
            (geo_alt_deg + self.saemundsson(geo_alt_deg)).min(90.0)
        } else if geo_alt_deg > MIN_GEO_ALTITUDE_DEG - TRANSITION_WIDTH_GEO_DEG {
            let bottom = MIN_GEO_ALTITUDE_DEG - TRANSITION_WIDTH_GEO_DEG;
            geo_alt_deg
                + self.saemundsson(MIN_GEO_ALTITUDE_DEG) * (geo_alt_deg - bottom) / TRANSITION_WIDTH_GEO_DEG
        } else {
            geo_alt_deg
        }
    }

    /// Geometric altitude in degrees for an apparent one
    pub fn geometric_altitude(&self, app_alt_deg: f64) -> f64 {
        if app_alt_deg > MIN_APP_ALTITUDE_DEG {
            app_alt_deg - self.bennett(app_alt_deg)
        } else if app_alt_deg > MIN_APP_ALTITUDE_DEG - TRANSITION_WIDTH_APP_DEG {
            let bottom = MIN_APP_ALTITUDE_DEG - TRANSITION_WIDTH_APP_DEG;
            app_alt_deg
                - self.bennett(MIN_APP_ALTITUDE_DEG) * (app_alt_deg - bottom) / TRANSITION_WIDTH_APP_DEG
        } else {
            app_alt_deg
        }
    }

    /// Lift a geometric alt-az vector to its apparent direction
    pub fn forward(&self, alt_az: &Vector3<f64>) -> Vector3<f64> {
        self.adjust(alt_az, |alt| self.apparent_altitude(alt))
    }

    /// Lower an apparent alt-az vector to its geometric direction
    pub fn backward(&self, alt_az: &Vector3<f64>) -> Vector3<f64> {
        self.adjust(alt_az, |alt| self.geometric_altitude(alt))
    }

    /// Replace the altitude of `alt_az` keeping its azimuth and length
    fn adjust(&self, alt_az: &Vector3<f64>, map: impl Fn(f64) -> f64) -> Vector3<f64> {
        let length = alt_az.norm();
        if length == 0.0 {
            return *alt_az;
        }

        let sin_old = (alt_az.z / length).clamp(-1.0, 1.0);
        let new_alt = map(sin_old.asin() * RAD2DEG) * DEG2RAD;
        let sin_new = new_alt.sin();

        // Shrink or stretch the horizontal part by the ratio of altitude cosines
        let shorten_xy = if sin_old.abs() >= 1.0 {
            1.0
        } else {
            ((1.0 - sin_new * sin_new) / (1.0 - sin_old * sin_old)).sqrt()
        };

        Vector3::new(alt_az.x * shorten_xy, alt_az.y * shorten_xy, sin_new * length)
    }
}

impl Default for Refraction {
    fn default() -> Self {
        Refraction::new(Pressure::STANDARD, Temperature::default())
    }
}
