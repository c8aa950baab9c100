//! Time scale helpers
//!
//! Every orbit and rotation in this crate is a function of the Julian
//! Ephemeris Day (JDE, Terrestrial Time). This module turns civil UTC
//! instants into JDE and provides the epoch offsets used by the series.

use crate::constants::{DAY_S, J2000, JULIAN_CENTURY, JULIAN_MILLENNIUM};
use chrono::{DateTime, Utc};

/// Julian date of the Unix epoch 1970-01-01T00:00:00Z
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Day (UTC) of an instant
pub fn julian_day(dt: &DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / DAY_S
}

/// Julian Ephemeris Day (TT) of a UTC instant, using the ΔT approximation
pub fn jde_from_utc(dt: &DateTime<Utc>) -> f64 {
    let jd = julian_day(dt);
    jd + delta_t(decimal_year(jd)) / DAY_S
}

/// Julian year of a Julian date, e.g. 2000.0 at J2000
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// Julian centuries of TT since J2000
pub fn julian_centuries(jde: f64) -> f64 {
    (jde - J2000) / JULIAN_CENTURY
}

/// Julian millennia of TT since J2000, the VSOP87 time argument
pub fn julian_millennia(jde: f64) -> f64 {
    (jde - J2000) / JULIAN_MILLENNIUM
}

/// ΔT = TT − UT in seconds for a decimal year
///
/// Espenak & Meeus (2006) polynomial fits to the historical record, with the
/// long-term parabola outside the fitted range.
pub fn delta_t(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    match year {
        y if y < -500.0 => long_term(y),
        y if y < 500.0 => {
            let t = y / 100.0;
            horner(t, &[10583.6, -1014.41, 33.78311, -5.952053, -0.1798452, 0.022174192, 0.0090316521])
        }
        y if y < 1600.0 => {
            let t = (y - 1000.0) / 100.0;
            horner(t, &[1574.2, -556.01, 71.23472, 0.319781, -0.8503463, -0.005050998, 0.0083572073])
        }
        y if y < 1700.0 => {
            let t = y - 1600.0;
            horner(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
        }
        y if y < 1800.0 => {
            let t = y - 1700.0;
            horner(t, &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0])
        }
        y if y < 1860.0 => {
            let t = y - 1800.0;
            horner(
                t,
                &[13.72, -0.332447, 0.0068612, 0.0041116, -0.00037436, 0.0000121272, -0.0000001699, 0.000000000875],
            )
        }
        y if y < 1900.0 => {
            let t = y - 1860.0;
            horner(t, &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0])
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            horner(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            horner(t, &[21.20, 0.84493, -0.076100, 0.0020936])
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            horner(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            horner(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            horner(t, &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599])
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            horner(t, &[62.92, 0.32217, 0.005589])
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Evaluate `c[0] + c[1] t + c[2] t² + ...`
fn horner(t: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}
