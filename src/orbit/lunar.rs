//! Geocentric orbit of the Moon
//!
//! Truncated ELP-2000/82 series as tabulated in Meeus, *Astronomical
//! Algorithms* (2nd ed.) ch. 47: the 60 largest longitude/distance terms, the
//! 30 largest latitude terms and the planetary additive terms. Accuracy is
//! about 10" in longitude and a few km in distance, plenty for photometry.
//!
//! The series yields the mean ecliptic and equinox of date. The longitude is
//! carried back to J2000 with the general precession in longitude; the
//! remaining tilt of the ecliptic over a few centuries is below the
//! truncation error.

use super::{central_difference, Orbit, StateVector};
use crate::constants::{km_to_au, DEG2RAD, MOON_MEAN_DISTANCE_KM};
use crate::time::julian_centuries;
use nalgebra::Vector3;

const VELOCITY_STEP_DAYS: f64 = 1e-3;

/// Mean Earth–Moon distance in km, the constant term of the distance series
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Multipliers of D, M, M', F followed by Σl (1e-6 deg) and Σr (1e-3 km)
#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
    (2, 1, 1, 0, -810.0, 2_616.0),
    (4, -1, -2, 0, 759.0, -1_897.0),
    (0, 2, -1, 0, -713.0, -2_117.0),
    (2, 2, -1, 0, -700.0, 2_354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1_423.0),
    (0, 0, 4, 0, 537.0, -1_117.0),
    (4, -1, 0, 0, 520.0, -1_571.0),
    (1, 0, -2, 0, -487.0, -1_739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4_421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1_165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8_752.0),
];

/// Multipliers of D, M, M', F followed by Σb (1e-6 deg)
#[rustfmt::skip]
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

/// Polynomial in T, reduced to [0, 360) and returned in radians
fn angle(coefficients: &[f64], t: f64) -> f64 {
    let degrees = coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c);
    degrees.rem_euclid(360.0) * DEG2RAD
}

/// Longitude and latitude (degrees) and distance (km), mean ecliptic of date
pub(crate) fn geocentric_of_date(jde: f64) -> (f64, f64, f64) {
    let t = julian_centuries(jde);

    let l_prime = angle(&[218.316_447_7, 481_267.881_234_21, -0.001_578_6, 1.0 / 538_841.0, -1.0 / 65_194_000.0], t);
    let d = angle(&[297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0], t);
    let m = angle(&[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0], t);
    let m_prime = angle(&[134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0], t);
    let f = angle(&[93.272_095_0, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0], t);
    let a1 = angle(&[119.75, 131.849], t);
    let a2 = angle(&[53.09, 479_264.290], t);
    let a3 = angle(&[313.45, 481_266.484], t);

    // Damps terms in M for the decreasing eccentricity of Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t * t;
    let eccentricity_factor = |mm: i8| match mm.abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    };
    let argument = |dd: i8, mm: i8, mp: i8, ff: i8| {
        dd as f64 * d + mm as f64 * m + mp as f64 * m_prime + ff as f64 * f
    };

    let mut sigma_l = 0.0;
    let mut sigma_r = 0.0;
    for &(dd, mm, mp, ff, l_coef, r_coef) in LONGITUDE_DISTANCE_TERMS.iter() {
        let arg = argument(dd, mm, mp, ff);
        let factor = eccentricity_factor(mm);
        sigma_l += l_coef * factor * arg.sin();
        sigma_r += r_coef * factor * arg.cos();
    }

    let mut sigma_b = 0.0;
    for &(dd, mm, mp, ff, b_coef) in LATITUDE_TERMS.iter() {
        sigma_b += b_coef * eccentricity_factor(mm) * argument(dd, mm, mp, ff).sin();
    }

    // Venus, Jupiter and the flattening of the Earth
    sigma_l += 3958.0 * a1.sin() + 1962.0 * (l_prime - f).sin() + 318.0 * a2.sin();
    sigma_b += -2235.0 * l_prime.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l_prime - m_prime).sin()
        - 115.0 * (l_prime + m_prime).sin();

    let longitude = (l_prime.to_degrees() + sigma_l / 1e6).rem_euclid(360.0);
    let latitude = sigma_b / 1e6;
    let distance = MEAN_DISTANCE_KM + sigma_r / 1000.0;
    (longitude, latitude, distance)
}

/// The Moon around the Earth
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LunarOrbit;

impl LunarOrbit {
    pub fn new() -> Self {
        LunarOrbit
    }

    fn position(&self, jde: f64) -> Vector3<f64> {
        let t = julian_centuries(jde);
        let (lon, lat, dist) = geocentric_of_date(jde);
        let precession = (5029.0966 * t + 1.11113 * t * t) / 3600.0;
        let lon = (lon - precession) * DEG2RAD;
        let lat = lat * DEG2RAD;
        km_to_au(dist) * Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }
}

impl Orbit for LunarOrbit {
    fn position_at(&self, jde: f64) -> StateVector {
        StateVector::new(
            self.position(jde),
            central_difference(|t| self.position(t), jde, VELOCITY_STEP_DAYS),
        )
    }

    fn semi_major_axis(&self) -> f64 {
        km_to_au(MOON_MEAN_DISTANCE_KM)
    }

    fn eccentricity(&self) -> f64 {
        0.0549
    }

    fn sidereal_period(&self) -> f64 {
        27.321_661
    }
}
