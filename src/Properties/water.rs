//! Pure-component correlations for water (H2O).

use super::{PropertyError, eos};
use crate::constants::{M_H2O, PC_H2O, TC_H2O};
use crate::conversion::c2k;

pub const SPECIES: &str = "H2O";

/// Density of liquid water in kg/L. Rational polynomial fit in Celsius.
pub fn density_l(t: f64) -> f64 {
    let a = 999.83952;
    let b = 16.945176;
    let c = -7.987040e-3;
    let d = -46.170461e-6;
    let e = 105.56302e-9;
    let f = -280.54253e-12;
    let g = 16.897850e-3;

    ((a + b * t + c * t.powi(2) + d * t.powi(3) + e * t.powi(4) + f * t.powi(5))
        / (1.0 + g * t))
        / 1000.0
}

/// Saturation pressure of water in kPa.
///
/// Antoine fit in mmHg converted to kPa; the coefficient set switches at
/// 99 deg C to the high-temperature fit.
pub fn psat(t: f64) -> f64 {
    let (a, b, c) = if t > 99.0 {
        (8.14019, 1810.94, 244.485)
    } else {
        (8.07131, 1730.63, 233.426)
    };

    10f64.powf(a - b / (c + t)) * (101.325 / 760.0)
}

/// Constant pressure heat capacity of liquid water in J/(g·K).
pub fn cp_l(t: f64) -> f64 {
    let a = -203.606;
    let b = 1523.290;
    let c = -3196.413;
    let d = 2474.455;
    let e = 3.855326;

    let tref = c2k(t) / 1000.0;

    (a + b * tref + c * tref.powi(2) + d * tref.powi(3) + e / tref.powi(2)) / M_H2O
}

/// Constant pressure heat capacity of water vapour in J/(g·K). Shomate fit.
pub fn cp_g(t: f64) -> f64 {
    let a = 30.09200;
    let b = 6.832514;
    let c = 6.793435;
    let d = -2.534480;
    let e = 0.082139;

    let tref = c2k(t) / 1000.0;

    (a + b * tref + c * tref.powi(2) + d * tref.powi(3) + e / tref.powi(2)) / M_H2O
}

/// Activity coefficient of water in aqueous hydrogen peroxide.
/// `x_h2o` is the liquid mole fraction of water; gamma(1) = 1.
pub fn gamma(t: f64, x_h2o: f64) -> f64 {
    super::scatchard_gamma_water(c2k(t), x_h2o)
}

/// Reduced conditions for the RK-EOS, (Tr, Pr).
pub fn reduced(t: f64, p: f64) -> (f64, f64) {
    (
        eos::reduced_temperature(t, TC_H2O),
        eos::reduced_pressure(p, PC_H2O),
    )
}

/// Vapour compressibility factor of water at T (deg C) and P (kPa).
pub fn compressibility(t: f64, p: f64) -> Result<f64, PropertyError> {
    let (tr, pr) = reduced(t, p);
    eos::compressibility(SPECIES, tr, pr)
}
