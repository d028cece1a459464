//! Pure-component correlations for hydrogen peroxide (H2O2).

use super::{PropertyError, eos, water};
use crate::constants::{M_H2O2, PC_H2O2, TC_H2O2};
use crate::conversion::c2k;

pub const SPECIES: &str = "H2O2";

/// Density of liquid hydrogen peroxide in kg/L.
///
/// Offset fit on top of the water density; pinned to a constant above
/// 100 deg C where the underlying fit leaves its range.
pub fn density_l(t: f64) -> f64 {
    if t >= 100.0 {
        return 1.2456174226244978;
    }

    let jb = 0.39763;
    let jc = 0.02206;
    let jd = 0.05187;
    let kb = -2.8732e-3;
    let kc = 3.5357e-3;
    let kd = -1.9414e-3;
    let lb = 3.2488e-5;
    let lc = -6.0947e-5;
    let ld = 3.9061e-5;
    let mb = -1.6363e-7;
    let mc = 3.6165e-7;
    let md = -2.5500e-7;

    let n = jb + kb * t + lb * t.powi(2) + mb * t.powi(3);
    let o = jc + kc * t + lc * t.powi(2) + mc * t.powi(3);
    let p = jd + kd * t + ld * t.powi(2) + md * t.powi(3);

    water::density_l(t) + n + o.powi(2) + p.powi(3)
}

/// Saturation pressure of hydrogen peroxide in kPa.
pub fn psat(t: f64) -> f64 {
    let d = 7.96917;
    let e = 1886.76;
    let f = 220.6;

    10f64.powf(d - e / (f + t)) * (101.325 / 760.0)
}

/// Constant pressure heat capacity of liquid hydrogen peroxide in J/(g·K).
pub fn cp_l(t: f64) -> f64 {
    let a = 0.657;
    let b = 2.11e-4;

    (a + b * t) * 4.184
}

/// Constant pressure heat capacity of hydrogen peroxide vapour in J/(g·K).
pub fn cp_g(t: f64) -> f64 {
    let f = 34.25667;
    let g = 55.18445;
    let h = -35.15443;
    let i = 9.087440;
    let j = -0.422157;

    let tref = c2k(t) / 1000.0;

    (f + g * tref + h * tref.powi(2) + i * tref.powi(3) + j / tref.powi(2)) / M_H2O2
}

/// Activity coefficient of hydrogen peroxide.
/// The argument stays the liquid mole fraction of *water*; gamma(0) = 1.
pub fn gamma(t: f64, x_h2o: f64) -> f64 {
    super::scatchard_gamma_peroxide(c2k(t), x_h2o)
}

/// Reduced conditions for the RK-EOS, (Tr, Pr).
pub fn reduced(t: f64, p: f64) -> (f64, f64) {
    (
        eos::reduced_temperature(t, TC_H2O2),
        eos::reduced_pressure(p, PC_H2O2),
    )
}

/// Vapour compressibility factor of hydrogen peroxide at T (deg C) and P (kPa).
pub fn compressibility(t: f64, p: f64) -> Result<f64, PropertyError> {
    let (tr, pr) = reduced(t, p);
    eos::compressibility(SPECIES, tr, pr)
}
