//! Pure-component correlations for oxygen (O2).
//!
//! Oxygen is non-condensable here: only the vapour heat capacity and the
//! RK compressibility are needed.

use super::{PropertyError, eos};
use crate::constants::{M_O2, PC_O2, TC_O2};
use crate::conversion::c2k;

pub const SPECIES: &str = "O2";

/// Constant pressure heat capacity of oxygen gas in J/(g·K). Shomate fit.
pub fn cp_g(t: f64) -> f64 {
    let k = 31.32234;
    let l = -20.23531;
    let m = 57.86644;
    let n = -36.50624;
    let o = -0.007374;

    let tref = c2k(t) / 1000.0;

    (k + l * tref + m * tref.powi(2) + n * tref.powi(3) + o / tref.powi(2)) / M_O2
}

/// Reduced conditions for the RK-EOS, (Tr, Pr).
pub fn reduced(t: f64, p: f64) -> (f64, f64) {
    (
        eos::reduced_temperature(t, TC_O2),
        eos::reduced_pressure(p, PC_O2),
    )
}

/// Compressibility factor of oxygen at T (deg C) and P (kPa).
pub fn compressibility(t: f64, p: f64) -> Result<f64, PropertyError> {
    let (tr, pr) = reduced(t, p);
    eos::compressibility(SPECIES, tr, pr)
}
