//! # Physical Properties Module
//!
//! Correlations for the three species present in a decomposing hydrogen
//! peroxide batch: water, hydrogen peroxide and oxygen, plus mixture-level
//! quantities shared by the energy balance and the vent flow model.
//!
//! Per species (water, peroxide):
//! - liquid density
//! - Antoine saturation pressure
//! - liquid and vapour constant pressure heat capacities
//! - Scatchard activity coefficient (function of the water liquid mole fraction)
//! - Redlich-Kwong compressibility
//!
//! Oxygen carries only the vapour heat capacity and the RK compressibility.
//!
//! ## Units
//!
//! Temperatures enter in degrees Celsius, pressures in kPa. Densities come
//! out in kg/L, heat capacities in J/(g·K), all dimensionless quantities as
//! plain ratios. PAY ATTENTION TO THE DIMENSION OF INPUT PARAMETERS.

pub mod eos;
pub mod mixture;
pub mod oxygen;
pub mod peroxide;
mod properties_tests;
pub mod water;

use crate::constants::R;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyError {
    #[error("correlation `{correlation}` for {species} evaluated outside its valid range (argument {t})")]
    DomainError {
        species: &'static str,
        correlation: &'static str,
        t: f64,
    },
    #[error("no physical RK-EOS root for {species} at Tr = {tr}, Pr = {pr}")]
    NoEosRoot {
        species: &'static str,
        tr: f64,
        pr: f64,
    },
}

/// Temperature-dependent coefficients (Ba, Bb, Bc, Bd) of the Scatchard
/// excess Gibbs energy expansion for aqueous hydrogen peroxide.
///
/// Ba switches between four fitted branches with breakpoints at
/// 317.636 K, 348.222 K and 391.463 K; the middle transition branch is the
/// arithmetic mean of its neighbours so the coefficient stays continuous.
pub(crate) fn scatchard_coefficients(t_k: f64) -> (f64, f64, f64, f64) {
    use std::f64::consts::PI;

    let ca0 = -999.883;
    let ca1 = -2499.584;
    let ca2: f64 = 8.261924;
    let ca3 = 327.4487;
    let p10 = 17418.34;
    let p11 = -109.9125;
    let p12 = 0.1663847;
    let p20 = -6110.401;
    let p21 = 28.08669;
    let p22 = -0.03587408;
    let ca01 = 126.7385;
    let ca11 = -2558.776;
    let ca21: f64 = 12.33364;
    let ca31 = 343.105;
    let ca02 = 63.18354;
    let ca12 = -149.9278;
    let ca22 = 0.4745954;
    let ca32 = 348.1642;
    let ca03 = 59.42228;
    let ca13 = -199.2644;
    let ca23 = 0.8321514;
    let ca33 = 346.2121;

    let lorentz = ca0 + (ca1 * ca2) / (PI * (ca2.powi(2) + (t_k - ca3).powi(2)));

    let ba = if t_k > 0.0 && t_k <= 317.636 {
        lorentz
    } else if t_k > 317.636 && t_k <= 348.222 {
        (lorentz + (p12 * t_k.powi(2) + p11 * t_k + p10)) / 2.0
    } else if t_k > 348.222 && t_k <= 391.463 {
        p22 * t_k.powi(2) + p21 * t_k + p20
    } else {
        -612.9613
    };

    let bb = ca01 + (ca11 * ca21) / (PI * (ca21.powi(2) + (t_k - ca31).powi(2)));

    let bc = ca02 + ca12 / (1.0 + (ca22 * (t_k - ca32)).exp());

    let bd = ca03 + ca13 / (1.0 + (ca23 * (t_k - ca33)).exp());

    (ba, bb, bc, bd)
}

/// Activity coefficient of water from the Scatchard expansion.
/// `x_h2o` is the liquid phase mole fraction of water.
pub(crate) fn scatchard_gamma_water(t_k: f64, x_h2o: f64) -> f64 {
    let (ba, bb, bc, bd) = scatchard_coefficients(t_k);
    let x = x_h2o;

    (((1.0 - x.powi(2)) / (R * t_k))
        * (ba
            + bb * (1.0 - 4.0 * x)
            + bc * (1.0 - 2.0 * x) * (1.0 - 6.0 * x)
            + bd * (1.0 - 2.0 * x).powi(2) * (1.0 - 8.0 * x)))
        .exp()
}

/// Activity coefficient of hydrogen peroxide from the same expansion.
/// Note the argument stays the liquid mole fraction of *water*.
pub(crate) fn scatchard_gamma_peroxide(t_k: f64, x_h2o: f64) -> f64 {
    let (ba, bb, bc, bd) = scatchard_coefficients(t_k);
    let x = x_h2o;

    ((x.powi(2) / (R * t_k))
        * (ba
            + bb * (3.0 - 4.0 * x)
            + bc * (1.0 - 2.0 * x) * (5.0 - 6.0 * x)
            + bd * (1.0 - 2.0 * x).powi(2) * (7.0 - 8.0 * x)))
        .exp()
}
