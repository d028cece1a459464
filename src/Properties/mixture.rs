//! Mixture-level correlations shared by the energy balance and the vent
//! flow model: surface tension, heat of vaporization, specific-volume
//! temperature derivatives, heat-capacity ratio.

use crate::constants::{M_H2O, M_H2O2, M_O2, R, TC_H2O};
use crate::conversion::c2k;

/// Surface tension of the liquid in N/m. Water-based fit against the
/// reduced distance from the critical point.
pub fn surface_tension(t: f64) -> f64 {
    let b_big = 235.8e-3;
    let b = -0.625;
    let u = 1.256;

    let tau = (TC_H2O - c2k(t)) / TC_H2O;

    b_big * tau.powf(u) * (1.0 + b * tau)
}

/// Enthalpy of vaporization of water in J/g. Cubic fit in Celsius.
pub fn dh_vap(t: f64) -> f64 {
    let a = -3e-5;
    let b = 0.0051;
    let c = -2.75588;
    let d = 2500.2;

    a * t.powi(3) + b * t.powi(2) + c * t + d
}

/// Temperature derivative of the liquid specific volume, L/(kg·K).
/// Analytic derivative of the reciprocal water density fit.
pub fn dv_l_dt(t: f64) -> f64 {
    let a = 999.83952;
    let b = 16.945176;
    let c = -7.987040e-3;
    let d = -46.170461e-6;
    let e = 105.56302e-9;
    let f = -280.54253e-12;
    let g = 16.897850e-3;

    -g * (a + b * t + c * t.powi(2) + d * t.powi(3) + e * t.powi(4) + f * t.powi(5))
        / (1000.0 * (g * t + 1.0).powi(2))
        + (b + 2.0 * c * t + 3.0 * d * t.powi(2) + 4.0 * e * t.powi(3) + 5.0 * f * t.powi(4))
            / (1000.0 * (g * t + 1.0))
}

/// Temperature derivative of the vapour specific volume, L/(kg·K),
/// from the ideal-gas form corrected per component by its compressibility:
/// `dvG/dT = R * sum_i 1/(Z_i * M_i * P_i)` over the condensables and oxygen.
///
/// Arguments are (compressibility, partial pressure kPa) pairs.
pub fn dv_g_dt(
    (z_h2o, p_h2o): (f64, f64),
    (z_h2o2, p_h2o2): (f64, f64),
    (z_o2, p_o2): (f64, f64),
) -> f64 {
    R * (1.0 / (z_h2o * M_H2O * p_h2o)
        + 1.0 / (z_h2o2 * M_H2O2 * p_h2o2)
        + 1.0 / (z_o2 * M_O2 * p_o2))
}

/// Heat capacity ratio k = Cp/Cv of the vapour, from the mole-fraction
/// weighted molar Cp and the ideal-gas relation Cv = Cp - R.
///
/// Heat capacities enter in J/(g·K) together with their vapour mole
/// fractions.
pub fn heat_capacity_ratio(
    (y_h2o, cpg_h2o): (f64, f64),
    (y_h2o2, cpg_h2o2): (f64, f64),
    (y_o2, cpg_o2): (f64, f64),
) -> f64 {
    let cp_molar = y_h2o * cpg_h2o * M_H2O + y_h2o2 * cpg_h2o2 * M_H2O2 + y_o2 * cpg_o2 * M_O2;
    let cv_molar = cp_molar - R;

    cp_molar / cv_molar
}
