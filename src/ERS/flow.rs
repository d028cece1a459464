//! Vent flow model: compressible single-phase orifice flow, drift-flux
//! vapour disengagement and the homogeneous equilibrium two-phase flux.
//!
//! Unit system matches the property layer: T in deg C, P in kPa, molecular
//! weights in g/mol; mass fluxes come out in kg/(m²·s) and molar vent rates
//! in mol/s.

use serde::{Deserialize, Serialize};

use crate::VLE::EquilibriumState;
use crate::constants::{G, P_ATM};
use crate::conversion::c2k;

/// Drift-flux distribution parameter shared by both regime correlations.
const C0: f64 = 1.5;

/// Hydrodynamic regime of the boiling liquid during depressurization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    /// Churn-turbulent: large vessels, vigorous boilup (the default)
    ChurnTurbulent,
    /// Bubbly: viscous or foamy systems with retained small bubbles
    Bubbly,
}

/// Which discharge path produced a vent flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentRegime {
    /// No path open
    Closed,
    /// Backpressure regulator, vapour only
    BprVapor,
    /// Open rupture disc, vapour only (disengaged)
    RdVapor,
    /// Open rupture disc, two-phase swell reaches the inlet
    RdTwoPhase,
}

/// Vent flow at one instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VentState {
    /// Molar discharge rate (mol/s)
    pub n_vent: f64,
    /// Exit quality: mass fraction vapour in the vented stream
    pub quality: f64,
    pub regime: VentRegime,
}

impl VentState {
    pub fn closed() -> Self {
        VentState {
            n_vent: 0.0,
            quality: 1.0,
            regime: VentRegime::Closed,
        }
    }
}

/// Static description of the installed relief hardware, derived from the
/// scenario once per run.
#[derive(Debug, Clone)]
pub struct VentModel {
    pub rd_enabled: bool,
    pub bpr_enabled: bool,
    /// Consider two-phase swell through the rupture disc
    pub two_phase: bool,
    pub flow_regime: FlowRegime,
    /// Rupture disc flow area (m²)
    pub a_rd: f64,
    /// Rupture disc discharge coefficient
    pub kd_rd: f64,
    /// Backpressure regulator flow area (m²)
    pub a_bpr: f64,
    /// Backpressure regulator discharge coefficient (from its Cv)
    pub kd_bpr: f64,
    /// Backpressure regulator set point (kPa)
    pub p_bpr: f64,
    /// Vessel cross-section (m²)
    pub a_vessel: f64,
    /// Vessel volume (L)
    pub vr: f64,
}

/// Headspace and liquid conditions feeding the vent flow calculation,
/// taken from the previous converged equilibrium step.
#[derive(Debug, Clone, Copy)]
pub struct VentConditions {
    /// Temperature (deg C)
    pub t: f64,
    /// Upstream (vessel) pressure (kPa)
    pub p: f64,
    /// Vapour molecular weight (g/mol)
    pub mw_g: f64,
    /// Liquid molecular weight (g/mol)
    pub mw_l: f64,
    /// Mole-fraction averaged vapour compressibility
    pub z_g: f64,
    /// Vapour heat capacity ratio Cp/Cv
    pub k: f64,
    /// Vapour density (kg/L)
    pub rho_g: f64,
    /// Liquid density (kg/L)
    pub rho_l: f64,
    /// Surface tension (N/m)
    pub surface_tension: f64,
    /// Enthalpy of vaporization (J/g)
    pub dh_vap: f64,
    /// Liquid heat capacity (J/(g·K))
    pub cp_l: f64,
    /// Specific volume change on vaporization (L/kg)
    pub vfg: f64,
    /// Liquid volume (L)
    pub v_l: f64,
}

impl VentConditions {
    /// Extract the vent-relevant conditions from a converged equilibrium.
    pub fn from_state(eq: &EquilibriumState) -> Self {
        let (w, p, o) = (&eq.water, &eq.peroxide, &eq.oxygen);
        let m = &eq.mixture;

        VentConditions {
            t: water_t_of(eq),
            p: m.p,
            mw_g: w.y * crate::constants::M_H2O
                + p.y * crate::constants::M_H2O2
                + o.y * crate::constants::M_O2,
            mw_l: w.x * crate::constants::M_H2O + p.x * crate::constants::M_H2O2,
            z_g: w.y * w.compressibility + p.y * p.compressibility + o.y * o.compressibility,
            k: m.k,
            rho_g: m.rho_g,
            rho_l: m.rho_l,
            surface_tension: m.surface_tension,
            dh_vap: m.dh_vap,
            cp_l: m.cp_l,
            vfg: m.vfg(),
            v_l: m.v_l,
        }
    }
}

// The equilibrium snapshot does not carry its flash temperature directly;
// recover it from the water reduced temperature.
fn water_t_of(eq: &EquilibriumState) -> f64 {
    eq.water.tr * crate::constants::TC_H2O - 273.15
}

/// Critical (choked flow) downstream pressure for an upstream pressure `p`.
pub fn critical_pressure(k: f64, p: f64) -> f64 {
    (2.0 / (k + 1.0)).powf(k / (k - 1.0)) * p
}

/// Single-phase vapour mass flux through an orifice in kg/(m²·s).
///
/// Chooses the choked or subcritical expression by comparing the discharge
/// pressure against [`critical_pressure`]; zero when the pressure gradient
/// vanishes or reverses.
pub fn vapor_mass_flux(
    t: f64,
    p: f64,
    p_discharge: f64,
    kd: f64,
    k: f64,
    mw: f64,
    z: f64,
) -> f64 {
    if p <= 0.0 || p - p_discharge < 1e-9 {
        return 0.0;
    }
    let t_k = c2k(t);

    if p_discharge <= critical_pressure(k, p) {
        let c = 520.0 * (k * (2.0 / (k + 1.0)).powf((k + 1.0) / (k - 1.0))).sqrt();

        (c * kd * p / 13160.0) * (mw / (t_k * z)).sqrt() * (1.0e6 / 3600.0)
    } else {
        let r = p_discharge / p;
        let f2 = ((k / (k - 1.0))
            * r.powf(2.0 / k)
            * ((1.0 - r.powf((k - 1.0) / k)) / (1.0 - r)))
            .sqrt();

        (f2 * kd / 17.9) * (mw * p * (p - p_discharge) / (z * t_k)).sqrt() * (1.0e6 / 3600.0)
    }
}

/// Average void fraction sustained by a superficial vapour velocity ratio
/// `ratio = jgx/Ui`.
///
/// Churn-turbulent inverts `a(1-a)²/((1-a³)(1-C0·a)) = ratio` by bisection
/// on `(0, 1/C0)` where the left side rises monotonically from 0 to
/// infinity; bubbly has the closed form `ratio/(2 + C0·ratio)`.
pub fn void_fraction(regime: FlowRegime, ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }

    match regime {
        FlowRegime::Bubbly => ratio / (2.0 + C0 * ratio),
        FlowRegime::ChurnTurbulent => {
            let residual = |a: f64| {
                a * (1.0 - a).powi(2) / ((1.0 - a.powi(3)) * (1.0 - C0 * a)) - ratio
            };

            let mut lo = 1e-12;
            let mut hi = 1.0 / C0 - 1e-12;
            for _ in 0..200 {
                let mid = 0.5 * (lo + hi);
                if residual(lo) * residual(mid) <= 0.0 {
                    hi = mid;
                } else {
                    lo = mid;
                }
                if hi - lo < 1e-14 {
                    break;
                }
            }
            0.5 * (lo + hi)
        }
    }
}

/// Disengagement evaluation when the swelled level reaches the vent inlet.
#[derive(Debug, Clone, Copy)]
pub struct TwoPhaseOnset {
    /// Superficial vapour velocity at the disengagement limit (m/s)
    pub jgi: f64,
    /// Vessel-average void basis for the entrained mixture
    pub a_m: f64,
    /// Vessel-average quality of the entrained mixture
    pub x_m: f64,
}

/// Regime-specific disengagement limit quantities at the vessel void
/// fraction. Densities in kg/m³.
pub fn two_phase_onset(
    regime: FlowRegime,
    ui: f64,
    alpha_vessel: f64,
    rho_g: f64,
    rho_l: f64,
) -> TwoPhaseOnset {
    let av = alpha_vessel;
    let (jgi, a_m) = match regime {
        FlowRegime::ChurnTurbulent => {
            (2.0 * av * ui / (1.0 - C0 * av), 2.0 * av / (1.0 + C0 * av))
        }
        FlowRegime::Bubbly => (
            av * (1.0 - av).powi(2) * ui / ((1.0 - av.powi(3)) * (1.0 - C0 * av)),
            av,
        ),
    };

    let x_m = a_m * rho_g / (a_m * rho_g + (1.0 - a_m) * rho_l);

    TwoPhaseOnset { jgi, a_m, x_m }
}

/// Characteristic bubble rise velocity (m/s); densities in kg/m³.
fn bubble_rise_velocity(regime: FlowRegime, surface_tension: f64, rho_l: f64, rho_g: f64) -> f64 {
    let factor = match regime {
        FlowRegime::ChurnTurbulent => 1.53,
        FlowRegime::Bubbly => 1.18,
    };

    factor * (surface_tension * G * (rho_l - rho_g)).powf(0.25) / rho_l.sqrt()
}

/// Evaluate the vent flow for the current conditions.
///
/// Device policy: an open rupture disc discharges to atmosphere and takes
/// priority; with two-phase evaluation enabled the drift-flux swell decides
/// between vapour-only and two-phase discharge. Otherwise the backpressure
/// regulator vents vapour whenever the vessel sits above its set point.
/// `rd_open` is the latched burst state owned by the integration loop.
pub fn vent_rate(model: &VentModel, cond: &VentConditions, rd_open: bool) -> VentState {
    if model.rd_enabled && rd_open {
        let g_vap = vapor_mass_flux(
            cond.t,
            cond.p,
            P_ATM,
            model.kd_rd,
            cond.k,
            cond.mw_g,
            cond.z_g,
        );
        if g_vap <= 0.0 {
            return VentState::closed();
        }

        if model.two_phase {
            let rho_g = cond.rho_g * 1000.0;
            let rho_l = cond.rho_l * 1000.0;

            let jgx = model.a_rd * g_vap / (rho_g * model.a_vessel);
            let ui = bubble_rise_velocity(model.flow_regime, cond.surface_tension, rho_l, rho_g);
            let alpha = void_fraction(model.flow_regime, jgx / ui);
            let alpha_vessel = (model.vr - cond.v_l) / model.vr;

            if alpha > alpha_vessel {
                let onset =
                    two_phase_onset(model.flow_regime, ui, alpha_vessel, rho_g, rho_l);

                // homogeneous equilibrium flux through the disc
                let eta = P_ATM / cond.p;
                let g_tp = model.kd_rd * (cond.dh_vap * 1.0e3 / (cond.vfg * 1.0e-3))
                    * ((1.0 - eta) / (cond.cp_l * 1.0e3 * c2k(cond.t))).sqrt();

                let entrained = onset.jgi * rho_g * model.a_vessel;
                let xe = (entrained / (g_tp * model.a_rd)).clamp(onset.x_m, 1.0);

                let mw_blend = xe * cond.mw_g + (1.0 - xe) * cond.mw_l;
                let n_vent = g_tp * model.a_rd * 1000.0 / mw_blend;

                return VentState {
                    n_vent,
                    quality: xe,
                    regime: VentRegime::RdTwoPhase,
                };
            }
        }

        let n_vent = g_vap * model.a_rd * 1000.0 / cond.mw_g;
        return VentState {
            n_vent,
            quality: 1.0,
            regime: VentRegime::RdVapor,
        };
    }

    if model.bpr_enabled && cond.p > model.p_bpr {
        let g = vapor_mass_flux(
            cond.t,
            cond.p,
            model.p_bpr,
            model.kd_bpr,
            cond.k,
            cond.mw_g,
            cond.z_g,
        );
        if g > 0.0 {
            return VentState {
                n_vent: g * model.a_bpr * 1000.0 / cond.mw_g,
                quality: 1.0,
                regime: VentRegime::BprVapor,
            };
        }
    }

    VentState::closed()
}
