//! Damped Newton solver for the twelve-equation equilibrium system and the
//! initial-charge equilibrium of the reactor.
//!
//! Unknown vector layout (fixed across the crate, also used for warm starts):
//!
//! | index | unknown | meaning |
//! |-------|---------|---------|
//! | 0 | xH2O  | water mole fraction, liquid |
//! | 1 | xH2O2 | peroxide mole fraction, liquid |
//! | 2 | yH2O  | water mole fraction, vapour |
//! | 3 | yH2O2 | peroxide mole fraction, vapour |
//! | 4 | yO2   | oxygen mole fraction, vapour |
//! | 5 | nL    | liquid amount (mol) |
//! | 6 | nG    | vapour amount (mol) |
//! | 7 | P     | total pressure (kPa) |
//! | 8 | PH2O  | water partial pressure (kPa) |
//! | 9 | PH2O2 | peroxide partial pressure (kPa) |
//! | 10 | VL   | liquid volume (L) |
//! | 11 | ZO2  | oxygen compressibility factor |

use log::{debug, warn};
use nalgebra::{SMatrix, SVector};
use thiserror::Error;

use super::state::{MixtureState, SpeciesState};
use crate::Properties::{PropertyError, eos, mixture, oxygen, peroxide, water};
use crate::constants::{M_H2O, M_H2O2, M_O2, P_ATM, PC_O2, R};
use crate::conversion::c2k;

pub const N_UNKNOWNS: usize = 12;

type Vec12 = SVector<f64, N_UNKNOWNS>;
type Mat12 = SMatrix<f64, N_UNKNOWNS, N_UNKNOWNS>;

const MAX_ITER: usize = 60;
const TOL: f64 = 1e-9;
const MAX_HALVINGS: usize = 8;
const MAX_STALLS: usize = 3;

#[derive(Debug, Error)]
pub enum EquilibriumError {
    #[error(
        "equilibrium solve did not converge after {iterations} iterations at T = {t} deg C (scaled residual {residual:.3e})"
    )]
    NotConverged {
        iterations: usize,
        residual: f64,
        t: f64,
    },
    #[error("singular Jacobian in equilibrium solve at T = {t} deg C")]
    SingularJacobian { t: f64 },
    #[error("infeasible equilibrium problem: {0}")]
    Infeasible(String),
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Fixed conditions of a flash: temperature, vessel volume, overall
/// composition of the condensables and the oxygen inventory.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumInput {
    /// Temperature (deg C)
    pub t: f64,
    /// Vessel volume (L)
    pub vr: f64,
    /// Total amount in the vessel (mol)
    pub ntotal: f64,
    /// Overall mole fraction of water
    pub z_h2o: f64,
    /// Overall mole fraction of hydrogen peroxide
    pub z_h2o2: f64,
    /// Amount of oxygen (mol)
    pub n_o2: f64,
}

/// A converged equilibrium: species and mixture snapshots plus the raw
/// unknown vector for warm-starting the next solve.
#[derive(Debug, Clone)]
pub struct EquilibriumState {
    pub water: SpeciesState,
    pub peroxide: SpeciesState,
    pub oxygen: SpeciesState,
    pub mixture: MixtureState,
    pub unknowns: Vec12,
}

/// Residuals of the twelve-equation system at the iterate `z`.
///
/// Activity coefficients are evaluated at the iterate's water liquid mole
/// fraction, saturation pressures and densities at the flash temperature,
/// the oxygen RK cubic at the iterate's total pressure.
fn residual(input: &EquilibriumInput, z: &Vec12) -> Vec12 {
    let t = input.t;
    let t_k = c2k(t);

    let x_h2o = z[0];
    let x_h2o2 = z[1];
    let y_h2o = z[2];
    let y_h2o2 = z[3];
    let y_o2 = z[4];
    let n_l = z[5];
    let n_g = z[6];
    let p = z[7];
    let p_h2o = z[8];
    let p_h2o2 = z[9];
    let v_l = z[10];
    let z_o2 = z[11];

    let psat_w = water::psat(t);
    let psat_p = peroxide::psat(t);
    let gamma_w = water::gamma(t, x_h2o);
    let gamma_p = peroxide::gamma(t, x_h2o);
    let rho_w = water::density_l(t);
    let rho_p = peroxide::density_l(t);

    let tr_o2 = eos::reduced_temperature(t, crate::constants::TC_O2);
    let pr_o2 = eos::reduced_pressure(p, PC_O2);
    let (a, b) = eos::rk_parameters(tr_o2, pr_o2);

    let v_g = input.vr - v_l;
    let p_o2 = z_o2 * input.n_o2 * R * t_k / v_g;

    let mut f = Vec12::zeros();
    f[0] = n_l * x_h2o + n_g * y_h2o - input.ntotal * input.z_h2o;
    f[1] = n_l * x_h2o2 + n_g * y_h2o2 - input.ntotal * input.z_h2o2;
    f[2] = n_l + n_g - input.ntotal;
    f[3] = p_h2o + p_h2o2 + p_o2 - p;
    f[4] = p_h2o - x_h2o * psat_w * gamma_w;
    f[5] = p_h2o2 - x_h2o2 * psat_p * gamma_p;
    f[6] = y_h2o - p_h2o / p;
    f[7] = y_h2o2 - p_h2o2 / p;
    f[8] = y_o2 - p_o2 / p;
    f[9] = x_h2o + x_h2o2 - y_h2o - y_h2o2 - y_o2;
    f[10] = v_l
        - n_l
            * (x_h2o * M_H2O / (rho_w * 1000.0) + x_h2o2 * M_H2O2 / (rho_p * 1000.0));
    f[11] = z_o2.powi(3) - z_o2.powi(2) + (a - b - b.powi(2)) * z_o2 - a * b;

    f
}

/// Residual scales per equation: mole balances against the inventory,
/// pressure equations against the iterate pressure, the volume closure
/// against the vessel volume, mole-fraction and EOS equations as-is.
fn scales(input: &EquilibriumInput, z: &Vec12) -> Vec12 {
    let n = input.ntotal.max(1.0);
    let p = z[7].abs().max(P_ATM);
    let v = input.vr.max(1.0);

    Vec12::from_column_slice(&[n, n, n, p, p, p, 1.0, 1.0, 1.0, 1.0, v, 1.0])
}

fn scaled_norm(f: &Vec12, scale: &Vec12) -> f64 {
    let mut norm: f64 = 0.0;
    for i in 0..N_UNKNOWNS {
        norm = norm.max((f[i] / scale[i]).abs());
    }
    norm
}

/// Iterates with nonpositive phase amounts, pressure, oxygen Z, or a liquid
/// volume outside the vessel cannot be evaluated meaningfully.
fn feasible(input: &EquilibriumInput, z: &Vec12) -> bool {
    z.iter().all(|v| v.is_finite())
        && z[5] > 0.0
        && z[6] > 0.0
        && z[7] > 0.0
        && z[10] > 0.0
        && z[10] < input.vr
        && z[11] > 0.0
}

fn jacobian(input: &EquilibriumInput, z: &Vec12, f0: &Vec12) -> Mat12 {
    // characteristic magnitudes for the perturbation of each unknown
    let typ = [
        1.0,
        1.0,
        1.0,
        1.0,
        1.0,
        input.ntotal.max(1.0),
        input.ntotal.max(1.0),
        P_ATM,
        P_ATM,
        P_ATM,
        input.vr.max(1.0),
        1.0,
    ];

    let mut jac = Mat12::zeros();
    for j in 0..N_UNKNOWNS {
        let h = 1e-7 * z[j].abs().max(typ[j] * 1e-4);
        let mut z_pert = *z;
        z_pert[j] += h;
        let f_pert = residual(input, &z_pert);
        for i in 0..N_UNKNOWNS {
            jac[(i, j)] = (f_pert[i] - f0[i]) / h;
        }
    }
    jac
}

/// Damped Newton iteration from `seed`. Steps are halved while they leave
/// the feasible region or fail to reduce the scaled residual; a few
/// non-improving steps are tolerated before giving up.
fn newton(input: &EquilibriumInput, seed: &Vec12) -> Result<Vec12, EquilibriumError> {
    let mut z = *seed;
    if !feasible(input, &z) {
        return Err(EquilibriumError::Infeasible(format!(
            "seed vector is not a feasible state at T = {} deg C",
            input.t
        )));
    }

    let mut f = residual(input, &z);
    let mut norm = scaled_norm(&f, &scales(input, &z));
    let mut stalls = 0;

    for iter in 0..MAX_ITER {
        if norm < TOL {
            debug!("equilibrium converged in {} iterations (residual {:.3e})", iter, norm);
            return Ok(z);
        }

        let jac = jacobian(input, &z, &f);
        let lu = jac.lu();
        let dz = lu
            .solve(&(-f))
            .ok_or(EquilibriumError::SingularJacobian { t: input.t })?;

        let mut lambda = 1.0;
        let mut accepted = None;
        let mut fallback = None;
        for _ in 0..=MAX_HALVINGS {
            let candidate = z + dz * lambda;
            if feasible(input, &candidate) {
                let f_new = residual(input, &candidate);
                let norm_new = scaled_norm(&f_new, &scales(input, &candidate));
                if norm_new < norm {
                    accepted = Some((candidate, f_new, norm_new));
                    break;
                }
                if fallback.is_none() {
                    fallback = Some((candidate, f_new, norm_new));
                }
            }
            lambda /= 2.0;
        }

        match accepted.or(fallback) {
            Some((candidate, f_new, norm_new)) => {
                if norm_new >= norm {
                    stalls += 1;
                    if stalls > MAX_STALLS {
                        return Err(EquilibriumError::NotConverged {
                            iterations: iter + 1,
                            residual: norm_new,
                            t: input.t,
                        });
                    }
                } else {
                    stalls = 0;
                }
                z = candidate;
                f = f_new;
                norm = norm_new;
            }
            None => {
                return Err(EquilibriumError::NotConverged {
                    iterations: iter + 1,
                    residual: norm,
                    t: input.t,
                });
            }
        }
    }

    Err(EquilibriumError::NotConverged {
        iterations: MAX_ITER,
        residual: norm,
        t: input.t,
    })
}

/// Ideal-mixture seed: Raoult's law partial pressures, all oxygen in the
/// vapour, liquid volume from the pure-component densities.
fn ideal_seed(input: &EquilibriumInput) -> Vec12 {
    let t = input.t;
    let z_cond = input.z_h2o + input.z_h2o2;
    let x_h2o = input.z_h2o / z_cond;
    let x_h2o2 = input.z_h2o2 / z_cond;

    let n_l = (input.ntotal - input.n_o2).max(1e-9 * input.ntotal);
    let n_g = input.n_o2.max(1e-9 * input.ntotal);

    let psat_w = water::psat(t);
    let psat_p = peroxide::psat(t);
    let rho_w = water::density_l(t);
    let rho_p = peroxide::density_l(t);

    let v_l = (n_l * (x_h2o * M_H2O / (rho_w * 1000.0) + x_h2o2 * M_H2O2 / (rho_p * 1000.0)))
        .min(0.95 * input.vr);
    let v_g = input.vr - v_l;

    let p_o2 = input.n_o2 * R * c2k(t) / v_g;
    let p_h2o = x_h2o * psat_w;
    let p_h2o2 = x_h2o2 * psat_p;
    let p = (p_h2o + p_h2o2 + p_o2).max(1e-3);

    Vec12::from_column_slice(&[
        x_h2o,
        x_h2o2,
        p_h2o / p,
        p_h2o2 / p,
        p_o2 / p,
        n_l,
        n_g,
        p,
        p_h2o,
        p_h2o2,
        v_l,
        0.95,
    ])
}

/// Solve the equilibrium from a caller-supplied seed (warm start along a
/// trajectory). On failure the solve is retried once from the ideal-mixture
/// seed before the error propagates.
pub fn equilibrate(
    input: &EquilibriumInput,
    seed: &Vec12,
) -> Result<EquilibriumState, EquilibriumError> {
    check_input(input)?;

    let solved = match newton(input, seed) {
        Ok(z) => z,
        Err(first) => {
            warn!(
                "equilibrium warm start failed at T = {:.2} deg C ({first}); retrying from ideal seed",
                input.t
            );
            newton(input, &ideal_seed(input))?
        }
    };

    assemble(input, &solved)
}

fn check_input(input: &EquilibriumInput) -> Result<(), EquilibriumError> {
    if !(input.ntotal > 0.0) || !(input.vr > 0.0) {
        return Err(EquilibriumError::Infeasible(
            "total amount and vessel volume must be positive".to_string(),
        ));
    }
    if input.n_o2 < 0.0 {
        return Err(EquilibriumError::Infeasible(
            "oxygen amount must be non-negative".to_string(),
        ));
    }
    if input.z_h2o + input.z_h2o2 <= 0.0 {
        return Err(EquilibriumError::Infeasible(
            "no condensable species in the vessel".to_string(),
        ));
    }
    Ok(())
}

/// Build the immutable snapshots from a converged unknown vector, with a
/// species balance closure check against the inventory.
fn assemble(input: &EquilibriumInput, z: &Vec12) -> Result<EquilibriumState, EquilibriumError> {
    let t = input.t;
    let t_k = c2k(t);
    let p = z[7];

    // closure check: a "converged" vector that does not close the species
    // balances is worthless downstream
    let f = residual(input, z);
    let n_scale = input.ntotal.max(1.0);
    if (f[0] / n_scale).abs() > 1e-6 || (f[1] / n_scale).abs() > 1e-6 || (f[2] / n_scale).abs() > 1e-6
    {
        return Err(EquilibriumError::NotConverged {
            iterations: MAX_ITER,
            residual: scaled_norm(&f, &scales(input, z)),
            t,
        });
    }

    let v_l = z[10];
    let v_g = input.vr - v_l;
    let p_o2 = z[11] * input.n_o2 * R * t_k / v_g;

    let n_h2o = input.ntotal * input.z_h2o;
    let n_h2o2 = input.ntotal * input.z_h2o2;

    let (tr_w, pr_w) = water::reduced(t, p);
    let (tr_p, pr_p) = peroxide::reduced(t, p);
    let (tr_o, pr_o) = oxygen::reduced(t, p);
    let z_w = eos::compressibility(water::SPECIES, tr_w, pr_w)?;
    let z_p = eos::compressibility(peroxide::SPECIES, tr_p, pr_p)?;

    let water_state = SpeciesState {
        x: z[0],
        y: z[2],
        z: input.z_h2o,
        n: n_h2o,
        m: n_h2o * M_H2O,
        partial_pressure: z[8],
        psat: water::psat(t),
        gamma: water::gamma(t, z[0]),
        compressibility: z_w,
        tr: tr_w,
        pr: pr_w,
        density: water::density_l(t),
        cp_l: water::cp_l(t),
        cp_g: water::cp_g(t),
    };

    let peroxide_state = SpeciesState {
        x: z[1],
        y: z[3],
        z: input.z_h2o2,
        n: n_h2o2,
        m: n_h2o2 * M_H2O2,
        partial_pressure: z[9],
        psat: peroxide::psat(t),
        gamma: peroxide::gamma(t, z[0]),
        compressibility: z_p,
        tr: tr_p,
        pr: pr_p,
        density: peroxide::density_l(t),
        cp_l: peroxide::cp_l(t),
        cp_g: peroxide::cp_g(t),
    };

    let oxygen_state = SpeciesState {
        x: 0.0,
        y: z[4],
        z: input.n_o2 / input.ntotal,
        n: input.n_o2,
        m: input.n_o2 * M_O2,
        partial_pressure: p_o2,
        psat: 0.0,
        gamma: 1.0,
        compressibility: z[11],
        tr: tr_o,
        pr: pr_o,
        density: 0.0,
        cp_l: 0.0,
        cp_g: oxygen::cp_g(t),
    };

    let n_l = z[5];
    let n_g = z[6];
    let mw_g = z[2] * M_H2O + z[3] * M_H2O2 + z[4] * M_O2;
    let mw_l = z[0] * M_H2O + z[1] * M_H2O2;
    let vapor_mass_fraction = n_g * mw_g / (n_g * mw_g + n_l * mw_l);

    let cp_l_mix = z[0] * water_state.cp_l + z[1] * peroxide_state.cp_l;
    let cp_g_mix =
        z[2] * water_state.cp_g + z[3] * peroxide_state.cp_g + z[4] * oxygen_state.cp_g;
    let cp = vapor_mass_fraction * cp_g_mix + (1.0 - vapor_mass_fraction) * cp_l_mix;

    let rho_g = (z[8] * M_H2O + z[9] * M_H2O2 + p_o2 * M_O2) / (R * t_k * 1000.0);
    let rho_l = water_state.density * z[0] + peroxide_state.density * z[1];

    let mixture_state = MixtureState {
        p,
        ntotal: input.ntotal,
        n_l,
        n_g,
        v_l,
        v_g,
        cp_l: cp_l_mix,
        cp_g: cp_g_mix,
        cp,
        rho_l,
        rho_g,
        dh_vap: mixture::dh_vap(t),
        surface_tension: mixture::surface_tension(t),
        dv_l_dt: mixture::dv_l_dt(t),
        dv_g_dt: mixture::dv_g_dt((z_w, z[8]), (z_p, z[9]), (z[11], p_o2)),
        k: mixture::heat_capacity_ratio(
            (z[2], water_state.cp_g),
            (z[3], peroxide_state.cp_g),
            (z[4], oxygen_state.cp_g),
        ),
        vapor_mass_fraction,
    };

    Ok(EquilibriumState {
        water: water_state,
        peroxide: peroxide_state,
        oxygen: oxygen_state,
        mixture: mixture_state,
        unknowns: *z,
    })
}

/// Thermodynamically stable starting conditions for a fresh charge.
///
/// The reactor is loaded with `m_r` kg of aqueous peroxide at mass fraction
/// `x_h2o2`, temperature `t` (deg C) and headspace pressure `p0` (kPa); the
/// headspace is filled with oxygen at `p0`. The flash seed follows the
/// charge composition with Raoult partial pressures.
pub fn initial_conditions(
    t: f64,
    p0: f64,
    x_h2o2: f64,
    m_r: f64,
    vr: f64,
) -> Result<EquilibriumState, EquilibriumError> {
    let m_h2o2 = m_r * x_h2o2;
    let m_h2o = m_r * (1.0 - x_h2o2);

    let n_h2o2 = m_h2o2 * 1000.0 / M_H2O2;
    let n_h2o = m_h2o * 1000.0 / M_H2O;

    let rho_w = water::density_l(t);
    let rho_p = peroxide::density_l(t);

    let v_liq = m_h2o / rho_w + m_h2o2 / rho_p;
    let v_g = vr - v_liq;
    if v_g <= 0.0 {
        return Err(EquilibriumError::Infeasible(format!(
            "charge of {m_r} kg occupies {v_liq:.1} L, overfilling the {vr:.1} L vessel"
        )));
    }

    let n_o2 = p0 * v_g / (R * c2k(t));
    let ntotal = n_h2o + n_h2o2 + n_o2;

    let z_h2o = n_h2o / ntotal;
    let z_h2o2 = n_h2o2 / ntotal;
    let z_o2 = n_o2 / ntotal;

    let input = EquilibriumInput {
        t,
        vr,
        ntotal,
        z_h2o,
        z_h2o2,
        n_o2,
    };

    let seed = Vec12::from_column_slice(&[
        z_h2o,
        z_h2o2,
        z_h2o,
        z_h2o2,
        z_o2,
        ntotal,
        n_o2,
        p0,
        water::psat(t),
        peroxide::psat(t),
        v_liq,
        0.95,
    ]);

    equilibrate(&input, &seed)
}
