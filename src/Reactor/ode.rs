//! Time march: mole and energy balances over one mesh interval with the
//! vent flow frozen, followed by a warm-started flash.
//!
//! State vector layout: `[T, Tj, nH2O, nH2O2, nO2]` with temperatures in
//! deg C and amounts in mol.

use std::fmt;

use differential_equations::methods::{ExplicitRungeKutta, ImplicitRungeKutta};
use differential_equations::ode::{ODE, ODEProblem};
use log::{debug, info};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ERS::flow::{VentConditions, VentModel, VentState, vent_rate};
use crate::VLE::{EquilibriumError, EquilibriumInput, EquilibriumState, equilibrate, initial_conditions};
use crate::constants::{DH_RXN, M_H2O, M_H2O2, M_O2, P_ATM};
use crate::conversion::a_wet;
use crate::kinetics::rate_constant;

use super::controller::JacketController;
use super::scenario::{ConfigurationError, Integrator, Scenario};
use super::trajectory::{StepRecord, Trajectory};

/// Pressure margin above atmospheric at which an open disc is considered
/// fully discharged (kPa).
const DISCHARGE_MARGIN: f64 = 5.0;

/// Liquid volume below which the vessel counts as emptied (L).
const EMPTY_LIQUID: f64 = 1e-3;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Equilibrium(#[from] EquilibriumError),
    #[error("integration failed at t = {t:.3} s: {reason}")]
    Integration { t: f64, reason: String },
}

/// Abnormal exit of a run, distinguished from the four termination codes.
/// The steps recorded before the failure stay available for inspection.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct AbortedRun {
    pub error: SimulationError,
    pub steps: Vec<StepRecord>,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCode {
    /// Programmed hold and cooldown ran to the end
    Completed,
    /// Open rupture disc brought the vessel down to atmospheric
    RdDischarge,
    /// Pressure reached the maximum allowable working pressure
    MawpExceeded,
    /// Liquid inventory ran out while venting
    VesselEmptied,
}

impl fmt::Display for TerminationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminationCode::Completed => "completed the programmed cycle",
            TerminationCode::RdDischarge => "discharged to atmospheric through the rupture disc",
            TerminationCode::MawpExceeded => "exceeded the maximum allowable working pressure",
            TerminationCode::VesselEmptied => "ran out of liquid while venting",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Heatup,
    Venting,
}

/// Right-hand side of the balances over one interval.
///
/// The phase split, properties and vent flow come from the last converged
/// flash and stay fixed, so the derivatives are smooth within the
/// interval; only the Arrhenius rate follows the integrated temperature.
struct ReactorRhs<'a> {
    kf: f64,
    ux: f64,
    diameter: f64,
    ramp: f64,
    vent: VentState,
    eq: &'a EquilibriumState,
}

impl ODE<f64, SVector<f64, 5>> for ReactorRhs<'_> {
    fn diff(&self, _t: f64, y: &SVector<f64, 5>, dydt: &mut SVector<f64, 5>) {
        let t_r = y[0];
        let t_j = y[1];
        let n_h2o = y[2].max(0.0);
        let n_h2o2 = y[3].max(0.0);
        let n_o2 = y[4].max(0.0);

        let w = &self.eq.water;
        let p = &self.eq.peroxide;
        let o = &self.eq.oxygen;
        let m = &self.eq.mixture;

        // 2 H2O2 -> 2 H2O + O2
        let r = rate_constant(t_r, self.kf) * n_h2o2;

        let nv = self.vent.n_vent;
        let xe = self.vent.quality;

        dydt[2] = r - nv * (xe * w.y + (1.0 - xe) * w.x);
        dydt[3] = -r - nv * (xe * p.y + (1.0 - xe) * p.x);
        dydt[4] = r / 2.0 - nv * xe * o.y;

        let q_rxn = r * M_H2O2 * (-DH_RXN);
        let q_jacket = self.ux * a_wet(m.v_l, self.diameter) * (t_r - t_j);

        let vfg = m.vfg();
        let q_vent = ((m.v_liquid_specific() / vfg) + 1.0)
            * m.dh_vap
            * nv
            * xe
            * (w.y + p.y)
            * M_H2O;

        // vaporization work correction to the effective heat capacity
        let x = m.vapor_mass_fraction;
        let xp = ((m.dh_vap - m.p * vfg) / (vfg * m.cp * 1000.0))
            * (x * m.dv_g_dt / 1000.0 + (1.0 - x) * m.dv_l_dt / 1000.0);

        let mass = n_h2o * M_H2O + n_h2o2 * M_H2O2 + n_o2 * M_O2;

        dydt[0] = (q_rxn - q_jacket - q_vent) / (mass * m.cp * (1.0 - xp));
        dydt[1] = self.ramp / 60.0;
    }
}

/// One scenario being marched through time.
pub struct Simulation {
    scenario: Scenario,
    vent_model: VentModel,
    controller: JacketController,
    phase: Phase,
    rd_open: bool,
    t: f64,
    state: SVector<f64, 5>,
    eq: EquilibriumState,
}

impl Simulation {
    pub fn new(scenario: Scenario) -> Result<Self, SimulationError> {
        scenario.validate()?;

        let eq = initial_conditions(
            scenario.T0,
            scenario.P0,
            scenario.XH2O2,
            scenario.mR,
            scenario.VR,
        )?;

        let state = SVector::<f64, 5>::from_column_slice(&[
            scenario.T0,
            scenario.T0,
            eq.water.n,
            eq.peroxide.n,
            eq.oxygen.n,
        ]);

        let controller = JacketController::new(
            scenario.Kp,
            scenario.Ki,
            scenario.Kd,
            scenario.max_rate,
            scenario.rxn_temp,
        );
        let vent_model = scenario.vent_model();

        info!(
            "charged {} kg of {:.0} wt% peroxide into {:.0} L, initial P = {:.1} kPa",
            scenario.mR,
            scenario.XH2O2 * 100.0,
            scenario.VR,
            eq.mixture.p
        );

        Ok(Simulation {
            scenario,
            vent_model,
            controller,
            phase: Phase::Heatup,
            rd_open: false,
            t: 0.0,
            state,
            eq,
        })
    }

    /// March until a termination event fires or the programmed cycle ends.
    pub fn run(mut self) -> Result<Trajectory, AbortedRun> {
        let total_time = (self.scenario.rxn_time + self.scenario.cool_time) * 3600.0;
        let hold_end = self.scenario.rxn_time * 3600.0;
        let initial_n_h2o2 = self.eq.peroxide.n;

        let mut steps = Vec::new();
        steps.push(StepRecord::new(
            0.0,
            self.state[0],
            self.state[1],
            VentState::closed(),
            &self.eq,
        ));

        let mut count = 0usize;
        while self.t < total_time {
            if count >= self.scenario.max_steps {
                let error = SimulationError::Integration {
                    t: self.t,
                    reason: format!("step limit of {} exhausted", self.scenario.max_steps),
                };
                return Err(AbortedRun { error, steps });
            }
            count += 1;

            let setpoint = if self.t >= hold_end {
                self.scenario.T0
            } else {
                self.scenario.rxn_temp
            };
            self.controller.set_target(setpoint);

            let vent = match self.advance() {
                Ok(vent) => vent,
                Err(error) => return Err(AbortedRun { error, steps }),
            };

            steps.push(StepRecord::new(
                self.t,
                self.state[0],
                self.state[1],
                vent,
                &self.eq,
            ));

            let p = self.eq.mixture.p;

            if p >= self.scenario.MAWP {
                return Ok(Trajectory::new(steps, TerminationCode::MawpExceeded, initial_n_h2o2));
            }
            if self.phase == Phase::Heatup && self.scenario.RD && p >= self.scenario.P_RD {
                info!("rupture disc burst at t = {:.1} s, P = {:.1} kPa", self.t, p);
                self.rd_open = true;
                self.phase = Phase::Venting;
            }
            if self.phase == Phase::Venting {
                if p - P_ATM < DISCHARGE_MARGIN {
                    return Ok(Trajectory::new(steps, TerminationCode::RdDischarge, initial_n_h2o2));
                }
                if self.eq.mixture.v_l < EMPTY_LIQUID {
                    return Ok(Trajectory::new(steps, TerminationCode::VesselEmptied, initial_n_h2o2));
                }
            }
        }

        let code = if self.rd_open {
            TerminationCode::RdDischarge
        } else {
            TerminationCode::Completed
        };
        Ok(Trajectory::new(steps, code, initial_n_h2o2))
    }

    /// Integrate one mesh interval and re-equilibrate; returns the vent
    /// flow that was applied over the interval.
    fn advance(&mut self) -> Result<VentState, SimulationError> {
        let (dt, method) = match self.phase {
            Phase::Heatup => (self.scenario.heatup_dt, self.scenario.heatup_integrator),
            Phase::Venting => (self.scenario.vent_dt, self.scenario.vent_integrator),
        };

        let ramp = self.controller.ramp(self.state[0], dt);
        let cond = VentConditions::from_state(&self.eq);
        let vent = vent_rate(&self.vent_model, &cond, self.rd_open);

        let rhs = ReactorRhs {
            kf: self.scenario.kf,
            ux: self.scenario.Ux,
            diameter: self.scenario.diameter(),
            ramp,
            vent,
            eq: &self.eq,
        };

        let problem = ODEProblem::new(&rhs, self.t, self.t + dt, self.state);
        let solution = match method {
            Integrator::Dopri5 => {
                let mut solver = ExplicitRungeKutta::dopri5().rtol(1e-6).atol(1e-8);
                problem.solve(&mut solver)
            }
            Integrator::Radau5 => {
                let mut solver = ImplicitRungeKutta::radau5().rtol(1e-6).atol(1e-8);
                problem.solve(&mut solver)
            }
            Integrator::Rk4 => {
                let mut solver = ExplicitRungeKutta::rk4(dt / 8.0);
                problem.solve(&mut solver)
            }
        };

        let sol = solution.map_err(|e| SimulationError::Integration {
            t: self.t,
            reason: e.to_string(),
        })?;
        let last = sol.y.last().copied().ok_or_else(|| SimulationError::Integration {
            t: self.t,
            reason: "solver returned an empty solution".to_string(),
        })?;
        if !last.iter().all(|v| v.is_finite()) {
            return Err(SimulationError::Integration {
                t: self.t,
                reason: "non-finite state after step".to_string(),
            });
        }

        self.state = last;
        for i in 2..5 {
            if self.state[i] < 0.0 {
                self.state[i] = 0.0;
            }
        }
        self.t += dt;

        let n_h2o = self.state[2];
        let n_h2o2 = self.state[3];
        let n_o2 = self.state[4];
        let ntotal = n_h2o + n_h2o2 + n_o2;
        if ntotal <= 1e-9 {
            return Err(SimulationError::Integration {
                t: self.t,
                reason: "vessel inventory fell to zero".to_string(),
            });
        }

        let input = EquilibriumInput {
            t: self.state[0],
            vr: self.scenario.VR,
            ntotal,
            z_h2o: n_h2o / ntotal,
            z_h2o2: n_h2o2 / ntotal,
            n_o2,
        };
        self.eq = equilibrate(&input, &self.eq.unknowns)?;

        debug!(
            "t = {:.1} s: T = {:.2} C, P = {:.1} kPa, vent = {:.3e} mol/s",
            self.t, self.state[0], self.eq.mixture.p, vent.n_vent
        );

        Ok(vent)
    }
}

/// Validate, initialize and run a scenario in one call.
pub fn run_scenario(scenario: Scenario) -> Result<Trajectory, AbortedRun> {
    match Simulation::new(scenario) {
        Ok(simulation) => simulation.run(),
        Err(error) => Err(AbortedRun {
            error,
            steps: Vec::new(),
        }),
    }
}
