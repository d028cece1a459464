//! Recorded output of a simulated run.

use serde::{Deserialize, Serialize};

use crate::ERS::flow::{VentRegime, VentState};
use crate::VLE::{EquilibriumState, MixtureState, SpeciesState};

use super::ode::TerminationCode;

/// Vessel state at the end of one mesh interval, after the flash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Simulation time (s)
    pub t: f64,
    /// Reactor temperature (deg C)
    pub temperature: f64,
    /// Jacket temperature (deg C)
    pub jacket_temperature: f64,
    /// Total pressure from the converged flash (kPa)
    pub pressure: f64,
    pub n_h2o: f64,
    pub n_h2o2: f64,
    pub n_o2: f64,
    /// Vent flow that was applied over the interval ending here
    pub vent: VentState,
    pub water: SpeciesState,
    pub peroxide: SpeciesState,
    pub oxygen: SpeciesState,
    pub mixture: MixtureState,
}

impl StepRecord {
    pub(crate) fn new(
        t: f64,
        temperature: f64,
        jacket_temperature: f64,
        vent: VentState,
        eq: &EquilibriumState,
    ) -> Self {
        StepRecord {
            t,
            temperature,
            jacket_temperature,
            pressure: eq.mixture.p,
            n_h2o: eq.water.n,
            n_h2o2: eq.peroxide.n,
            n_o2: eq.oxygen.n,
            vent,
            water: eq.water,
            peroxide: eq.peroxide,
            oxygen: eq.oxygen,
            mixture: eq.mixture,
        }
    }
}

/// Complete trajectory of one run with summary accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub steps: Vec<StepRecord>,
    pub termination: TerminationCode,
    initial_n_h2o2: f64,
}

impl Trajectory {
    pub(crate) fn new(
        steps: Vec<StepRecord>,
        termination: TerminationCode,
        initial_n_h2o2: f64,
    ) -> Self {
        Trajectory {
            steps,
            termination,
            initial_n_h2o2,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.steps.last()
    }

    pub fn max_pressure(&self) -> f64 {
        self.steps.iter().fold(0.0, |m, s| m.max(s.pressure))
    }

    pub fn max_temperature(&self) -> f64 {
        self.steps.iter().fold(f64::MIN, |m, s| m.max(s.temperature))
    }

    pub fn max_vent_rate(&self) -> f64 {
        self.steps.iter().fold(0.0, |m, s| m.max(s.vent.n_vent))
    }

    /// Smallest exit quality over the intervals that actually vented, or
    /// `None` when every device stayed closed.
    pub fn min_quality(&self) -> Option<f64> {
        self.steps
            .iter()
            .filter(|s| s.vent.regime != VentRegime::Closed)
            .map(|s| s.vent.quality)
            .fold(None, |m, q| Some(m.map_or(q, |v: f64| v.min(q))))
    }

    /// Fraction of the charged peroxide decomposed or vented by the end.
    pub fn conversion(&self) -> f64 {
        match self.steps.last() {
            Some(last) if self.initial_n_h2o2 > 0.0 => {
                1.0 - last.n_h2o2 / self.initial_n_h2o2
            }
            _ => 0.0,
        }
    }
}
