//! # Vapour Liquid Equilibrium Module
//!
//! Twelve-unknown flash of the H2O-H2O2-O2 system at fixed temperature,
//! vessel volume and overall composition: liquid and vapour mole fractions,
//! phase amounts, total and partial pressures, liquid volume and the oxygen
//! compressibility factor are solved simultaneously by a damped Newton
//! iteration with a finite-difference Jacobian.
//!
//! The converged solution is exposed as immutable [`state::SpeciesState`] /
//! [`state::MixtureState`] snapshots; the raw unknown vector is kept for
//! warm-starting the next solve along an integration trajectory.

pub mod solver;
pub mod state;
mod vle_tests;

pub use solver::{EquilibriumError, EquilibriumInput, EquilibriumState, equilibrate, initial_conditions};
pub use state::{MixtureState, SpeciesState};
