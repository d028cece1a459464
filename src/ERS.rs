//! # Emergency Relief System Module
//!
//! DIERS vent flow technology for the reactor headspace devices:
//! critical-pressure test, single-phase compressible orifice flow through
//! the backpressure regulator or an open rupture disc, drift-flux vapour
//! disengagement (churn-turbulent or bubbly), and the homogeneous
//! equilibrium two-phase discharge with its exit quality.

pub mod flow;
mod ers_tests;

pub use flow::{
    FlowRegime, TwoPhaseOnset, VentConditions, VentModel, VentRegime, VentState,
    critical_pressure, two_phase_onset, vapor_mass_flux, vent_rate, void_fraction,
};
