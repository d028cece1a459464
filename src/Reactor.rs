//! Batch reactor runaway and relief simulation.
//!
//! Ties the property, equilibrium and vent-flow layers together into a
//! time-marched scenario: a jacketed vessel charged with aqueous hydrogen
//! peroxide is heated to its hold temperature while decomposition generates
//! oxygen, and the installed relief devices respond to the resulting
//! pressure rise.
//!
//! The march alternates two sub-steps. The ODE balances advance temperature
//! and inventory across one mesh interval with the vent flow and the phase
//! split frozen at their values from the previous interval; the
//! twelve-equation flash then re-equilibrates the vessel at the new state
//! and its converged pressure drives the device logic for the next
//! interval.

pub mod controller;
pub mod ode;
pub mod scenario;
pub mod trajectory;


pub use controller::JacketController;
pub use ode::{AbortedRun, Simulation, SimulationError, TerminationCode, run_scenario};
pub use scenario::{ConfigurationError, Integrator, Scenario};
pub use trajectory::{StepRecord, Trajectory};
