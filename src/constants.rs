//! Universal constants for the H2O-H2O2-O2 system.
//!
//! Unit system follows the rest of the crate: kPa, L, mol, K, J, g.
//! With these units the gas constant serves both the ideal gas law
//! (kPa·L/(mol·K)) and the Arrhenius exponent (J/(mol·K)) unchanged.

/// Molecular weight of water (g/mol)
pub const M_H2O: f64 = 18.01528;
/// Molecular weight of oxygen (g/mol)
pub const M_O2: f64 = 31.998;
/// Molecular weight of hydrogen peroxide (g/mol)
pub const M_H2O2: f64 = 34.0147;

/// Universal gas constant, kPa·L/(mol·K) = J/(mol·K)
pub const R: f64 = 8.3145;
/// Gravitational acceleration (m/s²)
pub const G: f64 = 9.81;

/// Atmospheric pressure (kPa)
pub const P_ATM: f64 = 101.325;

/// Critical temperature of oxygen (K)
pub const TC_O2: f64 = 154.6;
/// Critical temperature of water (K)
pub const TC_H2O: f64 = 647.096;
/// Critical temperature of hydrogen peroxide (K)
pub const TC_H2O2: f64 = 728.0;

/// Critical pressure of oxygen (kPa)
pub const PC_O2: f64 = 5050.0;
/// Critical pressure of water (kPa)
pub const PC_H2O: f64 = 22060.0;
/// Critical pressure of hydrogen peroxide (kPa)
pub const PC_H2O2: f64 = 22000.0;

/// Heat of decomposition 2H2O2 -> 2H2O + O2, per gram of peroxide (J/g).
/// Negative: the reaction is exothermic.
pub const DH_RXN: f64 = -98300.0 / M_H2O2;
/// Arrhenius pre-exponential factor for peroxide decomposition (1/s)
pub const A_ARRHENIUS: f64 = 135000.0;
/// Activation energy for peroxide decomposition (J/mol)
pub const EA_ARRHENIUS: f64 = 10357.0 * R;
