//! Immutable snapshots of a converged equilibrium solution.

use serde::{Deserialize, Serialize};

/// Per-species conditions at equilibrium.
///
/// For oxygen (non-condensable) the liquid-side fields `x`, `density`,
/// `cp_l`, `psat` and `gamma` are not meaningful and are set to zero
/// (gamma to one).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeciesState {
    /// Liquid phase mole fraction
    pub x: f64,
    /// Vapour phase mole fraction
    pub y: f64,
    /// Overall mole fraction in the vessel
    pub z: f64,
    /// Amount in the vessel (mol)
    pub n: f64,
    /// Mass in the vessel (g)
    pub m: f64,
    /// Partial pressure (kPa)
    pub partial_pressure: f64,
    /// Saturation pressure at the vessel temperature (kPa)
    pub psat: f64,
    /// Activity coefficient in the liquid
    pub gamma: f64,
    /// Vapour compressibility factor
    pub compressibility: f64,
    /// Reduced temperature
    pub tr: f64,
    /// Reduced pressure
    pub pr: f64,
    /// Liquid density (kg/L)
    pub density: f64,
    /// Liquid constant pressure heat capacity (J/(g·K))
    pub cp_l: f64,
    /// Vapour constant pressure heat capacity (J/(g·K))
    pub cp_g: f64,
}

/// Mixture-level conditions at equilibrium.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MixtureState {
    /// Total vessel pressure (kPa)
    pub p: f64,
    /// Total amount in the vessel (mol)
    pub ntotal: f64,
    /// Amount of liquid (mol)
    pub n_l: f64,
    /// Amount of vapour (mol)
    pub n_g: f64,
    /// Liquid volume (L)
    pub v_l: f64,
    /// Headspace volume (L)
    pub v_g: f64,
    /// Mass-averaged liquid heat capacity (J/(g·K))
    pub cp_l: f64,
    /// Mass-averaged vapour heat capacity (J/(g·K))
    pub cp_g: f64,
    /// Vessel-average heat capacity (J/(g·K))
    pub cp: f64,
    /// Average liquid density (kg/L)
    pub rho_l: f64,
    /// Average vapour density (kg/L)
    pub rho_g: f64,
    /// Enthalpy of vaporization (J/g)
    pub dh_vap: f64,
    /// Surface tension of the liquid (N/m)
    pub surface_tension: f64,
    /// d(vL)/dT (L/(kg·K))
    pub dv_l_dt: f64,
    /// d(vG)/dT (L/(kg·K))
    pub dv_g_dt: f64,
    /// Vapour heat capacity ratio Cp/Cv
    pub k: f64,
    /// Mass fraction of vapour in the vessel
    pub vapor_mass_fraction: f64,
}

impl MixtureState {
    /// Average liquid specific volume (L/kg).
    pub fn v_liquid_specific(&self) -> f64 {
        1.0 / self.rho_l
    }

    /// Specific volume change upon vaporization (L/kg).
    pub fn vfg(&self) -> f64 {
        1.0 / self.rho_g - 1.0 / self.rho_l
    }
}
