//! Scenario definition: vessel geometry, charge, relief hardware, jacket
//! control and integration settings in one serializable bundle.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ERS::flow::{FlowRegime, VentModel};
use crate::conversion::{a_relief, cv2kd, g2l};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Integration method for one phase of the march.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrator {
    /// Dormand-Prince 5(4), adaptive explicit
    Dopri5,
    /// Radau IIA order 5, adaptive implicit
    Radau5,
    /// Classic fixed-step Runge-Kutta 4
    Rk4,
}

/// Full description of one simulated run.
///
/// Field names follow the relief-sizing nomenclature: `VR` vessel volume
/// (L), `AR` straight-side aspect ratio, `Ux` jacket heat transfer
/// coefficient (W/(m²·K)), `MAWP` maximum allowable working pressure
/// (kPa), `D_RD`/`P_RD`/`Kd_RD` rupture disc diameter (in), burst pressure
/// (kPa) and discharge coefficient, `D_BPR`/`Cv_BPR`/`P_BPR` backpressure
/// regulator diameter (in), valve coefficient and set point (kPa),
/// `XH2O2` charge mass fraction peroxide, `mR` charge mass (kg), `kf`
/// decomposition rate multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub VR: f64,
    pub AR: f64,
    pub Ux: f64,
    pub MAWP: f64,

    pub RD: bool,
    pub D_RD: f64,
    pub P_RD: f64,
    pub Kd_RD: f64,

    pub BPR: bool,
    pub D_BPR: f64,
    pub Cv_BPR: f64,
    pub P_BPR: f64,

    /// Evaluate two-phase swell through an open rupture disc
    pub two_phase: bool,
    pub flow_regime: FlowRegime,

    pub XH2O2: f64,
    pub mR: f64,
    pub T0: f64,
    pub P0: f64,

    /// Hold temperature (deg C)
    pub rxn_temp: f64,
    /// Hold duration (h); the jacket set point reverts to `T0` afterwards
    pub rxn_time: f64,
    /// Cooldown duration simulated after the hold (h)
    pub cool_time: f64,
    pub kf: f64,

    /// Jacket ramp limit (deg C/min)
    pub max_rate: f64,
    pub Kp: f64,
    pub Ki: f64,
    pub Kd: f64,

    /// Mesh interval before any disc burst (s)
    pub heatup_dt: f64,
    /// Mesh interval once the disc is open (s)
    pub vent_dt: f64,
    pub max_steps: usize,
    pub heatup_integrator: Integrator,
    pub vent_integrator: Integrator,
}

impl Scenario {
    /// Baseline scenario for a vessel of `vol_gal` gallons: 30 wt% peroxide
    /// charge, jacket ramp to 110 deg C, no relief devices.
    pub fn new(vol_gal: f64) -> Self {
        Scenario {
            VR: g2l(vol_gal),
            AR: 1.5,
            Ux: 450.0,
            MAWP: 10000.0,
            RD: false,
            D_RD: 2.0,
            P_RD: 1000.0,
            Kd_RD: 0.9,
            BPR: false,
            D_BPR: 0.5,
            Cv_BPR: 5.5,
            P_BPR: 200.0,
            two_phase: false,
            flow_regime: FlowRegime::ChurnTurbulent,
            XH2O2: 0.30,
            mR: 304.0,
            T0: 25.0,
            P0: crate::constants::P_ATM,
            rxn_temp: 110.0,
            rxn_time: 6.0,
            cool_time: 2.0,
            kf: 1.0,
            max_rate: 2.0,
            Kp: 0.016,
            Ki: 0.0,
            Kd: 0.0,
            heatup_dt: 15.0,
            vent_dt: 0.01,
            max_steps: 250_000,
            heatup_integrator: Integrator::Dopri5,
            vent_integrator: Integrator::Radau5,
        }
    }

    /// Inner diameter (m) of a cylinder of volume `VR` and aspect ratio `AR`.
    pub fn diameter(&self) -> f64 {
        2.0 * ((self.VR * 0.001) / (2.0 * PI * self.AR)).powf(1.0 / 3.0)
    }

    /// Straight-side height (m).
    pub fn height(&self) -> f64 {
        self.AR * self.diameter()
    }

    /// Vessel cross-section (m²).
    pub fn a_vessel(&self) -> f64 {
        PI * self.diameter().powi(2) / 4.0
    }

    /// Relief hardware description for the vent flow model.
    pub fn vent_model(&self) -> VentModel {
        VentModel {
            rd_enabled: self.RD,
            bpr_enabled: self.BPR,
            two_phase: self.two_phase,
            flow_regime: self.flow_regime,
            a_rd: a_relief(self.D_RD),
            kd_rd: self.Kd_RD,
            a_bpr: a_relief(self.D_BPR),
            kd_bpr: cv2kd(self.Cv_BPR, self.D_BPR),
            p_bpr: self.P_BPR,
            a_vessel: self.a_vessel(),
            vr: self.VR,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.mR <= 0.0 {
            return Err(ConfigurationError::MissingData(
                "reactor charge mR must be positive".to_string(),
            ));
        }
        if self.VR <= 0.0 {
            return Err(ConfigurationError::MissingData(
                "vessel volume VR must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.XH2O2) {
            return Err(ConfigurationError::InvalidConfiguration(format!(
                "peroxide mass fraction XH2O2 = {} outside [0, 1]",
                self.XH2O2
            )));
        }
        if self.RD && self.D_RD <= 0.0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "rupture disc enabled with non-positive diameter D_RD".to_string(),
            ));
        }
        if self.RD && self.P_RD <= self.P0 {
            return Err(ConfigurationError::InvalidConfiguration(format!(
                "burst pressure P_RD = {} kPa does not exceed the initial pressure",
                self.P_RD
            )));
        }
        if self.BPR && (self.D_BPR <= 0.0 || self.Cv_BPR <= 0.0) {
            return Err(ConfigurationError::InvalidConfiguration(
                "backpressure regulator enabled without a positive D_BPR and Cv_BPR".to_string(),
            ));
        }
        if self.BPR && self.P_BPR <= crate::constants::P_ATM {
            return Err(ConfigurationError::InvalidConfiguration(format!(
                "regulator set point P_BPR = {} kPa must exceed atmospheric",
                self.P_BPR
            )));
        }
        if self.kf <= 0.0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "rate multiplier kf must be positive".to_string(),
            ));
        }
        if self.heatup_dt <= 0.0 || self.vent_dt <= 0.0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "mesh intervals heatup_dt and vent_dt must be positive".to_string(),
            ));
        }
        if self.rxn_time <= 0.0 || self.cool_time < 0.0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "hold and cooldown durations must be positive".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(ConfigurationError::InvalidConfiguration(
                "max_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
