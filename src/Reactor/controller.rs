//! PID jacket controller producing a rate-limited temperature ramp.

/// Computes the jacket temperature ramp (deg C/min) from the reactor
/// temperature error. The integral term carries anti-windup clamping so a
/// long saturation at the ramp limit cannot store unbounded correction.
#[derive(Debug, Clone)]
pub struct JacketController {
    kp: f64,
    ki: f64,
    kd: f64,
    max_rate: f64,
    setpoint: f64,
    integral: f64,
    prev_error: Option<f64>,
}

impl JacketController {
    pub fn new(kp: f64, ki: f64, kd: f64, max_rate: f64, setpoint: f64) -> Self {
        JacketController {
            kp,
            ki,
            kd,
            max_rate,
            setpoint,
            integral: 0.0,
            prev_error: None,
        }
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Change the target. The derivative history restarts so the set point
    /// jump does not kick the output; accumulated integral action carries
    /// over.
    pub fn set_target(&mut self, setpoint: f64) {
        if setpoint != self.setpoint {
            self.setpoint = setpoint;
            self.prev_error = None;
        }
    }

    /// One controller evaluation over an interval of `dt` seconds at
    /// reactor temperature `t`. Returns the ramp in deg C/min, clamped to
    /// the configured limit.
    pub fn ramp(&mut self, t: f64, dt: f64) -> f64 {
        let error = self.setpoint - t;

        if self.ki != 0.0 {
            let limit = self.max_rate / self.ki.abs();
            self.integral = (self.integral + error * dt).clamp(-limit, limit);
        }

        let derivative = match self.prev_error {
            Some(prev) if dt > 0.0 => (error - prev) / dt,
            _ => 0.0,
        };
        self.prev_error = Some(error);

        (self.kp * error + self.ki * self.integral + self.kd * derivative)
            .clamp(-self.max_rate, self.max_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn proportional_ramp_and_clamp() {
        let mut pid = JacketController::new(0.016, 0.0, 0.0, 2.0, 110.0);
        // 85 K error: proportional band, below the limit
        assert_relative_eq!(pid.ramp(25.0, 15.0), 0.016 * 85.0, max_relative = 1e-12);
        // huge error saturates at the rate limit
        let mut pid = JacketController::new(0.016, 0.0, 0.0, 2.0, 500.0);
        assert_relative_eq!(pid.ramp(25.0, 15.0), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn cooling_ramp_is_negative() {
        let mut pid = JacketController::new(0.016, 0.0, 0.0, 2.0, 25.0);
        assert!(pid.ramp(110.0, 15.0) < 0.0);
    }

    #[test]
    fn integral_windup_is_clamped() {
        let mut pid = JacketController::new(0.0, 0.01, 0.0, 2.0, 110.0);
        for _ in 0..100_000 {
            pid.ramp(25.0, 15.0);
        }
        let ramp = pid.ramp(25.0, 15.0);
        assert!(ramp <= 2.0);
        assert_relative_eq!(ramp, 2.0, max_relative = 1e-9);
    }

    #[test]
    fn setpoint_change_restarts_derivative() {
        let mut pid = JacketController::new(0.016, 0.0, 1.0, 5.0, 110.0);
        pid.ramp(25.0, 15.0);
        pid.set_target(25.0);
        // first evaluation after a retarget has no derivative kick
        let ramp = pid.ramp(25.0, 15.0);
        assert_relative_eq!(ramp, 0.0, max_relative = 1e-12);
    }
}
