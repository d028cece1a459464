//! Decomposition kinetics for hydrogen peroxide.
//!
//! Single first-order Arrhenius reaction `2 H2O2 -> 2 H2O + O2`,
//! rate = k(T) * nH2O2 with k(T) = A * kf * exp(-Ea/(R*T_K)).
//! The contamination factor `kf` scales the pre-exponential: kf = 1 is the
//! clean baseline, larger values model catalytic contamination of the batch.

use crate::constants::{A_ARRHENIUS, EA_ARRHENIUS, R};
use crate::conversion::c2k;

/// First-order rate constant in 1/s at T (deg C) with contamination factor `kf`.
pub fn rate_constant(t: f64, kf: f64) -> f64 {
    A_ARRHENIUS * kf * (-EA_ARRHENIUS / (R * c2k(t))).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rate_is_slow_when_clean() {
        // clean peroxide at reaction temperature decomposes over weeks
        let k = rate_constant(110.0, 1.0);
        assert!(k > 1e-8 && k < 1e-6);
    }

    #[test]
    fn contamination_scales_linearly() {
        let k1 = rate_constant(80.0, 1.0);
        let k100 = rate_constant(80.0, 100.0);
        assert_relative_eq!(k100 / k1, 100.0, max_relative = 1e-12);
    }

    #[test]
    fn rate_increases_with_temperature() {
        assert!(rate_constant(110.0, 1.0) > rate_constant(25.0, 1.0));
        // roughly an order of magnitude per ~30 K in this range
        let ratio = rate_constant(110.0, 1.0) / rate_constant(80.0, 1.0);
        assert!(ratio > 5.0 && ratio < 20.0);
    }
}
