#[cfg(test)]
mod tests {
    use crate::Properties::{eos, mixture, oxygen, peroxide, water};
    use crate::Properties::{PropertyError, scatchard_coefficients};
    use approx::assert_relative_eq;

    #[test]
    fn water_density_at_25() {
        // rational polynomial fit, kg/L
        assert_relative_eq!(water::density_l(25.0), 0.99673, max_relative = 1e-3);
        // monotone decreasing over the operating range
        assert!(water::density_l(25.0) > water::density_l(90.0));
    }

    #[test]
    fn peroxide_density_above_water() {
        let t = 25.0;
        let rho = peroxide::density_l(t);
        assert!(rho > water::density_l(t));
        assert!(rho > 1.2 && rho < 1.5);
        // pinned constant above the fit range
        assert_relative_eq!(peroxide::density_l(120.0), 1.2456174226244978);
    }

    #[test]
    fn water_antoine_boiling_point() {
        // near one atmosphere at 100 deg C
        assert_relative_eq!(water::psat(100.0), 101.9, max_relative = 5e-3);
        assert_relative_eq!(water::psat(25.0), 3.16, max_relative = 1e-2);
    }

    #[test]
    fn water_antoine_coefficient_switch_is_small() {
        // the two fitted sets hand over at 99 deg C with a sub-percent step
        let below = water::psat(99.0);
        let above = water::psat(99.0 + 1e-9);
        assert!((above - below).abs() / below < 0.01);
    }

    #[test]
    fn peroxide_less_volatile_than_water() {
        for t in [25.0, 60.0, 110.0] {
            assert!(peroxide::psat(t) < water::psat(t));
        }
    }

    #[test]
    fn liquid_heat_capacity_of_water() {
        // 4.18 J/(g K) at room temperature
        assert_relative_eq!(water::cp_l(25.0), 4.184, max_relative = 1e-2);
    }

    #[test]
    fn activity_coefficients_normalize() {
        // pure water: gamma_H2O = 1 identically
        assert_relative_eq!(water::gamma(60.0, 1.0), 1.0);
        // pure peroxide: gamma_H2O2 = 1 identically
        assert_relative_eq!(peroxide::gamma(60.0, 0.0), 1.0);

        // mixture values stay finite and positive in all four Ba branches
        for t in [30.0, 60.0, 90.0, 130.0] {
            let gw = water::gamma(t, 0.8);
            let gp = peroxide::gamma(t, 0.8);
            assert!(gw.is_finite() && gw > 0.0);
            assert!(gp.is_finite() && gp > 0.0);
        }
    }

    #[test]
    fn scatchard_high_temperature_asymptote() {
        let (ba, _, _, _) = scatchard_coefficients(400.0);
        assert_relative_eq!(ba, -612.9613);
    }

    #[test]
    fn eos_vapour_root_near_unity_at_low_pressure() {
        let (tr, pr) = oxygen::reduced(25.0, 101.325);
        let z = eos::compressibility(oxygen::SPECIES, tr, pr).unwrap();
        assert!(z > 0.9 && z <= 1.0 + 1e-9);
        assert!(eos::residual(z, tr, pr).abs() < 1e-10);
    }

    #[test]
    fn eos_residual_certifies_all_species() {
        let t = 110.0;
        let p = 500.0;
        for (z, (tr, pr)) in [
            (water::compressibility(t, p).unwrap(), water::reduced(t, p)),
            (peroxide::compressibility(t, p).unwrap(), peroxide::reduced(t, p)),
            (oxygen::compressibility(t, p).unwrap(), oxygen::reduced(t, p)),
        ] {
            assert!(z > 0.0 && z <= 1.0 + 1e-9);
            assert!(eos::residual(z, tr, pr).abs() < 1e-10);
        }
    }

    #[test]
    fn eos_rejects_nonphysical_reduced_temperature() {
        let err = eos::compressibility("H2O", -1.0, 0.5).unwrap_err();
        assert!(matches!(err, PropertyError::DomainError { .. }));
    }

    #[test]
    fn eos_rejects_vapour_root_above_unity() {
        // above the Boyle temperature B > A and the only real root of the
        // cubic sits above 1; that state is outside the operating envelope
        // and must not come back as a compressibility
        let err = eos::compressibility("O2", 3.0, 1.0).unwrap_err();
        assert!(matches!(err, PropertyError::NoEosRoot { .. }));
    }

    #[test]
    fn enthalpy_of_vaporization() {
        assert_relative_eq!(mixture::dh_vap(100.0), 2245.6, max_relative = 1e-3);
        // decreases toward the critical point
        assert!(mixture::dh_vap(25.0) > mixture::dh_vap(110.0));
    }

    #[test]
    fn surface_tension_of_water() {
        assert_relative_eq!(mixture::surface_tension(25.0), 0.0720, max_relative = 1e-2);
        assert!(mixture::surface_tension(110.0) < mixture::surface_tension(25.0));
    }

    #[test]
    fn liquid_specific_volume_expands_with_temperature() {
        assert!(mixture::dv_l_dt(25.0) > 0.0);
        assert!(mixture::dv_l_dt(110.0) > mixture::dv_l_dt(25.0));
    }

    #[test]
    fn heat_capacity_ratio_of_pure_oxygen() {
        let cpg = oxygen::cp_g(25.0);
        let k = mixture::heat_capacity_ratio((0.0, 0.0), (0.0, 0.0), (1.0, cpg));
        assert_relative_eq!(k, 1.394, max_relative = 5e-3);
    }

    #[test]
    fn vapour_specific_volume_derivative_sums_components() {
        let dv = mixture::dv_g_dt((1.0, 50.0), (1.0, 10.0), (1.0, 40.0));
        assert!(dv > 0.0);
        // dominated by the lightest, lowest-pressure component
        let dv_water_only = mixture::dv_g_dt((1.0, 50.0), (1.0, 1e12), (1.0, 1e12));
        assert!(dv > dv_water_only);
    }
}
