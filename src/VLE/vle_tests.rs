#[cfg(test)]
mod tests {
    use crate::VLE::solver::{EquilibriumError, EquilibriumInput, equilibrate, initial_conditions};
    use crate::constants::P_ATM;
    use crate::conversion::g2l;
    use approx::assert_relative_eq;

    // 100 gal vessel charged with 304 kg of 30 % w/w peroxide at ambient
    fn baseline_charge() -> crate::VLE::EquilibriumState {
        initial_conditions(25.0, P_ATM, 0.30, 304.0, g2l(100.0))
            .expect("baseline charge must equilibrate")
    }

    #[test]
    fn volumes_close_to_vessel_volume() {
        let state = baseline_charge();
        assert_relative_eq!(
            state.mixture.v_l + state.mixture.v_g,
            g2l(100.0),
            max_relative = 1e-12
        );
        assert!(state.mixture.v_l > state.mixture.v_g);
    }

    #[test]
    fn species_balances_close() {
        let state = baseline_charge();
        let m = &state.mixture;

        let water_held = m.n_l * state.water.x + m.n_g * state.water.y;
        assert_relative_eq!(water_held, state.water.n, max_relative = 1e-6);

        let peroxide_held = m.n_l * state.peroxide.x + m.n_g * state.peroxide.y;
        assert_relative_eq!(peroxide_held, state.peroxide.n, max_relative = 1e-6);

        assert_relative_eq!(m.n_l + m.n_g, m.ntotal, max_relative = 1e-9);
    }

    #[test]
    fn mole_fractions_normalize() {
        let state = baseline_charge();
        assert_relative_eq!(state.water.x + state.peroxide.x, 1.0, max_relative = 1e-6);
        assert_relative_eq!(
            state.water.y + state.peroxide.y + state.oxygen.y,
            1.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn ambient_charge_pressure_is_near_ambient() {
        let state = baseline_charge();
        // oxygen fills the headspace at the charge pressure; the water and
        // peroxide vapour add a few kPa on top
        assert!(state.mixture.p > P_ATM);
        assert!(state.mixture.p < P_ATM + 10.0);
        // liquid-full vessel at ambient: nearly all mass is liquid
        assert!(state.mixture.vapor_mass_fraction < 0.05);
    }

    #[test]
    fn partial_pressures_sum_to_total() {
        let state = baseline_charge();
        let sum = state.water.partial_pressure
            + state.peroxide.partial_pressure
            + state.oxygen.partial_pressure;
        assert_relative_eq!(sum, state.mixture.p, max_relative = 1e-6);
    }

    #[test]
    fn warm_restart_reproduces_solution() {
        let state = baseline_charge();
        let input = EquilibriumInput {
            t: 25.0,
            vr: g2l(100.0),
            ntotal: state.mixture.ntotal,
            z_h2o: state.water.z,
            z_h2o2: state.peroxide.z,
            n_o2: state.oxygen.n,
        };

        let again = equilibrate(&input, &state.unknowns).expect("warm restart must converge");
        assert_relative_eq!(again.mixture.p, state.mixture.p, max_relative = 1e-9);
        assert_relative_eq!(again.mixture.v_l, state.mixture.v_l, max_relative = 1e-9);
    }

    #[test]
    fn hot_flash_raises_pressure() {
        let cold = baseline_charge();
        let input = EquilibriumInput {
            t: 110.0,
            vr: g2l(100.0),
            ntotal: cold.mixture.ntotal,
            z_h2o: cold.water.z,
            z_h2o2: cold.peroxide.z,
            n_o2: cold.oxygen.n,
        };

        // warm start across an 85 K jump; the ideal reset backstops it
        let hot = equilibrate(&input, &cold.unknowns).expect("hot flash must converge");
        assert!(hot.mixture.p > 150.0 && hot.mixture.p < 350.0);
        assert!(hot.mixture.n_g > cold.mixture.n_g);
        assert!(hot.water.partial_pressure > cold.water.partial_pressure);
    }

    #[test]
    fn water_dominates_condensable_vapour() {
        let state = baseline_charge();
        // water is far more volatile than peroxide
        assert!(state.water.y > 10.0 * state.peroxide.y);
    }

    #[test]
    fn overfilled_vessel_is_rejected() {
        let err = initial_conditions(25.0, P_ATM, 0.30, 5000.0, g2l(100.0)).unwrap_err();
        assert!(matches!(err, EquilibriumError::Infeasible(_)));
    }
}
