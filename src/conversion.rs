//! Unit conversion helpers used at the interfaces of the crate.
//!
//! Temperatures are carried in degrees Celsius through the correlations,
//! vessel volumes in litres, relief device diameters in inches (vendor
//! convention), areas in square meters.

use std::f64::consts::PI;

/// Convert temperature from degrees Celsius to kelvin.
pub fn c2k(temperature: f64) -> f64 {
    temperature + 273.15
}

/// Convert volume from US gallons to litres.
pub fn g2l(volume_gal: f64) -> f64 {
    volume_gal * 3.78541
}

/// Flow area of a circular relief device, diameter in inches, area in m².
pub fn a_relief(diameter_in: f64) -> f64 {
    PI * (diameter_in * 0.0254).powi(2) / 4.0
}

/// Wetted reactor area in m² from the liquid volume (L) and vessel diameter (m),
/// cylinder approximation: flat bottom plus wall up to the liquid level.
pub fn a_wet(liquid_volume: f64, vessel_diameter: f64) -> f64 {
    let h_wet = (liquid_volume * 0.001) / (PI * (vessel_diameter / 2.0).powi(2));

    PI * (vessel_diameter / 2.0).powi(2) + 2.0 * PI * (vessel_diameter / 2.0) * h_wet
}

/// Discharge coefficient of a valve from its flow coefficient Cv and
/// orifice diameter in inches.
pub fn cv2kd(cv: f64, diameter_in: f64) -> f64 {
    cv / (27.66 * a_relief(diameter_in) * 1550.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn celsius_to_kelvin() {
        assert_relative_eq!(c2k(25.0), 298.15);
        assert_relative_eq!(c2k(-273.15), 0.0);
    }

    #[test]
    fn gallons_to_litres() {
        assert_relative_eq!(g2l(100.0), 378.541);
    }

    #[test]
    fn relief_area_one_inch() {
        // 1 in = 25.4 mm, A = pi*d^2/4
        assert_relative_eq!(a_relief(1.0), PI * 0.0254_f64.powi(2) / 4.0);
    }

    #[test]
    fn wetted_area_grows_with_level() {
        let d = 0.9;
        let a_low = a_wet(100.0, d);
        let a_high = a_wet(300.0, d);
        assert!(a_high > a_low);
        // empty vessel still wets the bottom head
        assert_relative_eq!(a_wet(0.0, d), PI * (d / 2.0).powi(2));
    }

    #[test]
    fn kd_is_dimensionless_and_sane() {
        let kd = cv2kd(5.5, 0.5);
        assert!(kd > 0.0 && kd < 2.0);
    }
}
