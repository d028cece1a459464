//! Redlich-Kwong equation of state for the vapour phase.
//!
//! Cubic in the compressibility factor:
//! `Z^3 - Z^2 + (A - B - B^2)*Z - A*B = 0`
//! with `A = 0.42748*Pr/Tr^2.5`, `B = 0.08664*Pr/Tr`.

use super::PropertyError;
use crate::conversion::c2k;

const MAX_ITER: usize = 100;
const TOL: f64 = 1e-12;

/// Upper bound on an acceptable vapour root. The operating envelope keeps
/// every species below its Boyle temperature, where the RK vapour root
/// stays at or below unity; anything larger is not a state this system
/// can be in.
const Z_MAX: f64 = 1.0 + 1e-9;

/// Reduced temperature from a Celsius temperature and a critical temperature in K.
pub fn reduced_temperature(t: f64, tc: f64) -> f64 {
    c2k(t) / tc
}

/// Reduced pressure, both in kPa.
pub fn reduced_pressure(p: f64, pc: f64) -> f64 {
    p / pc
}

/// RK-EOS attraction and co-volume parameters (A, B).
pub fn rk_parameters(tr: f64, pr: f64) -> (f64, f64) {
    let a = 0.42748 * pr / tr.powf(2.5);
    let b = 0.08664 * pr / tr;
    (a, b)
}

fn cubic(z: f64, a: f64, b: f64) -> f64 {
    z.powi(3) - z.powi(2) + (a - b - b.powi(2)) * z - a * b
}

fn cubic_prime(z: f64, a: f64, b: f64) -> f64 {
    3.0 * z.powi(2) - 2.0 * z + (a - b - b.powi(2))
}

/// Vapour-root compressibility factor from reduced conditions.
///
/// Newton from Z = 0.99 with a bisection fallback on `(B, 1]`; the vapour
/// root is the largest real root of the cubic, in `(0, 1]` throughout this
/// system's operating envelope. A cubic whose only real root lies above
/// unity is reported as [`PropertyError::NoEosRoot`] rather than returned.
pub fn compressibility(
    species: &'static str,
    tr: f64,
    pr: f64,
) -> Result<f64, PropertyError> {
    if tr <= 0.0 || pr < 0.0 || !tr.is_finite() || !pr.is_finite() {
        return Err(PropertyError::DomainError {
            species,
            correlation: "RK-EOS",
            t: tr,
        });
    }

    let (a, b) = rk_parameters(tr, pr);

    let mut z = 0.99;
    for _ in 0..MAX_ITER {
        let f = cubic(z, a, b);
        if f.abs() < TOL {
            if z > 0.0 && z <= Z_MAX && z.is_finite() {
                return Ok(z);
            }
            break;
        }
        let df = cubic_prime(z, a, b);
        if df.abs() < 1e-30 {
            break;
        }
        let z_next = z - f / df;
        if !z_next.is_finite() || z_next <= b || z_next > 2.0 {
            break;
        }
        z = z_next;
    }

    // Newton wandered off; bracket the vapour root instead.
    let mut lo = b + 1e-12;
    let mut hi = Z_MAX;
    if cubic(lo, a, b) * cubic(hi, a, b) > 0.0 {
        return Err(PropertyError::NoEosRoot { species, tr, pr });
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if cubic(lo, a, b) * cubic(mid, a, b) <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        if hi - lo < TOL {
            break;
        }
    }
    let z = 0.5 * (lo + hi);
    if z > 0.0 && z.is_finite() {
        Ok(z)
    } else {
        Err(PropertyError::NoEosRoot { species, tr, pr })
    }
}

/// Residual of the RK cubic at a given Z, for solution verification.
pub fn residual(z: f64, tr: f64, pr: f64) -> f64 {
    let (a, b) = rk_parameters(tr, pr);
    cubic(z, a, b)
}
