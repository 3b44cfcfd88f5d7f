//! Local logarithmic slope `γ(r) = d ln ρ / d ln r`.
//!
//! Interior points use the centered log-log difference
//!
//! ```text
//! γ_i ≈ (ln ρ_{i+1} − ln ρ_{i−1}) / (ln r_{i+1} − ln r_{i−1})
//! ```
//!
//! and the first/last points use the one-sided forward/backward difference, so
//! the slope profile has exactly one value per grid point.
//!
//! Densities must be strictly positive: a non-positive value is an error, never a
//! NaN slope.

use crate::domain::SlopeProfile;
use crate::error::ModelError;

/// Estimate the log-log slope of `density` sampled at `radius`.
pub fn estimate_slopes(radius: &[f64], density: &[f64]) -> Result<SlopeProfile, ModelError> {
    if radius.len() != density.len() {
        return Err(ModelError::grid(format!(
            "radius/density length mismatch ({} vs {})",
            radius.len(),
            density.len()
        )));
    }
    let n = radius.len();
    if n < 2 {
        return Err(ModelError::grid("slope estimation needs at least 2 points"));
    }

    if let Some(i) = radius.windows(2).position(|w| w[1] <= w[0]) {
        return Err(ModelError::grid(format!(
            "radii must be strictly increasing (r[{}]={} >= r[{}]={})",
            i,
            radius[i],
            i + 1,
            radius[i + 1]
        )));
    }

    let mut ln_r = Vec::with_capacity(n);
    let mut ln_rho = Vec::with_capacity(n);
    for (&r, &rho) in radius.iter().zip(density) {
        if !(r.is_finite() && r > 0.0) {
            return Err(ModelError::grid(format!("radius {r} must be finite and > 0")));
        }
        if !(rho.is_finite() && rho > 0.0) {
            return Err(ModelError::NonPositiveDensity {
                radius: r,
                density: rho,
            });
        }
        ln_r.push(r.ln());
        ln_rho.push(rho.ln());
    }

    let mut slope = Vec::with_capacity(n);
    for i in 0..n {
        let (lo, hi) = match i {
            0 => (0, 1),
            i if i == n - 1 => (n - 2, n - 1),
            i => (i - 1, i + 1),
        };
        let d_ln_r = ln_r[hi] - ln_r[lo];
        if d_ln_r <= 0.0 {
            return Err(ModelError::grid(format!(
                "radii around r={} are not separable in ln r",
                radius[i]
            )));
        }
        slope.push((ln_rho[hi] - ln_rho[lo]) / d_ln_r);
    }

    Ok(SlopeProfile {
        radius: radius.to_vec(),
        slope,
    })
}
