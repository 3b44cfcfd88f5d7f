//! Baryonic density evaluation.
//!
//! - NFW-type: `ρ(r) = ρ_s / (x (1 + x)²)`, `x = r / r_s` (diverges as `r → 0`)
//! - cored isothermal: `ρ(r) = ρ0 / (1 + (r / r_core)²)` (finite as `r → 0`)

use crate::domain::BaryonProfile;
use crate::error::ModelError;

/// Evaluate `ρ_b(r)`; returns an error if the result is not strictly positive.
pub fn baryon_density(profile: &BaryonProfile, r: f64) -> Result<f64, ModelError> {
    if !(r.is_finite() && r > 0.0) {
        return Err(ModelError::grid(format!("radius {r} must be finite and > 0")));
    }

    let rho = match *profile {
        BaryonProfile::Nfw { rho_s, r_s } => {
            let x = r / r_s;
            rho_s / (x * (1.0 + x).powi(2))
        }
        BaryonProfile::CoredIsothermal { rho0, r_core } => {
            let x = r / r_core;
            rho0 / (1.0 + x * x)
        }
    };

    if !(rho.is_finite() && rho > 0.0) {
        return Err(ModelError::NonPositiveDensity {
            radius: r,
            density: rho,
        });
    }
    Ok(rho)
}
