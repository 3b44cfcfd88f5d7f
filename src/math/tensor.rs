//! Probabilistic stress-energy tensor `T^prob_{μν}` for a fluid at rest.
//!
//! ```text
//! u   = Γ(E) · ρ_Ψ · c²        (energy density, erg/cm³)
//! T00 = u
//! Tii = −w · u                 (i = 1..3, signature (+, −, −, −))
//! ```
//!
//! Γ already carries κA; it is not applied a second time.

use nalgebra::{Matrix4, Vector4};

use crate::domain::ParameterSet;
use crate::error::ModelError;
use crate::math::gamma;
use crate::models::C_LIGHT;
use crate::profile::rho_psi;

/// Diagonal `T^prob_{μν}` in cgs units.
pub fn stress_energy_tensor(
    energy: f64,
    rho_b: f64,
    params: &ParameterSet,
    redshift: f64,
    eos_w: f64,
) -> Result<Matrix4<f64>, ModelError> {
    if !(rho_b.is_finite() && rho_b >= 0.0) {
        return Err(ModelError::NonPositiveDensity {
            radius: f64::NAN,
            density: rho_b,
        });
    }

    let g = gamma(energy, params)?;
    let u = g * rho_psi(rho_b, params.f_ent(), redshift) * C_LIGHT * C_LIGHT;
    if !u.is_finite() {
        return Err(ModelError::NumericOverflow { energy });
    }

    let p = eos_w * u;
    Ok(Matrix4::from_diagonal(&Vector4::new(u, -p, -p, -p)))
}
