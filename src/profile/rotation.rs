//! Enclosed mass and circular-velocity ratio.
//!
//! `M(<r) = ∫₀ʳ 4π s² ρ(s) ds`. Inside the first grid radius the density is
//! extended as a power law with the inner slope γ₀, giving the cap
//! `4π ρ₀ r₀³ / (3 + γ₀)`; between grid points we integrate `4π r³ ρ` over
//! `ln r` with the trapezoid rule.
//!
//! With `v_c² = G M / r`, the ratio `v_eff / v_b = sqrt(M_eff / M_b)` is
//! independent of G and of the length unit.

use std::f64::consts::PI;

use crate::error::ModelError;

/// Cumulative enclosed mass at every grid radius.
pub fn enclosed_mass(
    radius: &[f64],
    density: &[f64],
    inner_slope: f64,
) -> Result<Vec<f64>, ModelError> {
    if radius.len() != density.len() || radius.is_empty() {
        return Err(ModelError::grid(format!(
            "enclosed mass needs matching, non-empty arrays ({} radii, {} densities)",
            radius.len(),
            density.len()
        )));
    }
    if !(inner_slope > -3.0) {
        return Err(ModelError::DivergentEnclosedMass { slope: inner_slope });
    }

    let shell = |i: usize| 4.0 * PI * radius[i].powi(3) * density[i];

    let mut mass = Vec::with_capacity(radius.len());
    let mut total = shell(0) / (3.0 + inner_slope);
    mass.push(total);
    for i in 1..radius.len() {
        let d_ln_r = (radius[i] / radius[i - 1]).ln();
        total += 0.5 * (shell(i - 1) + shell(i)) * d_ln_r;
        mass.push(total);
    }
    Ok(mass)
}

/// `v_eff / v_b` at every grid radius.
pub fn velocity_ratio(
    radius: &[f64],
    rho_b: &[f64],
    rho_eff: &[f64],
    inner_slope_b: f64,
    inner_slope_eff: f64,
) -> Result<Vec<f64>, ModelError> {
    let m_b = enclosed_mass(radius, rho_b, inner_slope_b)?;
    let m_eff = enclosed_mass(radius, rho_eff, inner_slope_eff)?;
    Ok(m_b
        .iter()
        .zip(&m_eff)
        .map(|(b, e)| (e / b).sqrt())
        .collect())
}
