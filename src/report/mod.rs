//! Diagnostics assembly and formatted terminal output.
//!
//! `assemble` merges the profile arrays and both slope profiles into the single
//! [`DiagnosticsRecord`] handed back to the caller; `format` renders it.

use crate::domain::{
    BaryonProfile, CoreClass, DiagnosticsRecord, EngineOptions, Mode, ParameterSet, ProfileSet,
    SlopeProfile,
};
use crate::error::ModelError;
use crate::profile::velocity_ratio;

pub mod format;

pub use format::*;

/// Everything that went into a run besides the computed arrays.
#[derive(Debug, Clone, Copy)]
pub struct RunInputs {
    pub mode: Mode,
    pub params: ParameterSet,
    pub baryon: BaryonProfile,
    pub options: EngineOptions,
    /// Radius bound for the windowed mean inner slope.
    pub inner_window: f64,
}

/// Build the diagnostics record.
///
/// Fails with `SubUnityEnhancement` when `ρ_eff / ρ_b < 1` at the smallest
/// radius: with Γ ≥ 0 and ρ_Ψ ≥ 0 that can only come from a sign error.
pub fn assemble(
    inputs: RunInputs,
    profiles: ProfileSet,
    slope_baryonic: SlopeProfile,
    slope_effective: SlopeProfile,
) -> Result<DiagnosticsRecord, ModelError> {
    if profiles.is_empty() {
        return Err(ModelError::grid("cannot assemble diagnostics for an empty grid"));
    }
    if slope_baryonic.slope.len() != profiles.len() || slope_effective.slope.len() != profiles.len()
    {
        return Err(ModelError::grid("slope and density profiles differ in length"));
    }
    if !(inputs.inner_window.is_finite() && inputs.inner_window > 0.0) {
        return Err(ModelError::InvalidParameters {
            field: "inner_window",
            value: inputs.inner_window,
            reason: "must be finite and > 0",
        });
    }

    let enhancement: Vec<f64> = profiles
        .rho_eff
        .iter()
        .zip(&profiles.rho_b)
        .map(|(e, b)| e / b)
        .collect();
    let enhancement_factor = enhancement[0];
    if !(enhancement_factor.is_finite() && enhancement_factor >= 1.0) {
        return Err(ModelError::SubUnityEnhancement {
            radius: profiles.radius[0],
            factor: enhancement_factor,
        });
    }

    let inner_slope = slope_effective.inner_slope();
    let inner_slope_baryonic = slope_baryonic.inner_slope();
    let velocity_ratio = match velocity_ratio(
        &profiles.radius,
        &profiles.rho_b,
        &profiles.rho_eff,
        inner_slope_baryonic,
        inner_slope,
    ) {
        Ok(ratio) => Some(ratio),
        // The rotation ratio is a derived extra; a divergent cap only drops it.
        Err(ModelError::DivergentEnclosedMass { .. }) => None,
        Err(e) => return Err(e),
    };

    Ok(DiagnosticsRecord {
        mode: inputs.mode,
        calibration: inputs.mode.label().to_string(),
        params: inputs.params,
        baryon: inputs.baryon,
        options: inputs.options,
        inner_slope,
        inner_slope_baryonic,
        inner_window: inputs.inner_window,
        mean_inner_slope: slope_effective.mean_within(inputs.inner_window),
        mean_inner_slope_baryonic: slope_baryonic.mean_within(inputs.inner_window),
        core_class: CoreClass::classify(inner_slope),
        enhancement_factor,
        enhancement,
        velocity_ratio,
        profiles,
        slope_baryonic,
        slope_effective,
    })
}
