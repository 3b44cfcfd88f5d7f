//! Shared pipeline logic used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! mode selection -> grid -> densities -> slopes -> diagnostics record
//!
//! Densities for all radii are complete before slope estimation starts; slopes
//! need neighbouring points.

use tracing::{debug, info, warn};

use crate::domain::{DiagnosticsRecord, RadiusGrid, RunConfig};
use crate::error::{AppError, ModelError};
use crate::math::estimate_slopes;
use crate::profile::{evaluate_profiles, select_mode};
use crate::report::{RunInputs, assemble};

/// All computed outputs of a single `gop run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub grid: RadiusGrid,
    pub record: DiagnosticsRecord,
}

/// Evaluate the model on a validated grid. Pure: no I/O, no logging.
pub fn run_model(grid: &RadiusGrid, inputs: RunInputs) -> Result<DiagnosticsRecord, ModelError> {
    // 1) Densities (parallel over radii).
    let profiles = evaluate_profiles(
        grid,
        inputs.params,
        inputs.mode,
        &inputs.baryon,
        &inputs.options,
    )?;

    // 2) Slopes, once every density is known.
    let slope_baryonic = estimate_slopes(&profiles.radius, &profiles.rho_b)?;
    let slope_effective = estimate_slopes(&profiles.radius, &profiles.rho_eff)?;

    // 3) Diagnostics.
    assemble(inputs, profiles, slope_baryonic, slope_effective)
}

/// Execute the full pipeline for a run configuration.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let mode = select_mode(&config.mode_token, config.coherence_length_cm)?;
    let grid = config.grid.build()?;

    info!(
        mode = mode.token(),
        points = grid.len(),
        r_min = grid.inner(),
        r_max = grid.outer(),
        "evaluating warm-core profile"
    );

    let mut options = config.options;
    options.capture_intermediates = options.capture_intermediates || config.debug;

    let inputs = RunInputs {
        mode,
        params: config.params,
        baryon: config.baryon,
        options,
        inner_window: config.inner_window,
    };
    let record = run_model(&grid, inputs)?;

    if record.velocity_ratio.is_none() {
        warn!(
            inner_slope = record.inner_slope,
            "rotation-curve ratio skipped: enclosed mass diverges"
        );
    }
    debug!(
        inner_slope_b = record.inner_slope_baryonic,
        inner_slope = record.inner_slope,
        "slopes estimated"
    );
    info!(
        class = record.core_class.display_name(),
        enhancement = record.enhancement_factor,
        "pipeline complete"
    );

    Ok(RunOutput { grid, record })
}
