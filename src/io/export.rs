//! Export per-radius profiles to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or plotting
//! scripts. Every row carries the mode tag so normalized output cannot be read
//! as a calibrated result.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::DiagnosticsRecord;
use crate::error::AppError;
use crate::report::mode_tag;

/// Write per-radius results to a CSV file.
pub fn write_profiles_csv(path: &Path, record: &DiagnosticsRecord) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_profiles(file, record)
}

/// Write the CSV body to any writer.
pub fn write_profiles<W: Write>(mut out: W, record: &DiagnosticsRecord) -> Result<(), AppError> {
    let inter = record.profiles.intermediates.as_ref();

    let mut header =
        String::from("mode,radius,rho_b,rho_prob,rho_eff,slope_b,slope_eff,enhancement,velocity_ratio");
    if inter.is_some() {
        header.push_str(",e_local,gamma");
    }
    writeln!(out, "{header}")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let tag = mode_tag(record.mode);
    // Empty cells when the rotation ratio is unavailable.
    let velocity = record.velocity_ratio.as_ref();
    let p = &record.profiles;
    for i in 0..p.len() {
        let mut row = format!(
            "{},{:.10e},{:.10e},{:.10e},{:.10e},{:.8},{:.8},{:.10},{}",
            tag,
            p.radius[i],
            p.rho_b[i],
            p.rho_prob[i],
            p.rho_eff[i],
            record.slope_baryonic.slope[i],
            record.slope_effective.slope[i],
            record.enhancement[i],
            velocity
                .map(|v| format!("{:.10}", v[i]))
                .unwrap_or_default(),
        );
        if let Some(inter) = inter {
            row.push_str(&format!(",{:.10e},{:.10e}", inter.e_local[i], inter.gamma[i]));
        }
        writeln!(out, "{row}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
