//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numeric code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use nalgebra::Matrix4;

use crate::domain::{BaryonProfile, DiagnosticsRecord, Mode};

/// Format the full run summary (inputs + inner-slope diagnostics).
pub fn format_run_summary(record: &DiagnosticsRecord) -> String {
    let mut out = String::new();

    out.push_str("=== gop - GoP Warm-Core Prediction ===\n");
    out.push_str(&format!("Mode: {}\n", record.mode));
    if !record.mode.is_calibrated() {
        out.push_str("  (normalized mode: energy proxy rescaled, not unit-correct)\n");
    }
    out.push_str(&format!(
        "Parameters: kappa_A={:e} E0={:e} erg f_ent={} A_CP={}\n",
        record.params.kappa_a(),
        record.params.e0(),
        record.params.f_ent(),
        record.params.a_cp()
    ));
    out.push_str(&format!("Baryons: {}\n", fmt_baryon(&record.baryon)));
    out.push_str(&format!(
        "Options: span={} z={} cp_weighted={}\n",
        record.options.normalized_span, record.options.redshift, record.options.cp_weighted
    ));

    let n = record.profiles.len();
    out.push_str(&format!(
        "Grid: n={} | r=[{:.4e}, {:.4e}]\n",
        n,
        record.profiles.radius[0],
        record.profiles.radius[n - 1]
    ));

    out.push_str("\nInner slope (d ln rho / d ln r at r_min):\n");
    out.push_str(&format!(
        "  baryons only:  {:>8.4}  -> {}\n",
        record.inner_slope_baryonic,
        crate::domain::CoreClass::classify(record.inner_slope_baryonic).display_name()
    ));
    out.push_str(&format!(
        "  GoP effective: {:>8.4}  -> {}\n",
        record.inner_slope,
        record.core_class.display_name()
    ));
    out.push_str(&format!(
        "Mean slope for r <= {}: baryons {} | effective {}\n",
        record.inner_window,
        fmt_opt(record.mean_inner_slope_baryonic),
        fmt_opt(record.mean_inner_slope)
    ));
    out.push_str(&format!(
        "Warm-core factor: {:.6}x baryonic density at r_min\n",
        record.enhancement_factor
    ));
    match record.velocity_ratio.as_ref().and_then(|v| v.last()) {
        Some(v) => out.push_str(&format!("Rotation-curve ratio v_eff/v_b at r_max: {v:.6}\n")),
        None => out.push_str("Rotation-curve ratio v_eff/v_b: n/a (enclosed mass diverges, inner slope <= -3)\n"),
    }

    out
}

/// Format a `E → Γ(E)` table.
pub fn format_kernel_table(rows: &[(f64, f64)], peak: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>14} {:>14} {:>10}\n", "E [erg]", "Gamma(E)", "Gamma/peak"));
    out.push_str(&format!("{:-<14} {:-<14} {:-<10}\n", "", "", ""));
    for &(e, g) in rows {
        out.push_str(&format!("{e:>14.6e} {g:>14.6e} {:>10.6}\n", g / peak));
    }
    out
}

/// Format the diagonal of `T^prob_{μν}`.
pub fn format_tensor(t: &Matrix4<f64>) -> String {
    let mut out = String::from("T^prob_{mu nu} [erg/cm^3], signature (+,-,-,-):\n");
    for i in 0..4 {
        let row: Vec<String> = (0..4).map(|j| format!("{:>13.5e}", t[(i, j)])).collect();
        out.push_str(&format!("  [{}]\n", row.join(" ")));
    }
    out
}

/// One-line tag used in export headers and plots.
pub fn mode_tag(mode: Mode) -> String {
    match mode {
        Mode::Normalized => "normalized".to_string(),
        Mode::Physical {
            coherence_length_cm,
        } => format!("physical(L_coh={coherence_length_cm:e}cm)"),
    }
}

fn fmt_baryon(b: &BaryonProfile) -> String {
    match *b {
        BaryonProfile::Nfw { rho_s, r_s } => {
            format!("{} (rho_s={rho_s}, r_s={r_s})", b.display_name())
        }
        BaryonProfile::CoredIsothermal { rho0, r_core } => {
            format!("{} (rho0={rho0}, r_core={r_core})", b.display_name())
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "-".to_string(),
    }
}
