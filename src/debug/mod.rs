//! Debug bundle writer for inspecting the per-radius intermediates of a run.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::domain::{DiagnosticsRecord, RunConfig};
use crate::error::AppError;
use crate::report::mode_tag;

/// Write a markdown bundle into `config.debug_dir` and return its path.
pub fn write_debug_bundle(record: &DiagnosticsRecord, config: &RunConfig) -> Result<PathBuf, AppError> {
    let dir = config.debug_dir.clone();
    create_dir_all(&dir).map_err(|e| AppError::new(2, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("gop_debug_{}_{}.md", record.mode.token(), ts));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(2, format!("Failed to create debug file: {e}")))?;
    write_bundle(&mut file, record, config)
        .map_err(|e| AppError::new(2, format!("Failed to write debug: {e}")))?;

    info!(path = %path.display(), rows = record.profiles.len(), "wrote debug bundle");
    Ok(path)
}

fn write_bundle<W: Write>(out: &mut W, record: &DiagnosticsRecord, config: &RunConfig) -> std::io::Result<()> {
    let params = &record.params;

    writeln!(out, "# gop debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- mode: {} ({})", mode_tag(record.mode), record.calibration)?;
    writeln!(out, "- mode_token: {}", config.mode_token)?;
    writeln!(
        out,
        "- params: kappa_A={:e}, E0={:e} erg, f_ent={}, A_CP={}",
        params.kappa_a(),
        params.e0(),
        params.f_ent(),
        params.a_cp()
    )?;
    writeln!(out, "- baryons: {:?}", record.baryon)?;
    writeln!(
        out,
        "- options: span={}, z={}, cp_weighted={}",
        record.options.normalized_span, record.options.redshift, record.options.cp_weighted
    )?;
    writeln!(out, "- grid: {:?}", config.grid)?;
    writeln!(
        out,
        "- inner slope: baryonic={:.6}, effective={:.6}, class={}",
        record.inner_slope_baryonic,
        record.inner_slope,
        record.core_class.display_name()
    )?;
    writeln!(out, "- enhancement at r_min: {:.9}", record.enhancement_factor)?;

    writeln!(out, "\n## Profiles")?;
    writeln!(out, "| r | rho_b | E_local | Gamma | rho_prob | rho_eff | slope_eff |")?;
    writeln!(out, "| - | - | - | - | - | - | - |")?;

    let p = &record.profiles;
    let inter = p.intermediates.as_ref();
    for i in 0..p.len() {
        let e = inter.and_then(|m| m.e_local.get(i).copied());
        let g = inter.and_then(|m| m.gamma.get(i).copied());
        writeln!(
            out,
            "| {:.6e} | {:.6e} | {} | {} | {:.6e} | {:.6e} | {:.6} |",
            p.radius[i],
            p.rho_b[i],
            fmt_opt(e),
            fmt_opt(g),
            p.rho_prob[i],
            p.rho_eff[i],
            record.slope_effective.slope[i]
        )?;
    }
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6e}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_pipeline;
    use crate::domain::{BaryonProfile, EngineOptions, GridSpec, ParameterSet};

    fn config(dir: PathBuf) -> RunConfig {
        RunConfig {
            mode_token: "normalized".to_string(),
            coherence_length_cm: None,
            grid: GridSpec::Explicit(vec![0.01, 0.1, 1.0, 10.0]),
            baryon: BaryonProfile::Nfw {
                rho_s: 1.0,
                r_s: 1.0,
            },
            params: ParameterSet::default(),
            options: EngineOptions {
                capture_intermediates: true,
                ..EngineOptions::default()
            },
            inner_window: 1.0,
            debug: true,
            debug_dir: dir,
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export_csv: None,
            export_record: None,
            export_svg: None,
        }
    }

    #[test]
    fn bundle_lists_every_radius_with_intermediates() {
        let dir = std::env::temp_dir().join(format!("gop_{}_debug", std::process::id()));
        let cfg = config(dir.clone());
        let run = run_pipeline(&cfg).unwrap();

        let path = write_debug_bundle(&run.record, &cfg).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert!(body.starts_with("# gop debug bundle"));
        let rows: Vec<&str> = body
            .lines()
            .filter(|l| l.starts_with("| ") && !l.starts_with("| r ") && !l.starts_with("| - "))
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| !r.contains("| - |")));
    }

    #[test]
    fn unwritable_debug_dir_is_an_io_error() {
        let blocker = std::env::temp_dir().join(format!("gop_{}_debug_blocker", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let cfg = config(blocker.join("nested"));
        let run = run_pipeline(&cfg).unwrap();

        let err = write_debug_bundle(&run.record, &cfg).unwrap_err();
        std::fs::remove_file(&blocker).ok();
        assert_eq!(err.exit_code(), 2);
    }
}
