//! SVG export of the density and enhancement panels.
//!
//! Left panel: `ρ_b(r)` and `ρ_eff(r)` on log-log axes.
//! Right panel: the rotation-curve proxy `sqrt(ρ_eff / ρ_b)` against log r.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::domain::DiagnosticsRecord;
use crate::error::AppError;

const SIZE: (u32, u32) = (1200, 500);

/// Render both panels to an SVG file.
pub fn write_profile_svg(path: &Path, record: &DiagnosticsRecord) -> Result<(), AppError> {
    if record.profiles.len() < 2 {
        return Err(AppError::new(2, "SVG export needs at least two radii."));
    }
    draw_panels(path, record)
        .map_err(|e| AppError::new(2, format!("Failed to write SVG '{}': {e}", path.display())))
}

fn draw_panels(path: &Path, record: &DiagnosticsRecord) -> Result<(), Box<dyn Error>> {
    let p = &record.profiles;
    let r_lo = p.radius[0];
    let r_hi = p.radius[p.len() - 1];

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally((SIZE.0 / 2) as i32);

    // Density panel.
    let (d_lo, d_hi) = positive_bounds(p.rho_b.iter().chain(p.rho_eff.iter()).copied())
        .ok_or("densities have no positive finite values")?;

    let mut chart = ChartBuilder::on(&left)
        .caption(
            format!("density [{}]", record.mode.label()),
            ("sans-serif", 18).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((r_lo..r_hi).log_scale(), (d_lo..d_hi).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("r")
        .y_desc("rho")
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .y_label_formatter(&|v| format!("{v:.0e}"))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            p.radius.iter().copied().zip(p.rho_b.iter().copied()),
            &BLUE,
        ))?
        .label("rho_b")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], BLUE.stroke_width(3)));

    chart
        .draw_series(LineSeries::new(
            p.radius.iter().copied().zip(p.rho_eff.iter().copied()),
            &RED,
        ))?
        .label("rho_eff")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], RED.stroke_width(3)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.7))
        .draw()?;

    // Enhancement panel.
    let proxy: Vec<(f64, f64)> = p
        .radius
        .iter()
        .zip(record.enhancement.iter())
        .map(|(&r, &f)| (r, f.sqrt()))
        .collect();
    let (e_lo, e_hi) = positive_bounds(proxy.iter().map(|&(_, v)| v))
        .ok_or("enhancement has no positive finite values")?;

    let mut chart = ChartBuilder::on(&right)
        .caption("sqrt(rho_eff / rho_b)", ("sans-serif", 18).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((r_lo..r_hi).log_scale(), e_lo..e_hi)?;

    chart
        .configure_mesh()
        .x_desc("r")
        .y_desc("v_eff / v_b (proxy)")
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .y_label_formatter(&|v| format!("{v:.6}"))
        .draw()?;

    chart.draw_series(LineSeries::new(proxy.iter().copied(), &GREEN))?;

    root.present()?;
    Ok(())
}

/// Min/max over the positive finite values, widened when the range collapses.
fn positive_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !(lo.is_finite() && hi.is_finite()) {
        return None;
    }
    if hi > lo {
        Some((lo, hi))
    } else {
        Some((lo * 0.999, hi * 1.001))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_model;
    use crate::domain::{BaryonProfile, EngineOptions, Mode, ParameterSet, RadiusGrid};
    use crate::report::RunInputs;

    #[test]
    fn bounds_widen_flat_series() {
        let (lo, hi) = positive_bounds([1.0, 1.0].into_iter()).unwrap();
        assert!(lo < 1.0 && hi > 1.0);
        assert_eq!(positive_bounds([0.0, -1.0, f64::NAN].into_iter()), None);
    }

    #[test]
    fn svg_file_is_written() {
        let grid = RadiusGrid::log_spaced(0.01, 10.0, 24).unwrap();
        let record = run_model(
            &grid,
            RunInputs {
                mode: Mode::Normalized,
                params: ParameterSet::default(),
                baryon: BaryonProfile::Nfw {
                    rho_s: 1.0,
                    r_s: 1.0,
                },
                options: EngineOptions::default(),
                inner_window: 1.0,
            },
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!("gop_{}_panels.svg", std::process::id()));
        write_profile_svg(&path, &record).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(body.contains("<svg"));
        assert!(body.contains("rho_eff"));
    }
}
