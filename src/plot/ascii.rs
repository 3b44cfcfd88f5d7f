//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Both axes are log10. Plot elements:
//! - effective density `ρ_eff`: `-` line
//! - baryonic density `ρ_b`: `.` line (only where `-` did not land)

use crate::domain::DiagnosticsRecord;
use crate::report::mode_tag;

/// Render the density profiles of a record on log-log axes.
pub fn render_ascii_plot(record: &DiagnosticsRecord, width: usize, height: usize) -> String {
    let p = &record.profiles;
    let eff = log_points(&p.radius, &p.rho_eff);
    let bar = log_points(&p.radius, &p.rho_b);

    let series = [(eff.as_slice(), '-'), (bar.as_slice(), '.')];
    let mut out = render_plot(&mode_tag(record.mode), &series, width, height);
    out.push_str("legend: '-' rho_eff  '.' rho_b\n");
    out
}

fn log_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|&(&x, &y)| x > 0.0 && y > 0.0)
        .map(|(&x, &y)| (x.log10(), y.log10()))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Draw series in order; later series only fill blank cells.
fn render_plot(tag: &str, series: &[(&[(f64, f64)], char)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = axis_range(series, |&(x, _)| x).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = axis_range(series, |&(_, y)| y).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for &(points, ch) in series {
        draw_curve(&mut grid, points, ch, (x_min, x_max), (y_min, y_max));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {tag} | log10 r=[{x_min:.3}, {x_max:.3}] | log10 rho=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn axis_range(
    series: &[(&[(f64, f64)], char)],
    pick: impl Fn(&(f64, f64)) -> f64,
) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (points, _) in series {
        for p in points.iter() {
            let v = pick(p);
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else if min.is_finite() && max.is_finite() {
        Some((min - 0.5, max + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, ch);
        } else if grid[yy][xx] == ' ' {
            grid[yy][xx] = ch;
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_model;
    use crate::domain::{BaryonProfile, EngineOptions, Mode, ParameterSet, RadiusGrid};
    use crate::report::RunInputs;

    #[test]
    fn plot_golden_snapshot_small() {
        let line = [(0.0, 0.0), (1.0, -1.0)];
        let txt = render_plot("test", &[(&line[..], '-')], 10, 5);
        let expected = concat!(
            "Plot: test | log10 r=[0.000, 1.000] | log10 rho=[-1.05, 0.05]\n",
            "--        \n",
            "  --      \n",
            "    --    \n",
            "      --  \n",
            "        --\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn second_series_only_fills_blanks() {
        let a = [(0.0, 0.0), (1.0, -1.0)];
        let b = [(0.0, -1.0), (1.0, 0.0)];
        let txt = render_plot("x", &[(&a[..], '-'), (&b[..], '.')], 10, 5);
        let body: String = txt.lines().skip(1).collect();
        assert!(body.contains('.'));
        assert_eq!(body.chars().filter(|&c| c == '-').count(), 10);
    }

    #[test]
    fn record_plot_has_header_grid_and_legend() {
        let grid = RadiusGrid::log_spaced(0.01, 10.0, 30).unwrap();
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

        let txt = render_ascii_plot(&record, 40, 12);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 1 + 12 + 1);
        assert!(lines[0].starts_with("Plot: normalized |"));
        assert!(lines[1..13].iter().all(|l| l.chars().count() == 40));
        assert!(lines[13].starts_with("legend:"));
    }
}
