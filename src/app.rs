//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging and loads `.env`
//! - parses CLI arguments
//! - runs the warm-core pipeline
//! - prints reports/plots
//! - writes optional exports and the debug bundle

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CosmoArgs, KernelArgs, PlotArgs, RunArgs, TensorArgs};
use crate::domain::{BaryonProfile, EngineOptions, GridSpec, ParameterSet, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable supplying L_coh [cm] when `--coherence-length` is absent.
pub const ENV_COHERENCE_LENGTH: &str = "GOP_COHERENCE_LENGTH_CM";
/// Environment variable overriding the debug bundle directory.
pub const ENV_DEBUG_DIR: &str = "GOP_DEBUG_DIR";

/// Entry point for the `gop` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Plot(args) => handle_plot(args),
        Command::Kernel(args) => handle_kernel(args),
        Command::Tensor(args) => handle_tensor(args),
        Command::Cosmo(args) => handle_cosmo(args),
    }
}

/// Install the stderr subscriber (filter from `RUST_LOG`, default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be set (e.g. by an embedding host).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_pipeline(&config)?;
    let record = &run.record;

    println!("{}", crate::report::format_run_summary(record));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(record, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_profiles_csv(path, record)?;
        info!(path = %path.display(), "wrote profile CSV");
    }
    if let Some(path) = &config.export_record {
        crate::io::record::write_record_json(path, record)?;
        info!(path = %path.display(), "wrote diagnostics record");
    }
    if let Some(path) = &config.export_svg {
        crate::io::svg::write_profile_svg(path, record)?;
        info!(path = %path.display(), "wrote SVG plot");
    }

    if config.debug {
        let path = crate::debug::write_debug_bundle(record, &config)?;
        println!("Debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::record::read_record_json(&args.record)?;
    let plot = crate::plot::render_ascii_plot(&file.record, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_kernel(args: KernelArgs) -> Result<(), AppError> {
    let params = load_params(args.params.as_deref())?;
    let rows = args
        .energy
        .iter()
        .map(|&e| crate::math::gamma(e, &params).map(|g| (e, g)))
        .collect::<Result<Vec<_>, _>>()?;
    println!(
        "{}",
        crate::report::format_kernel_table(&rows, params.peak_gamma())
    );
    Ok(())
}

fn handle_tensor(args: TensorArgs) -> Result<(), AppError> {
    let params = load_params(args.params.as_deref())?;
    let t = crate::math::stress_energy_tensor(
        args.energy,
        args.rho_b,
        &params,
        args.redshift,
        args.eos_w,
    )?;
    println!("{}", crate::report::format_tensor(&t));
    Ok(())
}

fn handle_cosmo(args: CosmoArgs) -> Result<(), AppError> {
    use crate::models::{C_LIGHT, G_NEWTON, critical_density, hubble_per_second};

    if !(args.h0.is_finite() && args.h0 > 0.0) {
        return Err(AppError::new(2, format!("Invalid H0: {} (must be > 0).", args.h0)));
    }
    let h = hubble_per_second(args.h0);
    println!("c     = {C_LIGHT:e} cm/s");
    println!("G     = {G_NEWTON:e} cm^3 g^-1 s^-2");
    println!("H0    = {} km/s/Mpc = {h:e} s^-1", args.h0);
    println!("rho_c = {:e} g/cm^3", critical_density(h));
    Ok(())
}

/// Build a [`RunConfig`] from CLI flags, the environment, and defaults.
pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    let coherence_length_cm = match args.coherence_length {
        Some(v) => Some(v),
        None => env_f64(ENV_COHERENCE_LENGTH)?,
    };

    let grid = match &args.radius {
        Some(radii) => GridSpec::Explicit(radii.clone()),
        None => GridSpec::LogSpaced {
            r_min: args.r_min,
            r_max: args.r_max,
            points: args.points,
        },
    };

    let debug_dir = std::env::var(ENV_DEBUG_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("debug"));

    Ok(RunConfig {
        mode_token: args.mode.clone(),
        coherence_length_cm,
        grid,
        baryon: BaryonProfile::from_kind(args.profile, args.rho0, args.r_scale),
        params: load_params(args.params.as_deref())?,
        options: EngineOptions {
            normalized_span: args.span,
            redshift: args.redshift,
            cp_weighted: args.cp_weighted,
            capture_intermediates: args.debug,
        },
        inner_window: args.inner_window,
        debug: args.debug,
        debug_dir,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_record: args.export_record.clone(),
        export_svg: args.export_svg.clone(),
    })
}

fn load_params(path: Option<&std::path::Path>) -> Result<ParameterSet, AppError> {
    match path {
        Some(path) => crate::io::record::read_params_json(path),
        None => Ok(ParameterSet::default()),
    }
}

fn env_f64(name: &str) -> Result<Option<f64>, AppError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| AppError::new(2, format!("Invalid {name}='{raw}': {e}"))),
        Err(_) => Ok(None),
    }
}
