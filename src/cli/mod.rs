//! Command-line parsing for the GoP warm-core pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numeric code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ProfileKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gop", version, about = "Gravity of Probability warm-core prediction pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the warm-core profile, print diagnostics, and optionally plot/export.
    Run(RunArgs),
    /// Plot a previously exported diagnostics record (JSON).
    Plot(PlotArgs),
    /// Evaluate the decoherence kernel Γ(E) at the given energies.
    Kernel(KernelArgs),
    /// Print the probabilistic stress-energy tensor for one state.
    Tensor(TensorArgs),
    /// Print cgs constants and the critical density for a Hubble rate.
    Cosmo(CosmoArgs),
}

/// Options for a pipeline run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Energy-mapping mode: `normalized` or `physical`.
    #[arg(short = 'm', long, default_value = "normalized")]
    pub mode: String,

    /// Coherence length L_coh in cm (physical mode). Falls back to GOP_COHERENCE_LENGTH_CM.
    #[arg(short = 'l', long = "coherence-length")]
    pub coherence_length: Option<f64>,

    /// Explicit radius grid (comma separated, strictly increasing). Overrides the log grid.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub radius: Option<Vec<f64>>,

    /// Smallest radius of the log-spaced grid.
    #[arg(long, default_value_t = 0.01)]
    pub r_min: f64,

    /// Largest radius of the log-spaced grid.
    #[arg(long, default_value_t = 63.1)]
    pub r_max: f64,

    /// Number of log-spaced grid points.
    #[arg(short = 'n', long, default_value_t = 400)]
    pub points: usize,

    /// Baryonic density law.
    #[arg(long, value_enum, default_value_t = ProfileKind::Nfw)]
    pub profile: ProfileKind,

    /// Density normalization (rho_s for nfw, rho0 for cored; g/cm^3 in physical mode).
    #[arg(long)]
    pub rho0: Option<f64>,

    /// Scale radius (r_s for nfw, r_core for cored).
    #[arg(long)]
    pub r_scale: Option<f64>,

    /// Normalized mode: E_local at the densest grid point in units of E0.
    #[arg(long, default_value_t = crate::domain::DEFAULT_NORMALIZED_SPAN)]
    pub span: f64,

    /// Redshift for the (1+z)^3 dilution of the entanglement density.
    #[arg(short = 'z', long, default_value_t = 0.0)]
    pub redshift: f64,

    /// Scale the probabilistic density by (1 + A_CP).
    #[arg(long)]
    pub cp_weighted: bool,

    /// Radius bound for the windowed mean inner slope.
    #[arg(long, default_value_t = 1.0)]
    pub inner_window: f64,

    /// Load an alternative registered parameter set (JSON).
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Emit raw E_local(r) and Γ(E(r)) with the record and write a debug bundle.
    #[arg(long)]
    pub debug: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-radius profiles to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full diagnostics record to JSON.
    #[arg(long = "export-record")]
    pub export_record: Option<PathBuf>,

    /// Render the density and enhancement panels to SVG.
    #[arg(long = "export-svg")]
    pub export_svg: Option<PathBuf>,
}

/// Options for plotting a saved record.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Record JSON file produced by `gop run --export-record`.
    #[arg(long, value_name = "JSON")]
    pub record: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for probing the kernel.
#[derive(Debug, Parser)]
pub struct KernelArgs {
    /// Energies in erg (comma separated).
    #[arg(short = 'e', long, value_delimiter = ',', num_args = 1.., required = true)]
    pub energy: Vec<f64>,

    /// Load an alternative registered parameter set (JSON).
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,
}

/// Options for the stress-energy tensor.
#[derive(Debug, Parser)]
pub struct TensorArgs {
    /// Characteristic energy E [erg].
    #[arg(short = 'e', long)]
    pub energy: f64,

    /// Baryonic density [g/cm^3].
    #[arg(long)]
    pub rho_b: f64,

    /// Redshift.
    #[arg(short = 'z', long, default_value_t = 0.0)]
    pub redshift: f64,

    /// Equation-of-state parameter w (p = w u).
    #[arg(short = 'w', long, default_value_t = 0.0)]
    pub eos_w: f64,

    /// Load an alternative registered parameter set (JSON).
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,
}

/// Options for the cosmology helper.
#[derive(Debug, Parser)]
pub struct CosmoArgs {
    /// Hubble constant in km/s/Mpc.
    #[arg(long, default_value_t = 70.0)]
    pub h0: f64,
}
