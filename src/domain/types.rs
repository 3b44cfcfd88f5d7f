//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during profile evaluation
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Curvature coupling κA, fixed July 2025.
pub const KAPPA_A: f64 = 1.5e-15;
/// Decoherence energy scale E0 [erg].
pub const E0_ERG: f64 = 1.0e12;
/// Entanglement fraction f_ent.
pub const F_ENT: f64 = 0.20;
/// CP asymmetry A_CP.
pub const A_CP: f64 = 0.0245;

/// The four pre-registered global constants of the model.
///
/// Fields are private: the only ways to obtain a `ParameterSet` are the
/// validating constructor, `Default` (the registered values) or deserialization
/// (which validates too). There are no setters; a different parameter set is a
/// different instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterValues", into = "ParameterValues")]
pub struct ParameterSet {
    kappa_a: f64,
    e0: f64,
    f_ent: f64,
    a_cp: f64,
}

/// Plain wire form of [`ParameterSet`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParameterValues {
    pub kappa_a: f64,
    pub e0_erg: f64,
    pub f_ent: f64,
    pub a_cp: f64,
}

impl ParameterSet {
    pub fn new(kappa_a: f64, e0: f64, f_ent: f64, a_cp: f64) -> Result<Self, ModelError> {
        if !(kappa_a.is_finite() && kappa_a > 0.0) {
            return Err(invalid("kappa_a", kappa_a, "must be finite and > 0"));
        }
        if !(e0.is_finite() && e0 > 0.0) {
            return Err(invalid("e0", e0, "must be finite and > 0"));
        }
        if !(f_ent.is_finite() && (0.0..=1.0).contains(&f_ent)) {
            return Err(invalid("f_ent", f_ent, "must lie in [0, 1]"));
        }
        if !(a_cp.is_finite() && (-1.0..=1.0).contains(&a_cp)) {
            return Err(invalid("a_cp", a_cp, "must lie in [-1, 1]"));
        }
        Ok(Self {
            kappa_a,
            e0,
            f_ent,
            a_cp,
        })
    }

    pub fn kappa_a(&self) -> f64 {
        self.kappa_a
    }

    pub fn e0(&self) -> f64 {
        self.e0
    }

    pub fn f_ent(&self) -> f64 {
        self.f_ent
    }

    pub fn a_cp(&self) -> f64 {
        self.a_cp
    }

    /// Kernel maximum `Γ(E0) = κA · E0`.
    pub fn peak_gamma(&self) -> f64 {
        self.kappa_a * self.e0
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            kappa_a: KAPPA_A,
            e0: E0_ERG,
            f_ent: F_ENT,
            a_cp: A_CP,
        }
    }
}

impl TryFrom<ParameterValues> for ParameterSet {
    type Error = ModelError;

    fn try_from(v: ParameterValues) -> Result<Self, Self::Error> {
        ParameterSet::new(v.kappa_a, v.e0_erg, v.f_ent, v.a_cp)
    }
}

impl From<ParameterSet> for ParameterValues {
    fn from(p: ParameterSet) -> Self {
        ParameterValues {
            kappa_a: p.kappa_a,
            e0_erg: p.e0,
            f_ent: p.f_ent,
            a_cp: p.a_cp,
        }
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> ModelError {
    ModelError::InvalidParameters {
        field,
        value,
        reason,
    }
}

/// Energy-mapping regime.
///
/// `Normalized` rescales the baryonic density into the kernel's active range and
/// is *not* unit-correct; it only demonstrates the qualitative cusp → core shift.
/// `Physical` uses `E = ρ_b · c² · L_coh³` in cgs units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mode {
    Normalized,
    Physical { coherence_length_cm: f64 },
}

impl Mode {
    /// Whether results carry physical units.
    pub fn is_calibrated(self) -> bool {
        matches!(self, Mode::Physical { .. })
    }

    /// Label attached to every output produced in this mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normalized => "normalized (uncalibrated demonstration)",
            Mode::Physical { .. } => "physical (cgs)",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Mode::Normalized => "normalized",
            Mode::Physical { .. } => "physical",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Normalized => write!(f, "{}", self.label()),
            Mode::Physical {
                coherence_length_cm,
            } => write!(f, "{} L_coh={coherence_length_cm:e} cm", self.label()),
        }
    }
}

/// Ordered radius samples: finite, strictly positive, strictly increasing, len >= 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusGrid {
    radii: Vec<f64>,
}

impl RadiusGrid {
    pub fn new(radii: Vec<f64>) -> Result<Self, ModelError> {
        if radii.len() < 2 {
            return Err(ModelError::grid(format!(
                "need at least 2 radii, got {}",
                radii.len()
            )));
        }
        for (i, &r) in radii.iter().enumerate() {
            if !(r.is_finite() && r > 0.0) {
                return Err(ModelError::grid(format!(
                    "radius #{i} = {r} must be finite and > 0"
                )));
            }
        }
        if let Some(i) = radii.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ModelError::grid(format!(
                "radii must be strictly increasing (r[{}]={} >= r[{}]={})",
                i,
                radii[i],
                i + 1,
                radii[i + 1]
            )));
        }
        Ok(Self { radii })
    }

    /// `points` log-spaced radii between `r_min` and `r_max` (inclusive).
    pub fn log_spaced(r_min: f64, r_max: f64, points: usize) -> Result<Self, ModelError> {
        if !(r_min.is_finite() && r_max.is_finite() && r_min > 0.0 && r_max > r_min) {
            return Err(ModelError::grid(format!(
                "invalid radius range: min={r_min}, max={r_max} (must be finite, >0, and max>min)"
            )));
        }
        if points < 2 {
            return Err(ModelError::grid("grid points must be >= 2"));
        }

        let ln_min = r_min.ln();
        let ln_max = r_max.ln();
        let step = (ln_max - ln_min) / (points as f64 - 1.0);

        let mut radii: Vec<f64> = (0..points)
            .map(|i| (ln_min + step * i as f64).exp())
            .collect();
        // Pin the endpoints so callers get exactly what they asked for.
        radii[0] = r_min;
        radii[points - 1] = r_max;
        Self::new(radii)
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Smallest radius.
    pub fn inner(&self) -> f64 {
        self.radii[0]
    }

    /// Largest radius.
    pub fn outer(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }
}

/// How the caller describes the grid before it is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSpec {
    Explicit(Vec<f64>),
    LogSpaced { r_min: f64, r_max: f64, points: usize },
}

impl GridSpec {
    pub fn build(&self) -> Result<RadiusGrid, ModelError> {
        match self {
            GridSpec::Explicit(radii) => RadiusGrid::new(radii.clone()),
            GridSpec::LogSpaced {
                r_min,
                r_max,
                points,
            } => RadiusGrid::log_spaced(*r_min, *r_max, *points),
        }
    }
}

/// Baryonic density law selector (CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// `ρ_s / ((r/r_s)(1 + r/r_s)²)`: cuspy halo-type law.
    Nfw,
    /// `ρ0 / (1 + (r/r_core)²)`: cored isothermal dwarf.
    Cored,
}

/// Concrete baryonic density law with its parameters.
///
/// Radii and scale radii share whatever length unit the grid uses. In physical
/// mode the density normalization is read as g/cm³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum BaryonProfile {
    Nfw { rho_s: f64, r_s: f64 },
    CoredIsothermal { rho0: f64, r_core: f64 },
}

impl BaryonProfile {
    /// Build a profile from a CLI selection, falling back to per-law defaults.
    pub fn from_kind(kind: ProfileKind, rho0: Option<f64>, r_scale: Option<f64>) -> Self {
        match kind {
            ProfileKind::Nfw => BaryonProfile::Nfw {
                rho_s: rho0.unwrap_or(1.0),
                r_s: r_scale.unwrap_or(1.0),
            },
            ProfileKind::Cored => BaryonProfile::CoredIsothermal {
                rho0: rho0.unwrap_or(1.0),
                r_core: r_scale.unwrap_or(0.5),
            },
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BaryonProfile::Nfw { .. } => "NFW-type cusp",
            BaryonProfile::CoredIsothermal { .. } => "cored isothermal",
        }
    }
}

/// Knobs of the density engine that are not part of the registered parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Normalized mode: E_local at the densest grid point, in units of E0.
    pub normalized_span: f64,
    /// Redshift for the `(1 + z)³` dilution of ρ_Ψ.
    pub redshift: f64,
    /// Scale ρ_prob by `(1 + A_CP)`.
    pub cp_weighted: bool,
    /// Keep raw E_local(r) and Γ(E(r)) in the output.
    pub capture_intermediates: bool,
}

/// Default normalized-mode span: E_local runs from ≈0 up to 4·E0.
pub const DEFAULT_NORMALIZED_SPAN: f64 = 4.0;

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            normalized_span: DEFAULT_NORMALIZED_SPAN,
            redshift: 0.0,
            cp_weighted: false,
            capture_intermediates: false,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.normalized_span.is_finite() && self.normalized_span > 0.0) {
            return Err(invalid(
                "normalized_span",
                self.normalized_span,
                "must be finite and > 0",
            ));
        }
        if !(self.redshift.is_finite() && self.redshift > -1.0) {
            return Err(invalid("redshift", self.redshift, "must be finite and > -1"));
        }
        Ok(())
    }
}

/// Raw per-radius values behind ρ_prob, kept only in debug runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intermediates {
    pub e_local: Vec<f64>,
    pub gamma: Vec<f64>,
}

/// Density arrays on the grid (columnar; index `i` belongs to `radius[i]`).
///
/// `rho_eff[i] == rho_b[i] + rho_prob[i]` holds exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    pub radius: Vec<f64>,
    pub rho_b: Vec<f64>,
    pub rho_prob: Vec<f64>,
    pub rho_eff: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediates: Option<Intermediates>,
}

impl ProfileSet {
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }
}

/// Local logarithmic slope `d ln ρ / d ln r` per grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeProfile {
    pub radius: Vec<f64>,
    pub slope: Vec<f64>,
}

impl SlopeProfile {
    /// Slope at the smallest radius.
    pub fn inner_slope(&self) -> f64 {
        self.slope[0]
    }

    /// Mean slope over points with `r <= r_window`; `None` if none qualify.
    pub fn mean_within(&self, r_window: f64) -> Option<f64> {
        let (sum, n) = self
            .radius
            .iter()
            .zip(&self.slope)
            .filter(|(r, _)| **r <= r_window)
            .fold((0.0, 0usize), |(s, n), (_, g)| (s + g, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}

/// Inner-slope classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreClass {
    /// Slope nearer −1 (steep inner rise).
    Cusp,
    /// Slope nearer 0 (flattened inner density).
    Core,
}

impl CoreClass {
    pub fn classify(inner_slope: f64) -> Self {
        if (inner_slope + 1.0).abs() < inner_slope.abs() {
            CoreClass::Cusp
        } else {
            CoreClass::Core
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CoreClass::Cusp => "cusp",
            CoreClass::Core => "core",
        }
    }
}

/// Output of one pipeline run.
///
/// Created once by [`crate::report::assemble`] and handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsRecord {
    pub mode: Mode,
    /// Human-readable mode label (repeats `mode` so exports stay self-describing).
    pub calibration: String,
    pub params: ParameterSet,
    pub baryon: BaryonProfile,
    pub options: EngineOptions,
    pub profiles: ProfileSet,
    pub slope_baryonic: SlopeProfile,
    pub slope_effective: SlopeProfile,
    /// Effective-profile slope at the smallest radius.
    pub inner_slope: f64,
    pub inner_slope_baryonic: f64,
    pub inner_window: f64,
    pub mean_inner_slope: Option<f64>,
    pub mean_inner_slope_baryonic: Option<f64>,
    pub core_class: CoreClass,
    /// `ρ_eff / ρ_b` at the smallest radius.
    pub enhancement_factor: f64,
    /// `ρ_eff / ρ_b` per radius.
    pub enhancement: Vec<f64>,
    /// `v_eff / v_b` per radius; `None` when an inner slope <= -3 makes the
    /// enclosed mass diverge.
    pub velocity_ratio: Option<Vec<f64>>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, the environment, and defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode_token: String,
    pub coherence_length_cm: Option<f64>,
    pub grid: GridSpec,
    pub baryon: BaryonProfile,
    pub params: ParameterSet,
    pub options: EngineOptions,
    /// Radius bound for the windowed mean inner slope.
    pub inner_window: f64,

    pub debug: bool,
    pub debug_dir: PathBuf,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_record: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_the_registered_values() {
        let p = ParameterSet::default();
        assert_eq!(p.kappa_a(), 1.5e-15);
        assert_eq!(p.e0(), 1.0e12);
        assert_eq!(p.f_ent(), 0.20);
        assert_eq!(p.a_cp(), 0.0245);
        assert!((p.peak_gamma() - 1.5e-3).abs() < 1e-18);
    }

    #[test]
    fn parameter_validation_rejects_out_of_range() {
        assert!(matches!(
            ParameterSet::new(0.0, 1.0, 0.2, 0.0),
            Err(ModelError::InvalidParameters { field: "kappa_a", .. })
        ));
        assert!(matches!(
            ParameterSet::new(1.0, -1.0, 0.2, 0.0),
            Err(ModelError::InvalidParameters { field: "e0", .. })
        ));
        assert!(matches!(
            ParameterSet::new(1.0, 1.0, 1.5, 0.0),
            Err(ModelError::InvalidParameters { field: "f_ent", .. })
        ));
        assert!(matches!(
            ParameterSet::new(1.0, 1.0, 0.2, -1.5),
            Err(ModelError::InvalidParameters { field: "a_cp", .. })
        ));
        assert!(ParameterSet::new(1.0, 1.0, 1.0, -0.3).is_ok());
    }

    #[test]
    fn parameter_json_goes_through_validation() {
        let ok: ParameterSet =
            serde_json::from_str(r#"{"kappa_a":2e-15,"e0_erg":1e11,"f_ent":0.1,"a_cp":0.0}"#)
                .unwrap();
        assert_eq!(ok.e0(), 1e11);

        let bad = serde_json::from_str::<ParameterSet>(
            r#"{"kappa_a":2e-15,"e0_erg":1e11,"f_ent":3.0,"a_cp":0.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn grid_rejects_non_positive_and_non_monotone() {
        assert!(matches!(
            RadiusGrid::new(vec![0.0, 1.0]),
            Err(ModelError::InvalidGrid { .. })
        ));
        assert!(matches!(
            RadiusGrid::new(vec![1.0, 1.0, 2.0]),
            Err(ModelError::InvalidGrid { .. })
        ));
        assert!(matches!(
            RadiusGrid::new(vec![1.0]),
            Err(ModelError::InvalidGrid { .. })
        ));
        assert!(RadiusGrid::new(vec![0.01, 0.1, 1.0, 10.0]).is_ok());
    }

    #[test]
    fn log_spaced_grid_includes_endpoints() {
        let g = RadiusGrid::log_spaced(1e-3, 1e2, 6).unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g.inner(), 1e-3);
        assert_eq!(g.outer(), 1e2);
        assert!((g.radii()[1] - 1e-2).abs() < 1e-15);
    }

    #[test]
    fn mode_labels_flag_uncalibrated_output() {
        assert!(!Mode::Normalized.is_calibrated());
        assert!(Mode::Normalized.label().contains("uncalibrated"));
        let phys = Mode::Physical {
            coherence_length_cm: 1e5,
        };
        assert!(phys.is_calibrated());
        assert_eq!(phys.token(), "physical");
    }

    #[test]
    fn mean_within_window() {
        let s = SlopeProfile {
            radius: vec![0.1, 0.5, 2.0],
            slope: vec![-1.0, -0.5, -3.0],
        };
        assert_eq!(s.mean_within(1.0), Some(-0.75));
        assert_eq!(s.mean_within(0.01), None);
        assert_eq!(s.inner_slope(), -1.0);
    }

    #[test]
    fn core_class_picks_nearest_anchor() {
        assert_eq!(CoreClass::classify(-1.07), CoreClass::Cusp);
        assert_eq!(CoreClass::classify(-0.6), CoreClass::Cusp);
        assert_eq!(CoreClass::classify(-0.2), CoreClass::Core);
        assert_eq!(CoreClass::classify(0.3), CoreClass::Core);
    }
}
