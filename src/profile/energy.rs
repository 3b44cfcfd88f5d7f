//! Mode selection and the radius → energy-proxy mapping.
//!
//! Both regimes are multiplicative in ρ_b:
//!
//! - normalized: `E_local = span · E0 · ρ_b / max(ρ_b)`; the densest grid point
//!   sits at `span · E0` and the outskirts approach 0. Not unit-correct.
//! - physical: `E_local = ρ_b · c² · L_coh³` (g/cm³ · cm²/s² · cm³ = erg).
//!
//! The mapping is chosen once per run and then applied point by point.

use crate::domain::{EngineOptions, Mode, ParameterSet};
use crate::error::ModelError;
use crate::models::C_LIGHT;

/// Parse a mode token (`normalized` | `physical`) into a [`Mode`].
///
/// Physical mode requires a finite coherence length > 0.
pub fn select_mode(token: &str, coherence_length_cm: Option<f64>) -> Result<Mode, ModelError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "normalized" | "normalised" => Ok(Mode::Normalized),
        "physical" => match coherence_length_cm {
            Some(l) if l.is_finite() && l > 0.0 => Ok(Mode::Physical {
                coherence_length_cm: l,
            }),
            other => Err(ModelError::InvalidCoherenceLength { value: other }),
        },
        _ => Err(ModelError::InvalidMode {
            token: token.to_string(),
        }),
    }
}

/// Energy proxy as a linear function of the baryonic density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMapping {
    pub mode: Mode,
    /// `E_local = scale · ρ_b`.
    pub scale: f64,
}

impl EnergyMapping {
    /// Build the mapping for `mode`. `rho_b` is the baryonic density on the grid
    /// (only used by normalized mode, for the reference density).
    pub fn configure(
        mode: Mode,
        params: &ParameterSet,
        options: &EngineOptions,
        rho_b: &[f64],
    ) -> Result<Self, ModelError> {
        let scale = match mode {
            Mode::Normalized => {
                let rho_ref = rho_b.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if !(rho_ref.is_finite() && rho_ref > 0.0) {
                    return Err(ModelError::grid(
                        "normalized mode needs a positive reference density",
                    ));
                }
                options.normalized_span * params.e0() / rho_ref
            }
            Mode::Physical {
                coherence_length_cm,
            } => {
                if !(coherence_length_cm.is_finite() && coherence_length_cm > 0.0) {
                    return Err(ModelError::InvalidCoherenceLength {
                        value: Some(coherence_length_cm),
                    });
                }
                C_LIGHT * C_LIGHT * coherence_length_cm.powi(3)
            }
        };

        if !scale.is_finite() {
            return Err(ModelError::NumericOverflow { energy: scale });
        }
        Ok(Self { mode, scale })
    }

    pub fn energy(&self, rho_b: f64) -> f64 {
        self.scale * rho_b
    }
}
