//! Error types.
//!
//! Two layers:
//! - [`ModelError`]: named, fatal-to-the-run conditions raised by the numeric core.
//! - [`AppError`]: what the binary reports (message + process exit code).

use thiserror::Error;

/// Failure conditions of the warm-core model.
///
/// Every variant aborts the run; the core never returns a partially filled record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid energy proxy E={energy:e} (kernel is defined for E >= 0)")]
    InvalidEnergy { energy: f64 },

    #[error("invalid mode '{token}' (expected 'normalized' or 'physical')")]
    InvalidMode { token: String },

    #[error("invalid coherence length {value:?} cm (physical mode requires L_coh > 0)")]
    InvalidCoherenceLength { value: Option<f64> },

    #[error("invalid radius grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("non-positive density {density:e} at r={radius:e}")]
    NonPositiveDensity { radius: f64, density: f64 },

    #[error("numeric overflow evaluating the kernel at E={energy:e}")]
    NumericOverflow { energy: f64 },

    #[error("invalid parameter {field}={value:e}: {reason}")]
    InvalidParameters {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("warm-core enhancement factor {factor} < 1 at r={radius:e} (kernel or sign error)")]
    SubUnityEnhancement { radius: f64, factor: f64 },

    #[error("enclosed mass diverges: inner slope {slope:.3} <= -3")]
    DivergentEnclosedMass { slope: f64 },
}

impl ModelError {
    pub(crate) fn grid(reason: impl Into<String>) -> Self {
        ModelError::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// Exit code used when this error terminates the binary.
    ///
    /// 3 = bad model input, 4 = numerical failure during evaluation.
    pub fn exit_code(&self) -> u8 {
        match self {
            ModelError::InvalidEnergy { .. }
            | ModelError::InvalidMode { .. }
            | ModelError::InvalidCoherenceLength { .. }
            | ModelError::InvalidGrid { .. }
            | ModelError::InvalidParameters { .. } => 3,
            ModelError::NonPositiveDensity { .. }
            | ModelError::NumericOverflow { .. }
            | ModelError::SubUnityEnhancement { .. }
            | ModelError::DivergentEnclosedMass { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
