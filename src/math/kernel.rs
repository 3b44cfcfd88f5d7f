//! Bell-curve decoherence kernel.
//!
//! `Γ(E) = κA · E · exp(1 − E/E0)`
//!
//! The kernel peaks exactly at `E = E0` with `Γ(E0) = κA · E0`, vanishes at
//! `E = 0`, and decays to 0 as `E → ∞`.
//!
//! Numerical notes:
//! - We evaluate `(κA · E0) · x · exp(1 − x)` with `x = E/E0`, so the exponent
//!   argument stays O(x) instead of mixing erg-scale magnitudes.
//! - For `x` beyond ~745, `exp(1 − x)` underflows to 0, which is the analytic
//!   limit; the product stays finite.

use crate::domain::ParameterSet;
use crate::error::ModelError;

/// Evaluate `Γ(E)` for a non-negative energy proxy.
pub fn gamma(energy: f64, params: &ParameterSet) -> Result<f64, ModelError> {
    if energy.is_nan() || energy < 0.0 {
        return Err(ModelError::InvalidEnergy { energy });
    }

    let x = energy / params.e0();
    if !x.is_finite() {
        return Err(ModelError::NumericOverflow { energy });
    }

    let value = params.peak_gamma() * bell(x);
    if !value.is_finite() {
        return Err(ModelError::NumericOverflow { energy });
    }
    Ok(value)
}

/// Unit-peak bell shape `x · exp(1 − x)` (maximum 1 at `x = 1`).
pub fn bell(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    x * (1.0 - x).exp()
}
