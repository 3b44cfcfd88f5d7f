//! Warm-core profile evaluation.
//!
//! Responsibilities:
//!
//! - parse the mode token and build the energy-proxy mapping (`energy`)
//! - evaluate ρ_b, Γ(E_local), ρ_prob and ρ_eff on the grid (parallel) (`engine`)
//! - integrate enclosed mass for the rotation-curve ratio (`rotation`)

pub mod energy;
pub mod engine;
pub mod rotation;

pub use energy::*;
pub use engine::*;
pub use rotation::*;
