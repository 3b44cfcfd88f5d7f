//! Baryonic density laws and cgs cosmology constants.
//!
//! Laws are implemented as small, pure functions so that the profile engine can
//! stay generic over the selected `BaryonProfile`.

pub mod baryon;
pub mod cosmology;

pub use baryon::*;
pub use cosmology::*;
