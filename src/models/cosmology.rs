//! cgs constants and minimal cosmology helpers.

use std::f64::consts::PI;

/// Speed of light [cm/s].
pub const C_LIGHT: f64 = 2.997_924_58e10;
/// Newton's constant [cm³ g⁻¹ s⁻²].
pub const G_NEWTON: f64 = 6.674_30e-8;
/// One megaparsec [km].
pub const MPC_KM: f64 = 3.085_677_581_491_367e19;

/// Critical density `3H² / (8πG)` [g/cm³] for a Hubble rate `H` [s⁻¹].
pub fn critical_density(hubble_per_s: f64) -> f64 {
    3.0 * hubble_per_s * hubble_per_s / (8.0 * PI * G_NEWTON)
}

/// Convert `H0` from km/s/Mpc to s⁻¹.
pub fn hubble_per_second(h0_km_s_mpc: f64) -> f64 {
    h0_km_s_mpc / MPC_KM
}
