//! Density profile engine.
//!
//! For every grid radius:
//!
//! ```text
//! ρ_b      = baryonic law(r)
//! E_local  = mapping(ρ_b)
//! ρ_Ψ      = f_ent · ρ_b · (1 + z)³
//! ρ_prob   = Γ(E_local) · ρ_Ψ        (× (1 + A_CP) when CP weighting is on)
//! ρ_eff    = ρ_b + ρ_prob
//! ```
//!
//! Grid points are independent, so both passes run in parallel. The normalized
//! mapping needs the maximum of ρ_b over the grid, which is why ρ_b is evaluated
//! in its own pass first.

use rayon::prelude::*;

use crate::domain::{
    BaryonProfile, EngineOptions, Intermediates, Mode, ParameterSet, ProfileSet, RadiusGrid,
};
use crate::error::ModelError;
use crate::math::gamma;
use crate::models::baryon_density;
use crate::profile::EnergyMapping;

/// Entanglement-weighted density `ρ_Ψ = f_ent · ρ_b · (1 + z)³`.
pub fn rho_psi(rho_b: f64, f_ent: f64, redshift: f64) -> f64 {
    f_ent * rho_b * (1.0 + redshift).powi(3)
}

#[derive(Debug, Clone, Copy)]
struct PointEval {
    e_local: f64,
    gamma: f64,
    rho_prob: f64,
}

/// Evaluate ρ_b, ρ_prob and ρ_eff on `grid`.
pub fn evaluate_profiles(
    grid: &RadiusGrid,
    params: ParameterSet,
    mode: Mode,
    baryon: &BaryonProfile,
    options: &EngineOptions,
) -> Result<ProfileSet, ModelError> {
    options.validate()?;

    let radius = grid.radii();
    let rho_b: Vec<f64> = radius
        .par_iter()
        .map(|&r| baryon_density(baryon, r))
        .collect::<Result<Vec<f64>, ModelError>>()?;

    let mapping = EnergyMapping::configure(mode, &params, options, &rho_b)?;
    let cp_factor = if options.cp_weighted {
        1.0 + params.a_cp()
    } else {
        1.0
    };

    let evals: Vec<PointEval> = rho_b
        .par_iter()
        .map(|&rb| {
            let e_local = mapping.energy(rb);
            let g = gamma(e_local, &params)?;
            let rho_prob = g * rho_psi(rb, params.f_ent(), options.redshift) * cp_factor;
            if !(rho_prob.is_finite() && (rb + rho_prob).is_finite()) {
                return Err(ModelError::NumericOverflow { energy: e_local });
            }
            Ok(PointEval {
                e_local,
                gamma: g,
                rho_prob,
            })
        })
        .collect::<Result<Vec<PointEval>, ModelError>>()?;

    let rho_prob: Vec<f64> = evals.iter().map(|p| p.rho_prob).collect();
    let rho_eff: Vec<f64> = rho_b.iter().zip(&rho_prob).map(|(b, p)| b + p).collect();

    let intermediates = options.capture_intermediates.then(|| Intermediates {
        e_local: evals.iter().map(|p| p.e_local).collect(),
        gamma: evals.iter().map(|p| p.gamma).collect(),
    });

    Ok(ProfileSet {
        radius: radius.to_vec(),
        rho_b,
        rho_prob,
        rho_eff,
        intermediates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_grid() -> RadiusGrid {
        RadiusGrid::new(vec![0.01, 0.1, 1.0, 10.0]).unwrap()
    }

    fn nfw() -> BaryonProfile {
        BaryonProfile::Nfw { rho_s: 1.0, r_s: 1.0 }
    }

    #[test]
    fn effective_density_is_exact_sum() {
        let grid = RadiusGrid::log_spaced(1e-3, 1e2, 64).unwrap();
        let set = evaluate_profiles(
            &grid,
            ParameterSet::default(),
            Mode::Normalized,
            &nfw(),
            &EngineOptions::default(),
        )
        .unwrap();
        assert_eq!(set.len(), 64);
        for i in 0..set.len() {
            assert!(set.rho_prob[i] >= 0.0);
            assert_eq!(set.rho_eff[i], set.rho_b[i] + set.rho_prob[i]);
        }
        assert!(set.intermediates.is_none());
    }

    #[test]
    fn normalized_kernel_is_active_somewhere_on_grid() {
        let set = evaluate_profiles(
            &scenario_grid(),
            ParameterSet::default(),
            Mode::Normalized,
            &nfw(),
            &EngineOptions {
                capture_intermediates: true,
                ..EngineOptions::default()
            },
        )
        .unwrap();
        let inter = set.intermediates.as_ref().unwrap();
        let p = ParameterSet::default();
        // Densest point sits at 4·E0, on the falling side of the bell.
        assert!((inter.e_local[0] / p.e0() - 4.0).abs() < 1e-12);
        // Γ at r=0.1 exceeds Γ at r=0.01: outward the proxy approaches E0.
        assert!(inter.gamma[1] > inter.gamma[0]);
        assert!(set.rho_prob.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn physical_mode_with_vanishing_coherence_length_has_no_probabilistic_term() {
        let p = ParameterSet::default();
        for l in [1e-10, 1e-30, 1e-120] {
            let set = evaluate_profiles(
                &scenario_grid(),
                p,
                Mode::Physical {
                    coherence_length_cm: l,
                },
                &nfw(),
                &EngineOptions::default(),
            )
            .unwrap();
            for (prob, b) in set.rho_prob.iter().zip(&set.rho_b) {
                assert!(*prob >= 0.0);
                assert!(*prob <= 1e-12 * b, "L_coh={l}: ρ_prob={prob} vs ρ_b={b}");
            }
        }
    }

    #[test]
    fn physical_mode_rejects_bad_coherence_length() {
        let err = evaluate_profiles(
            &scenario_grid(),
            ParameterSet::default(),
            Mode::Physical {
                coherence_length_cm: 0.0,
            },
            &nfw(),
            &EngineOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidCoherenceLength { .. }));
    }

    #[test]
    fn redshift_and_cp_weighting_scale_the_probabilistic_term() {
        let grid = scenario_grid();
        let p = ParameterSet::default();
        let base = evaluate_profiles(&grid, p, Mode::Normalized, &nfw(), &EngineOptions::default())
            .unwrap();
        let weighted = evaluate_profiles(
            &grid,
            p,
            Mode::Normalized,
            &nfw(),
            &EngineOptions {
                redshift: 1.0,
                cp_weighted: true,
                ..EngineOptions::default()
            },
        )
        .unwrap();
        let factor = 8.0 * (1.0 + p.a_cp());
        for (a, b) in base.rho_prob.iter().zip(&weighted.rho_prob) {
            assert!((b / a - factor).abs() < 1e-12);
        }
    }

    #[test]
    fn overflowing_dilution_is_numeric_overflow() {
        let err = evaluate_profiles(
            &scenario_grid(),
            ParameterSet::default(),
            Mode::Normalized,
            &nfw(),
            &EngineOptions {
                redshift: 1e110,
                ..EngineOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::NumericOverflow { .. }), "{err:?}");

        // Γ underflows to 0 far past the peak; 0 · inf must not leak a NaN.
        let err = evaluate_profiles(
            &scenario_grid(),
            ParameterSet::default(),
            Mode::Physical {
                coherence_length_cm: 1e3,
            },
            &nfw(),
            &EngineOptions {
                redshift: 1e110,
                ..EngineOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::NumericOverflow { .. }), "{err:?}");
    }

    #[test]
    fn invalid_options_are_rejected() {
        let err = evaluate_profiles(
            &scenario_grid(),
            ParameterSet::default(),
            Mode::Normalized,
            &nfw(),
            &EngineOptions {
                normalized_span: 0.0,
                ..EngineOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameters {
                field: "normalized_span",
                ..
            }
        ));
    }

    #[test]
    fn rho_psi_tracks_baryons() {
        assert!((rho_psi(10.0, 0.2, 0.0) - 2.0).abs() < 1e-15);
        assert!((rho_psi(10.0, 0.2, 1.0) - 16.0).abs() < 1e-12);
    }
}
