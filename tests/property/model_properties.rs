use gop_warm_core::app::pipeline::run_model;
use gop_warm_core::domain::{BaryonProfile, EngineOptions, Mode, ParameterSet, RadiusGrid};
use gop_warm_core::error::ModelError;
use gop_warm_core::math::{estimate_slopes, gamma};
use gop_warm_core::profile::{evaluate_profiles, select_mode};
use gop_warm_core::report::RunInputs;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![
        Just(Mode::Normalized),
        (1e-3f64..1e3).prop_map(|l| Mode::Physical {
            coherence_length_cm: l
        }),
    ]
}

fn params_strategy() -> impl Strategy<Value = ParameterSet> {
    (-20.0f64..-3.0, 6.0f64..18.0, 0.0f64..=1.0, -1.0f64..=1.0).prop_map(
        |(log_kappa, log_e0, f_ent, a_cp)| {
            ParameterSet::new(10f64.powf(log_kappa), 10f64.powf(log_e0), f_ent, a_cp).unwrap()
        },
    )
}

fn options_strategy() -> impl Strategy<Value = EngineOptions> {
    (0.1f64..10.0, 0.0f64..10.0, any::<bool>()).prop_map(|(span, z, cp)| EngineOptions {
        normalized_span: span,
        redshift: z,
        cp_weighted: cp,
        capture_intermediates: false,
    })
}

fn baryon_strategy() -> impl Strategy<Value = BaryonProfile> {
    prop_oneof![
        (1e-3f64..1e3, 0.1f64..10.0).prop_map(|(rho_s, r_s)| BaryonProfile::Nfw { rho_s, r_s }),
        (1e-3f64..1e3, 0.1f64..10.0)
            .prop_map(|(rho0, r_core)| BaryonProfile::CoredIsothermal { rho0, r_core }),
    ]
}

proptest! {
    #[test]
    fn kernel_is_non_negative_and_peaks_at_e0(p in params_strategy(), u in 0.0f64..1e4) {
        let g = gamma(u * p.e0(), &p).unwrap();
        prop_assert!(g >= 0.0);
        prop_assert!(g <= p.peak_gamma() * (1.0 + 1e-12));
        prop_assert_eq!(gamma(p.e0(), &p).unwrap(), p.kappa_a() * p.e0());
    }

    #[test]
    fn kernel_rises_then_falls(
        p in params_strategy(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        far in 1.0f64..50.0,
    ) {
        let e0 = p.e0();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        // Below the peak: non-decreasing.
        let g_lo = gamma(lo * e0, &p).unwrap();
        let g_hi = gamma(hi * e0, &p).unwrap();
        prop_assert!(g_lo <= g_hi * (1.0 + 1e-12));

        // Above the peak: non-increasing.
        let g_near = gamma((1.0 + lo) * e0, &p).unwrap();
        let g_far = gamma((1.0 + lo + far) * e0, &p).unwrap();
        prop_assert!(g_far <= g_near * (1.0 + 1e-12));
    }

    #[test]
    fn effective_density_is_baryons_plus_probability(
        params in params_strategy(),
        options in options_strategy(),
        mode in mode_strategy(),
        baryon in baryon_strategy(),
        points in 3usize..40,
    ) {
        let grid = RadiusGrid::log_spaced(0.01, 10.0, points).unwrap();
        let set = evaluate_profiles(
            &grid,
            params,
            mode,
            &baryon,
            &options,
        )
        .unwrap();

        prop_assert_eq!(set.len(), points);
        for i in 0..set.len() {
            prop_assert!(set.rho_prob[i] >= 0.0);
            prop_assert_eq!(set.rho_eff[i], set.rho_b[i] + set.rho_prob[i]);
        }
    }

    #[test]
    fn enhancement_never_drops_below_one(
        params in params_strategy(),
        options in options_strategy(),
        mode in mode_strategy(),
        baryon in baryon_strategy(),
        points in 3usize..40,
    ) {
        let grid = RadiusGrid::log_spaced(0.01, 10.0, points).unwrap();
        let record = run_model(
            &grid,
            RunInputs {
                mode,
                params,
                baryon,
                options,
                inner_window: 1.0,
            },
        )
        .unwrap();

        // A steep effective core may drop the rotation ratio, never the record.
        prop_assert!(record.enhancement_factor >= 1.0);
        prop_assert!(record.enhancement.iter().all(|&f| f >= 1.0));
        prop_assert_eq!(record.mode, mode);
    }

    #[test]
    fn slope_estimation_is_deterministic(k in -3.0f64..0.0, points in 2usize..30) {
        let grid = RadiusGrid::log_spaced(0.01, 100.0, points).unwrap();
        let rho: Vec<f64> = grid.radii().iter().map(|r| r.powf(k)).collect();

        let first = estimate_slopes(grid.radii(), &rho).unwrap();
        let second = estimate_slopes(grid.radii(), &rho).unwrap();
        prop_assert_eq!(&first, &second);
        for s in &first.slope {
            prop_assert!((s - k).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_mode_tokens_are_rejected(token in "[a-z]{1,12}") {
        prop_assume!(!matches!(token.as_str(), "normalized" | "normalised" | "physical"));
        let err = select_mode(&token, Some(1.0)).unwrap_err();
        prop_assert_eq!(err, ModelError::InvalidMode { token });
    }
}
