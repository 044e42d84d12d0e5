//! Correctness and invariant tests for samplestats
//!
//! These tests verify properties that must hold for any input: batch and
//! incremental paths agree, results do not depend on sample order, both
//! divisor conventions match their closed forms. They complement the unit
//! tests in each module.
//!
//! Run with: cargo test --test correctness --features full

#[cfg(not(all(
    feature = "statistics",
    feature = "covariance",
    feature = "validation"
)))]
compile_error!(
    "Correctness tests require all algorithm families. Run: cargo test --test correctness --features full"
);

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use samplestats::covariance::{
    observe_covariance, observe_covariance_with, CovarianceIngestor, CovarianceStats,
};
use samplestats::statistics::{observe, observe_with, Stats, StatsIngestor};
use samplestats::traits::{Ingestor, VarianceConvention};
use samplestats::validation::{
    check, validate, validate_covariance, CovarianceValidation, Field, Validation,
};

const CONVENTIONS: [VarianceConvention; 2] =
    [VarianceConvention::Sample, VarianceConvention::Population];

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn close_rel(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * (1.0 + b.abs())
}

/// Batch-observe a slice by serving it from a closure
fn observe_slice(values: &[f64], convention: VarianceConvention) -> Stats {
    let mut next = values.iter().copied();
    observe_with(|| next.next().unwrap(), values.len(), convention)
}

/// Feed a slice one sample at a time, keeping the last result
fn ingest_slice(values: &[f64], convention: VarianceConvention) -> Stats {
    let mut ingestor = StatsIngestor::with_convention(convention);
    let mut stats = Stats::null();
    for &v in values {
        stats = ingestor.ingest(v);
    }
    stats
}

fn observe_pairs(xs: &[f64], ys: &[f64], convention: VarianceConvention) -> CovarianceStats {
    let mut next = xs.iter().copied().zip(ys.iter().copied());
    observe_covariance_with(|| next.next().unwrap(), xs.len(), convention)
}

// ============================================================================
// Running Statistics
// ============================================================================

mod running_stats {
    use super::*;

    #[test]
    fn identical_samples_have_zero_variance() {
        for convention in CONVENTIONS {
            for v in [0.0, 1.0, -3.5, 1e6] {
                let values = [v; 25];
                for stats in [
                    observe_slice(&values, convention),
                    ingest_slice(&values, convention),
                ] {
                    assert!(close(stats.mean, v, 1e-9), "mean {} != {}", stats.mean, v);
                    assert!(close(stats.variance, 0.0, 1e-9));
                    assert_eq!(stats.min, v);
                    assert_eq!(stats.max, v);
                }
            }
        }
    }

    #[test]
    fn integer_sequence_matches_closed_form() {
        for n in [2usize, 3, 10, 101, 1000] {
            let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let nf = n as f64;

            let population = observe_slice(&values, VarianceConvention::Population);
            let sample = observe_slice(&values, VarianceConvention::Sample);

            assert!(close(population.mean, (nf - 1.0) / 2.0, 1e-9));
            assert!(
                close_rel(population.variance, (nf * nf - 1.0) / 12.0, 1e-9),
                "n={} population variance {}",
                n,
                population.variance
            );
            assert!(
                close_rel(sample.variance, nf * (nf + 1.0) / 12.0, 1e-9),
                "n={} sample variance {}",
                n,
                sample.variance
            );
            // Same sum of squared errors under both divisors
            assert!(close_rel(
                sample.variance * (nf - 1.0),
                population.variance * nf,
                1e-12
            ));
            assert_eq!(population.min, 0.0);
            assert_eq!(population.max, nf - 1.0);
        }
    }

    #[test]
    fn batch_equals_incremental() {
        let mut rng = StdRng::seed_from_u64(7);
        let values: Vec<f64> = (0..5_000).map(|_| rng.random_range(-100.0..100.0)).collect();

        for convention in CONVENTIONS {
            let batch = observe_slice(&values, convention);
            let incremental = ingest_slice(&values, convention);

            assert!(close(batch.mean, incremental.mean, 1e-12));
            assert!(close(batch.variance, incremental.variance, 1e-12));
            assert_eq!(batch.min, incremental.min);
            assert_eq!(batch.max, incremental.max);
        }
    }

    #[test]
    fn order_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut values: Vec<f64> = (0..2_000)
            .map(|_| rng.random::<f64>() * 50.0 - 10.0)
            .collect();
        let reference = ingest_slice(&values, VarianceConvention::Sample);

        for _ in 0..5 {
            values.shuffle(&mut rng);
            let shuffled = observe_slice(&values, VarianceConvention::Sample);

            assert!(close_rel(shuffled.mean, reference.mean, 1e-10));
            assert!(close_rel(shuffled.variance, reference.variance, 1e-10));
            assert_eq!(shuffled.min, reference.min);
            assert_eq!(shuffled.max, reference.max);
        }
    }

    #[test]
    fn shifted_samples_keep_precision() {
        // E[X^2] - E[X]^2 would cancel to garbage at this offset
        let offset = 1e9;
        let values: Vec<f64> = (0..1_000).map(|i| offset + (i % 10) as f64).collect();
        let stats = observe_slice(&values, VarianceConvention::Population);

        assert!(
            close(stats.variance, 8.25, 1e-3),
            "Variance: {} expected: 8.25",
            stats.variance
        );
    }

    #[test]
    fn variance_never_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ingestor = StatsIngestor::with_convention(VarianceConvention::Population);
        for _ in 0..10_000 {
            let stats = ingestor.ingest(rng.random_range(-1e3..1e3));
            assert!(stats.variance >= 0.0);
            assert!(stats.min <= stats.max);
        }
    }

    #[test]
    fn observe_calls_generator_exactly_n_times() {
        for n in [0usize, 1, 2, 100] {
            let mut calls = 0usize;
            let stats = observe(
                || {
                    calls += 1;
                    calls as f64
                },
                n,
            );
            assert_eq!(calls, n);
            assert_eq!(stats.is_null(), n == 0);
        }
    }

    #[test]
    fn null_record_is_not_a_computed_zero() {
        let zero = ingest_slice(&[0.0, 0.0], VarianceConvention::Sample);

        assert!(!zero.is_null());
        assert_eq!(zero.variance, 0.0);
        assert!(Stats::null().is_null());
        assert!(!validate(&Stats::null(), &Validation::new().variance(0.0)));
        assert!(validate(&zero, &Validation::new().variance(0.0)));
    }

    #[test]
    fn single_sample_degenerate_variance() {
        let sample = ingest_slice(&[5.0], VarianceConvention::Sample);
        let population = ingest_slice(&[5.0], VarianceConvention::Population);

        assert!(sample.variance.is_nan());
        assert_eq!(population.variance, 0.0);
        assert_eq!(sample.mean, 5.0);
    }

    #[test]
    fn non_finite_samples_propagate() {
        let stats = ingest_slice(&[1.0, 2.0, f64::NAN, 3.0], VarianceConvention::Sample);
        assert!(stats.mean.is_nan());
        assert!(stats.variance.is_nan());

        let stats = ingest_slice(&[1.0, f64::NEG_INFINITY], VarianceConvention::Sample);
        assert_eq!(stats.min, f64::NEG_INFINITY);
        assert!(stats.variance.is_nan());
    }

    #[test]
    fn trait_current_tracks_ingest() {
        let mut ingestor = StatsIngestor::new();
        assert!(Ingestor::current(&ingestor).is_null());

        Ingestor::ingest(&mut ingestor, 4.0);
        let last = Ingestor::ingest(&mut ingestor, 8.0);

        assert_eq!(Ingestor::count(&ingestor), 2);
        assert_eq!(Ingestor::current(&ingestor), last);
        assert_eq!(last.variance, 8.0);

        Ingestor::clear(&mut ingestor);
        assert!(Ingestor::is_empty(&ingestor));
    }
}

// ============================================================================
// Covariance
// ============================================================================

mod covariance {
    use super::*;

    const HALF: [f64; 10] = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
    const NUMBERS: [f64; 10] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

    #[test]
    fn half_and_numbers_sample() {
        let hn = observe_pairs(&HALF, &NUMBERS, VarianceConvention::Sample);

        assert!(close(hn.x.mean, 0.5, 1e-12));
        assert!(close(hn.x.variance, 2.5 / 9.0, 1e-12));
        assert!(close(hn.y.mean, 4.5, 1e-12));
        assert!(close(hn.y.variance, 82.5 / 9.0, 1e-12));
        assert!(close(hn.covariance, 12.5 / 9.0, 1e-12));
    }

    #[test]
    fn half_and_numbers_population() {
        let hn = observe_pairs(&HALF, &NUMBERS, VarianceConvention::Population);

        assert!(close(hn.x.variance, 0.25, 1e-12));
        assert!(close(hn.y.variance, 8.25, 1e-12));
        assert!(close(hn.covariance, 1.25, 1e-12));
    }

    #[test]
    fn symmetric_in_roles() {
        let mut rng = StdRng::seed_from_u64(19);
        let xs: Vec<f64> = (0..3_000).map(|_| rng.random::<f64>()).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + rng.random::<f64>()).collect();

        for convention in CONVENTIONS {
            let xy = observe_pairs(&xs, &ys, convention);
            let yx = observe_pairs(&ys, &xs, convention);

            assert!(close(xy.covariance, yx.covariance, 1e-12));
            assert_eq!(xy.x, yx.y);
            assert_eq!(xy.y, yx.x);
        }
    }

    #[test]
    fn batch_equals_incremental() {
        let mut rng = StdRng::seed_from_u64(23);
        let pairs: Vec<(f64, f64)> = (0..2_000)
            .map(|_| (rng.random_range(-5.0..5.0), rng.random_range(0.0..1e4)))
            .collect();

        let mut ingestor = CovarianceIngestor::new();
        let mut incremental = CovarianceStats::null();
        for &(x, y) in &pairs {
            incremental = ingestor.ingest(x, y);
        }

        let mut next = pairs.iter().copied();
        let batch = observe_covariance(|| next.next().unwrap(), pairs.len());

        assert!(close(batch.covariance, incremental.covariance, 1e-9));
        assert!(close(batch.x.variance, incremental.x.variance, 1e-12));
        assert!(close(batch.y.mean, incremental.y.mean, 1e-9));
    }

    #[test]
    fn marginals_match_univariate() {
        let mut rng = StdRng::seed_from_u64(29);
        let xs: Vec<f64> = (0..500).map(|_| rng.random::<f64>()).collect();
        let ys: Vec<f64> = (0..500).map(|_| rng.random::<f64>() * 3.0).collect();

        for convention in CONVENTIONS {
            let joint = observe_pairs(&xs, &ys, convention);
            assert_eq!(joint.x, ingest_slice(&xs, convention));
            assert_eq!(joint.y, ingest_slice(&ys, convention));
        }
    }

    #[test]
    fn order_invariant() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut pairs: Vec<(f64, f64)> = (0..1_000)
            .map(|i| (i as f64, (i as f64) * 0.5 + rng.random::<f64>()))
            .collect();

        let reference: CovarianceIngestor = pairs.iter().copied().collect();
        pairs.shuffle(&mut rng);
        let shuffled: CovarianceIngestor = pairs.iter().copied().collect();

        let (a, b) = (reference.stats(), shuffled.stats());
        assert!(close_rel(a.covariance, b.covariance, 1e-10));
        assert!(close(a.correlation(), b.correlation(), 1e-9));
    }

    #[test]
    fn zero_pairs_is_null() {
        let stats = observe_covariance(|| (1.0, 2.0), 0);
        assert!(stats.is_null());
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn uniform_source_matches_theory() {
        let mut rng = StdRng::seed_from_u64(42);
        let stats = observe(|| rng.random::<f64>(), 10_000);

        let expected = Validation::new()
            .tolerance(0.1)
            .min(0.0)
            .max(1.0)
            .mean(0.5)
            .variance(1.0 / 12.0);
        assert!(validate(&stats, &expected), "{:?}", check(&stats, &expected));
    }

    #[test]
    fn concrete_expectations() {
        let zero = observe_slice(&[0.0; 10], VarianceConvention::Sample);
        let exact = Validation::new().tolerance(0.0);

        assert!(validate(&zero, &exact.min(0.0)));
        assert!(!validate(&zero, &exact.min(1.0)));
        assert!(validate(&zero, &exact));
    }

    #[test]
    fn boundary_is_inclusive() {
        let stats = observe_slice(&[1.0, 3.0], VarianceConvention::Population);
        // mean 2, variance 1, min 1, max 3
        let at = Validation::new()
            .tolerance(0.5)
            .mean(2.5)
            .variance(0.5)
            .min(1.5)
            .max(2.5);
        assert!(validate(&stats, &at));

        let past = at.tolerance(0.5 - f64::EPSILON);
        let err = check(&stats, &past).unwrap_err();
        assert_eq!(err.field, Field::Mean);
    }

    #[test]
    fn covariance_expectations() {
        let hn = observe_pairs(
            &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            VarianceConvention::Sample,
        );

        let h = Validation::new().min(0.0).max(1.0).mean(0.5).variance(0.27777);
        let n = Validation::new().min(0.0).max(9.0).mean(4.5);
        let base = CovarianceValidation::new().tolerance(0.05);

        assert!(validate_covariance(&hn, &CovarianceValidation::new()));
        assert!(validate_covariance(&hn, &base));
        assert!(validate_covariance(&hn, &base.x(h)));
        assert!(!validate_covariance(&hn, &base.x(n)));
        assert!(validate_covariance(&hn, &base.y(n)));
        assert!(!validate_covariance(&hn, &base.y(h)));
        assert!(validate_covariance(&hn, &base.x(h).y(n)));
        assert!(!validate_covariance(&hn, &base.x(n).y(h)));
        assert!(validate_covariance(&hn, &base.x(h).y(n).covariance(1.38888)));
        // Without a top-level tolerance the marginals fall back to epsilon
        assert!(!validate_covariance(&hn, &CovarianceValidation::new().x(h)));
    }
}

// ============================================================================
// Fixtures
// ============================================================================

#[cfg(feature = "serde")]
mod fixtures {
    use super::*;

    #[test]
    fn observation_round_trips_through_json() {
        let mut rng = StdRng::seed_from_u64(5);
        let xs: Vec<f64> = (0..1_000).map(|_| rng.random::<f64>()).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * 4.0 - 1.0).collect();

        for stats in [
            observe_pairs(&xs, &ys, VarianceConvention::Sample),
            observe_pairs(&xs[..1], &ys[..1], VarianceConvention::Sample),
        ] {
            let json = serde_json::to_string(&stats).unwrap();
            let back: CovarianceStats = serde_json::from_str(&json).unwrap();

            assert_eq!(back.x.mean, stats.x.mean);
            assert_eq!(back.y.max, stats.y.max);
            assert_eq!(back.covariance.is_nan(), stats.covariance.is_nan());
            if !stats.covariance.is_nan() {
                assert_eq!(back, stats);
            }
        }
    }

    #[test]
    fn null_observation_round_trips_through_json() {
        let stats = observe(|| 1.0, 0);
        let back: Stats = serde_json::from_str(&serde_json::to_string(&stats).unwrap()).unwrap();
        assert!(back.is_null());

        let joint = observe_covariance(|| (1.0, 2.0), 0);
        let back: CovarianceStats =
            serde_json::from_str(&serde_json::to_string(&joint).unwrap()).unwrap();
        assert!(back.is_null());
    }

    #[test]
    fn expectations_load_from_fixture() {
        let fixture = r#"{
            "tolerance": 0.05,
            "x": { "min": 0.0, "max": 1.0, "mean": 0.5, "variance": 0.27777 },
            "y": { "mean": 4.5 },
            "covariance": 1.38888
        }"#;
        let expected: CovarianceValidation = serde_json::from_str(fixture).unwrap();

        let hn = observe_pairs(
            &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            VarianceConvention::Sample,
        );
        assert!(validate_covariance(&hn, &expected));

        let dumped: Stats = serde_json::from_str(&serde_json::to_string(&hn.x).unwrap()).unwrap();
        assert!(validate(&dumped, &expected.x.unwrap()));
    }
}
