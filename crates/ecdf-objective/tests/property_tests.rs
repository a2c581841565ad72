//! Property-based tests for the estimator variants

mod common;

use common::*;
use ecdf_objective::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Property: subset pairs give k(k-1)/2 stored vectors
    #[test]
    fn prop_standard_vector_count(k in 2usize..8, size in 2usize..6, seed in 0u64..500) {
        let data = normal_data(k * size, 0.0, 1.0, seed);
        let result = StandardEstimator::builder(data, absolute_difference as ScalarDistance)
            .bins(vec![0.5, 1.0])
            .subset_sizes(vec![size; k])
            .seed(seed)
            .build();
        if k == 2 {
            let insufficient = matches!(result, Err(Error::InsufficientData { .. }));
            prop_assert!(insufficient, "a single subset pair cannot have a covariance");
        } else {
            let est = result.unwrap();
            prop_assert_eq!(est.n_ecdf_vectors(), k * (k - 1) / 2);
        }
    }

    // Property: bootstrap stores exactly n_samples vectors for any split
    #[test]
    fn prop_bootstrap_vector_count(n_a in 1usize..10, n_b in 1usize..10, n_samples in 2usize..40) {
        let data = normal_data(n_a + n_b, 0.0, 1.0, 1);
        let est = BootstrapEstimator::builder(data, absolute_difference as ScalarDistance)
            .bins(vec![0.5, 1.0, 1.5])
            .n_elements(n_a, n_b)
            .n_samples(n_samples)
            .seed(3)
            .build()
            .unwrap();
        prop_assert_eq!(est.ecdf_matrix().shape(), (3, n_samples));
    }

    // Property: a singular covariance degrades to the squared distance and warns once
    #[test]
    fn prop_singular_fallback(v0 in 0.0f64..1.0, v1 in 0.0f64..1.0, calls in 1usize..5) {
        let data = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        let est = StandardEstimator::new(data, vec![0.5, 1.5], absolute_difference, &[2, 2, 2]).unwrap();
        for _ in 0..calls {
            let score = est.evaluate_vector(&[v0, v1]).unwrap();
            let expected = (0.5 - v0).powi(2) + (1.0 - v1).powi(2);
            prop_assert!((score - expected).abs() < 1e-12);
            prop_assert!(est.has_warned());
        }
    }
}
