//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use ecdf_objective::{absolute_difference, BootstrapEstimator, StandardEstimator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

pub type ScalarDistance = fn(&f64, &f64) -> f64;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Normal sample with a fixed seed
pub fn normal_data(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = seeded_rng(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Standard estimator over 120 normal points in 12 subsets of 10
pub fn standard_estimator(bins: Vec<f64>, seed: u64) -> StandardEstimator<f64, ScalarDistance> {
    StandardEstimator::builder(normal_data(120, 0.0, 1.0, seed), absolute_difference as ScalarDistance)
        .bins(bins)
        .subset_sizes(vec![10; 12])
        .seed(seed)
        .build()
        .unwrap()
}

/// Bootstrap estimator over two halves of 60 normal points
pub fn bootstrap_estimator(bins: Vec<f64>, n_samples: usize, seed: u64) -> BootstrapEstimator<f64, ScalarDistance> {
    BootstrapEstimator::builder(normal_data(60, 0.0, 1.0, seed), absolute_difference as ScalarDistance)
        .bins(bins)
        .n_samples(n_samples)
        .seed(seed)
        .build()
        .unwrap()
}
