//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const EPSILON: f64 = 1e-10;

/// Deterministic generator for reproducible tests
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform data on `[0, scale)`
pub fn uniform_data(n: usize, scale: f64, seed: u64) -> Vec<f64> {
    let mut rng = seeded_rng(seed);
    (0..n).map(|_| rng.gen::<f64>() * scale).collect()
}

/// Evenly spaced bins on `[start, end]`
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Column `j` of an ECDF matrix as a vector
pub fn column(m: &ecdf_core::EcdfMatrix, j: usize) -> Vec<f64> {
    m.column(j).iter().copied().collect()
}
