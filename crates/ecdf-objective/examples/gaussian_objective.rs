//! Scan the mean of a Gaussian model with ECDF objectives
//!
//! Run with `RUST_LOG=debug` to see the assembly logs.

use ecdf_objective::{
    absolute_difference, choose_bins, chi2_goodness_of_fit, dump_diagnostics, BinChoice, BinSelection,
    BootstrapEstimator, EcdfEstimator, MultipleEstimator, StandardEstimator, DEFAULT_HISTOGRAM_BINS,
};
use rand::prelude::*;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn gaussian_sample(n: usize, mean: f64, std: f64, rng: &mut StdRng) -> Vec<f64> {
    let normal = Normal::new(mean, std).expect("valid normal parameters");
    (0..n).map(|_| normal.sample(rng)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let reference = gaussian_sample(400, 1.0, 0.5, &mut rng);
    let initial_bins: Vec<f64> = (1..=30).map(|i| i as f64 * 0.1).collect();

    let mut standard = StandardEstimator::builder(reference.clone(), absolute_difference)
        .bins(initial_bins.clone())
        .subset_sizes(vec![20; 20])
        .seed(1)
        .build()?;
    let kept = choose_bins(&mut standard, &BinChoice::new(6, BinSelection::UniformY))?;
    println!("Standard estimator: {} ECDF vectors, bins {:?}", standard.n_ecdf_vectors(), kept);

    let fit = chi2_goodness_of_fit(&standard, DEFAULT_HISTOGRAM_BINS)?;
    println!(
        "Chi-square check: df = {}, mean score = {:.3}",
        fit.degrees_of_freedom,
        fit.scores.iter().sum::<f64>() / fit.scores.len() as f64
    );

    let bootstrap = BootstrapEstimator::builder(reference.clone(), absolute_difference)
        .bins(kept.clone())
        .n_elements(200, 200)
        .n_samples(190)
        .seed(2)
        .build()?;

    let second = StandardEstimator::builder(reference, absolute_difference)
        .bins(kept)
        .subset_sizes(vec![20; 20])
        .seed(3)
        .build()?;
    let members: Vec<Box<dyn EcdfEstimator<f64>>> = vec![Box::new(bootstrap), Box::new(second)];
    let combined = MultipleEstimator::new(members)?;

    println!("{:>8} {:>14} {:>14}", "mean", "standard", "combined");
    for step in 0..=8 {
        let mean = 0.6 + 0.1 * step as f64;
        let candidate = gaussian_sample(20, mean, 0.5, &mut rng);
        println!(
            "{:>8.2} {:>14.3} {:>14.3}",
            mean,
            standard.evaluate(&candidate)?,
            combined.evaluate(&candidate)?
        );
    }

    let written = dump_diagnostics(&standard, std::env::temp_dir(), "gaussian")?;
    println!("Diagnostics written to {:?}", written);
    Ok(())
}
