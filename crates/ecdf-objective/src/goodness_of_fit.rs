//! Chi-square goodness-of-fit data for an estimator
//!
//! Scores every stored ECDF vector against the estimator's own mean and
//! covariance. For a well-specified objective those scores follow a
//! chi-square law; this module produces the histogram and the reference
//! density, drawing is left to an [`EcdfVisualizer`](crate::EcdfVisualizer).

use crate::traits::EcdfEstimator;
use ecdf_core::{Error, Result};
use statrs::distribution::{ChiSquared, Continuous, ContinuousCDF};

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Number of points of the sampled chi-square density
pub const DENSITY_POINTS: usize = 100;

/// Density-normalised histogram of objective scores
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHistogram {
    /// `n + 1` bin edges
    pub edges: Vec<f64>,
    /// `n` densities; `sum(density * width) == 1`
    pub densities: Vec<f64>,
}

impl ScoreHistogram {
    /// Histogram of `values` over `[min, max]` with `n_bins` equal-width bins
    ///
    /// A degenerate range `min == max` is widened to `[min - 0.5, max + 0.5]`.
    pub fn new(values: &[f64], n_bins: usize) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InsufficientData { expected: 1, actual: 0 });
        }
        if n_bins == 0 {
            return Err(Error::configuration("the histogram needs at least one bin"));
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::InvalidInput("scores must be finite".to_string()));
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let index = (((v - lo) / width) as usize).min(n_bins - 1);
            counts[index] += 1;
        }

        let total = values.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / total / width).collect();
        Ok(Self { edges, densities })
    }

    pub fn n_bins(&self) -> usize {
        self.densities.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }
}

/// Observed scores next to the chi-square density they should follow
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareFit {
    /// Objective of every stored ECDF vector
    pub scores: Vec<f64>,
    pub histogram: ScoreHistogram,
    /// ECDF dimension `D`
    pub degrees_of_freedom: f64,
    /// Abscissae between the 1% and 99% quantiles
    pub density_x: Vec<f64>,
    pub density: Vec<f64>,
}

/// Score the stored ECDF vectors and pair them with a chi-square density
///
/// The degrees of freedom equal the ECDF dimension: each score is a
/// quadratic form in `D` variables.
pub fn chi2_goodness_of_fit<E, T>(estimator: &T, n_hist_bins: usize) -> Result<ChiSquareFit>
where
    T: EcdfEstimator<E> + ?Sized,
{
    let scores = estimator
        .correlation_vectors()
        .iter()
        .map(|vector| estimator.evaluate_vector(vector))
        .collect::<Result<Vec<f64>>>()?;
    let histogram = ScoreHistogram::new(&scores, n_hist_bins)?;

    let degrees_of_freedom = estimator.state().dimension() as f64;
    let chi2 = ChiSquared::new(degrees_of_freedom)
        .map_err(|e| Error::Computation(format!("Failed to create chi-square distribution: {}", e)))?;
    let (lo, hi) = (chi2.inverse_cdf(0.01), chi2.inverse_cdf(0.99));
    let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;
    let density_x: Vec<f64> = (0..DENSITY_POINTS).map(|i| lo + step * i as f64).collect();
    let density = density_x.iter().map(|&x| chi2.pdf(x)).collect();

    Ok(ChiSquareFit {
        scores,
        histogram,
        degrees_of_freedom,
        density_x,
        density,
    })
}
