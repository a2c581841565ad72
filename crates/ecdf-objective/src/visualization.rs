//! Visualization interface for ECDF objectives
//!
//! Plotting lives outside this crate. A visualizer receives the bins
//! (radii), the mean vector, the stored ECDF vectors and the chi-square
//! goodness-of-fit data, and renders them however it likes.

use crate::goodness_of_fit::{chi2_goodness_of_fit, ChiSquareFit};
use crate::traits::EcdfEstimator;
use ecdf_core::Result;

/// Hooks receiving the data of an ECDF objective
pub trait EcdfVisualizer {
    /// Record every stored ECDF vector against the bins
    fn record_correlation_vectors(&mut self, radii: &[f64], vectors: &[Vec<f64>]) -> Result<()>;

    /// Record the mean ECDF vector against the bins
    fn record_mean_vector(&mut self, radii: &[f64], mean: &[f64]) -> Result<()>;

    /// Record the score histogram and its chi-square reference density
    fn record_chi2_fit(&mut self, fit: &ChiSquareFit) -> Result<()>;

    /// Generate and save visualizations
    ///
    /// Returns paths to generated files (if any)
    fn save_visualizations(&self, output_prefix: &str) -> Result<Vec<String>>;

    /// Check if this visualizer is active
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Null visualizer that does nothing (for when visualization is disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEcdfVisualizer;

impl EcdfVisualizer for NullEcdfVisualizer {
    fn record_correlation_vectors(&mut self, _radii: &[f64], _vectors: &[Vec<f64>]) -> Result<()> {
        Ok(())
    }

    fn record_mean_vector(&mut self, _radii: &[f64], _mean: &[f64]) -> Result<()> {
        Ok(())
    }

    fn record_chi2_fit(&mut self, _fit: &ChiSquareFit) -> Result<()> {
        Ok(())
    }

    fn save_visualizations(&self, _output_prefix: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Feed an estimator's data to a visualizer
///
/// Does nothing for a disabled visualizer.
pub fn visualize<E, T, V>(estimator: &T, visualizer: &mut V, n_hist_bins: usize) -> Result<()>
where
    T: EcdfEstimator<E> + ?Sized,
    V: EcdfVisualizer + ?Sized,
{
    if !visualizer.is_enabled() {
        return Ok(());
    }

    let radii = estimator.bins();
    visualizer.record_correlation_vectors(radii, &estimator.correlation_vectors())?;
    let mean: Vec<f64> = estimator.mean_vector().iter().copied().collect();
    visualizer.record_mean_vector(radii, &mean)?;
    visualizer.record_chi2_fit(&chi2_goodness_of_fit(estimator, n_hist_bins)?)?;
    Ok(())
}
