//! Uniform interface of the estimator variants
//!
//! Every estimator freezes an [`ObjectiveState`] at construction and turns a
//! candidate dataset into one fresh ECDF vector per call. Evaluation is the
//! quadratic deviation of that vector from the frozen mean.

use ecdf_core::{EcdfMatrix, ObjectiveConfig, ObjectiveState, Result};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::RngCore;
use std::sync::Mutex;

/// An ECDF objective over datasets of element type `E`
///
/// The trait is object safe so heterogeneous estimators can be combined
/// behind `Box<dyn EcdfEstimator<E>>`.
pub trait EcdfEstimator<E> {
    /// Short name of the estimator variant
    fn name(&self) -> &str;

    /// Frozen bins, ECDF list and moments
    fn state(&self) -> &ObjectiveState;

    /// ECDF vector of a candidate dataset, drawing randomness from `rng`
    fn ecdf_vector_with_rng(&self, dataset: &[E], rng: &mut dyn RngCore) -> Result<Vec<f64>>;

    /// ECDF vector of a candidate dataset using the estimator's own generator
    fn ecdf_vector(&self, dataset: &[E]) -> Result<Vec<f64>>;

    /// Objective of a candidate dataset, drawing randomness from `rng`
    fn evaluate_with_rng(&self, dataset: &[E], rng: &mut dyn RngCore) -> Result<f64> {
        let vector = self.ecdf_vector_with_rng(dataset, rng)?;
        self.evaluate_vector(&vector)
    }

    /// Objective of a candidate dataset
    fn evaluate(&self, dataset: &[E]) -> Result<f64> {
        let vector = self.ecdf_vector(dataset)?;
        self.evaluate_vector(&vector)
    }

    /// Objective of a precomputed ECDF vector
    fn evaluate_vector(&self, vector: &[f64]) -> Result<f64> {
        self.state().evaluate_vector(vector)
    }

    fn bins(&self) -> &[f64] {
        self.state().bins()
    }

    fn ecdf_matrix(&self) -> &EcdfMatrix {
        self.state().ecdf_list()
    }

    fn mean_vector(&self) -> &DVector<f64> {
        self.state().mean_vector()
    }

    fn covar_matrix(&self) -> &DMatrix<f64> {
        self.state().covar_matrix()
    }

    /// Number of stored ECDF vectors `M`
    fn n_ecdf_vectors(&self) -> usize {
        self.state().n_vectors()
    }

    /// The stored ECDF vectors, one per comparison or resample
    fn correlation_vectors(&self) -> Vec<Vec<f64>> {
        self.state().correlation_vectors()
    }

    /// Whether the singular-covariance warning has been issued
    fn has_warned(&self) -> bool {
        self.state().has_warned()
    }
}

/// Estimators whose bins can be replaced after construction
pub trait RebinnableEstimator<E>: EcdfEstimator<E> {
    /// Replace the bins and recompute the ECDF list and its moments
    ///
    /// Resets the singular-covariance warning.
    fn rebin(&mut self, bins: Vec<f64>) -> Result<()>;
}

/// Generator owned by an estimator for its convenience entry points
#[derive(Debug)]
pub(crate) struct EstimatorRng(Mutex<StdRng>);

impl EstimatorRng {
    pub(crate) fn new(config: &ObjectiveConfig) -> Self {
        Self(Mutex::new(config.rng()))
    }

    pub(crate) fn from_rng(rng: StdRng) -> Self {
        Self(Mutex::new(rng))
    }

    /// Run `f` with exclusive access to the generator
    pub(crate) fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}
