//! Quadratic-form objective against a frozen ECDF mean and covariance
//!
//! The objective of an ECDF vector `y` is `Δᵗ Σ⁻¹ Δ` with `Δ = mean - y`,
//! computed through a linear solve rather than an explicit inverse. A
//! numerically singular `Σ` is an expected condition, not an error: the
//! objective silently falls back to the identity metric `Δᵗ Δ` after a
//! single warning.

use crate::moments::{covariance_of_ecdf_vectors, mean_of_ecdf_vectors};
use crate::{EcdfMatrix, Error, Result};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Condition number above which an ill-conditioning advisory is logged
pub const DEFAULT_CONDITION_THRESHOLD: f64 = 1e3;

const SVD_MAX_ITERATIONS: usize = 1000;

/// Outcome of a single objective evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deviation {
    /// `Δᵗ Σ⁻¹ Δ`, the covariance solve succeeded
    Mahalanobis(f64),
    /// `Δᵗ Δ`, the covariance was singular
    Euclidean(f64),
}

impl Deviation {
    /// The score, whichever metric produced it
    pub fn score(&self) -> f64 {
        match *self {
            Deviation::Mahalanobis(score) | Deviation::Euclidean(score) => score,
        }
    }

    /// Whether the identity-metric fallback was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, Deviation::Euclidean(_))
    }
}

/// Quadratic deviation of `vector` from `mean` under the inverse of `covar`
///
/// # Errors
/// [`Error::ShapeMismatch`] if `vector`, `mean` and `covar` disagree in
/// dimension. Singularity is reported through [`Deviation::Euclidean`].
pub fn quadratic_deviation(mean: &DVector<f64>, covar: &DMatrix<f64>, vector: &[f64]) -> Result<Deviation> {
    let d = mean.len();
    if vector.len() != d {
        return Err(Error::size_mismatch(d, vector.len(), "ECDF vector dimension"));
    }
    if covar.nrows() != d || covar.ncols() != d {
        return Err(Error::size_mismatch(d, covar.nrows().max(covar.ncols()), "covariance dimension"));
    }

    let delta = mean - DVector::from_column_slice(vector);
    match covar.clone().lu().solve(&delta) {
        Some(x) if x.iter().all(|v| v.is_finite()) => Ok(Deviation::Mahalanobis(delta.dot(&x))),
        _ => Ok(Deviation::Euclidean(delta.dot(&delta))),
    }
}

/// Evaluate the objective and track the one-shot singularity warning
///
/// Returns `(score, warned)`. The warning is logged only when the fallback
/// is taken and `already_warned` is false; `warned` is true once any
/// fallback has happened. The fallback itself applies on every call.
pub fn evaluate_deviation(
    mean: &DVector<f64>,
    covar: &DMatrix<f64>,
    vector: &[f64],
    already_warned: bool,
) -> Result<(f64, bool)> {
    let warned = AtomicBool::new(already_warned);
    let score = evaluate_with_flag(mean, covar, vector, &warned)?;
    Ok((score, warned.into_inner()))
}

/// Score `vector`, raising `warned` and logging the first time the fallback applies
fn evaluate_with_flag(mean: &DVector<f64>, covar: &DMatrix<f64>, vector: &[f64], warned: &AtomicBool) -> Result<f64> {
    let deviation = quadratic_deviation(mean, covar, vector)?;
    if deviation.is_fallback() && !warned.swap(true, Ordering::AcqRel) {
        warn!("Covariance matrix is singular; falling back to the identity metric");
    }
    Ok(deviation.score())
}

/// Spectral condition number (largest over smallest singular value)
///
/// Infinite for singular matrices; 1 for the empty matrix.
pub fn condition_number(matrix: &DMatrix<f64>) -> f64 {
    if matrix.is_empty() {
        return 1.0;
    }

    let svd = match matrix.clone().try_svd(false, false, f64::EPSILON, SVD_MAX_ITERATIONS) {
        Some(svd) => svd,
        None => return f64::INFINITY,
    };
    let (min, max) = svd
        .singular_values
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if min <= 0.0 {
        f64::INFINITY
    } else {
        max / min
    }
}

/// Log an advisory when the condition number of `covar` exceeds `threshold`
///
/// Purely informational; returns the condition number.
pub fn check_conditioning(covar: &DMatrix<f64>, threshold: f64) -> f64 {
    let condition = condition_number(covar);
    if condition > threshold {
        warn!(condition, threshold, "The spectral condition of the covariance matrix is large");
    }
    condition
}

/// Settings shared by every estimator variant
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveConfig {
    /// Run the ill-conditioning advisory after (re)computing the covariance
    pub check_condition: bool,
    /// Condition number above which the advisory fires
    pub condition_threshold: f64,
    /// Seed of the estimator's generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            check_condition: true,
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
            seed: None,
        }
    }
}

impl ObjectiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the condition number threshold of the advisory
    pub fn with_condition_threshold(mut self, threshold: f64) -> Self {
        self.condition_threshold = threshold;
        self
    }

    /// Disable the ill-conditioning advisory
    pub fn without_condition_check(mut self) -> Self {
        self.check_condition = false;
        self
    }

    /// A fresh generator honouring `seed`
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Frozen statistics of an estimator
///
/// Holds the bins, the ECDF vector list, its mean and covariance and the
/// one-shot "warned about singular covariance" flag. Evaluation only reads
/// the statistics; the flag is atomic so concurrent evaluations log the
/// warning at most once.
#[derive(Debug)]
pub struct ObjectiveState {
    bins: Vec<f64>,
    ecdf_list: EcdfMatrix,
    mean_vector: DVector<f64>,
    covar_matrix: DMatrix<f64>,
    condition_number: Option<f64>,
    warned: AtomicBool,
}

impl ObjectiveState {
    /// Derive mean and covariance from an ECDF vector list
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`] if the list does not have one row per bin
    /// - [`Error::InsufficientData`] if it has fewer than two columns
    pub fn new(bins: Vec<f64>, ecdf_list: EcdfMatrix, config: &ObjectiveConfig) -> Result<Self> {
        if ecdf_list.nrows() != bins.len() {
            return Err(Error::size_mismatch(bins.len(), ecdf_list.nrows(), "ECDF list rows"));
        }

        let mean_vector = mean_of_ecdf_vectors(&ecdf_list)?;
        let covar_matrix = covariance_of_ecdf_vectors(&ecdf_list)?;
        let condition_number = config
            .check_condition
            .then(|| check_conditioning(&covar_matrix, config.condition_threshold));

        Ok(Self {
            bins,
            ecdf_list,
            mean_vector,
            covar_matrix,
            condition_number,
            warned: AtomicBool::new(false),
        })
    }

    /// Bin thresholds (the "radii")
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// ECDF vector list, shape `(D, M)`
    pub fn ecdf_list(&self) -> &EcdfMatrix {
        &self.ecdf_list
    }

    pub fn mean_vector(&self) -> &DVector<f64> {
        &self.mean_vector
    }

    pub fn covar_matrix(&self) -> &DMatrix<f64> {
        &self.covar_matrix
    }

    /// Condition number computed by the advisory, if it ran
    pub fn condition_number(&self) -> Option<f64> {
        self.condition_number
    }

    /// ECDF dimension `D`
    pub fn dimension(&self) -> usize {
        self.ecdf_list.nrows()
    }

    /// Number of stored ECDF vectors `M`
    pub fn n_vectors(&self) -> usize {
        self.ecdf_list.ncols()
    }

    /// The stored ECDF vectors, one per comparison
    pub fn correlation_vectors(&self) -> Vec<Vec<f64>> {
        self.ecdf_list
            .column_iter()
            .map(|column| column.iter().copied().collect())
            .collect()
    }

    /// Whether the singular-covariance warning has been issued
    pub fn has_warned(&self) -> bool {
        self.warned.load(Ordering::Acquire)
    }

    /// Objective of `vector` against the frozen mean and covariance
    pub fn evaluate_vector(&self, vector: &[f64]) -> Result<f64> {
        evaluate_with_flag(&self.mean_vector, &self.covar_matrix, vector, &self.warned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_covariance_gives_squared_distance() {
        let mean = DVector::from_vec(vec![0.5, 0.5]);
        let covar = DMatrix::identity(2, 2);
        let (score, warned) = evaluate_deviation(&mean, &covar, &[0.2, 0.9], false).unwrap();
        assert_relative_eq!(score, 0.09 + 0.16, epsilon = 1e-12);
        assert!(!warned);
    }

    #[test]
    fn test_diagonal_covariance_scales_components() {
        let mean = DVector::from_vec(vec![1.0, 2.0]);
        let covar = DMatrix::from_diagonal(&DVector::from_vec(vec![4.0, 0.25]));
        let deviation = quadratic_deviation(&mean, &covar, &[3.0, 1.0]).unwrap();
        // 2^2 / 4 + 1^2 / 0.25
        assert_eq!(deviation, Deviation::Mahalanobis(5.0));
    }

    #[test]
    fn test_singular_covariance_falls_back() {
        let mean = DVector::from_vec(vec![0.1, 0.2, 0.3]);
        let covar = DMatrix::zeros(3, 3);
        let (score, warned) = evaluate_deviation(&mean, &covar, &[0.0, 0.0, 0.0], false).unwrap();
        assert_relative_eq!(score, 0.01 + 0.04 + 0.09, epsilon = 1e-12);
        assert!(warned);

        let (again, still_warned) = evaluate_deviation(&mean, &covar, &[0.0, 0.0, 0.0], true).unwrap();
        assert_relative_eq!(again, score);
        assert!(still_warned);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let mean = DVector::from_vec(vec![0.1, 0.2]);
        let covar = DMatrix::identity(2, 2);
        assert!(matches!(
            evaluate_deviation(&mean, &covar, &[0.0], false),
            Err(Error::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
        let wrong_covar = DMatrix::identity(3, 3);
        assert!(quadratic_deviation(&mean, &wrong_covar, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_condition_number() {
        let well = DMatrix::from_diagonal(&DVector::from_vec(vec![2.0, 1.0]));
        assert_relative_eq!(condition_number(&well), 2.0, epsilon = 1e-10);

        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert!(condition_number(&singular) > 1e12);

        assert_eq!(condition_number(&DMatrix::zeros(0, 0)), 1.0);
    }

    #[test]
    fn test_state_warns_once_but_always_falls_back() {
        let ecdf_list = EcdfMatrix::from_element(2, 4, 0.5);
        let state = ObjectiveState::new(vec![1.0, 2.0], ecdf_list, &ObjectiveConfig::default()).unwrap();
        assert!(!state.has_warned());

        let first = state.evaluate_vector(&[0.0, 1.0]).unwrap();
        assert!(state.has_warned());
        let second = state.evaluate_vector(&[0.0, 1.0]).unwrap();
        assert_relative_eq!(first, 0.5);
        assert_relative_eq!(second, 0.5);
        assert!(state.has_warned());
        assert_eq!(state.condition_number(), Some(f64::INFINITY));
    }

    #[test]
    fn test_state_matches_free_evaluation() {
        let singular = EcdfMatrix::from_element(2, 3, 0.25);
        let state = ObjectiveState::new(vec![1.0, 2.0], singular, &ObjectiveConfig::default()).unwrap();
        let (expected, warned) =
            evaluate_deviation(state.mean_vector(), state.covar_matrix(), &[0.75, 0.0], false).unwrap();
        assert!(warned);
        assert_relative_eq!(state.evaluate_vector(&[0.75, 0.0]).unwrap(), expected);
        assert!(state.has_warned());

        let regular = EcdfMatrix::from_row_slice(2, 3, &[0.1, 0.5, 0.3, 0.2, 0.4, 0.9]);
        let state = ObjectiveState::new(vec![1.0, 2.0], regular, &ObjectiveConfig::default()).unwrap();
        let (expected, warned) =
            evaluate_deviation(state.mean_vector(), state.covar_matrix(), &[0.0, 1.0], false).unwrap();
        assert!(!warned);
        assert_relative_eq!(state.evaluate_vector(&[0.0, 1.0]).unwrap(), expected, epsilon = 1e-12);
        assert!(!state.has_warned());
    }

    #[test]
    fn test_state_rejects_row_mismatch() {
        let ecdf_list = EcdfMatrix::from_element(3, 4, 0.5);
        let err = ObjectiveState::new(vec![1.0, 2.0], ecdf_list, &ObjectiveConfig::default()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_condition_check_can_be_disabled() {
        let ecdf_list = EcdfMatrix::from_row_slice(1, 3, &[0.1, 0.2, 0.6]);
        let config = ObjectiveConfig::new().without_condition_check().with_seed(3);
        let state = ObjectiveState::new(vec![1.0], ecdf_list, &config).unwrap();
        assert_eq!(state.condition_number(), None);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_correlation_vectors_are_columns() {
        let ecdf_list = EcdfMatrix::from_row_slice(2, 3, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.9]);
        let state = ObjectiveState::new(vec![1.0, 2.0], ecdf_list, &ObjectiveConfig::default()).unwrap();
        assert_eq!(
            state.correlation_vectors(),
            vec![vec![0.1, 0.4], vec![0.2, 0.5], vec![0.3, 0.9]]
        );
        assert_eq!(state.dimension(), 2);
        assert_eq!(state.n_vectors(), 3);
    }
}
