//! ECDF objective functions for likelihood-free inference
//!
//! This crate packages the ECDF engine of `ecdf-core` into estimators that
//! score candidate datasets against a reference dataset:
//!
//! - **Standard**: the reference is cut into subsets, every subset pair
//!   contributes one ECDF vector
//! - **Bootstrap**: ECDF vectors are bootstrap resamples of the distances
//!   between two reference sets
//! - **Multiple**: several estimators stacked into one objective
//!
//! The score of a candidate is the quadratic deviation of its ECDF vector
//! from the reference mean under the inverse reference covariance. Lower is
//! better; an outer fitter minimises it.
//!
//! # Example
//!
//! ```rust
//! use ecdf_objective::{absolute_difference, EcdfEstimator, StandardEstimator};
//!
//! let reference: Vec<f64> = (0..40).map(|i| ((i * 17) % 40) as f64 / 4.0).collect();
//! let estimator = StandardEstimator::builder(reference, absolute_difference)
//!     .bins(vec![1.0, 2.5, 5.0])
//!     .subset_sizes(vec![8; 5])
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(estimator.n_ecdf_vectors(), 10);
//! let score = estimator.evaluate(&[0.5, 3.0, 7.5, 9.0]).unwrap();
//! assert!(score.is_finite());
//! ```

pub mod bins;
pub mod bootstrap;
pub mod diagnostics;
pub mod goodness_of_fit;
pub mod multiple;
pub mod standard;
mod traits;
pub mod visualization;

// Re-exports
pub use bins::{choose_bins, select_bin_indices, BinChoice, BinSelection, DEFAULT_BIN_COUNT};
pub use bootstrap::{BootstrapEstimator, BootstrapEstimatorBuilder, DEFAULT_BOOTSTRAP_SAMPLES};
pub use diagnostics::{dump_diagnostics, write_matrix, write_vector};
pub use goodness_of_fit::{chi2_goodness_of_fit, ChiSquareFit, ScoreHistogram, DEFAULT_HISTOGRAM_BINS};
pub use multiple::MultipleEstimator;
pub use standard::{StandardEstimator, StandardEstimatorBuilder, MAX_DISTINCT_SUBSET_SIZES};
pub use traits::{EcdfEstimator, RebinnableEstimator};
pub use visualization::{visualize, EcdfVisualizer, NullEcdfVisualizer};

pub use ecdf_core::{
    absolute_difference, euclidean, DistanceFn, DistanceValue, EcdfMatrix, Error, ObjectiveConfig, Result,
    DEFAULT_CONDITION_THRESHOLD,
};
