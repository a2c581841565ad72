//! Core building blocks of the ECDF quasi-likelihood objective
//!
//! The objective compares a candidate dataset to a fixed reference by way of
//! empirical cumulative distributions of pairwise distances:
//!
//! 1. [`distance`]: pairwise distance matrices under a user-supplied metric
//! 2. [`ecdf`]: conversion of a distance list into an ECDF vector over bins
//! 3. [`assembly`]: lists of ECDF vectors from subset pairs or bootstrap draws
//! 4. [`moments`]: mean vector and covariance matrix of those lists
//! 5. [`objective`]: the quadratic form `Δᵗ Σ⁻¹ Δ` with its singular fallback
//!
//! Estimator variants built on top of these live in `ecdf-objective`.
//!
//! # Example
//!
//! ```rust
//! use ecdf_core::{absolute_difference, ecdf_vector_list, mean_of_ecdf_vectors};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let bins = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let list = ecdf_vector_list(&data, &bins, &absolute_difference, &[0, 3, 6]).unwrap();
//!
//! assert_eq!(list.shape(), (5, 1));
//! let mean = mean_of_ecdf_vectors(&list).unwrap();
//! assert!((mean[2] - 1.0 / 3.0).abs() < 1e-12);
//! ```

pub mod assembly;
pub mod distance;
pub mod ecdf;
pub mod error;
pub mod moments;
pub mod objective;
pub mod partition;

/// ECDF vector list: one row per bin, one column per ECDF vector
pub type EcdfMatrix = nalgebra::DMatrix<f64>;

pub use assembly::{ecdf_vector_list, ecdf_vector_list_bootstrap, ecdf_vector_list_for_partition};
pub use distance::{
    absolute_difference, distance_matrix, distance_matrix_range, euclidean, DistanceFn, DistanceMatrix,
    DistanceValue,
};
pub use ecdf::ecdf_vector;
pub use error::{Error, Result};
pub use moments::{covariance_of_ecdf_vectors, mean_of_ecdf_vectors};
pub use objective::{
    check_conditioning, condition_number, evaluate_deviation, quadratic_deviation, Deviation, ObjectiveConfig,
    ObjectiveState, DEFAULT_CONDITION_THRESHOLD,
};
pub use partition::SubsetPartition;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        absolute_difference, ecdf_vector, ecdf_vector_list, ecdf_vector_list_bootstrap, euclidean, DistanceFn,
        DistanceValue, EcdfMatrix, Error, ObjectiveConfig, ObjectiveState, Result, SubsetPartition,
    };
}
