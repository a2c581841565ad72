//! ECDF-based quasi-likelihood objectives
//!
//! Re-exports the workspace crates:
//!
//! - [`ecdf_core`]: distance matrices, ECDF vectors, moments and the
//!   quadratic objective
//! - [`ecdf_objective`]: standard, bootstrap and multiple estimators plus
//!   their diagnostics

pub use ecdf_core;
pub use ecdf_objective;

pub use ecdf_core::{
    absolute_difference, covariance_of_ecdf_vectors, distance_matrix, ecdf_vector, ecdf_vector_list,
    ecdf_vector_list_bootstrap, euclidean, mean_of_ecdf_vectors, DistanceFn, DistanceValue, EcdfMatrix, Error,
    ObjectiveConfig, Result, SubsetPartition,
};
pub use ecdf_objective::{
    BootstrapEstimator, EcdfEstimator, MultipleEstimator, RebinnableEstimator, StandardEstimator,
};

/// Common imports
pub mod prelude {
    pub use ecdf_core::prelude::*;
    pub use ecdf_objective::{
        choose_bins, BinChoice, BinSelection, BootstrapEstimator, EcdfEstimator, MultipleEstimator,
        RebinnableEstimator, StandardEstimator,
    };
}
