//! Error types for ECDF objective computations
//!
//! Provides a unified error type for all ecdf-stats crates. Configuration
//! problems are fatal and surface immediately; a singular covariance matrix
//! is *not* an error and never shows up here.

use thiserror::Error;

/// Core error type for ECDF objective operations
#[derive(Error, Debug)]
pub enum Error {
    /// A distance-matrix index range is reversed or exceeds its dataset
    #[error("Invalid range: [{start}, {end}) over a dataset of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Subset indices are not non-decreasing
    #[error("Subset indices are out of order: {0:?}")]
    UnorderedPartition(Vec<usize>),

    /// Subset indices do not start at zero or do not end at the dataset length
    #[error(
        "Not all elements of the dataset are distributed into subsets: \
         indices run from {first} to {last}, dataset length is {len}"
    )]
    IncompletePartition { first: usize, last: usize, len: usize },

    /// Estimator configuration rejected at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two arrays that must agree in shape do not
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// An ECDF vector was requested for an empty list of distances
    #[error("Cannot build an ECDF vector from an empty distance list")]
    EmptyDistanceList,

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid runtime input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation failed
    #[error("Computation error: {0}")]
    Computation(String),

    /// IO error (diagnostic dumps)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an error for a size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::ShapeMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Whether this error belongs to the fatal configuration family
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnorderedPartition(_)
                | Self::IncompletePartition { .. }
                | Self::Configuration(_)
                | Self::ShapeMismatch { .. }
        )
    }
}
