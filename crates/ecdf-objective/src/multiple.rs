//! Stacked objective over several estimators
//!
//! Member ECDF lists are stacked row-wise so column `m` of the combined list
//! joins column `m` of every member. The combined mean and covariance are
//! computed over the stacked list; a candidate's ECDF vector is the
//! concatenation of the members' vectors.

use crate::traits::EcdfEstimator;
use ecdf_core::{EcdfMatrix, Error, ObjectiveConfig, ObjectiveState, Result};
use rand::RngCore;
use tracing::{debug, instrument};

/// Estimator combining the ECDF vectors of several members
pub struct MultipleEstimator<E> {
    members: Vec<Box<dyn EcdfEstimator<E>>>,
    state: ObjectiveState,
}

impl<E> MultipleEstimator<E> {
    /// Combine `members` with the default configuration
    pub fn new(members: Vec<Box<dyn EcdfEstimator<E>>>) -> Result<Self> {
        Self::with_config(members, &ObjectiveConfig::default())
    }

    /// Combine `members`
    ///
    /// # Errors
    /// - [`Error::Configuration`] for an empty member list
    /// - [`Error::ShapeMismatch`] if members disagree on the ECDF dimension
    ///   or on the number of stored ECDF vectors
    #[instrument(skip_all, fields(n_members = members.len()))]
    pub fn with_config(members: Vec<Box<dyn EcdfEstimator<E>>>, config: &ObjectiveConfig) -> Result<Self> {
        let first = members
            .first()
            .ok_or_else(|| Error::configuration("at least one estimator is required"))?;
        let (dimension, n_vectors) = first.ecdf_matrix().shape();

        for (index, member) in members.iter().enumerate().skip(1) {
            let (d, m) = member.ecdf_matrix().shape();
            if d != dimension {
                return Err(Error::size_mismatch(
                    dimension,
                    d,
                    &format!("ECDF dimension of estimator {}", index),
                ));
            }
            if m != n_vectors {
                return Err(Error::size_mismatch(
                    n_vectors,
                    m,
                    &format!("number of ECDF vectors of estimator {}", index),
                ));
            }
        }

        let stacked = stack_rows(members.iter().map(|member| member.ecdf_matrix()), n_vectors);
        let bins: Vec<f64> = members.iter().flat_map(|member| member.bins().iter().copied()).collect();
        let state = ObjectiveState::new(bins, stacked, config)?;
        debug!("Stacked {} estimators into a {}-dimensional objective", members.len(), state.dimension());

        Ok(Self { members, state })
    }

    pub fn members(&self) -> &[Box<dyn EcdfEstimator<E>>] {
        &self.members
    }

    pub fn n_members(&self) -> usize {
        self.members.len()
    }
}

fn stack_rows<'a>(matrices: impl Iterator<Item = &'a EcdfMatrix> + Clone, n_cols: usize) -> EcdfMatrix {
    let n_rows: usize = matrices.clone().map(|m| m.nrows()).sum();
    let mut stacked = EcdfMatrix::zeros(n_rows, n_cols);
    let mut offset = 0;
    for matrix in matrices {
        stacked.rows_mut(offset, matrix.nrows()).copy_from(matrix);
        offset += matrix.nrows();
    }
    stacked
}

impl<E> EcdfEstimator<E> for MultipleEstimator<E> {
    fn name(&self) -> &str {
        "multiple"
    }

    fn state(&self) -> &ObjectiveState {
        &self.state
    }

    fn ecdf_vector_with_rng(&self, dataset: &[E], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        let mut vector = Vec::with_capacity(self.state.dimension());
        for member in &self.members {
            vector.extend(member.ecdf_vector_with_rng(dataset, rng)?);
        }
        Ok(vector)
    }

    /// Each member draws from its own generator
    fn ecdf_vector(&self, dataset: &[E]) -> Result<Vec<f64>> {
        let mut vector = Vec::with_capacity(self.state.dimension());
        for member in &self.members {
            vector.extend(member.ecdf_vector(dataset)?);
        }
        Ok(vector)
    }
}
