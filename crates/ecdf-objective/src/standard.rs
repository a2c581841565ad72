//! Objective from pairwise comparisons of dataset subsets
//!
//! The reference dataset is cut into contiguous subsets. Every unordered
//! pair of distinct subsets contributes one ECDF vector; a candidate dataset
//! is compared against one randomly picked subset.

use crate::traits::{EcdfEstimator, EstimatorRng, RebinnableEstimator};
use ecdf_core::{
    distance_matrix_range, ecdf_vector, ecdf_vector_list_for_partition, DistanceFn, Error,
    ObjectiveConfig, ObjectiveState, Result, SubsetPartition,
};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, instrument};

/// Maximum number of distinct subset sizes in a partition
pub const MAX_DISTINCT_SUBSET_SIZES: usize = 2;

/// Subset-pair ECDF objective
pub struct StandardEstimator<E, F> {
    dataset: Vec<E>,
    distance: F,
    partition: SubsetPartition,
    compare_all: bool,
    config: ObjectiveConfig,
    state: ObjectiveState,
    rng: EstimatorRng,
}

impl<E, F> StandardEstimator<E, F>
where
    F: DistanceFn<E>,
{
    /// Estimator with default configuration, comparing against any subset
    pub fn new(dataset: Vec<E>, bins: Vec<f64>, distance: F, subset_sizes: &[usize]) -> Result<Self> {
        StandardEstimatorBuilder::new(dataset, distance)
            .bins(bins)
            .subset_sizes(subset_sizes.to_vec())
            .build()
    }

    pub fn builder(dataset: Vec<E>, distance: F) -> StandardEstimatorBuilder<E, F> {
        StandardEstimatorBuilder::new(dataset, distance)
    }

    pub fn dataset(&self) -> &[E] {
        &self.dataset
    }

    pub fn partition(&self) -> &SubsetPartition {
        &self.partition
    }

    pub fn compare_all(&self) -> bool {
        self.compare_all
    }

    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    /// Subsets a candidate of length `candidate_len` may be compared with
    ///
    /// Empty subsets never qualify. Without `compare_all`, subsets whose size
    /// equals the candidate length are excluded too.
    pub fn eligible_subsets(&self, candidate_len: usize) -> Vec<usize> {
        (0..self.partition.n_subsets())
            .filter(|&s| {
                let len = self.partition.subset_len(s);
                len > 0 && (self.compare_all || len != candidate_len)
            })
            .collect()
    }

    /// ECDF vector of a candidate dataset against a given stored subset
    pub fn ecdf_vector_against_subset(&self, dataset: &[E], subset: usize) -> Result<Vec<f64>> {
        if subset >= self.partition.n_subsets() {
            return Err(Error::InvalidInput(format!(
                "subset {} does not exist, the partition has {} subsets",
                subset,
                self.partition.n_subsets()
            )));
        }

        let matrix = distance_matrix_range(
            &self.dataset,
            dataset,
            &self.distance,
            self.partition.range(subset),
            0..dataset.len(),
        )?;
        ecdf_vector(&matrix.flatten(), self.state.bins())
    }
}

impl<E, F> EcdfEstimator<E> for StandardEstimator<E, F>
where
    F: DistanceFn<E>,
{
    fn name(&self) -> &str {
        "standard"
    }

    fn state(&self) -> &ObjectiveState {
        &self.state
    }

    fn ecdf_vector_with_rng(&self, dataset: &[E], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        if dataset.is_empty() {
            return Err(Error::InvalidInput("candidate dataset is empty".to_string()));
        }

        let eligible = self.eligible_subsets(dataset.len());
        let subset = *eligible.choose(rng).ok_or_else(|| {
            Error::InvalidInput(format!(
                "no stored subset differs in size from the candidate of length {}",
                dataset.len()
            ))
        })?;
        self.ecdf_vector_against_subset(dataset, subset)
    }

    fn ecdf_vector(&self, dataset: &[E]) -> Result<Vec<f64>> {
        self.rng.with(|rng| self.ecdf_vector_with_rng(dataset, rng))
    }
}

impl<E, F> RebinnableEstimator<E> for StandardEstimator<E, F>
where
    F: DistanceFn<E>,
{
    fn rebin(&mut self, bins: Vec<f64>) -> Result<()> {
        self.state = subset_pair_state(&self.dataset, bins, &self.distance, &self.partition, &self.config)?;
        Ok(())
    }
}

fn subset_pair_state<E, F>(
    dataset: &[E],
    bins: Vec<f64>,
    distance: &F,
    partition: &SubsetPartition,
    config: &ObjectiveConfig,
) -> Result<ObjectiveState>
where
    F: DistanceFn<E>,
{
    if bins.is_empty() {
        return Err(Error::configuration("bins must not be empty"));
    }
    let ecdf_list = ecdf_vector_list_for_partition(dataset, &bins, distance, partition)?;
    ObjectiveState::new(bins, ecdf_list, config)
}

/// Builder for [`StandardEstimator`]
pub struct StandardEstimatorBuilder<E, F> {
    dataset: Vec<E>,
    distance: F,
    bins: Vec<f64>,
    subset_sizes: Vec<usize>,
    compare_all: bool,
    config: ObjectiveConfig,
}

impl<E, F> StandardEstimatorBuilder<E, F>
where
    F: DistanceFn<E>,
{
    pub fn new(dataset: Vec<E>, distance: F) -> Self {
        Self {
            dataset,
            distance,
            bins: Vec::new(),
            subset_sizes: Vec::new(),
            compare_all: true,
            config: ObjectiveConfig::default(),
        }
    }

    /// Bin thresholds of the ECDF vectors
    pub fn bins(mut self, bins: Vec<f64>) -> Self {
        self.bins = bins;
        self
    }

    /// Sizes of the consecutive subsets; must sum to the dataset length
    pub fn subset_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.subset_sizes = sizes;
        self
    }

    /// Whether candidates may be compared with subsets of their own size
    pub fn compare_all(mut self, compare_all: bool) -> Self {
        self.compare_all = compare_all;
        self
    }

    pub fn config(mut self, config: ObjectiveConfig) -> Self {
        self.config = config;
        self
    }

    /// Set random seed for reproducibility
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate the partition and freeze the subset-pair statistics
    ///
    /// # Errors
    /// - [`Error::Configuration`] for empty bins, no subsets or more than
    ///   two distinct subset sizes
    /// - [`Error::IncompletePartition`] if the sizes do not sum to the
    ///   dataset length
    /// - [`Error::InsufficientData`] if fewer than two subset pairs exist
    #[instrument(skip_all, fields(n = self.dataset.len(), n_subsets = self.subset_sizes.len()))]
    pub fn build(self) -> Result<StandardEstimator<E, F>> {
        if self.subset_sizes.is_empty() {
            return Err(Error::configuration("at least one subset size is required"));
        }

        let mut distinct = self.subset_sizes.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() > MAX_DISTINCT_SUBSET_SIZES {
            return Err(Error::configuration(format!(
                "at most {} distinct subset sizes are permitted, got {:?}",
                MAX_DISTINCT_SUBSET_SIZES, distinct
            )));
        }

        let partition = SubsetPartition::new(
            SubsetPartition::from_sizes(&self.subset_sizes).indices().to_vec(),
            self.dataset.len(),
        )?;
        let state = subset_pair_state(&self.dataset, self.bins, &self.distance, &partition, &self.config)?;
        debug!(
            "Standard estimator over {} subsets with {} ECDF vectors",
            partition.n_subsets(),
            state.n_vectors()
        );

        Ok(StandardEstimator {
            dataset: self.dataset,
            distance: self.distance,
            partition,
            compare_all: self.compare_all,
            rng: EstimatorRng::new(&self.config),
            config: self.config,
            state,
        })
    }
}
