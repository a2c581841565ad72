//! Objective from bootstrap resamples of a two-set distance matrix
//!
//! The reference dataset is split into set A (`dataset[..n_a]`) and set B
//! (`dataset[n_a..]`). The ECDF list is drawn by resampling the rows and
//! columns of the full A x B distance matrix. A candidate is compared by
//! resampling `n_b` of its elements against all of set A.

use crate::traits::{EcdfEstimator, EstimatorRng, RebinnableEstimator};
use ecdf_core::{
    ecdf_vector, ecdf_vector_list_bootstrap, DistanceFn, DistanceValue, EcdfMatrix, Error, ObjectiveConfig,
    ObjectiveState, Result,
};
use rand::{Rng, RngCore};
use tracing::{debug, instrument};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;

/// Bootstrap ECDF objective
pub struct BootstrapEstimator<E, F> {
    dataset: Vec<E>,
    distance: F,
    n_elements_a: usize,
    n_samples: usize,
    config: ObjectiveConfig,
    state: ObjectiveState,
    rng: EstimatorRng,
}

impl<E, F> BootstrapEstimator<E, F>
where
    F: DistanceFn<E>,
{
    /// Estimator with [`DEFAULT_BOOTSTRAP_SAMPLES`] resamples
    pub fn new(dataset: Vec<E>, bins: Vec<f64>, distance: F, n_elements_a: usize, n_elements_b: usize) -> Result<Self> {
        BootstrapEstimatorBuilder::new(dataset, distance)
            .bins(bins)
            .n_elements(n_elements_a, n_elements_b)
            .build()
    }

    pub fn builder(dataset: Vec<E>, distance: F) -> BootstrapEstimatorBuilder<E, F> {
        BootstrapEstimatorBuilder::new(dataset, distance)
    }

    /// Set A of the reference dataset
    pub fn dataset_a(&self) -> &[E] {
        &self.dataset[..self.n_elements_a]
    }

    /// Set B of the reference dataset
    pub fn dataset_b(&self) -> &[E] {
        &self.dataset[self.n_elements_a..]
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    fn resampled_list(&self, bins: &[f64], rng: &mut dyn RngCore) -> Result<EcdfMatrix> {
        ecdf_vector_list_bootstrap(self.dataset_a(), self.dataset_b(), bins, &self.distance, self.n_samples, rng)
    }
}

impl<E, F> EcdfEstimator<E> for BootstrapEstimator<E, F>
where
    F: DistanceFn<E>,
{
    fn name(&self) -> &str {
        "bootstrap"
    }

    fn state(&self) -> &ObjectiveState {
        &self.state
    }

    fn ecdf_vector_with_rng(&self, dataset: &[E], rng: &mut dyn RngCore) -> Result<Vec<f64>> {
        if dataset.is_empty() {
            return Err(Error::InvalidInput("candidate dataset is empty".to_string()));
        }

        let n_b = self.dataset.len() - self.n_elements_a;
        let picks: Vec<usize> = (0..n_b).map(|_| rng.gen_range(0..dataset.len())).collect();

        let mut distances = Vec::with_capacity(self.n_elements_a * n_b);
        for a in self.dataset_a() {
            for &j in &picks {
                self.distance.distance(a, &dataset[j]).flatten_into(&mut distances);
            }
        }
        ecdf_vector(&distances, self.state.bins())
    }

    fn ecdf_vector(&self, dataset: &[E]) -> Result<Vec<f64>> {
        self.rng.with(|rng| self.ecdf_vector_with_rng(dataset, rng))
    }
}

impl<E, F> RebinnableEstimator<E> for BootstrapEstimator<E, F>
where
    F: DistanceFn<E>,
{
    /// Redraws the resamples from the estimator's generator
    fn rebin(&mut self, bins: Vec<f64>) -> Result<()> {
        if bins.is_empty() {
            return Err(Error::configuration("bins must not be empty"));
        }
        let ecdf_list = self.rng.with(|rng| self.resampled_list(&bins, rng))?;
        self.state = ObjectiveState::new(bins, ecdf_list, &self.config)?;
        Ok(())
    }
}

/// Builder for [`BootstrapEstimator`]
pub struct BootstrapEstimatorBuilder<E, F> {
    dataset: Vec<E>,
    distance: F,
    bins: Vec<f64>,
    n_elements: Option<(usize, usize)>,
    n_samples: usize,
    config: ObjectiveConfig,
}

impl<E, F> BootstrapEstimatorBuilder<E, F>
where
    F: DistanceFn<E>,
{
    pub fn new(dataset: Vec<E>, distance: F) -> Self {
        Self {
            dataset,
            distance,
            bins: Vec::new(),
            n_elements: None,
            n_samples: DEFAULT_BOOTSTRAP_SAMPLES,
            config: ObjectiveConfig::default(),
        }
    }

    pub fn bins(mut self, bins: Vec<f64>) -> Self {
        self.bins = bins;
        self
    }

    /// Sizes of set A and set B; they must sum to the dataset length
    ///
    /// Without this call the dataset is split in two halves, set B taking
    /// the extra element of an odd length.
    pub fn n_elements(mut self, n_elements_a: usize, n_elements_b: usize) -> Self {
        self.n_elements = Some((n_elements_a, n_elements_b));
        self
    }

    /// Number of bootstrap resamples (the number of stored ECDF vectors)
    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
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

    /// Draw the bootstrap resamples and freeze their statistics
    ///
    /// # Errors
    /// [`Error::Configuration`] for empty bins, an empty set, set sizes not
    /// summing to the dataset length or fewer than two resamples.
    #[instrument(skip_all, fields(n = self.dataset.len(), n_samples = self.n_samples))]
    pub fn build(self) -> Result<BootstrapEstimator<E, F>> {
        let len = self.dataset.len();
        let (n_a, n_b) = self.n_elements.unwrap_or((len / 2, len - len / 2));

        if self.bins.is_empty() {
            return Err(Error::configuration("bins must not be empty"));
        }
        if n_a == 0 || n_b == 0 {
            return Err(Error::configuration(format!(
                "both bootstrap sets must be non-empty, got {} and {}",
                n_a, n_b
            )));
        }
        if n_a + n_b != len {
            return Err(Error::configuration(format!(
                "bootstrap set sizes {} + {} do not match the dataset length {}",
                n_a, n_b, len
            )));
        }
        if self.n_samples < 2 {
            return Err(Error::configuration(format!(
                "at least 2 bootstrap samples are required, got {}",
                self.n_samples
            )));
        }

        let mut rng = self.config.rng();
        let ecdf_list = ecdf_vector_list_bootstrap(
            &self.dataset[..n_a],
            &self.dataset[n_a..],
            &self.bins,
            &self.distance,
            self.n_samples,
            &mut rng,
        )?;
        let state = ObjectiveState::new(self.bins, ecdf_list, &self.config)?;
        debug!("Bootstrap estimator over {} x {} elements", n_a, n_b);

        Ok(BootstrapEstimator {
            dataset: self.dataset,
            distance: self.distance,
            n_elements_a: n_a,
            n_samples: self.n_samples,
            config: self.config,
            state,
            rng: EstimatorRng::from_rng(rng),
        })
    }
}
