//! Assembly of ECDF vector lists
//!
//! Both assemblers return an [`EcdfMatrix`] of shape `(D, M)`: one row per
//! bin, one column per ECDF vector. Columns are exchangeable samples of the
//! ECDF vector's distribution; their order is fixed only for reproducibility.

use crate::distance::{distance_matrix, distance_matrix_range, DistanceFn, DistanceValue};
use crate::ecdf::ecdf_vector;
use crate::partition::SubsetPartition;
use crate::{EcdfMatrix, Error, Result};
use rand::Rng;
use tracing::{debug, instrument};

/// ECDF vectors for every pair of distinct subsets of a partitioned dataset
///
/// `subset_indices` are validated as a [`SubsetPartition`] of `dataset`
/// first. See [`ecdf_vector_list_for_partition`] for the column layout.
pub fn ecdf_vector_list<E, F>(
    dataset: &[E],
    bins: &[f64],
    distance: &F,
    subset_indices: &[usize],
) -> Result<EcdfMatrix>
where
    F: DistanceFn<E>,
{
    let partition = SubsetPartition::new(subset_indices.to_vec(), dataset.len())?;
    ecdf_vector_list_for_partition(dataset, bins, distance, &partition)
}

/// ECDF vectors for every pair of distinct subsets of an already validated
/// partition
///
/// Pairs are visited as `(1,0), (2,0), (2,1), (3,0), ...` and each yields
/// one column: the ECDF vector of the flattened distance matrix between
/// subset `i` and subset `j`. A subset is never compared with itself. Pairs
/// involving an empty subset produce no column, so a partition of `k`
/// non-empty subsets yields exactly `k(k-1)/2` columns.
#[instrument(skip_all, fields(n = dataset.len(), n_bins = bins.len(), n_subsets = partition.n_subsets()))]
pub fn ecdf_vector_list_for_partition<E, F>(
    dataset: &[E],
    bins: &[f64],
    distance: &F,
    partition: &SubsetPartition,
) -> Result<EcdfMatrix>
where
    F: DistanceFn<E>,
{
    if partition.dataset_len() != dataset.len() {
        return Err(Error::IncompletePartition {
            first: 0,
            last: partition.dataset_len(),
            len: dataset.len(),
        });
    }

    let mut data = Vec::new();
    let mut n_columns = 0;
    for (i, j) in partition.pairs() {
        if partition.subset_len(i) == 0 || partition.subset_len(j) == 0 {
            continue;
        }
        let matrix = distance_matrix_range(dataset, dataset, distance, partition.range(i), partition.range(j))?;
        data.extend(ecdf_vector(&matrix.flatten(), bins)?);
        n_columns += 1;
    }

    debug!("Assembled {} ECDF vectors from subset pairs", n_columns);
    Ok(EcdfMatrix::from_vec(bins.len(), n_columns, data))
}

/// Bootstrapped ECDF vectors of the distances between two datasets
///
/// The full `(A, B)` distance matrix is computed once. Each of the
/// `n_samples` resamples draws `A` row indices and `B` column indices
/// uniformly with replacement and pairs them *positionally*: entry `t` of
/// the resample is `matrix[rows[t], cols[t]]` for `t < min(A, B)`. When
/// `A != B` the surplus indices of the longer draw are discarded. The
/// flattened resample is vectorized into one column.
///
/// # Errors
/// [`Error::InsufficientData`] if either dataset is empty.
#[instrument(skip_all, fields(a = dataset_a.len(), b = dataset_b.len(), n_samples = n_samples))]
pub fn ecdf_vector_list_bootstrap<E, F, R>(
    dataset_a: &[E],
    dataset_b: &[E],
    bins: &[f64],
    distance: &F,
    n_samples: usize,
    rng: &mut R,
) -> Result<EcdfMatrix>
where
    F: DistanceFn<E>,
    R: Rng + ?Sized,
{
    let n_a = dataset_a.len();
    let n_b = dataset_b.len();
    if n_a == 0 || n_b == 0 {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }

    let matrix = distance_matrix(dataset_a, dataset_b, distance);
    let paired = n_a.min(n_b);
    if n_a != n_b {
        debug!("Bootstrap pairs only the first {} of {} x {} resampled indices", paired, n_a, n_b);
    }

    let mut data = Vec::with_capacity(bins.len() * n_samples);
    let mut rows = Vec::with_capacity(n_a);
    let mut cols = Vec::with_capacity(n_b);
    let mut resample = Vec::new();
    for _ in 0..n_samples {
        rows.clear();
        rows.extend((0..n_a).map(|_| rng.gen_range(0..n_a)));
        cols.clear();
        cols.extend((0..n_b).map(|_| rng.gen_range(0..n_b)));

        resample.clear();
        for (&i, &j) in rows.iter().zip(cols.iter()) {
            if let Some(entry) = matrix.get(i, j) {
                entry.flatten_into(&mut resample);
            }
        }
        data.extend(ecdf_vector(&resample, bins)?);
    }

    debug!("Assembled {} bootstrap ECDF vectors", n_samples);
    Ok(EcdfMatrix::from_vec(bins.len(), n_samples, data))
}
