//! Contiguous partitions of a dataset into subsets
//!
//! A partition is stored as its boundary indices `[i0 = 0, i1, ..., ik = n]`;
//! subset `s` covers `i_s..i_{s+1}`. Zero-length subsets are allowed.

use crate::{Error, Result};
use std::ops::Range;

/// Validated boundary indices of a contiguous dataset partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetPartition {
    indices: Vec<usize>,
}

impl SubsetPartition {
    /// Validate `indices` as a partition of a dataset of length `dataset_len`
    ///
    /// # Errors
    /// - [`Error::UnorderedPartition`] if the indices decrease anywhere
    /// - [`Error::IncompletePartition`] if they do not start at 0 and end at
    ///   `dataset_len`
    pub fn new(indices: Vec<usize>, dataset_len: usize) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::configuration("subset indices must not be empty"));
        }
        if indices.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::UnorderedPartition(indices));
        }

        let first = indices[0];
        let last = indices[indices.len() - 1];
        if first != 0 || last != dataset_len {
            return Err(Error::IncompletePartition {
                first,
                last,
                len: dataset_len,
            });
        }

        Ok(Self { indices })
    }

    /// Partition from consecutive subset sizes (cumulative sums)
    ///
    /// ```rust
    /// use ecdf_core::SubsetPartition;
    ///
    /// let p = SubsetPartition::from_sizes(&[2, 3, 1]);
    /// assert_eq!(p.indices(), &[0, 2, 5, 6]);
    /// ```
    pub fn from_sizes(sizes: &[usize]) -> Self {
        let mut indices = Vec::with_capacity(sizes.len() + 1);
        let mut total = 0;
        indices.push(total);
        for &size in sizes {
            total += size;
            indices.push(total);
        }
        Self { indices }
    }

    /// Boundary indices
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of subsets `k`
    pub fn n_subsets(&self) -> usize {
        self.indices.len() - 1
    }

    /// Length of the partitioned dataset
    pub fn dataset_len(&self) -> usize {
        self.indices[self.indices.len() - 1]
    }

    /// Index range of subset `s`
    ///
    /// # Panics
    /// If `s >= n_subsets()`.
    pub fn range(&self, s: usize) -> Range<usize> {
        self.indices[s]..self.indices[s + 1]
    }

    /// Number of elements in subset `s`
    pub fn subset_len(&self, s: usize) -> usize {
        self.indices[s + 1] - self.indices[s]
    }

    /// Iterator over all subset ranges in order
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.indices.windows(2).map(|w| w[0]..w[1])
    }

    /// Sorted distinct subset sizes
    pub fn distinct_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.indices.windows(2).map(|w| w[1] - w[0]).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Unordered subset pairs `(i, j)` with `j < i`
    ///
    /// Enumerated as `(1,0), (2,0), (2,1), (3,0), ...`: outer index
    /// ascending, inner index from 0 to `i - 1`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let k = self.n_subsets();
        (0..k).flat_map(|i| (0..i).map(move |j| (i, j)))
    }
}
