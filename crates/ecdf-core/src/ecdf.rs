//! Empirical cumulative distribution vectors

use crate::{Error, Result};

/// Empirical cumulative frequencies of `distances` at the `bins` thresholds
///
/// Entry `d` of the result is the fraction of distances *strictly* less than
/// `bins[d]`. The comparison is `<`, never `<=`. NaN distances count as not
/// below any threshold.
///
/// # Errors
/// [`Error::EmptyDistanceList`] when `distances` is empty.
///
/// ```rust
/// use ecdf_core::ecdf_vector;
///
/// let v = ecdf_vector(&[0.5, 1.0, 1.5, 3.0], &[1.0, 2.0, 4.0]).unwrap();
/// assert_eq!(v, vec![0.25, 0.75, 1.0]);
/// ```
pub fn ecdf_vector(distances: &[f64], bins: &[f64]) -> Result<Vec<f64>> {
    if distances.is_empty() {
        return Err(Error::EmptyDistanceList);
    }

    let n = distances.len() as f64;
    Ok(bins
        .iter()
        .map(|&bin| distances.iter().filter(|&&d| d < bin).count() as f64 / n)
        .collect())
}
