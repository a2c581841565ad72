//! Mean vector and covariance matrix of an ECDF vector list
//!
//! Rows of the [`EcdfMatrix`] are variables (bins), columns are samples.

use crate::{EcdfMatrix, Error, Result};
use nalgebra::{DMatrix, DVector};

/// Row-wise arithmetic mean of an ECDF matrix
///
/// # Errors
/// [`Error::InsufficientData`] when the matrix has no columns.
pub fn mean_of_ecdf_vectors(ecdf_list: &EcdfMatrix) -> Result<DVector<f64>> {
    let m = ecdf_list.ncols();
    if m == 0 {
        return Err(Error::InsufficientData { expected: 1, actual: 0 });
    }

    let n = m as f64;
    Ok(DVector::from_fn(ecdf_list.nrows(), |i, _| {
        ecdf_list.row(i).iter().sum::<f64>() / n
    }))
}

/// Unbiased sample covariance (divisor `M - 1`) of an ECDF matrix
///
/// The result is `D x D` and exactly symmetric.
///
/// # Errors
/// [`Error::InsufficientData`] when the matrix has fewer than two columns.
pub fn covariance_of_ecdf_vectors(ecdf_list: &EcdfMatrix) -> Result<DMatrix<f64>> {
    let m = ecdf_list.ncols();
    if m < 2 {
        return Err(Error::InsufficientData { expected: 2, actual: m });
    }

    let mean = mean_of_ecdf_vectors(ecdf_list)?;
    let d = ecdf_list.nrows();
    let mut centered = ecdf_list.clone();
    for j in 0..m {
        for i in 0..d {
            centered[(i, j)] -= mean[i];
        }
    }

    let divisor = (m - 1) as f64;
    let mut covar = DMatrix::zeros(d, d);
    for r in 0..d {
        for s in r..d {
            let value = centered.row(r).dot(&centered.row(s)) / divisor;
            covar[(r, s)] = value;
            covar[(s, r)] = value;
        }
    }
    Ok(covar)
}
