//! Generalized distances between dataset elements
//!
//! The distance function is an opaque, caller-supplied capability. It may
//! return a plain scalar or any nesting of sequences of scalars (a
//! "vector-valued distance"); [`DistanceValue`] defines how such outputs are
//! depth-flattened into a single list of reals before vectorization.

use crate::{Error, Result};
use std::ops::Range;

/// Output of a distance function that can be depth-flattened to reals
///
/// Scalars contribute one value. Sequences contribute the flattened values
/// of their elements in order, to arbitrary depth.
pub trait DistanceValue {
    /// Append all scalar components of `self` to `out`, depth-first
    fn flatten_into(&self, out: &mut Vec<f64>);

    /// Collect all scalar components of `self`
    fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

macro_rules! impl_scalar_distance_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl DistanceValue for $t {
                #[inline]
                fn flatten_into(&self, out: &mut Vec<f64>) {
                    out.push(*self as f64);
                }
            }
        )*
    };
}

impl_scalar_distance_value!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: DistanceValue> DistanceValue for [T] {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        for value in self {
            value.flatten_into(out);
        }
    }
}

impl<T: DistanceValue> DistanceValue for Vec<T> {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        self.as_slice().flatten_into(out);
    }
}

impl<T: DistanceValue, const N: usize> DistanceValue for [T; N] {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        self.as_slice().flatten_into(out);
    }
}

impl<T: DistanceValue + ?Sized> DistanceValue for &T {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        (**self).flatten_into(out);
    }
}

impl<T: DistanceValue + ?Sized> DistanceValue for Box<T> {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        (**self).flatten_into(out);
    }
}

/// A generalized distance between two dataset elements
///
/// Invoked as `distance(a_i, b_j)`; the core never assumes symmetry. Any
/// `Fn(&E, &E) -> R` with `R: DistanceValue` implements this trait.
///
/// ```rust
/// use ecdf_core::{DistanceFn, DistanceValue};
///
/// let abs = |a: &f64, b: &f64| (a - b).abs();
/// assert_eq!(abs.distance(&1.0_f64, &4.0), 3.0);
///
/// let both = |a: &f64, b: &f64| vec![(a - b).abs(), (a - b).powi(2)];
/// assert_eq!(both.distance(&1.0_f64, &3.0).flatten(), vec![2.0, 4.0]);
/// ```
pub trait DistanceFn<E: ?Sized> {
    /// Scalar or nested-sequence output
    type Output: DistanceValue;

    /// Compute the distance between `a` and `b`
    fn distance(&self, a: &E, b: &E) -> Self::Output;
}

impl<E, F, R> DistanceFn<E> for F
where
    E: ?Sized,
    F: Fn(&E, &E) -> R,
    R: DistanceValue,
{
    type Output = R;

    #[inline]
    fn distance(&self, a: &E, b: &E) -> R {
        self(a, b)
    }
}

/// Absolute difference of two scalars
pub fn absolute_difference(a: &f64, b: &f64) -> f64 {
    (a - b).abs()
}

/// Euclidean distance of two equally long points
///
/// Trailing coordinates of the longer point are ignored.
pub fn euclidean(a: &Vec<f64>, b: &Vec<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Row-major matrix of generalized distances
///
/// Entry `(i, j)` holds `distance(a[start_a + i], b[start_b + j])`. Entries
/// keep the distance function's output type; flattening happens on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<R> {
    nrows: usize,
    ncols: usize,
    entries: Vec<R>,
}

impl<R> DistanceMatrix<R> {
    /// Build a matrix by evaluating `f(i, j)` for every entry, row by row
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> R) -> Self {
        let mut entries = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                entries.push(f(i, j));
            }
        }
        Self { nrows, ncols, entries }
    }

    /// Number of rows (elements taken from the first dataset)
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (elements taken from the second dataset)
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `(i, j)`, if in bounds
    pub fn get(&self, i: usize, j: usize) -> Option<&R> {
        if i < self.nrows && j < self.ncols {
            self.entries.get(i * self.ncols + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[R] {
        &self.entries[i * self.ncols..(i + 1) * self.ncols]
    }

    /// All entries in row-major order
    pub fn entries(&self) -> &[R] {
        &self.entries
    }
}

impl<R: DistanceValue> DistanceMatrix<R> {
    /// Depth-flatten the whole matrix into one list of reals, row-major
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.entries.len());
        self.entries.as_slice().flatten_into(&mut out);
        out
    }
}

/// Distance matrix between all elements of `dataset_a` and `dataset_b`
pub fn distance_matrix<E, F>(dataset_a: &[E], dataset_b: &[E], distance: &F) -> DistanceMatrix<F::Output>
where
    F: DistanceFn<E>,
{
    DistanceMatrix::from_fn(dataset_a.len(), dataset_b.len(), |i, j| {
        distance.distance(&dataset_a[i], &dataset_b[j])
    })
}

/// Distance matrix between index ranges of two datasets
///
/// Fails with [`Error::InvalidRange`] when a range is reversed or extends
/// past the end of its dataset. Empty ranges yield an empty matrix.
pub fn distance_matrix_range<E, F>(
    dataset_a: &[E],
    dataset_b: &[E],
    distance: &F,
    range_a: Range<usize>,
    range_b: Range<usize>,
) -> Result<DistanceMatrix<F::Output>>
where
    F: DistanceFn<E>,
{
    check_range(&range_a, dataset_a.len())?;
    check_range(&range_b, dataset_b.len())?;

    let sub_a = &dataset_a[range_a];
    let sub_b = &dataset_b[range_b];
    Ok(distance_matrix(sub_a, sub_b, distance))
}

fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end || range.end > len {
        return Err(Error::InvalidRange {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_entries_follow_ranges() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![10.0, 20.0, 30.0];
        let m = distance_matrix_range(&a, &b, &absolute_difference, 1..3, 0..2).unwrap();

        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(0, 0), Some(&8.0));
        assert_eq!(m.get(0, 1), Some(&18.0));
        assert_eq!(m.get(1, 0), Some(&7.0));
        assert_eq!(m.get(1, 1), Some(&17.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(1), &[7.0, 17.0]);
    }

    #[test]
    fn test_distance_is_not_assumed_symmetric() {
        let a = vec![1.0, 5.0];
        let signed = |x: &f64, y: &f64| x - y;
        let m = distance_matrix(&a, &a, &signed);
        assert_eq!(m.entries(), &[0.0, -4.0, 4.0, 0.0]);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let a = vec![1.0, 2.0, 3.0];
        let err = distance_matrix_range(&a, &a, &absolute_difference, 2..1, 0..3).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 2, end: 1, len: 3 }));
    }

    #[test]
    fn test_range_past_end_is_rejected() {
        let a = vec![1.0, 2.0, 3.0];
        let err = distance_matrix_range(&a, &a, &absolute_difference, 0..3, 1..4).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { end: 4, .. }));
    }

    #[test]
    fn test_empty_range_gives_empty_matrix() {
        let a = vec![1.0, 2.0, 3.0];
        let m = distance_matrix_range(&a, &a, &absolute_difference, 2..2, 0..3).unwrap();
        assert_eq!(m.shape(), (0, 3));
        assert!(m.is_empty());
        assert!(m.flatten().is_empty());
    }

    #[test]
    fn test_nested_outputs_flatten_depth_first() {
        let a = vec![0.0, 1.0];
        let b = vec![2.0];
        let nested = |x: &f64, y: &f64| vec![vec![x + y], vec![x * y, y - x]];
        let m = distance_matrix(&a, &b, &nested);
        assert_eq!(m.flatten(), vec![2.0, 0.0, 2.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flatten_scalars_and_arrays() {
        assert_eq!(3_i32.flatten(), vec![3.0]);
        assert_eq!([[1.0_f32, 2.0], [3.0, 4.0]].flatten(), vec![1.0, 2.0, 3.0, 4.0]);
        let empty: Vec<Vec<f64>> = vec![vec![], vec![]];
        assert!(empty.flatten().is_empty());
    }

    #[test]
    fn test_euclidean() {
        let d = euclidean(&vec![0.0, 0.0], &vec![3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }
}
