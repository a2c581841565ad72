//! Bin selection from the mean ECDF vector
//!
//! Picks a subset of an estimator's current bins so the kept thresholds are
//! spread out either in ECDF value (`UniformY`) or in bin index
//! (`UniformX`), then re-bins the estimator.

use crate::traits::RebinnableEstimator;
use ecdf_core::{Error, Result};
use tracing::warn;

/// Default number of bins to keep
pub const DEFAULT_BIN_COUNT: usize = 10;

/// How to spread the kept bins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinSelection {
    /// Uniformly spaced in mean ECDF value
    #[default]
    UniformY,
    /// Uniformly spaced in bin index
    UniformX,
}

/// Parameters of a bin selection
#[derive(Debug, Clone, PartialEq)]
pub struct BinChoice {
    pub n_bins: usize,
    pub selection: BinSelection,
    /// Shift of the lower end of the spacing range; `None` picks the default
    pub min_shift: Option<f64>,
    /// Shift of the upper end of the spacing range; `None` picks the default
    pub max_shift: Option<f64>,
}

impl Default for BinChoice {
    fn default() -> Self {
        Self {
            n_bins: DEFAULT_BIN_COUNT,
            selection: BinSelection::default(),
            min_shift: None,
            max_shift: None,
        }
    }
}

impl BinChoice {
    pub fn new(n_bins: usize, selection: BinSelection) -> Self {
        Self {
            n_bins,
            selection,
            ..Self::default()
        }
    }

    pub fn with_min_shift(mut self, shift: f64) -> Self {
        self.min_shift = Some(shift);
        self
    }

    pub fn with_max_shift(mut self, shift: f64) -> Self {
        self.max_shift = Some(shift);
        self
    }
}

/// Indices of the bins to keep, sorted and without duplicates
///
/// `UniformY` spaces `n_bins` targets over `[min + min_shift, max +
/// max_shift]` of the mean values (default shifts move both ends inwards by
/// `(max - min) / n_bins`) and keeps, per target, the first bin whose mean
/// reaches it, or bin 0 if none does.
///
/// `UniformX` spaces `n_bins` positions between the first index of the
/// maximum mean and the first index of the minimum mean, shifted inwards
/// by `(argmin - argmax) / n_bins` by default, and truncates them to
/// indices.
///
/// # Errors
/// [`Error::Configuration`] for `n_bins == 0`, an empty mean vector or a
/// position outside the bin range.
pub fn select_bin_indices(mean: &[f64], choice: &BinChoice) -> Result<Vec<usize>> {
    let n = choice.n_bins;
    if n == 0 {
        return Err(Error::configuration("at least one bin must be chosen"));
    }
    if mean.is_empty() {
        return Err(Error::configuration("cannot choose bins from an empty mean vector"));
    }

    let (argmin, min) = first_extremum(mean, |candidate, best| candidate < best);
    let (argmax, max) = first_extremum(mean, |candidate, best| candidate > best);

    let mut indices = match choice.selection {
        BinSelection::UniformY => {
            let lo = min + choice.min_shift.unwrap_or((max - min) / n as f64);
            let hi = max + choice.max_shift.unwrap_or((min - max) / n as f64);
            linspace(lo, hi, n)
                .into_iter()
                .map(|target| mean.iter().position(|&m| m >= target).unwrap_or(0))
                .collect::<Vec<_>>()
        }
        BinSelection::UniformX => {
            let (from, to) = (argmax as f64, argmin as f64);
            let lo = from + choice.min_shift.unwrap_or((to - from) / n as f64);
            let hi = to + choice.max_shift.unwrap_or((from - to) / n as f64);
            linspace(lo, hi, n)
                .into_iter()
                .map(|position| {
                    let index = position.trunc();
                    if index < 0.0 || index >= mean.len() as f64 || !index.is_finite() {
                        Err(Error::configuration(format!(
                            "bin position {} is outside of 0..{}",
                            position,
                            mean.len()
                        )))
                    } else {
                        Ok(index as usize)
                    }
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    let requested = indices.len();
    indices.sort_unstable();
    indices.dedup();
    if indices.len() != requested {
        warn!(
            requested,
            kept = indices.len(),
            "Some bins were duplicate. These duplicates are removed from the list."
        );
    }
    Ok(indices)
}

/// Keep a spread-out subset of the current bins and re-bin the estimator
///
/// Returns the kept bin values.
pub fn choose_bins<E, T>(estimator: &mut T, choice: &BinChoice) -> Result<Vec<f64>>
where
    T: RebinnableEstimator<E> + ?Sized,
{
    let mean: Vec<f64> = estimator.mean_vector().iter().copied().collect();
    let indices = select_bin_indices(&mean, choice)?;
    let bins: Vec<f64> = indices.iter().map(|&i| estimator.bins()[i]).collect();
    estimator.rebin(bins.clone())?;
    Ok(bins)
}

fn first_extremum(values: &[f64], better: impl Fn(f64, f64) -> bool) -> (usize, f64) {
    let mut best = (0, values[0]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        if better(v, best.1) {
            best = (i, v);
        }
    }
    best
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
