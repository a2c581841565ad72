//! Plain-text dumps of an estimator's frozen statistics
//!
//! Values are written with six decimals, whitespace delimited, one matrix
//! row per line. There is no read path.

use crate::traits::EcdfEstimator;
use ecdf_core::Result;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write one value per line
pub fn write_vector<W: Write>(writer: &mut W, values: &[f64]) -> Result<()> {
    for value in values {
        writeln!(writer, "{:.6}", value)?;
    }
    Ok(())
}

/// Write one matrix row per line
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &DMatrix<f64>) -> Result<()> {
    for row in matrix.row_iter() {
        let line: Vec<String> = row.iter().map(|value| format!("{:.6}", value)).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Dump bins, ECDF list, mean vector and covariance matrix into `dir`
///
/// Files are named `<prefix>_bins.txt`, `<prefix>_ecdf-list.txt`,
/// `<prefix>_mean-vector.txt` and `<prefix>_covar-matrix.txt`. Returns the
/// written paths in that order.
pub fn dump_diagnostics<E, T>(estimator: &T, dir: impl AsRef<Path>, prefix: &str) -> Result<Vec<PathBuf>>
where
    T: EcdfEstimator<E> + ?Sized,
{
    let dir = dir.as_ref();
    let path = |name: &str| dir.join(format!("{}_{}.txt", prefix, name));
    let paths = vec![
        path("bins"),
        path("ecdf-list"),
        path("mean-vector"),
        path("covar-matrix"),
    ];

    let mean: Vec<f64> = estimator.mean_vector().iter().copied().collect();
    write_file(&paths[0], |w| write_vector(w, estimator.bins()))?;
    write_file(&paths[1], |w| write_matrix(w, estimator.ecdf_matrix()))?;
    write_file(&paths[2], |w| write_vector(w, &mean))?;
    write_file(&paths[3], |w| write_matrix(w, estimator.covar_matrix()))?;

    debug!("Wrote {} diagnostics to {}", estimator.name(), dir.display());
    Ok(paths)
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
