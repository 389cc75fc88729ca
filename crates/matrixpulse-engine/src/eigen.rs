//! Symmetric eigensolver for the correlation matrix
//!
//! The correlation matrix is symmetric by construction, modulo rounding, so
//! the input is explicitly symmetrised and handed to nalgebra's symmetric
//! solver. Its eigenvalues are real by construction, which also satisfies
//! the take-the-real-part contract for near-symmetric inputs. Convergence
//! failure is surfaced so the caller can skip the mode update for the cycle.

use matrixpulse_core::EngineError;
use nalgebra::{DMatrix, SymmetricEigen};

const EIGEN_EPS: f64 = 1.0e-12;
const EIGEN_MAX_ITER: usize = 250;

/// Eigenvalues of a dense symmetric matrix, in solver order
pub fn symmetric_eigenvalues(matrix: &[Vec<f64>]) -> Result<Vec<f64>, EngineError> {
    let n = matrix.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let dense = DMatrix::from_fn(n, n, |i, j| matrix[i][j]);
    let symmetrised = (&dense + dense.transpose()) * 0.5;

    let decomposition = SymmetricEigen::try_new(symmetrised, EIGEN_EPS, EIGEN_MAX_ITER)
        .ok_or(EngineError::EigenNonConvergence)?;

    Ok(decomposition.eigenvalues.iter().copied().collect())
}
