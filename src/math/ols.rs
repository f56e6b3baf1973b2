//! Least-squares solver with explicit rank detection.
//!
//! The trimmer and the inference fitter repeatedly solve small regression
//! problems restricted to a handful of retained columns. We solve via SVD:
//!
//! - tall systems (n rows ≫ m columns) are the normal case here, and
//!   nalgebra's `QR::solve` is intended for square systems
//! - the SVD exposes the numerical rank, which we must surface rather than
//!   silently returning unstable coefficients
//! - the right singular vectors give `diag((XᵀX)⁻¹)` directly, which the
//!   inference fitter needs for coefficient standard errors

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Relative singular-value cutoff for rank decisions.
const RANK_EPS: f64 = 1e-10;

/// Output of one least-squares solve.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// Diagonal of `(XᵀX)⁻¹`, aligned with `beta`.
    pub xtx_inv_diag: Vec<f64>,
}

/// Solve `min ‖y − Xβ‖²`, failing on rank deficiency.
///
/// The design matrix must have full column rank at the relative tolerance
/// [`RANK_EPS`]; anything less is a degenerate fit for the caller to scope.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LeastSquares, FitError> {
    let cols = x.ncols();
    let svd = x.clone().svd(true, true);

    let max_sv = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let tol = max_sv * RANK_EPS;
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();
    if rank < cols {
        return Err(FitError::RankDeficient { rank, cols });
    }

    let beta = svd.solve(y, tol).map_err(|_| FitError::SingularSolve)?;
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(FitError::SingularSolve);
    }

    // With X = UΣVᵀ, (XᵀX)⁻¹ = VΣ⁻²Vᵀ, so diag_i = Σ_k V[i,k]² / σ_k².
    let v_t = svd.v_t.as_ref().ok_or(FitError::SingularSolve)?;
    let mut xtx_inv_diag = vec![0.0; cols];
    for (i, slot) in xtx_inv_diag.iter_mut().enumerate() {
        let mut acc = 0.0;
        for k in 0..svd.singular_values.len() {
            let s = svd.singular_values[k];
            if s > tol {
                let v = v_t[(k, i)];
                acc += (v * v) / (s * s);
            }
        }
        *slot = acc;
    }

    Ok(LeastSquares { beta, xtx_inv_diag })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert!((ls.beta[0] - 2.0).abs() < 1e-10);
        assert!((ls.beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn normal_matrix_inverse_diagonal() {
        // X = [[1,0],[1,1],[1,2]]: XᵀX = [[3,3],[3,5]],
        // (XᵀX)⁻¹ = [[5/6,-1/2],[-1/2,1/2]].
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 2.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert!((ls.xtx_inv_diag[0] - 5.0 / 6.0).abs() < 1e-10);
        assert!((ls.xtx_inv_diag[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn duplicate_columns_are_rank_deficient() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);

        let err = solve_least_squares(&x, &y).unwrap_err();
        assert_eq!(err, FitError::RankDeficient { rank: 1, cols: 2 });
    }
}
