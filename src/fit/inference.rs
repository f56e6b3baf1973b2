//! Inference fitter: OLS on a retained index set with full coefficient
//! statistics.
//!
//! Responsibilities:
//!
//! - assemble the restricted design matrix (optional leading intercept)
//! - solve the least-squares problem, surfacing rank deficiency
//! - compute per-coefficient standard errors, t-statistics, and two-sided
//!   p-values, plus fit diagnostics (RSS, R², adjusted R²)
//!
//! A degenerate fit here is scoped to the model variant being fitted; the
//! pipeline decides what to do with the other variant.

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::domain::{Coefficient, SelectedModel, Term};
use crate::error::FitError;
use crate::math::solve_least_squares;

/// Fit an OLS model on the given predictor columns.
///
/// # Arguments
/// - `x`: full design matrix (n×p)
/// - `y`: response (length n)
/// - `indices`: retained predictor columns (may be empty)
/// - `include_intercept`: prepend a constant column
///
/// An empty `indices` with an intercept yields the intercept-only model
/// (R² = 0); without an intercept it is unfittable. Inference requires at
/// least one residual degree of freedom.
pub fn fit_subset(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    indices: &[usize],
    include_intercept: bool,
) -> Result<SelectedModel, FitError> {
    let n = x.nrows();
    let m = indices.len() + usize::from(include_intercept);

    if m == 0 {
        return Err(FitError::EmptyModel);
    }
    if n <= m {
        return Err(FitError::NoResidualDf { n, params: m });
    }

    let mut design = DMatrix::zeros(n, m);
    let mut col = 0;
    if include_intercept {
        design.column_mut(0).fill(1.0);
        col = 1;
    }
    for &j in indices {
        design.set_column(col, &x.column(j));
        col += 1;
    }

    let ls = solve_least_squares(&design, y)?;
    let fitted = &design * &ls.beta;
    let residuals = y - &fitted;
    let rss = residuals.norm_squared();
    let df = n - m;
    let sigma2 = rss / df as f64;

    let t_dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|_| FitError::NoResidualDf { n, params: m })?;

    let mut coefficients = Vec::with_capacity(m);
    for i in 0..m {
        let term = if include_intercept && i == 0 {
            Term::Intercept
        } else {
            let offset = usize::from(include_intercept);
            Term::Predictor(indices[i - offset])
        };
        let estimate = ls.beta[i];
        let std_error = (sigma2 * ls.xtx_inv_diag[i]).sqrt();
        // An exact fit (rss = 0) gives a zero standard error; report the
        // statistic as infinite rather than dividing by zero.
        let t_value = if std_error > 0.0 {
            estimate / std_error
        } else if estimate == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(estimate)
        };
        let p_value = if t_value.is_finite() {
            2.0 * (1.0 - t_dist.cdf(t_value.abs()))
        } else {
            0.0
        };
        coefficients.push(Coefficient {
            term,
            estimate,
            std_error,
            t_value,
            p_value,
        });
    }

    // Centered total sum of squares when an intercept is fitted, uncentered
    // otherwise.
    let tss = if include_intercept {
        let mean = y.mean();
        y.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
    } else {
        y.norm_squared()
    };
    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };
    let fit_df = if include_intercept { n - 1 } else { n };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (fit_df as f64) / (df as f64);

    Ok(SelectedModel {
        indices: indices.to_vec(),
        coefficients,
        fitted: fitted.iter().copied().collect(),
        residuals: residuals.iter().copied().collect(),
        rss,
        r_squared,
        adj_r_squared,
        df_resid: df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_line() -> (DMatrix<f64>, DVector<f64>) {
        let x = DMatrix::from_column_slice(6, 1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = DVector::from_row_slice(&[2.0, 1.0, 4.0, 3.0, 6.0, 5.0]);
        (x, y)
    }

    #[test]
    fn line_fit_matches_hand_computation() {
        // Closed-form: slope = Sxy/Sxx = 14.5/17.5, intercept = 0.6,
        // RSS = 5.485714..., se(slope) = sqrt((RSS/4)/17.5) = 0.279942...
        let (x, y) = simple_line();
        let model = fit_subset(&x, &y, &[0], true).unwrap();

        assert_eq!(model.coefficients.len(), 2);
        assert_eq!(model.coefficients[0].term, Term::Intercept);
        assert_eq!(model.coefficients[1].term, Term::Predictor(0));

        assert!((model.coefficients[0].estimate - 0.6).abs() < 1e-10);
        assert!((model.coefficients[1].estimate - 14.5 / 17.5).abs() < 1e-10);
        assert!((model.rss - 5.485714285714286).abs() < 1e-9);
        assert!((model.coefficients[1].std_error - 0.2799417).abs() < 1e-6);

        let t = model.coefficients[1].t_value;
        assert!((t - 2.9598).abs() < 1e-3);
        // Two-sided p on 4 df for t ≈ 2.96.
        let p = model.coefficients[1].p_value;
        assert!(p > 0.03 && p < 0.06, "unexpected p-value {p}");

        assert!((model.r_squared - (1.0 - 5.485714285714286 / 17.5)).abs() < 1e-9);
        let adj = 1.0 - (1.0 - model.r_squared) * 5.0 / 4.0;
        assert!((model.adj_r_squared - adj).abs() < 1e-9);
        assert_eq!(model.df_resid, 4);
    }

    #[test]
    fn noise_free_fit_recovers_coefficients() {
        let x = DMatrix::from_column_slice(5, 1, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0, 5.0, 7.0, 9.0]);

        let model = fit_subset(&x, &y, &[0], true).unwrap();
        assert!((model.coefficients[0].estimate - 1.0).abs() < 1e-10);
        assert!((model.coefficients[1].estimate - 2.0).abs() < 1e-10);
        assert!(model.rss < 1e-18);
        // Near-exact fits give an enormous (possibly infinite) statistic.
        assert!(model.coefficients[1].t_value > 1e6);
        assert!(model.coefficients[1].p_value < 1e-9);
    }

    #[test]
    fn intercept_only_model_has_zero_r_squared() {
        let x = DMatrix::from_column_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 4.0, 5.0]);

        let model = fit_subset(&x, &y, &[], true).unwrap();
        assert_eq!(model.coefficients.len(), 1);
        assert!((model.coefficients[0].estimate - 3.0).abs() < 1e-10);
        assert!(model.r_squared.abs() < 1e-12);
        assert!(model.adj_r_squared.abs() < 1e-12);
    }

    #[test]
    fn empty_model_without_intercept_is_rejected() {
        let x = DMatrix::from_column_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 4.0, 5.0]);

        let err = fit_subset(&x, &y, &[], false).unwrap_err();
        assert_eq!(err, FitError::EmptyModel);
    }

    #[test]
    fn exactly_collinear_subset_is_degenerate() {
        // Column 1 duplicates column 0.
        let x = DMatrix::from_row_slice(
            5,
            2,
            &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0],
        );
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        let err = fit_subset(&x, &y, &[0, 1], true).unwrap_err();
        assert!(matches!(err, FitError::RankDeficient { .. }));
    }

    #[test]
    fn no_residual_degrees_of_freedom_is_degenerate() {
        let x = DMatrix::from_column_slice(2, 1, &[1.0, 2.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);

        let err = fit_subset(&x, &y, &[0], true).unwrap_err();
        assert_eq!(err, FitError::NoResidualDf { n: 2, params: 2 });
    }
}
