//! Significance-gated backward elimination on the criterion-chosen model.
//!
//! A fixed 0.05-style cutoff under-penalizes large candidate pools, so the
//! critical value grows with the pool instead: a predictor survives only if
//! `|t| ≥ sqrt(c3 · ln p)`. The sample size enters through the
//! t-statistic's standard error.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::domain::Term;
use crate::error::FitError;
use crate::fit::fit_subset;

/// Trim insignificant predictors from `j_hdic`.
///
/// Backward elimination: fit on the current set, remove the least
/// significant predictor whose |t| falls below the threshold (ties toward
/// the smaller column index), refit, and repeat until every survivor
/// clears the threshold or the set is empty. The result is always a subset
/// of the input; order follows the input order of the survivors.
pub fn trim(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    j_hdic: &[usize],
    include_intercept: bool,
    c3: f64,
) -> Result<Vec<usize>, FitError> {
    let t_crit = (c3 * (x.ncols() as f64).ln()).sqrt();
    let mut retained: Vec<usize> = j_hdic.to_vec();

    while !retained.is_empty() {
        let model = fit_subset(x, y, &retained, include_intercept)?;

        // Least-significant predictor below the threshold; the intercept is
        // exempt from trimming.
        let mut weakest: Option<(usize, f64)> = None;
        for coef in &model.coefficients {
            let Term::Predictor(col) = coef.term else {
                continue;
            };
            let abs_t = coef.t_value.abs();
            if abs_t >= t_crit {
                continue;
            }
            let better = match weakest {
                None => true,
                Some((wcol, wt)) => abs_t < wt || (abs_t == wt && col < wcol),
            };
            if better {
                weakest = Some((col, abs_t));
            }
        }

        let Some((col, abs_t)) = weakest else {
            break;
        };
        debug!(
            column = col,
            t = abs_t,
            threshold = t_crit,
            "trimming insignificant predictor"
        );
        retained.retain(|&j| j != col);
    }

    Ok(retained)
}
