//! Orthogonal greedy search over candidate predictor columns.
//!
//! Each step admits the column that most reduces the current residual sum
//! of squares. The implementation keeps a residualized copy of every
//! candidate column and orthogonalizes it incrementally against the newly
//! admitted basis vector, so a step costs O(n·p) regardless of how many
//! columns were admitted before — no dense p×p structure is ever formed.
//!
//! Degenerate candidates (near-zero residual norm after orthogonalization,
//! e.g. exact duplicates of admitted columns) are skipped permanently and
//! recorded; selection continues with the next best candidate.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::debug;

use crate::domain::SkippedColumn;
use crate::error::EngineError;

/// Squared-norm floor relative to a column's pre-search squared norm.
/// Below this the column lies numerically inside the admitted subspace.
const DEGENERACY_TOL: f64 = 1e-12;

/// Output of the greedy search.
#[derive(Debug, Clone)]
pub struct GreedyPath {
    /// Column indices in admission order.
    pub path: Vec<usize>,
    /// Residual sum of squares after each admission (aligned with `path`).
    pub rss: Vec<f64>,
    /// Columns dropped as numerically degenerate, with the step at which
    /// they were dropped.
    pub skipped: Vec<SkippedColumn>,
}

/// Grow the greedy path up to `max_steps` admissions.
///
/// With `include_intercept`, the response and every candidate column are
/// mean-centered first, which is the same as orthogonalizing everything
/// against the constant column once up front. If every remaining candidate
/// becomes degenerate before `max_steps`, the search stops early and the
/// path is shorter than requested.
pub fn select_path(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    include_intercept: bool,
    max_steps: usize,
) -> Result<GreedyPath, EngineError> {
    let n = x.nrows();
    let p = x.ncols();

    if n == 0 || p == 0 {
        return Err(EngineError::EmptyMatrix);
    }
    if y.len() != n {
        return Err(EngineError::RowCountMismatch {
            rows: n,
            responses: y.len(),
        });
    }
    let limit = n.min(p);
    if max_steps == 0 || max_steps > limit {
        return Err(EngineError::MaxStepsOutOfRange { max_steps, limit });
    }

    // Residualized candidate columns, kept as owned vectors so the
    // post-admission orthogonalization sweep can run in parallel.
    let mut work: Vec<DVector<f64>> = (0..p).map(|j| x.column(j).into_owned()).collect();
    let mut residual = y.clone();

    if include_intercept {
        for col in work.iter_mut() {
            let mean = col.mean();
            col.add_scalar_mut(-mean);
        }
        let mean = residual.mean();
        residual.add_scalar_mut(-mean);
    }

    let base_norms: Vec<f64> = work.iter().map(|c| c.norm_squared()).collect();
    let mut norms = base_norms.clone();

    let mut selected = vec![false; p];
    let mut dropped = vec![false; p];

    let mut path = Vec::with_capacity(max_steps);
    let mut rss = Vec::with_capacity(max_steps);
    let mut skipped = Vec::new();

    while path.len() < max_steps {
        let step = path.len() + 1;

        // Retire candidates that have become numerically degenerate before
        // scanning, so the scan never divides by a vanishing norm.
        for j in 0..p {
            if selected[j] || dropped[j] {
                continue;
            }
            if norms[j] <= base_norms[j] * DEGENERACY_TOL {
                dropped[j] = true;
                let reason = if base_norms[j] == 0.0 {
                    "zero-variance column".to_string()
                } else {
                    "numerically inside the admitted subspace".to_string()
                };
                debug!(column = j, step, "skipping degenerate candidate: {reason}");
                skipped.push(SkippedColumn {
                    column: j,
                    step,
                    reason,
                });
            }
        }

        // Parallel scan: each open candidate's RSS reduction if admitted.
        // Per-candidate work is independent and the reduction is a plain
        // max with a deterministic tie-break, so the result is identical to
        // a sequential scan.
        let best = (0..p)
            .into_par_iter()
            .filter(|&j| !selected[j] && !dropped[j])
            .map(|j| {
                let dot = work[j].dot(&residual);
                (j, (dot * dot) / norms[j])
            })
            .reduce_with(pick_better);

        let Some((j_star, _gain)) = best else {
            debug!(step, "no admissible candidates remain; stopping early");
            break;
        };

        // Admit the winner: normalize it into the basis, project the
        // residual onto the orthogonal complement, and record the RSS.
        let q = &work[j_star] / norms[j_star].sqrt();
        selected[j_star] = true;

        let coef = q.dot(&residual);
        residual.axpy(-coef, &q, 1.0);
        path.push(j_star);
        rss.push(residual.norm_squared());

        // Orthogonalize every open candidate against the new basis vector.
        work.par_iter_mut().enumerate().for_each(|(j, col)| {
            if selected[j] || dropped[j] {
                return;
            }
            let c = q.dot(col);
            col.axpy(-c, &q, 1.0);
        });
        for j in 0..p {
            if !selected[j] && !dropped[j] {
                norms[j] = work[j].norm_squared();
            }
        }
    }

    Ok(GreedyPath { path, rss, skipped })
}

/// Larger gain wins; exact ties prefer the smaller column index.
fn pick_better(a: (usize, f64), b: (usize, f64)) -> (usize, f64) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a }
}
