//! High-dimensional information criterion over the greedy RSS trajectory.
//!
//! `criterion(k) = n · ln(RSS(k)/n) + k · penalty(n, p)` where the penalty
//! grows with `ln p` (see [`CriterionKind`]); the arg-minimizing step count
//! k* decides how much of the greedy path to keep.

use crate::domain::{CriterionKind, CriterionPoint};

/// Floor for RSS/n before the log, so exact fits stay finite.
const RSS_FLOOR: f64 = 1e-12;

/// Output of criterion evaluation.
#[derive(Debug, Clone)]
pub struct CriterionDecision {
    /// One entry per achieved step.
    pub trace: Vec<CriterionPoint>,
    /// Arg-minimizing step count (1-based); ties break toward smaller k.
    /// Zero only for an empty trajectory.
    pub k_star: usize,
}

/// Score every step of an RSS trajectory and locate the minimum.
///
/// `rss[k-1]` is the residual sum of squares after k admissions.
pub fn evaluate(
    rss: &[f64],
    n: usize,
    p: usize,
    kind: CriterionKind,
    c2: f64,
) -> CriterionDecision {
    let n_f = n as f64;
    let penalty = kind.penalty(n, p, c2);

    let mut trace = Vec::with_capacity(rss.len());
    let mut k_star = 0;
    let mut best = f64::INFINITY;

    for (i, &r) in rss.iter().enumerate() {
        let step = i + 1;
        let value = n_f * (r / n_f).max(RSS_FLOOR).ln() + step as f64 * penalty;
        if value < best {
            best = value;
            k_star = step;
        }
        trace.push(CriterionPoint { step, rss: r, value });
    }

    CriterionDecision { trace, k_star }
}
