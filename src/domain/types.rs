//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during selection
//! - exported to JSON by external collaborators (report rendering, storage)
//! - reloaded later for comparisons

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Information-criterion variant used to choose the model size.
///
/// Every variant's per-step penalty grows with `ln p`, so the criterion
/// stays honest as the candidate pool grows. A fixed-k penalty that ignores
/// `p` is deliberately not offered: once `p` can exceed `n`, it no longer
/// controls false discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    /// Bayesian-style: penalty = ln(n) · ln(p).
    Hdbic,
    /// Hannan–Quinn-style: penalty = c2 · ln(ln(n)) · ln(p).
    Hdhq,
    /// Akaike-style: penalty = c2 · ln(p).
    Hdaic,
}

impl CriterionKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CriterionKind::Hdbic => "HDBIC",
            CriterionKind::Hdhq => "HDHQ",
            CriterionKind::Hdaic => "HDAIC",
        }
    }

    /// Per-step penalty weight.
    ///
    /// The HDHQ inner log is floored at zero so tiny samples (n ≤ 2) cannot
    /// produce a negative penalty.
    pub fn penalty(self, n: usize, p: usize, c2: f64) -> f64 {
        let ln_n = (n as f64).ln();
        let ln_p = (p as f64).ln();
        match self {
            CriterionKind::Hdbic => ln_n * ln_p,
            CriterionKind::Hdhq => c2 * ln_n.ln().max(0.0) * ln_p,
            CriterionKind::Hdaic => c2 * ln_p,
        }
    }
}

/// Engine configuration for one invocation.
///
/// All numeric scales must be strictly positive and finite. `max_steps`,
/// when unset, is derived from the data dimensions (see
/// [`SelectionConfig::resolve_max_steps`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Maximum number of greedy steps (Kn). Derived from n and p when `None`.
    pub max_steps: Option<usize>,
    /// Scale c1 in the default step bound `floor(c1 · sqrt(n / ln p))`.
    pub step_scale: f64,
    /// Information-criterion variant.
    pub criterion: CriterionKind,
    /// Scale c2 applied by the HDHQ / HDAIC penalties.
    pub criterion_scale: f64,
    /// Scale c3 in the trim threshold `|t| ≥ sqrt(c3 · ln p)`.
    pub trim_scale: f64,
    /// Fit an intercept term (and center the greedy search accordingly).
    pub include_intercept: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            step_scale: 5.0,
            criterion: CriterionKind::Hdbic,
            criterion_scale: 2.0,
            trim_scale: 2.01,
            include_intercept: true,
        }
    }
}

impl SelectionConfig {
    /// Resolve the effective step bound Kn for an n×p problem.
    ///
    /// An explicit `max_steps` must land in `[1, min(n, p)]` — asking for
    /// more steps than degrees of freedom is a configuration error, not
    /// something to truncate silently. The derived default is
    /// `floor(c1 · sqrt(n / ln p))` clamped to the same range, which
    /// requires `p ≥ 2` so that `ln p > 0`.
    pub fn resolve_max_steps(&self, n: usize, p: usize) -> Result<usize, EngineError> {
        let limit = n.min(p);
        if let Some(k) = self.max_steps {
            if k == 0 || k > limit {
                return Err(EngineError::MaxStepsOutOfRange { max_steps: k, limit });
            }
            return Ok(k);
        }
        if p < 2 {
            return Err(EngineError::StepBoundUnderived { n, p });
        }
        let raw = self.step_scale * (n as f64 / (p as f64).ln()).sqrt();
        Ok((raw.floor() as usize).clamp(1, limit))
    }
}

/// Identity of one fitted coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "lowercase")]
pub enum Term {
    Intercept,
    Predictor(usize),
}

/// One row of a coefficient table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub term: Term,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided Student-t p-value on the residual degrees of freedom.
    pub p_value: f64,
}

/// A fitted model restricted to one retained index set.
///
/// Created once per invocation by the inference fitter and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedModel {
    /// Retained predictor column indices (intercept excluded).
    pub indices: Vec<usize>,
    /// Coefficient table (intercept first when fitted).
    pub coefficients: Vec<Coefficient>,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
    pub rss: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Residual degrees of freedom (n minus fitted parameter count).
    pub df_resid: usize,
}

/// Outcome of fitting one model variant.
///
/// A degenerate fit for one variant never suppresses the other variant's
/// result; callers always see, per variant, either a valid model or the
/// reason it could not be fitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum ModelOutcome {
    Valid(SelectedModel),
    Degenerate { reason: String },
}

impl ModelOutcome {
    pub fn model(&self) -> Option<&SelectedModel> {
        match self {
            ModelOutcome::Valid(model) => Some(model),
            ModelOutcome::Degenerate { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ModelOutcome::Valid(_))
    }
}

/// One step of the selection trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionPoint {
    /// 1-based step count (model size after this admission).
    pub step: usize,
    /// Residual sum of squares after the step.
    pub rss: f64,
    /// Information-criterion value at this model size.
    pub value: f64,
}

/// A candidate column dropped as numerically degenerate during the greedy
/// search. Not an error: selection continues with the next best candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub column: usize,
    /// Step at which the column was dropped.
    pub step: usize,
    pub reason: String,
}

/// The assembled result of one engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Sample size.
    pub n: usize,
    /// Candidate predictor count.
    pub p: usize,
    /// Resolved step bound actually used (Kn).
    pub max_steps: usize,
    pub criterion: CriterionKind,
    /// Column indices in admission order.
    pub path: Vec<usize>,
    /// Per-step RSS and criterion values (aligned with `path`).
    pub trace: Vec<CriterionPoint>,
    /// Criterion-minimizing step count (0 only when the path is empty).
    pub k_star: usize,
    /// First `k_star` path entries.
    pub j_hdic: Vec<usize>,
    /// Subset of `j_hdic` surviving the trim pass.
    pub j_trim: Vec<usize>,
    pub hdic_model: ModelOutcome,
    pub trimmed_model: ModelOutcome,
    /// Columns skipped as numerically degenerate during the greedy search.
    pub skipped: Vec<SkippedColumn>,
}
