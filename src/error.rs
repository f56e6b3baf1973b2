//! Engine error taxonomy.
//!
//! Two tiers:
//!
//! - [`EngineError`]: configuration and degenerate-input errors, surfaced
//!   synchronously before any selection step runs. Retrying identical input
//!   cannot succeed, so there is no retry path.
//! - [`FitError`]: degenerate-fit conditions scoped to a single model
//!   variant. The pipeline folds these into the affected variant's outcome
//!   instead of aborting the run, so the other variant's result is still
//!   reported.

use thiserror::Error;

/// Unrecoverable configuration or input errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("design matrix has {rows} rows but response has {responses} entries")]
    RowCountMismatch { rows: usize, responses: usize },

    #[error("design matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("max_steps={max_steps} is outside [1, {limit}] (limit = min(n, p))")]
    MaxStepsOutOfRange { max_steps: usize, limit: usize },

    #[error("cannot derive a default step bound for n={n}, p={p}; supply max_steps explicitly")]
    StepBoundUnderived { n: usize, p: usize },

    #[error("{name} must be positive and finite, got {value}")]
    InvalidScale { name: &'static str, value: f64 },

    #[error("column index {col} is outside the design matrix (p={p})")]
    ColumnOutOfRange { col: usize, p: usize },

    #[error("non-finite value in {what} at row {row}, column {col}")]
    NonFinite { what: &'static str, row: usize, col: usize },
}

/// Degenerate-fit conditions, scoped to one model variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("restricted design matrix is rank-deficient (rank {rank} of {cols} columns)")]
    RankDeficient { rank: usize, cols: usize },

    #[error("no residual degrees of freedom (n={n}, fitted parameters={params})")]
    NoResidualDf { n: usize, params: usize },

    #[error("no terms to fit (empty index set and no intercept)")]
    EmptyModel,

    #[error("least-squares solve failed on the restricted design matrix")]
    SingularSolve,
}
