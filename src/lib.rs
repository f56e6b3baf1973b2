//! `hd-select` library crate.
//!
//! High-dimensional greedy variable selection for linear regression: an
//! orthogonal greedy search grows a nested path of candidate models one
//! predictor at a time, a high-dimensional information criterion decides how
//! much of the path to keep, and a significance-gated trim pass prunes the
//! chosen model while preserving valid inference for what remains.
//!
//! The crate is a pure computational engine:
//!
//! - callers supply a numeric design matrix and response (ingestion,
//!   encoding, charting, and report templating live elsewhere)
//! - one invocation produces one immutable [`SelectionReport`]
//! - identical inputs and configuration always produce identical outputs

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod pipeline;
pub mod report;
pub mod select;

pub use domain::*;
pub use error::{EngineError, FitError};
pub use pipeline::run_selection;
