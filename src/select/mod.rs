//! Selection stages.
//!
//! Responsibilities:
//!
//! - grow the greedy path one predictor per step (parallel candidate scan)
//! - score every prefix with a high-dimensional information criterion
//! - trim statistically insignificant predictors from the chosen prefix

pub mod criterion;
pub mod greedy;
pub mod trim;

pub use criterion::*;
pub use greedy::*;
pub use trim::*;
