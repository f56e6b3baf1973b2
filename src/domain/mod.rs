//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the selection configuration (`SelectionConfig`, `CriterionKind`)
//! - per-step trace records (`CriterionPoint`)
//! - fitted model records (`SelectedModel`, `Coefficient`, `ModelOutcome`)
//! - the assembled result (`SelectionReport`)

pub mod types;

pub use types::*;
