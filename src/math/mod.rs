//! Mathematical utilities: least-squares solves with rank diagnostics.

pub mod ols;

pub use ols::*;
