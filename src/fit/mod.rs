//! Restricted-model fitting with inferential statistics.

pub mod inference;

pub use inference::*;
