//! Reporting utilities: formatted run summaries and coefficient tables.

pub mod format;

pub use format::*;
