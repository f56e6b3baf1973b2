//! Synthetic data generation for tests and scenario studies.

pub mod synth;

pub use synth::*;
