//! Core compute primitives.
//!
//! Dense row-major [`Matrix`] used by every stage of the pipeline.

mod matrix;

pub use matrix::Matrix;
