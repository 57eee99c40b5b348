//! Error types for SymNMF operations.
//!
//! Every core operation returns [`Result`]; only the binary turns an error
//! into a process exit status.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SymNMF operations.
///
/// # Examples
///
/// ```
/// use symnmf::error::SymnmfError;
///
/// let err = SymnmfError::SingularDegree { index: 3 };
/// assert!(err.to_string().contains("isolated point 3"));
/// ```
#[derive(Error, Debug)]
pub enum SymnmfError {
    /// Matrix storage could not be obtained.
    #[error("Allocation failure: cannot allocate {rows}x{cols} matrix")]
    AllocationFailure {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// I/O error while reading input points.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file content is malformed.
    #[error("Parse error at line {line}: {cause}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        cause: String,
    },

    /// Empty, zero-sized, or non-rectangular input.
    #[error("Invalid dimension: {message}")]
    InvalidDimension {
        /// Description of the offending shape
        message: String,
    },

    /// Operand shapes are incompatible for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A degree-matrix diagonal entry is zero during normalization.
    #[error("Singular degree: isolated point {index} has zero degree")]
    SingularDegree {
        /// Row of the zero diagonal entry
        index: usize,
    },

    /// A multiplicative-update denominator is exactly zero.
    #[error("Zero denominator at ({row}, {col}) in iteration {iteration}")]
    ZeroDenominator {
        /// Row of the zero entry in HHᵗH
        row: usize,
        /// Column of the zero entry in HHᵗH
        col: usize,
        /// 1-based iteration in which it occurred
        iteration: usize,
    },

    /// The initial factor matrix has a negative or non-finite entry.
    #[error("Negative factor entry {value} at ({row}, {col}): must be finite and >= 0")]
    NegativeFactor {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
        /// Offending value
        value: f64,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Estimator used before `fit`, or on data it was not fitted to.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// Input file could not be opened.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

impl SymnmfError {
    /// Create a dimension mismatch error from two shapes.
    #[must_use]
    pub fn dimension_mismatch(
        context: &str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context} {}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidDimension {
            message: format!("empty input: {context}"),
        }
    }

    /// Create a cluster-count error for `k` outside `constraint`.
    #[must_use]
    pub fn invalid_k(k: usize, constraint: impl Into<String>) -> Self {
        Self::InvalidHyperparameter {
            param: "k".to_string(),
            value: k.to_string(),
            constraint: constraint.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SymnmfError>;
