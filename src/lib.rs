//! SymNMF: soft clustering with Symmetric Non-negative Matrix Factorization.
//!
//! Given n points of dimension d, the pipeline builds a Gaussian similarity
//! graph, degree-normalizes it, and factorizes the normalized matrix
//! `W ≈ H·Hᵗ` with a non-negative `H` (n×k) whose rows act as
//! cluster-membership weights.
//!
//! # Quick Start
//!
//! ```
//! use symnmf::prelude::*;
//!
//! let x = Matrix::from_rows(&[
//!     vec![0.0, 0.0],
//!     vec![0.3, 0.0],
//!     vec![3.0, 3.0],
//!     vec![3.3, 3.0],
//! ]).unwrap();
//!
//! let a = sym(&x).unwrap();
//! let d = ddg(&a).unwrap();
//! let w = norm(&a, &d).unwrap();
//!
//! let h_init = initialize_h(&w, 2, DEFAULT_SEED).unwrap();
//! let h = symnmf(&w, &h_init).unwrap();
//! assert_eq!(h.shape(), (4, 2));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense matrix type
//! - [`affinity`]: Similarity, degree and normalized matrices
//! - [`cluster`]: Factorization engine, SymNMF estimator, K-Means baseline
//! - [`metrics`]: Silhouette score
//! - [`analysis`]: SymNMF versus K-Means comparison
//! - [`loader`]: Comma-separated point files
//! - [`output`]: Text rendering of results

pub mod affinity;
pub mod analysis;
pub mod cluster;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod prelude;
pub mod primitives;
pub mod traits;

pub use error::{Result, SymnmfError};
pub use primitives::Matrix;
pub use traits::UnsupervisedEstimator;
