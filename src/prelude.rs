//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use symnmf::prelude::*;
//! ```

pub use crate::affinity::{ddg, norm, normalized_similarity, sym};
pub use crate::cluster::{
    factorize, hard_labels, initialize_h, symnmf, ConvergenceStatus, Factorization,
    FactorizationParams, KMeans, SymNmf, DEFAULT_SEED,
};
pub use crate::error::SymnmfError;
pub use crate::metrics::silhouette_score;
pub use crate::primitives::Matrix;
pub use crate::traits::UnsupervisedEstimator;
