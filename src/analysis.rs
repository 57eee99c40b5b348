//! SymNMF versus K-Means comparison by silhouette score.

use crate::cluster::{KMeans, SymNmf};
use crate::error::{Result, SymnmfError};
use crate::metrics::silhouette_score;
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;
use serde::Serialize;

/// Silhouette scores of both clusterings of the same points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Score of SymNMF hard labels.
    pub nmf: f64,
    /// Score of K-Means labels.
    pub kmeans: f64,
}

/// Clusters `x` into `k` groups with both SymNMF and K-Means and scores
/// each partition.
///
/// # Errors
///
/// Returns an error if `k` is not in `2..n`, either clustering fails, or a
/// clustering uses fewer than two distinct labels.
pub fn analyze(x: &Matrix<f64>, k: usize, seed: u64) -> Result<AnalysisReport> {
    let n_samples = x.n_rows();
    if k <= 1 || k >= n_samples {
        return Err(SymnmfError::invalid_k(k, format!("1 < k < {n_samples}")));
    }

    let nmf_labels = SymNmf::new(k).with_seed(seed).fit_predict(x)?;
    let nmf = silhouette_score(x, &nmf_labels)?;

    let kmeans_labels = KMeans::new(k).fit_predict(x)?;
    let kmeans = silhouette_score(x, &kmeans_labels)?;

    tracing::info!(k, nmf, kmeans, "analysis finished");
    Ok(AnalysisReport { nmf, kmeans })
}
