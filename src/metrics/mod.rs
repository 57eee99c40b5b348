//! Clustering quality metrics.

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| {
            let diff = p - q;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Mean distance from a point to the other members of its own cluster.
///
/// Returns `None` for a singleton cluster.
fn mean_intra_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
) -> Option<f64> {
    let point = data.row(point_idx);
    let distances: Vec<f64> = labels
        .iter()
        .enumerate()
        .filter(|&(j, &label)| j != point_idx && label == cluster)
        .map(|(j, _)| euclidean(point, data.row(j)))
        .collect();

    if distances.is_empty() {
        None
    } else {
        Some(distances.iter().sum::<f64>() / distances.len() as f64)
    }
}

/// Smallest mean distance from a point to the members of another cluster.
fn min_inter_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
    clusters: &[usize],
) -> f64 {
    let point = data.row(point_idx);
    let mut min_mean = f64::INFINITY;

    for &other_cluster in clusters {
        if other_cluster == cluster {
            continue;
        }

        let (sum, count) = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == other_cluster)
            .fold((0.0, 0usize), |(sum, count), (j, _)| {
                (sum + euclidean(point, data.row(j)), count + 1)
            });

        if count > 0 {
            min_mean = min_mean.min(sum / count as f64);
        }
    }

    min_mean
}

/// Computes the silhouette coefficient for a single point.
fn silhouette_coefficient(a_i: f64, b_i: f64) -> f64 {
    let max_ab = a_i.max(b_i);
    if max_ab == 0.0 {
        0.0
    } else {
        (b_i - a_i) / max_ab
    }
}

/// Computes the silhouette score for clustering quality.
///
/// s(i) = (b(i) - a(i)) / max(a(i), b(i))
///
/// where:
/// - a(i) = mean distance to other points in same cluster
/// - b(i) = mean distance to points in nearest other cluster
///
/// Points in singleton clusters score 0. Labels need not be contiguous.
///
/// # Examples
///
/// ```
/// use symnmf::metrics::silhouette_score;
/// use symnmf::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     0.1, 0.1,
///     5.0, 5.0,
///     5.1, 5.1,
/// ]).expect("Matrix dimensions and data length are valid");
/// let labels = vec![0, 0, 1, 1];
/// let score = silhouette_score(&data, &labels).expect("two clusters");
/// assert!(score > 0.5);
/// ```
///
/// # Errors
///
/// Returns an error if `labels` does not have one entry per row, or the
/// number of distinct labels is not in `2..=n-1`.
pub fn silhouette_score(data: &Matrix<f64>, labels: &[usize]) -> Result<f64> {
    let n_samples = data.n_rows();
    if labels.len() != n_samples {
        return Err(SymnmfError::dimension_mismatch(
            "labels",
            (n_samples, 1),
            (labels.len(), 1),
        ));
    }

    let mut clusters = labels.to_vec();
    clusters.sort_unstable();
    clusters.dedup();
    let n_clusters = clusters.len();

    if n_clusters < 2 || n_clusters >= n_samples {
        return Err(SymnmfError::InvalidHyperparameter {
            param: "distinct labels".to_string(),
            value: n_clusters.to_string(),
            constraint: format!("2 <= labels <= {}", n_samples.saturating_sub(1)),
        });
    }

    let total: f64 = (0..n_samples)
        .map(|i| {
            let cluster = labels[i];
            match mean_intra_cluster_distance(data, i, cluster, labels) {
                Some(a_i) => {
                    let b_i = min_inter_cluster_distance(data, i, cluster, labels, &clusters);
                    silhouette_coefficient(a_i, b_i)
                }
                None => 0.0,
            }
        })
        .sum();

    Ok(total / n_samples as f64)
}

#[cfg(test)]
#[path = "tests_clustering_contract.rs"]
mod tests_clustering_contract;
