//! K-Means clustering, used as the baseline in the comparison analysis.

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;

/// K-Means clustering algorithm.
///
/// Lloyd's algorithm with centroids seeded from the first `k` samples.
///
/// # Algorithm
///
/// 1. Initialize centroids to the first `k` samples
/// 2. Assign each sample to nearest centroid
/// 3. Update centroids as mean of assigned samples (empty clusters collapse
///    to the zero vector)
/// 4. Repeat until every centroid moves less than `tol` or `max_iter` is hit
///
/// # Examples
///
/// ```
/// use symnmf::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 2.0,
///     8.0, 8.0,
///     1.5, 1.8,
///     5.0, 8.0,
///     1.0, 0.6,
///     9.0, 11.0,
/// ]).unwrap();
///
/// let mut kmeans = KMeans::new(2);
/// kmeans.fit(&data).unwrap();
///
/// let labels = kmeans.predict(&data).unwrap();
/// assert_eq!(labels.len(), 6);
/// ```
///
/// # Performance
///
/// - Time complexity: O(nkdi) where n=samples, k=clusters, d=features, i=iterations
/// - Space complexity: O(nk)
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on centroid movement.
    tol: f64,
    /// Cluster centroids after fitting.
    centroids: Option<Matrix<f64>>,
    /// Number of iterations run.
    n_iter: usize,
}

impl KMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 300,
            tol: 1e-4,
            centroids: None,
            n_iter: 0,
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Returns the cluster centroids, if fitted.
    #[must_use]
    pub fn centroids(&self) -> Option<&Matrix<f64>> {
        self.centroids.as_ref()
    }

    /// Returns the number of iterations run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    fn initial_centroids(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let n_features = x.n_cols();
        let data = x.as_slice()[..self.n_clusters * n_features].to_vec();
        Matrix::from_vec(self.n_clusters, n_features, data)
    }

    /// Assigns each sample to the nearest centroid (first one on ties).
    fn assign_labels(x: &Matrix<f64>, centroids: &Matrix<f64>) -> Vec<usize> {
        (0..x.n_rows())
            .map(|i| {
                let point = x.row(i);
                let mut min_dist = f64::INFINITY;
                let mut min_cluster = 0;

                for k in 0..centroids.n_rows() {
                    let dist = squared_distance(point, centroids.row(k));
                    if dist < min_dist {
                        min_dist = dist;
                        min_cluster = k;
                    }
                }

                min_cluster
            })
            .collect()
    }

    /// Updates centroids as the mean of assigned samples.
    fn update_centroids(&self, x: &Matrix<f64>, labels: &[usize]) -> Result<Matrix<f64>> {
        let n_features = x.n_cols();
        let mut sums = Matrix::zeros(self.n_clusters, n_features)?;
        let mut counts = vec![0usize; self.n_clusters];

        for (i, &label) in labels.iter().enumerate() {
            counts[label] += 1;
            for j in 0..n_features {
                sums.set(label, j, sums.get(label, j) + x.get(i, j));
            }
        }

        for (k, &count) in counts.iter().enumerate() {
            if count > 0 {
                for j in 0..n_features {
                    sums.set(k, j, sums.get(k, j) / count as f64);
                }
            }
        }

        Ok(sums)
    }

    /// Checks if every centroid moved less than `tol`.
    fn centroids_converged(&self, old: &Matrix<f64>, new: &Matrix<f64>) -> bool {
        (0..old.n_rows())
            .all(|k| squared_distance(old.row(k), new.row(k)) < self.tol * self.tol)
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| {
            let diff = p - q;
            diff * diff
        })
        .sum()
}

impl UnsupervisedEstimator for KMeans {
    type Labels = Vec<usize>;

    /// Fits the K-Means model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data is empty
    /// - `n_clusters` is zero or exceeds the number of samples
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let n_samples = x.n_rows();

        if n_samples == 0 || x.n_cols() == 0 {
            return Err(SymnmfError::empty_input("k-means data"));
        }

        if self.n_clusters == 0 || n_samples < self.n_clusters {
            return Err(SymnmfError::invalid_k(
                self.n_clusters,
                format!("1 <= k <= {n_samples}"),
            ));
        }

        let mut centroids = self.initial_centroids(x)?;
        self.n_iter = 0;

        for iter in 0..self.max_iter {
            let labels = Self::assign_labels(x, &centroids);
            let new_centroids = self.update_centroids(x, &labels)?;
            let converged = self.centroids_converged(&centroids, &new_centroids);

            centroids = new_centroids;
            self.n_iter = iter + 1;
            if converged {
                break;
            }
        }

        tracing::debug!(n_iter = self.n_iter, k = self.n_clusters, "k-means finished");
        self.centroids = Some(centroids);

        Ok(())
    }

    /// Predicts cluster labels for new data.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let centroids = self
            .centroids
            .as_ref()
            .ok_or_else(|| SymnmfError::NotFitted("call fit() first".to_string()))?;

        if x.n_cols() != centroids.n_cols() {
            return Err(SymnmfError::dimension_mismatch(
                "k-means features",
                (x.n_rows(), centroids.n_cols()),
                x.shape(),
            ));
        }

        Ok(Self::assign_labels(x, centroids))
    }
}
