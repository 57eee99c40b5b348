//! Clustering algorithms.
//!
//! [`SymNmf`] runs the full pipeline (similarity, normalization,
//! factorization) and assigns each point to its strongest factor column.
//! [`KMeans`] is the hard-clustering baseline used by the analysis.

mod init;
mod kmeans;
mod symnmf;

pub use init::{initialize_h, DEFAULT_SEED};
pub use kmeans::KMeans;
pub use symnmf::{
    factorize, symnmf, ConvergenceStatus, Factorization, FactorizationParams, BETA, EPSILON,
    MAX_ITER,
};

use crate::affinity::normalized_similarity;
use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;

/// Hard labels from a factor matrix: the column of each row's largest entry.
///
/// Ties go to the lowest column index.
#[must_use]
pub fn hard_labels(h: &Matrix<f64>) -> Vec<usize> {
    (0..h.n_rows())
        .map(|i| {
            let mut best = 0;
            for (j, &v) in h.row(i).iter().enumerate() {
                if v > h.get(i, best) {
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Symmetric Non-negative Matrix Factorization clustering.
///
/// # Algorithm
///
/// 1. Build the Gaussian similarity `A`, degree `D` and normalized `W`
/// 2. Seed `H` uniformly in `[0, 2·√(mean(W)/k))`
/// 3. Run the damped multiplicative update until convergence or
///    [`MAX_ITER`]
/// 4. Label each point with the argmax of its row of `H`
///
/// SymNMF is transductive: `predict` only answers for the points passed
/// to `fit`.
///
/// # Examples
///
/// ```
/// use symnmf::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0, 0.3, 0.0, 0.0, 0.3,
///     3.0, 3.0, 3.3, 3.0, 3.0, 3.3,
/// ]).unwrap();
///
/// let mut model = SymNmf::new(2).with_seed(1234);
/// model.fit(&data).unwrap();
///
/// let labels = model.predict(&data).unwrap();
/// assert_eq!(labels.len(), 6);
/// assert!(labels.iter().all(|&l| l < 2));
/// ```
#[derive(Debug, Clone)]
pub struct SymNmf {
    /// Number of clusters (rank of `H`).
    n_clusters: usize,
    /// Seed for the initial `H`.
    seed: u64,
    /// Iteration parameters.
    params: FactorizationParams,
    /// Points seen by `fit`.
    points: Option<Matrix<f64>>,
    /// Factorization outcome after fitting.
    factorization: Option<Factorization>,
}

impl SymNmf {
    /// Creates a new SymNMF model with `n_clusters` factor columns.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            seed: DEFAULT_SEED,
            params: FactorizationParams::default(),
            points: None,
            factorization: None,
        }
    }

    /// Sets the seed for the initial factor matrix.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_params(mut self, params: FactorizationParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Returns the factorization report, if fitted.
    #[must_use]
    pub fn factorization(&self) -> Option<&Factorization> {
        self.factorization.as_ref()
    }

    /// Returns the fitted factor matrix `H`, if fitted.
    #[must_use]
    pub fn factors(&self) -> Option<&Matrix<f64>> {
        self.factorization.as_ref().map(|f| &f.h)
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.factorization.is_some()
    }
}

impl UnsupervisedEstimator for SymNmf {
    type Labels = Vec<usize>;

    /// Fits the factorization to the points `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `k` is not in `1..n`, or any pipeline stage
    /// fails (isolated point, zero denominator, ...).
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let n_samples = x.n_rows();
        if self.n_clusters == 0 || self.n_clusters >= n_samples {
            return Err(SymnmfError::invalid_k(
                self.n_clusters,
                format!("1 <= k < {n_samples}"),
            ));
        }

        let w = normalized_similarity(x)?;
        let h_init = initialize_h(&w, self.n_clusters, self.seed)?;
        let result = factorize(&w, &h_init, &self.params)?;

        tracing::info!(
            n_samples,
            k = self.n_clusters,
            n_iter = result.n_iter,
            status = ?result.status,
            "symnmf fitted"
        );

        self.points = Some(x.clone());
        self.factorization = Some(result);
        Ok(())
    }

    /// Returns the hard labels of the fitted points.
    ///
    /// # Errors
    ///
    /// Returns [`SymnmfError::NotFitted`] before `fit`, or when `x` differs
    /// from the fitted points.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let (Some(points), Some(result)) = (&self.points, &self.factorization) else {
            return Err(SymnmfError::NotFitted("call fit() first".to_string()));
        };
        if points != x {
            return Err(SymnmfError::NotFitted(
                "SymNMF only labels the points it was fitted on".to_string(),
            ));
        }
        Ok(hard_labels(&result.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> Matrix<f64> {
        Matrix::from_vec(
            6,
            2,
            vec![0.0, 0.0, 0.3, 0.0, 0.0, 0.3, 3.0, 3.0, 3.3, 3.0, 3.0, 3.3],
        )
        .unwrap()
    }

    #[test]
    fn test_hard_labels() {
        let h = Matrix::from_vec(3, 3, vec![0.1, 0.7, 0.2, 0.9, 0.0, 0.1, 0.2, 0.2, 0.5]).unwrap();
        assert_eq!(hard_labels(&h), vec![1, 0, 2]);
    }

    #[test]
    fn test_hard_labels_tie_goes_to_first() {
        let h = Matrix::from_vec(1, 3, vec![0.4, 0.4, 0.4]).unwrap();
        assert_eq!(hard_labels(&h), vec![0]);
    }

    #[test]
    fn test_new() {
        let model = SymNmf::new(3);
        assert_eq!(model.n_clusters(), 3);
        assert!(!model.is_fitted());
        assert!(model.factors().is_none());
    }

    #[test]
    fn test_fit_shapes() {
        let mut model = SymNmf::new(2);
        model.fit(&sample_data()).unwrap();

        assert!(model.is_fitted());
        assert_eq!(model.factors().unwrap().shape(), (6, 2));
        let report = model.factorization().unwrap();
        assert!(report.n_iter >= 1 && report.n_iter <= MAX_ITER);
    }

    #[test]
    fn test_factors_non_negative() {
        let mut model = SymNmf::new(2).with_seed(99);
        model.fit(&sample_data()).unwrap();
        assert!(model.factors().unwrap().as_slice().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_labels_in_range() {
        let data = sample_data();
        let mut model = SymNmf::new(2);
        let labels = model.fit_predict(&data).unwrap();
        assert_eq!(labels.len(), 6);
        assert!(labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let data = sample_data();
        let mut a = SymNmf::new(2).with_seed(7);
        let mut b = SymNmf::new(2).with_seed(7);
        a.fit(&data).unwrap();
        b.fit(&data).unwrap();
        assert_eq!(a.factors(), b.factors());
    }

    #[test]
    fn test_k_must_be_below_n() {
        let data = sample_data();
        for k in [0, 6, 7] {
            let mut model = SymNmf::new(k);
            assert!(matches!(
                model.fit(&data),
                Err(SymnmfError::InvalidHyperparameter { .. })
            ));
        }
    }

    #[test]
    fn test_isolated_point_fails() {
        let data = Matrix::from_vec(3, 1, vec![0.0, 0.1, 500.0]).unwrap();
        let mut model = SymNmf::new(1);
        assert!(matches!(
            model.fit(&data),
            Err(SymnmfError::SingularDegree { index: 2 })
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_predict_before_fit() {
        let model = SymNmf::new(2);
        assert!(matches!(
            model.predict(&sample_data()),
            Err(SymnmfError::NotFitted(_))
        ));
    }

    #[test]
    fn test_predict_other_points_rejected() {
        let mut model = SymNmf::new(2);
        model.fit(&sample_data()).unwrap();
        let other = Matrix::from_vec(6, 2, vec![1.0; 12]).unwrap();
        assert!(model.predict(&other).is_err());
    }

    #[test]
    fn test_custom_params_respected() {
        let params = FactorizationParams::default()
            .with_max_iter(3)
            .with_epsilon(0.0);
        let mut model = SymNmf::new(2).with_params(params);
        model.fit(&sample_data()).unwrap();

        let report = model.factorization().unwrap();
        assert_eq!(report.n_iter, 3);
        assert_eq!(report.status, ConvergenceStatus::MaxIterations);
    }
}
