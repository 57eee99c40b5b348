//! Core trait for clustering estimators.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for unsupervised learning models.
///
/// # Examples
///
/// ```
/// use symnmf::prelude::*;
///
/// // Create data with 2 clear clusters
/// let data = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0, 0.1, 0.1, 0.2, 0.0,  // Cluster 1
///     10.0, 10.0, 10.1, 10.1, 10.0, 10.2,  // Cluster 2
/// ]).unwrap();
///
/// let mut kmeans = KMeans::new(2);
/// kmeans.fit(&data).unwrap();
/// let labels = kmeans.predict(&data).unwrap();
/// assert_eq!(labels.len(), 6);
/// ```
pub trait UnsupervisedEstimator {
    /// The type of labels/clusters produced.
    type Labels;

    /// Fits the model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (empty data, invalid parameters, etc.).
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Predicts cluster assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or `x` has the wrong shape.
    fn predict(&self, x: &Matrix<f64>) -> Result<Self::Labels>;

    /// Fits the model and predicts on the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting or prediction fails.
    fn fit_predict(&mut self, x: &Matrix<f64>) -> Result<Self::Labels> {
        self.fit(x)?;
        self.predict(x)
    }
}
