//! Seeded initialization of the factor matrix.

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 1234;

/// Draws an initial `H` (n×k) for the normalized matrix `w`.
///
/// Every entry is uniform in `[0, 2·√(m/k))`, where `m` is the mean of all
/// entries of `w`.
///
/// # Errors
///
/// Returns an error if `w` is empty or not square, `k == 0`, or the mean of
/// `w` is negative or not finite.
pub fn initialize_h(w: &Matrix<f64>, k: usize, seed: u64) -> Result<Matrix<f64>> {
    let (n, cols) = w.shape();
    if n == 0 {
        return Err(SymnmfError::empty_input("normalized matrix"));
    }
    if n != cols {
        return Err(SymnmfError::dimension_mismatch(
            "normalized matrix",
            (n, n),
            (n, cols),
        ));
    }
    if k == 0 {
        return Err(SymnmfError::invalid_k(k, "k >= 1"));
    }

    let m = w.mean();
    if !m.is_finite() || m < 0.0 {
        return Err(SymnmfError::InvalidDimension {
            message: format!("normalized matrix mean {m} is not a finite non-negative value"),
        });
    }
    let upper = 2.0 * (m / k as f64).sqrt();

    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n * k).map(|_| rng.gen::<f64>() * upper).collect();
    Matrix::from_vec(n, k, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_w() -> Matrix<f64> {
        Matrix::from_vec(3, 3, vec![0.0, 0.6, 0.3, 0.6, 0.0, 0.3, 0.3, 0.3, 0.0]).expect("3x3")
    }

    #[test]
    fn test_shape() {
        let h = initialize_h(&sample_w(), 2, DEFAULT_SEED).expect("valid");
        assert_eq!(h.shape(), (3, 2));
    }

    #[test]
    fn test_bounds() {
        let w = sample_w();
        let k = 2;
        let upper = 2.0 * (w.mean() / k as f64).sqrt();
        let h = initialize_h(&w, k, 7).expect("valid");

        for &v in h.as_slice() {
            assert!(v >= 0.0 && v < upper, "{v} outside [0, {upper})");
        }
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let w = sample_w();
        let h1 = initialize_h(&w, 2, 42).expect("valid");
        let h2 = initialize_h(&w, 2, 42).expect("valid");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_different_seeds_differ() {
        let w = sample_w();
        let h1 = initialize_h(&w, 2, 1).expect("valid");
        let h2 = initialize_h(&w, 2, 2).expect("valid");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_zero_k_rejected() {
        assert!(matches!(
            initialize_h(&sample_w(), 0, DEFAULT_SEED),
            Err(SymnmfError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_non_square_rejected() {
        let w = Matrix::zeros(2, 3).expect("2x3");
        assert!(initialize_h(&w, 1, DEFAULT_SEED).is_err());
    }

    #[test]
    fn test_negative_mean_rejected() {
        let w = Matrix::from_vec(2, 2, vec![0.0, -1.0, -1.0, 0.0]).expect("2x2");
        assert!(matches!(
            initialize_h(&w, 1, DEFAULT_SEED),
            Err(SymnmfError::InvalidDimension { .. })
        ));
    }
}
