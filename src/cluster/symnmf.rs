//! Damped multiplicative-update factorization `W ≈ H·Hᵗ`.
//!
//! # Algorithm
//!
//! Each iteration computes
//!
//! ```text
//! H_next = H ∘ (1 − β + β · (W·H) ⊘ (H·Hᵗ·H))
//! ```
//!
//! then commits `H_next` as the active `H`. The loop stops after the first
//! update whose squared Frobenius step `‖H_next − H‖²` falls below
//! `epsilon`, or after `max_iter` updates.
//!
//! # References
//!
//! - Kuang, Ding, Park (2012) "Symmetric Nonnegative Matrix Factorization
//!   for Graph Clustering"

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;
use serde::Serialize;

/// Maximum number of update steps.
pub const MAX_ITER: usize = 300;

/// Convergence threshold on the squared Frobenius step.
pub const EPSILON: f64 = 1e-4;

/// Damping factor; 1.0 would be the undamped multiplicative update.
pub const BETA: f64 = 0.5;

/// Why the update loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConvergenceStatus {
    /// The last step was smaller than `epsilon`.
    Converged,
    /// `max_iter` updates ran without convergence.
    MaxIterations,
}

/// Fixed iteration parameters.
///
/// `Default` yields [`MAX_ITER`], [`EPSILON`] and [`BETA`]. The builders
/// are crate-internal so that only tests vary them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorizationParams {
    pub(crate) max_iter: usize,
    pub(crate) epsilon: f64,
    pub(crate) beta: f64,
}

impl Default for FactorizationParams {
    fn default() -> Self {
        Self {
            max_iter: MAX_ITER,
            epsilon: EPSILON,
            beta: BETA,
        }
    }
}

impl FactorizationParams {
    /// Maximum number of update steps.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Convergence threshold.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Damping factor.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[must_use]
    #[cfg(test)]
    pub(crate) fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    #[must_use]
    #[cfg(test)]
    pub(crate) fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    #[cfg(test)]
    pub(crate) fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}

/// Outcome of a factorization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factorization {
    /// Final factor matrix (n×k).
    pub h: Matrix<f64>,
    /// Number of update steps performed.
    pub n_iter: usize,
    /// Squared Frobenius norm of the last step.
    pub delta: f64,
    /// Why the loop stopped.
    pub status: ConvergenceStatus,
}

impl Factorization {
    /// Returns true if the loop stopped on the convergence threshold.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

/// Factorizes `w` starting from `h_init` with the fixed default parameters
/// and returns the final `H`.
///
/// Reaching [`MAX_ITER`] without convergence is not an error; use
/// [`factorize`] to tell the two outcomes apart.
///
/// # Examples
///
/// ```
/// use symnmf::cluster::symnmf;
/// use symnmf::primitives::Matrix;
///
/// let w = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let h_init = Matrix::from_vec(2, 1, vec![0.5, 0.8]).unwrap();
/// let h = symnmf(&w, &h_init).unwrap();
/// assert_eq!(h.shape(), (2, 1));
/// ```
///
/// # Errors
///
/// See [`factorize`].
pub fn symnmf(w: &Matrix<f64>, h_init: &Matrix<f64>) -> Result<Matrix<f64>> {
    factorize(w, h_init, &FactorizationParams::default()).map(|f| f.h)
}

/// Runs the damped multiplicative update and reports how it stopped.
///
/// # Errors
///
/// - [`SymnmfError::InvalidDimension`] if `w` is empty or `h_init` has no
///   columns.
/// - [`SymnmfError::DimensionMismatch`] if `w` is not square or `h_init`
///   does not have `w`'s row count.
/// - [`SymnmfError::NegativeFactor`] if `h_init` has a negative, NaN or
///   infinite entry.
/// - [`SymnmfError::ZeroDenominator`] if an entry of `H·Hᵗ·H` is exactly
///   zero in some iteration.
pub fn factorize(
    w: &Matrix<f64>,
    h_init: &Matrix<f64>,
    params: &FactorizationParams,
) -> Result<Factorization> {
    validate(w, h_init)?;

    let mut h = h_init.clone();
    let mut n_iter = 0;
    let mut delta = f64::INFINITY;
    let mut status = ConvergenceStatus::MaxIterations;

    while n_iter < params.max_iter {
        n_iter += 1;
        let h_next = update_step(w, &h, params.beta, n_iter)?;

        delta = h_next.squared_diff(&h)?;
        let converged = delta < params.epsilon;
        tracing::trace!(iteration = n_iter, delta, "symnmf update");

        // The converging step is committed too.
        h = h_next;
        if converged {
            status = ConvergenceStatus::Converged;
            break;
        }
    }

    match status {
        ConvergenceStatus::Converged => {
            tracing::debug!(n_iter, delta, "symnmf converged");
        }
        ConvergenceStatus::MaxIterations => {
            tracing::warn!(
                n_iter,
                delta,
                epsilon = params.epsilon,
                "symnmf reached iteration cap without converging"
            );
        }
    }

    Ok(Factorization {
        h,
        n_iter,
        delta,
        status,
    })
}

/// Computes one candidate update from the current `h`.
///
/// All intermediates are dropped when this returns, on success or error.
fn update_step(
    w: &Matrix<f64>,
    h: &Matrix<f64>,
    beta: f64,
    iteration: usize,
) -> Result<Matrix<f64>> {
    let wh = w.matmul(h)?;
    let hht = h.matmul(&h.transpose()?)?;
    let hhth = hht.matmul(h)?;

    let (n, k) = h.shape();
    let mut h_next = Matrix::zeros(n, k)?;
    for i in 0..n {
        for j in 0..k {
            let denom = hhth.get(i, j);
            if denom == 0.0 {
                return Err(SymnmfError::ZeroDenominator {
                    row: i,
                    col: j,
                    iteration,
                });
            }
            let ratio = wh.get(i, j) / denom;
            h_next.set(i, j, h.get(i, j) * (1.0 - beta + beta * ratio));
        }
    }

    Ok(h_next)
}

fn validate(w: &Matrix<f64>, h_init: &Matrix<f64>) -> Result<()> {
    let (n, cols) = w.shape();
    if n == 0 {
        return Err(SymnmfError::empty_input("normalized matrix"));
    }
    if cols != n {
        return Err(SymnmfError::dimension_mismatch(
            "normalized matrix",
            (n, n),
            (n, cols),
        ));
    }

    let (h_rows, k) = h_init.shape();
    if h_rows != n {
        return Err(SymnmfError::dimension_mismatch(
            "initial factor",
            (n, k),
            (h_rows, k),
        ));
    }
    if k == 0 {
        return Err(SymnmfError::empty_input("initial factor has no columns"));
    }

    for i in 0..n {
        for (j, &value) in h_init.row(i).iter().enumerate() {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SymnmfError::NegativeFactor { row: i, col: j, value });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "symnmf_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_symnmf_contract.rs"]
mod tests_symnmf_contract;
