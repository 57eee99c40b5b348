//! Similarity graph construction.
//!
//! Turns a point set into the normalized affinity matrix that SymNMF
//! factorizes:
//!
//! ```text
//! X (n×d) --sym--> A (n×n) --ddg--> D (n×n) --norm(A, D)--> W (n×n)
//! ```
//!
//! Each stage is a pure function: identical inputs give bit-identical
//! outputs.

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;

/// Builds the Gaussian-kernel similarity matrix of a point set.
///
/// `A[i][j] = exp(-‖xᵢ - xⱼ‖² / 2)` for `i != j`; the diagonal is zero.
///
/// # Examples
///
/// ```
/// use symnmf::affinity::sym;
/// use symnmf::primitives::Matrix;
///
/// let x = Matrix::from_rows(&[vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
/// let a = sym(&x).unwrap();
/// assert_eq!(a.get(0, 0), 0.0);
/// assert!((a.get(0, 1) - (-12.5_f64).exp()).abs() < 1e-15);
/// ```
///
/// # Errors
///
/// Returns [`SymnmfError::InvalidDimension`] if `x` has no rows or no
/// columns.
pub fn sym(x: &Matrix<f64>) -> Result<Matrix<f64>> {
    let (n, d) = x.shape();
    if n == 0 || d == 0 {
        return Err(SymnmfError::InvalidDimension {
            message: format!("point set is {n}x{d}, need n >= 1 and d >= 1"),
        });
    }

    let mut a = Matrix::zeros(n, n)?;
    for i in 0..n {
        let xi = x.row(i);
        for j in (i + 1)..n {
            let dist_sq: f64 = xi
                .iter()
                .zip(x.row(j))
                .map(|(p, q)| {
                    let diff = p - q;
                    diff * diff
                })
                .sum();
            let similarity = (-dist_sq / 2.0).exp();
            a.set(i, j, similarity);
            a.set(j, i, similarity);
        }
    }

    Ok(a)
}

/// Builds the diagonal degree matrix: `D[i][i] = Σⱼ A[i][j]`.
///
/// # Errors
///
/// Returns an error if `a` is empty or not square.
pub fn ddg(a: &Matrix<f64>) -> Result<Matrix<f64>> {
    let n = check_square(a, "similarity matrix")?;

    let mut d = Matrix::zeros(n, n)?;
    for i in 0..n {
        d.set(i, i, a.row(i).iter().sum());
    }

    Ok(d)
}

/// Builds the normalized similarity matrix
/// `W[i][j] = A[i][j] / √(D[i][i] · D[j][j])`.
///
/// `d` is only read; the square roots of its diagonal are kept in a local
/// scratch vector.
///
/// # Errors
///
/// - [`SymnmfError::SingularDegree`] if some `D[i][i]` is exactly zero
///   (an isolated point).
/// - A shape error if `a` and `d` are not both `n×n`.
pub fn norm(a: &Matrix<f64>, d: &Matrix<f64>) -> Result<Matrix<f64>> {
    let n = check_square(a, "similarity matrix")?;
    if d.shape() != (n, n) {
        return Err(SymnmfError::dimension_mismatch(
            "degree matrix",
            (n, n),
            d.shape(),
        ));
    }

    let mut degrees = Vec::with_capacity(n);
    let mut roots = Vec::with_capacity(n);
    for i in 0..n {
        let degree = d.get(i, i);
        if degree == 0.0 {
            return Err(SymnmfError::SingularDegree { index: i });
        }
        degrees.push(degree);
        roots.push(degree.sqrt());
    }

    let mut w = Matrix::zeros(n, n)?;
    for i in 0..n {
        for j in 0..n {
            // √(dᵢ·dⱼ) is exactly dᵢ when both degrees match
            let scale = if degrees[i] == degrees[j] {
                degrees[i]
            } else {
                roots[i] * roots[j]
            };
            w.set(i, j, a.get(i, j) / scale);
        }
    }

    Ok(w)
}

/// Runs `sym`, `ddg` and `norm` in sequence.
///
/// # Errors
///
/// Propagates any error from the three stages.
pub fn normalized_similarity(x: &Matrix<f64>) -> Result<Matrix<f64>> {
    let a = sym(x)?;
    let d = ddg(&a)?;
    norm(&a, &d)
}

fn check_square(m: &Matrix<f64>, context: &str) -> Result<usize> {
    let (rows, cols) = m.shape();
    if rows == 0 {
        return Err(SymnmfError::empty_input(context));
    }
    if rows != cols {
        return Err(SymnmfError::dimension_mismatch(
            context,
            (rows, rows),
            (rows, cols),
        ));
    }
    Ok(rows)
}


#[cfg(test)]
#[path = "tests_affinity_contract.rs"]
mod tests_affinity_contract;
