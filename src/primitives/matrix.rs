//! Matrix type for 2D numeric data.

use crate::error::{Result, SymnmfError};
use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// Storage is a single contiguous buffer plus row/column extents.
///
/// # Examples
///
/// ```
/// use symnmf::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(SymnmfError::InvalidDimension {
                message: format!(
                    "data length {} does not equal {rows}x{cols}",
                    data.len()
                ),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the rows are empty, or the
    /// rows have differing lengths.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let first = rows.first().ok_or_else(|| SymnmfError::empty_input("no rows"))?;
        let cols = first.len();
        if cols == 0 {
            return Err(SymnmfError::empty_input("rows have no columns"));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SymnmfError::InvalidDimension {
                    message: format!("row {i} has {} columns, expected {cols}", row.len()),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Converts the matrix back into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns true if the matrix has as many rows as columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row_idx` is out of bounds.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    ///
    /// # Errors
    ///
    /// Returns [`SymnmfError::AllocationFailure`] if `rows * cols`
    /// overflows or the buffer cannot be reserved.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let failure = || SymnmfError::AllocationFailure { rows, cols };
        let len = rows.checked_mul(cols).ok_or_else(failure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| failure())?;
        data.resize(len, 0.0);

        Ok(Self { data, rows, cols })
    }

    /// Creates an identity matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    pub fn eye(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        Ok(m)
    }

    /// Transposes the matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be allocated.
    pub fn transpose(&self) -> Result<Self> {
        let mut t = Self::zeros(self.cols, self.rows)?;
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Ok(t)
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match or the result cannot be
    /// allocated.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(SymnmfError::dimension_mismatch(
                "matmul rhs",
                (self.cols, other.cols),
                other.shape(),
            ));
        }

        let mut result = Self::zeros(self.rows, other.cols)?;
        for i in 0..self.rows {
            let lhs = self.row(i);
            for j in 0..other.cols {
                let mut sum = 0.0;
                for (l, &a) in lhs.iter().enumerate() {
                    sum += a * other.data[l * other.cols + j];
                }
                result.data[i * other.cols + j] = sum;
            }
        }

        Ok(result)
    }

    /// Sum of squared element-wise differences (squared Frobenius norm of
    /// `self - other`). Not normalized by matrix size.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    pub fn squared_diff(&self, other: &Self) -> Result<f64> {
        if self.shape() != other.shape() {
            return Err(SymnmfError::dimension_mismatch(
                "squared_diff",
                self.shape(),
                other.shape(),
            ));
        }

        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let diff = a - b;
                diff * diff
            })
            .sum())
    }

    /// Mean of all entries, or 0.0 for an empty matrix.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Returns true if the matrix is square and `|A[i][j] - A[j][i]| <= tol`.
    #[must_use]
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
