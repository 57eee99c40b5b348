//! Text rendering of results.

use crate::analysis::AnalysisReport;
use crate::primitives::Matrix;

/// Renders a matrix as comma-separated rows with 4 decimal places.
///
/// # Examples
///
/// ```
/// use symnmf::output::format_matrix;
/// use symnmf::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// assert_eq!(format_matrix(&m), "0.0000,1.0000\n1.0000,0.0000\n");
/// ```
#[must_use]
pub fn format_matrix(m: &Matrix<f64>) -> String {
    let mut out = String::new();
    for i in 0..m.n_rows() {
        let line = m
            .row(i)
            .iter()
            .map(|v| format!("{v:.4}"))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders both silhouette scores, one per line.
#[must_use]
pub fn format_analysis(report: &AnalysisReport) -> String {
    format!("nmf: {:.4}\nkmeans: {:.4}\n", report.nmf, report.kmeans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix_rounding() {
        let m = Matrix::from_vec(1, 3, vec![0.123_449, 2.0, 1.0 / 3.0]).unwrap();
        assert_eq!(format_matrix(&m), "0.1234,2.0000,0.3333\n");
    }

    #[test]
    fn test_format_matrix_scientific_inputs() {
        let m = Matrix::from_vec(1, 2, vec![(-12.5_f64).exp(), 12_345.678_91]).unwrap();
        assert_eq!(format_matrix(&m), "0.0000,12345.6789\n");
    }

    #[test]
    fn test_format_empty_matrix() {
        let m = Matrix::zeros(0, 3).unwrap();
        assert_eq!(format_matrix(&m), "");
    }

    #[test]
    fn test_format_analysis() {
        let report = AnalysisReport {
            nmf: 0.123_456,
            kmeans: -0.5,
        };
        assert_eq!(format_analysis(&report), "nmf: 0.1235\nkmeans: -0.5000\n");
    }
}
