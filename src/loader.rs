//! Comma-separated point file reader.
//!
//! One point per line, coordinates separated by `,`. Blank lines are
//! skipped and whitespace around each field is ignored.

use crate::error::{Result, SymnmfError};
use crate::primitives::Matrix;
use std::path::Path;

/// Reads a point file into an n×d matrix.
///
/// # Errors
///
/// Returns [`SymnmfError::FileNotFound`] if `path` does not exist,
/// [`SymnmfError::Io`] if it cannot be read, or any error from
/// [`parse_points`].
pub fn load_points(path: &Path) -> Result<Matrix<f64>> {
    if !path.exists() {
        return Err(SymnmfError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let points = parse_points(&content)?;
    tracing::debug!(
        path = %path.display(),
        n = points.n_rows(),
        d = points.n_cols(),
        "loaded points"
    );
    Ok(points)
}

/// Parses comma-separated numeric rows.
///
/// # Examples
///
/// ```
/// use symnmf::loader::parse_points;
///
/// let x = parse_points("0,0\n3,4\n").unwrap();
/// assert_eq!(x.shape(), (2, 2));
/// ```
///
/// # Errors
///
/// - [`SymnmfError::Parse`] for a field that is not a finite number.
/// - [`SymnmfError::InvalidDimension`] for rows of differing length or
///   input without any rows.
pub fn parse_points(content: &str) -> Result<Matrix<f64>> {
    let mut data = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;

    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_num = line_idx + 1;

        let mut width = 0;
        for field in line.split(',') {
            let field = field.trim();
            let value: f64 = field.parse().map_err(|_| SymnmfError::Parse {
                line: line_num,
                cause: format!("'{field}' is not a number"),
            })?;
            if !value.is_finite() {
                return Err(SymnmfError::Parse {
                    line: line_num,
                    cause: format!("'{field}' is not a finite number"),
                });
            }
            data.push(value);
            width += 1;
        }

        match n_cols {
            None => n_cols = Some(width),
            Some(expected) if expected != width => {
                return Err(SymnmfError::InvalidDimension {
                    message: format!(
                        "line {line_num} has {width} values, expected {expected}"
                    ),
                });
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or_else(|| SymnmfError::empty_input("no points in input"))?;
    Matrix::from_vec(n_rows, n_cols, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_simple() {
        let x = parse_points("0.0,0.0\n3.0,4.0\n").expect("should parse");
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(x.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_whitespace() {
        let x = parse_points("\n 1.5 , -2\n\n3e-1,4\n\n").expect("should parse");
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(x.row(0), &[1.5, -2.0]);
        assert!((x.get(1, 0) - 0.3).abs() < 1e-15);
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let x = parse_points("1,2\r\n3,4\r\n").expect("should parse");
        assert_eq!(x.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_single_column() {
        let x = parse_points("1\n2\n3\n").expect("should parse");
        assert_eq!(x.shape(), (3, 1));
    }

    #[test]
    fn test_parse_non_numeric() {
        match parse_points("1,2\n3,abc\n") {
            Err(SymnmfError::Parse { line, cause }) => {
                assert_eq!(line, 2);
                assert!(cause.contains("abc"));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_field() {
        assert!(matches!(
            parse_points("1,,2\n"),
            Err(SymnmfError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        for content in ["0,0\nnan,1\n1,1\n", "0,0\n1,inf\n", "0,0\n1,-infinity\n"] {
            match parse_points(content) {
                Err(SymnmfError::Parse { line: 2, cause }) => {
                    assert!(cause.contains("finite"), "cause: {cause}");
                }
                other => panic!("expected Parse error on line 2, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_ragged_rows() {
        match parse_points("1,2,3\n4,5\n") {
            Err(SymnmfError::InvalidDimension { message }) => {
                assert!(message.contains("line 2"));
            }
            other => panic!("expected InvalidDimension, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            parse_points(""),
            Err(SymnmfError::InvalidDimension { .. })
        ));
        assert!(matches!(
            parse_points("\n  \n"),
            Err(SymnmfError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_load_points_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "0,0").expect("write");
        writeln!(file, "1,0").expect("write");
        writeln!(file, "0,1").expect("write");

        let x = load_points(file.path()).expect("should load");
        assert_eq!(x.shape(), (3, 2));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            load_points(&path),
            Err(SymnmfError::FileNotFound(_))
        ));
    }
}
