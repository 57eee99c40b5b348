// =========================================================================
// FALSIFY-SIL: Silhouette score contract
//
// References:
//   - Rousseeuw (1987) "Silhouettes: a graphical aid to the interpretation
//     and validation of cluster analysis"
// =========================================================================

use super::*;

fn four_points() -> Matrix<f64> {
    Matrix::from_vec(4, 2, vec![0.0, 0.0, 0.1, 0.1, 5.0, 5.0, 5.1, 5.1]).expect("valid")
}

/// FALSIFY-SIL-001: Score lies in [-1, 1]
#[test]
fn falsify_sil_001_range() {
    let data = four_points();
    for labels in [vec![0, 0, 1, 1], vec![0, 1, 0, 1], vec![0, 1, 1, 0]] {
        let s = silhouette_score(&data, &labels).expect("two clusters");
        assert!(
            (-1.0..=1.0).contains(&s),
            "FALSIFIED SIL-001: score={s} for {labels:?}"
        );
    }
}

/// FALSIFY-SIL-002: Good partition beats a crossed one
#[test]
fn falsify_sil_002_good_beats_bad() {
    let data = four_points();
    let good = silhouette_score(&data, &[0, 0, 1, 1]).expect("two clusters");
    let bad = silhouette_score(&data, &[0, 1, 0, 1]).expect("two clusters");
    assert!(good > bad, "FALSIFIED SIL-002: good={good} <= bad={bad}");
    assert!(good > 0.9, "FALSIFIED SIL-002: good={good} not near 1");
    assert!(bad < 0.0, "FALSIFIED SIL-002: bad={bad} not negative");
}

/// FALSIFY-SIL-003: Singleton clusters contribute 0
#[test]
fn falsify_sil_003_singleton_zero() {
    let data = Matrix::from_vec(3, 1, vec![0.0, 1.0, 10.0]).expect("valid");
    let s = silhouette_score(&data, &[0, 0, 1]).expect("two clusters");

    // a = 1, b = 10 and 9 for the pair; the singleton scores 0
    let expected = ((10.0 - 1.0) / 10.0 + (9.0 - 1.0) / 9.0) / 3.0;
    assert!(
        (s - expected).abs() < 1e-12,
        "FALSIFIED SIL-003: score={s}, expected {expected}"
    );
}

/// FALSIFY-SIL-004: Label ids need not be contiguous
#[test]
fn falsify_sil_004_sparse_labels() {
    let data = four_points();
    let dense = silhouette_score(&data, &[0, 0, 1, 1]).expect("two clusters");
    let sparse = silhouette_score(&data, &[3, 3, 7, 7]).expect("two clusters");
    assert_eq!(dense, sparse, "FALSIFIED SIL-004: {dense} != {sparse}");
}

/// FALSIFY-SIL-005: Degenerate label counts are rejected
#[test]
fn falsify_sil_005_degenerate_labels() {
    let data = four_points();
    assert!(
        silhouette_score(&data, &[0, 0, 0, 0]).is_err(),
        "FALSIFIED SIL-005: one cluster accepted"
    );
    assert!(
        silhouette_score(&data, &[0, 1, 2, 3]).is_err(),
        "FALSIFIED SIL-005: n clusters accepted"
    );
    assert!(
        silhouette_score(&data, &[0, 1]).is_err(),
        "FALSIFIED SIL-005: short labels accepted"
    );
}
