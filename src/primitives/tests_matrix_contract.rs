// =========================================================================
// FALSIFY-MX: Matrix primitives contract
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;

/// FALSIFY-MX-001: Transpose involution: (A^T)^T = A
#[test]
fn falsify_mx_001_transpose_involution() {
    let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let att = a
        .transpose()
        .and_then(|t| t.transpose())
        .expect("transpose");

    assert_eq!(att, a, "FALSIFIED MX-001: (A^T)^T != A");
}

/// FALSIFY-MX-002: Transpose swaps shape: (m×n)^T = (n×m)
#[test]
fn falsify_mx_002_transpose_swaps_shape() {
    let a = Matrix::zeros(3, 5).expect("valid");
    let at = a.transpose().expect("transpose");

    assert_eq!(
        at.shape(),
        (5, 3),
        "FALSIFIED MX-002: transpose shape={:?}, expected (5,3)",
        at.shape()
    );
}

/// FALSIFY-MX-003: Matmul shape: (m×k) * (k×n) = (m×n)
#[test]
fn falsify_mx_003_matmul_shape() {
    let a = Matrix::from_vec(2, 3, vec![1.0; 6]).expect("valid");
    let b = Matrix::from_vec(3, 4, vec![1.0; 12]).expect("valid");
    let c = a.matmul(&b).expect("compatible dims");

    assert_eq!(
        c.shape(),
        (2, 4),
        "FALSIFIED MX-003: (2x3)*(3x4) shape={:?}, expected (2,4)",
        c.shape()
    );
}

/// FALSIFY-MX-004: Identity matmul: A * I = A
#[test]
fn falsify_mx_004_identity_matmul() {
    let a =
        Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).expect("valid");
    let eye = Matrix::eye(3).expect("valid");
    let result = a.matmul(&eye).expect("compatible dims");

    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (result.get(i, j) - a.get(i, j)).abs() < 1e-12,
                "FALSIFIED MX-004: (A*I)[{i},{j}]={} != A[{i},{j}]={}",
                result.get(i, j),
                a.get(i, j)
            );
        }
    }
}

/// FALSIFY-MX-005: H * H^T is symmetric
#[test]
fn falsify_mx_005_gram_symmetric() {
    let h = Matrix::from_vec(3, 2, vec![0.3, 1.2, 0.7, 0.1, 2.0, 0.4]).expect("valid");
    let hht = h
        .matmul(&h.transpose().expect("transpose"))
        .expect("compatible dims");

    assert!(
        hht.is_symmetric(1e-12),
        "FALSIFIED MX-005: H*H^T not symmetric"
    );
}

/// FALSIFY-MX-006: squared_diff(A, A) = 0
#[test]
fn falsify_mx_006_squared_diff_self_zero() {
    let a = Matrix::from_vec(2, 2, vec![-1.5, 2.25, 3.0, 1e-3]).expect("valid");
    let d = a.squared_diff(&a).expect("same shape");

    assert_eq!(d, 0.0, "FALSIFIED MX-006: squared_diff(A,A)={d}");
}

mod matrix_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// FALSIFY-MX-001-prop: Transpose involution for random matrices
        #[test]
        fn falsify_mx_001_prop_transpose_involution(
            rows in 1..=8usize,
            cols in 1..=8usize,
            seed in 0..500u32,
        ) {
            let data: Vec<f64> = (0..rows * cols)
                .map(|i| ((i as f64 + f64::from(seed)) * 0.37).sin() * 10.0)
                .collect();
            let a = Matrix::from_vec(rows, cols, data).expect("valid");
            let att = a.transpose().and_then(|t| t.transpose()).expect("transpose");

            prop_assert_eq!(att, a, "FALSIFIED MX-001-prop: (A^T)^T != A");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// FALSIFY-MX-006-prop: squared_diff is symmetric and non-negative
        #[test]
        fn falsify_mx_006_prop_squared_diff_symmetric(
            rows in 1..=6usize,
            cols in 1..=6usize,
            seed in 0..500u32,
        ) {
            let a_data: Vec<f64> = (0..rows * cols)
                .map(|i| ((i as f64 + f64::from(seed)) * 0.37).sin())
                .collect();
            let b_data: Vec<f64> = (0..rows * cols)
                .map(|i| ((i as f64 * 1.3 + f64::from(seed)) * 0.11).cos())
                .collect();
            let a = Matrix::from_vec(rows, cols, a_data).expect("valid");
            let b = Matrix::from_vec(rows, cols, b_data).expect("valid");

            let ab = a.squared_diff(&b).expect("same shape");
            let ba = b.squared_diff(&a).expect("same shape");
            prop_assert!(ab >= 0.0, "FALSIFIED MX-006-prop: negative squared_diff {}", ab);
            prop_assert!((ab - ba).abs() < 1e-12, "FALSIFIED MX-006-prop: {} != {}", ab, ba);
        }
    }
}
