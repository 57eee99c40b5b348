// =========================================================================
// FALSIFY-AF: Affinity construction contract (sym / ddg / norm)
//
// References:
//   - Kuang, Ding, Park (2012) "Symmetric Nonnegative Matrix Factorization
//     for Graph Clustering"
//   - Ng, Jordan, Weiss (2001) "On Spectral Clustering: Analysis and an algorithm"
// =========================================================================

use super::*;

/// FALSIFY-AF-001: Similarity is symmetric with a zero diagonal
#[test]
fn falsify_af_001_similarity_symmetric_zero_diagonal() {
    let x = Matrix::from_vec(4, 3, (0..12).map(|i| f64::from(i) * 0.25).collect())
        .expect("valid");
    let a = sym(&x).expect("valid points");

    for i in 0..4 {
        assert_eq!(a.get(i, i), 0.0, "FALSIFIED AF-001: A[{i},{i}] != 0");
        for j in 0..4 {
            assert_eq!(
                a.get(i, j),
                a.get(j, i),
                "FALSIFIED AF-001: A[{i},{j}] != A[{j},{i}]"
            );
        }
    }
}

/// FALSIFY-AF-002: Off-diagonal similarity lies in (0, 1]
#[test]
fn falsify_af_002_similarity_range() {
    let x = Matrix::from_vec(3, 2, vec![0.0, 0.0, 0.5, 0.5, 1.0, -1.0]).expect("valid");
    let a = sym(&x).expect("valid points");

    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                let v = a.get(i, j);
                assert!(
                    v > 0.0 && v <= 1.0,
                    "FALSIFIED AF-002: A[{i},{j}]={v} outside (0,1]"
                );
            }
        }
    }
}

/// FALSIFY-AF-003: n=2 normalization always yields [[0,1],[1,0]]
#[test]
fn falsify_af_003_two_node_normalization() {
    for weight in [1e-300, 3.7e-6, 0.25, 0.5, 1.0] {
        let a = Matrix::from_vec(2, 2, vec![0.0, weight, weight, 0.0]).expect("valid");
        let d = ddg(&a).expect("square");
        let w = norm(&a, &d).expect("non-zero degree");

        assert_eq!(
            w.as_slice(),
            &[0.0, 1.0, 1.0, 0.0],
            "FALSIFIED AF-003: weight={weight} gave {:?}",
            w.as_slice()
        );
    }
}

/// FALSIFY-AF-004: Normalization identity W[i][j] = A[i][j] / sqrt(D[i][i]·D[j][j])
#[test]
fn falsify_af_004_normalization_identity() {
    let x = Matrix::from_vec(3, 2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).expect("valid");
    let a = sym(&x).expect("valid points");
    let d = ddg(&a).expect("square");
    let w = norm(&a, &d).expect("no isolated points");

    for i in 0..3 {
        for j in 0..3 {
            let expected = a.get(i, j) / (d.get(i, i) * d.get(j, j)).sqrt();
            assert!(
                (w.get(i, j) - expected).abs() < 1e-14,
                "FALSIFIED AF-004: W[{i},{j}]={} != {expected}",
                w.get(i, j)
            );
        }
    }
}

mod affinity_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    fn point_set(n: usize, d: usize, seed: u32) -> Matrix<f64> {
        let data: Vec<f64> = (0..n * d)
            .map(|i| ((i as f64 + f64::from(seed)) * 0.37).sin() * 2.0)
            .collect();
        Matrix::from_vec(n, d, data).expect("valid")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// FALSIFY-AF-001-prop: Similarity symmetric with zero diagonal
        #[test]
        fn falsify_af_001_prop_symmetry(
            n in 1..=10usize,
            d in 1..=4usize,
            seed in 0..500u32,
        ) {
            let a = sym(&point_set(n, d, seed)).expect("valid points");
            for i in 0..n {
                prop_assert_eq!(a.get(i, i), 0.0, "FALSIFIED AF-001-prop: diagonal");
            }
            prop_assert!(a.is_symmetric(0.0), "FALSIFIED AF-001-prop: asymmetric");
        }

        /// FALSIFY-AF-005-prop: Degree diagonal equals row sums, off-diagonal zero
        #[test]
        fn falsify_af_005_prop_degree(
            n in 1..=10usize,
            d in 1..=4usize,
            seed in 0..500u32,
        ) {
            let a = sym(&point_set(n, d, seed)).expect("valid points");
            let deg = ddg(&a).expect("square");
            for i in 0..n {
                let row_sum: f64 = a.row(i).iter().sum();
                prop_assert_eq!(deg.get(i, i), row_sum, "FALSIFIED AF-005-prop: D[{},{}]", i, i);
                for j in 0..n {
                    if i != j {
                        prop_assert_eq!(deg.get(i, j), 0.0, "FALSIFIED AF-005-prop: off-diagonal");
                    }
                }
            }
        }

        /// FALSIFY-AF-006-prop: W is symmetric for points with no isolated member
        #[test]
        fn falsify_af_006_prop_normalized_symmetric(
            n in 2..=10usize,
            d in 1..=4usize,
            seed in 0..500u32,
        ) {
            let w = normalized_similarity(&point_set(n, d, seed)).expect("points are close");
            prop_assert!(w.is_symmetric(0.0), "FALSIFIED AF-006-prop: W asymmetric");
            for i in 0..n {
                prop_assert_eq!(w.get(i, i), 0.0, "FALSIFIED AF-006-prop: diagonal");
            }
        }
    }
}
