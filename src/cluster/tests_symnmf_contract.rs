// =========================================================================
// FALSIFY-NMF: Damped multiplicative update contract
//
// References:
//   - Kuang, Ding, Park (2012) "Symmetric Nonnegative Matrix Factorization
//     for Graph Clustering"
//   - Lee, Seung (2001) "Algorithms for Non-negative Matrix Factorization"
// =========================================================================

use super::*;
use crate::affinity::normalized_similarity;
use crate::cluster::{initialize_h, DEFAULT_SEED};

fn two_blobs() -> Matrix<f64> {
    Matrix::from_vec(
        6,
        2,
        vec![0.0, 0.0, 0.4, 0.1, 0.1, 0.3, 5.0, 5.0, 5.2, 4.9, 4.8, 5.1],
    )
    .expect("valid")
}

fn seeded_problem(k: usize) -> (Matrix<f64>, Matrix<f64>) {
    let w = normalized_similarity(&two_blobs()).expect("valid points");
    let h_init = initialize_h(&w, k, DEFAULT_SEED).expect("valid W");
    (w, h_init)
}

/// FALSIFY-NMF-001: Non-negative W and H_init give a non-negative H
#[test]
fn falsify_nmf_001_non_negative() {
    let (w, h_init) = seeded_problem(2);
    let result = factorize(&w, &h_init, &FactorizationParams::default()).expect("valid");

    for (idx, &v) in result.h.as_slice().iter().enumerate() {
        assert!(v >= 0.0, "FALSIFIED NMF-001: H[{idx}] = {v} < 0");
    }
}

/// Runs the update loop by hand and checks every iterate, not just the last.
fn assert_iterates_non_negative(w: &Matrix<f64>, h_init: &Matrix<f64>) -> usize {
    let mut h = h_init.clone();
    for iteration in 1..=MAX_ITER {
        let h_next = update_step(w, &h, BETA, iteration).expect("positive denominators");
        for (idx, &v) in h_next.as_slice().iter().enumerate() {
            assert!(
                v >= 0.0 && v.is_finite(),
                "FALSIFIED NMF-001: iterate {iteration} H[{idx}] = {v}"
            );
        }
        let delta = h_next.squared_diff(&h).expect("same shape");
        h = h_next;
        if delta < EPSILON {
            return iteration;
        }
    }
    MAX_ITER
}

/// FALSIFY-NMF-001b: Every intermediate H stays non-negative and finite
#[test]
fn falsify_nmf_001b_every_iterate_non_negative() {
    let (w, h_init) = seeded_problem(2);
    let steps = assert_iterates_non_negative(&w, &h_init);

    let result = factorize(&w, &h_init, &FactorizationParams::default()).expect("valid");
    assert_eq!(steps, result.n_iter, "FALSIFIED NMF-001b: step count differs");

    // Capped runs expose each intermediate H through the public API as well
    for t in 1..=result.n_iter {
        let partial = factorize(
            &w,
            &h_init,
            &FactorizationParams::default().with_max_iter(t),
        )
        .expect("valid");
        assert!(
            partial.h.as_slice().iter().all(|&v| v >= 0.0 && v.is_finite()),
            "FALSIFIED NMF-001b: H after {t} updates has a negative entry"
        );
    }
}

/// FALSIFY-NMF-002: At most MAX_ITER updates, exactly MAX_ITER on the cap
#[test]
fn falsify_nmf_002_bounded_iterations() {
    let (w, h_init) = seeded_problem(2);

    let result = factorize(&w, &h_init, &FactorizationParams::default()).expect("valid");
    assert!(
        result.n_iter >= 1 && result.n_iter <= MAX_ITER,
        "FALSIFIED NMF-002: n_iter = {}",
        result.n_iter
    );

    let never = FactorizationParams::default().with_epsilon(0.0);
    let capped = factorize(&w, &h_init, &never).expect("valid");
    assert_eq!(
        capped.n_iter, MAX_ITER,
        "FALSIFIED NMF-002: cap run stopped after {} updates",
        capped.n_iter
    );
    assert_eq!(capped.status, ConvergenceStatus::MaxIterations);
}

/// FALSIFY-NMF-003: Converged status implies the last step is below epsilon
#[test]
fn falsify_nmf_003_convergence_threshold() {
    let (w, h_init) = seeded_problem(2);
    let result = factorize(&w, &h_init, &FactorizationParams::default()).expect("valid");

    if result.converged() {
        assert!(
            result.delta < EPSILON,
            "FALSIFIED NMF-003: converged with delta = {}",
            result.delta
        );
    } else {
        assert_eq!(result.n_iter, MAX_ITER, "FALSIFIED NMF-003: early stop");
    }
}

/// FALSIFY-NMF-004: H keeps the shape of H_init
#[test]
fn falsify_nmf_004_shape() {
    for k in 1..=3 {
        let (w, h_init) = seeded_problem(k);
        let h = symnmf(&w, &h_init).expect("valid");
        assert_eq!(h.shape(), (6, k), "FALSIFIED NMF-004: k={k}");
    }
}

/// FALSIFY-NMF-005: Same inputs give bit-identical output
#[test]
fn falsify_nmf_005_deterministic() {
    let (w, h_init) = seeded_problem(2);
    let first = symnmf(&w, &h_init).expect("valid");
    let second = symnmf(&w, &h_init).expect("valid");
    assert_eq!(
        first.as_slice(),
        second.as_slice(),
        "FALSIFIED NMF-005: runs differ"
    );
}

/// FALSIFY-NMF-006: Inputs are left untouched
#[test]
fn falsify_nmf_006_inputs_unchanged() {
    let (w, h_init) = seeded_problem(2);
    let w_before = w.clone();
    let h_before = h_init.clone();

    let _ = symnmf(&w, &h_init).expect("valid");

    assert_eq!(w, w_before, "FALSIFIED NMF-006: W modified");
    assert_eq!(h_init, h_before, "FALSIFIED NMF-006: H_init modified");
}

/// FALSIFY-NMF-007: Well-separated blobs land in different columns
#[test]
fn falsify_nmf_007_separates_blobs() {
    let (w, h_init) = seeded_problem(2);
    let h = symnmf(&w, &h_init).expect("valid");
    let labels = crate::cluster::hard_labels(&h);

    assert!(
        labels[..3].iter().all(|&l| l == labels[0]),
        "FALSIFIED NMF-007: first blob split: {labels:?}"
    );
    assert!(
        labels[3..].iter().all(|&l| l == labels[3]),
        "FALSIFIED NMF-007: second blob split: {labels:?}"
    );
    assert_ne!(labels[0], labels[3], "FALSIFIED NMF-007: blobs merged");
}

mod symnmf_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    fn point_set(n: usize, d: usize, seed: u32) -> Matrix<f64> {
        let data: Vec<f64> = (0..n * d)
            .map(|i| ((i as f64 + f64::from(seed)) * 0.61).cos() * 2.0)
            .collect();
        Matrix::from_vec(n, d, data).expect("valid")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(25))]

        /// FALSIFY-NMF-001-prop: Non-negativity of every iterate for arbitrary point sets
        #[test]
        fn falsify_nmf_001_prop_non_negative(
            n in 2..=9usize,
            d in 1..=3usize,
            seed in 0..1000u32,
            k_offset in 0..8usize,
        ) {
            let k = 1 + k_offset % (n - 1);
            let w = normalized_similarity(&point_set(n, d, seed)).expect("valid points");
            let h_init = initialize_h(&w, k, u64::from(seed)).expect("valid W");
            let steps = assert_iterates_non_negative(&w, &h_init);
            let result = factorize(&w, &h_init, &FactorizationParams::default())
                .expect("valid inputs");

            prop_assert_eq!(steps, result.n_iter);
            prop_assert_eq!(result.h.shape(), (n, k));
            prop_assert!(
                result.h.as_slice().iter().all(|&v| v >= 0.0 && v.is_finite()),
                "FALSIFIED NMF-001-prop: negative or non-finite entry"
            );
            prop_assert!(result.n_iter <= MAX_ITER, "FALSIFIED NMF-002-prop");
        }

        /// FALSIFY-NMF-003-prop: Status agrees with delta and n_iter
        #[test]
        fn falsify_nmf_003_prop_status(
            n in 2..=9usize,
            seed in 0..1000u32,
        ) {
            let w = normalized_similarity(&point_set(n, 2, seed)).expect("valid points");
            let h_init = initialize_h(&w, 1, u64::from(seed)).expect("valid W");
            let result = factorize(&w, &h_init, &FactorizationParams::default())
                .expect("valid inputs");

            match result.status {
                ConvergenceStatus::Converged => {
                    prop_assert!(result.delta < EPSILON, "FALSIFIED NMF-003-prop");
                }
                ConvergenceStatus::MaxIterations => {
                    prop_assert_eq!(result.n_iter, MAX_ITER);
                    prop_assert!(result.delta >= EPSILON, "FALSIFIED NMF-003-prop");
                }
            }
        }
    }
}
