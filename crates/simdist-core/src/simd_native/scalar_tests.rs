#![allow(clippy::float_cmp, clippy::cast_precision_loss)]
//! Tests for the baseline kernels and their tail loops.

use super::scalar::{cosine, cosine_from, dot, dot_from, squared_euclidean, squared_euclidean_from};
use super::CosineSums;

fn naive_dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[test]
fn test_dot_orthogonal_unit_vectors() {
    assert_eq!(dot(&[1.0_f64, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.0]), 0.0);
}

#[test]
fn test_dot_matches_naive_sum_for_every_remainder() {
    for len in 0..=13 {
        let a: Vec<f64> = (0..len).map(|i| i as f64 + 1.0).collect();
        let b: Vec<f64> = (0..len).map(|i| 2.0 - i as f64).collect();
        assert_eq!(dot(&a, &b), naive_dot(&a, &b), "len {len}");
    }
}

#[test]
fn test_cosine_sums_in_one_pass() {
    let a = [1.0_f32, 2.0, 3.0, 4.0, 5.0];
    let b = [5.0_f32, 4.0, 3.0, 2.0, 1.0];
    let sums = cosine(&a, &b);
    assert_eq!(sums.dot, 35.0);
    assert_eq!(sums.norm_a_sq, 55.0);
    assert_eq!(sums.norm_b_sq, 55.0);
}

#[test]
fn test_cosine_of_zero_vector_has_zero_norm() {
    let sums = cosine(&[0.0_f64; 6], &[1.0; 6]);
    assert_eq!(sums.norm_a_sq, 0.0);
    assert_eq!(sums.dot, 0.0);
    assert_eq!(sums.norm_b_sq, 6.0);
}

#[test]
fn test_squared_euclidean_known_values() {
    assert_eq!(squared_euclidean(&[1.0_f64, 0.0, 0.0, 0.0], &[0.0, 1.0, 0.0, 0.0]), 2.0);
    assert_eq!(squared_euclidean(&[3.0_f32, 4.0, 0.0], &[0.0, 0.0, 0.0]), 25.0);
}

#[test]
fn test_squared_euclidean_of_identical_vectors_is_zero() {
    let a = [0.372_f32, 0.0096, 0.1097, 0.0041, 7.5];
    assert_eq!(squared_euclidean(&a, &a), 0.0);
}

#[test]
fn test_from_variants_continue_partial_sum() {
    let a = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let b = [1.0_f64; 7];
    assert_eq!(dot_from(&a, &b, 4, 10.0), 10.0 + 18.0);
    assert_eq!(squared_euclidean_from(&a, &b, 5, 1.0), 1.0 + 25.0 + 36.0);

    let partial = CosineSums {
        dot: 1.0,
        norm_a_sq: 2.0,
        norm_b_sq: 3.0,
    };
    let sums = cosine_from(&a, &b, 6, partial);
    assert_eq!(sums.dot, 8.0);
    assert_eq!(sums.norm_a_sq, 51.0);
    assert_eq!(sums.norm_b_sq, 4.0);
}

#[test]
fn test_from_at_end_returns_partial_unchanged() {
    let a = [1.0_f32, 2.0];
    assert_eq!(dot_from(&a, &a, 2, 3.5), 3.5);
    assert_eq!(squared_euclidean_from(&a, &a, 2, 3.5), 3.5);
}

#[test]
fn test_unequal_lengths_use_common_prefix() {
    assert_eq!(dot(&[1.0_f64, 2.0, 3.0], &[1.0, 1.0]), 3.0);
}

#[test]
fn test_empty_inputs_yield_zero() {
    let empty: [f32; 0] = [];
    assert_eq!(dot(&empty, &empty), 0.0);
    assert_eq!(squared_euclidean(&empty, &empty), 0.0);
    assert_eq!(cosine(&empty, &empty), CosineSums::default());
}
