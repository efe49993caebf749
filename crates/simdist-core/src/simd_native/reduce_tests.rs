#![allow(clippy::float_cmp)]
//! Tests for the x86 horizontal sums.

use std::arch::x86_64::*;

use super::reduce::{hsum_m128, hsum_m128d, hsum_m256, hsum_m256d};

#[test]
fn test_hsum_m128_adds_all_lanes() {
    let values = [1.0_f32, 2.0, 3.0, 4.5];
    // SAFETY: SSE3 is present on every x86_64 CPU with SSE4.1; guarded below.
    if is_x86_feature_detected!("sse3") {
        let sum = unsafe { hsum_m128(_mm_loadu_ps(values.as_ptr())) };
        assert_eq!(sum, 10.5);
    }
}

#[test]
fn test_hsum_m128d_adds_both_lanes() {
    let values = [-2.25_f64, 8.0];
    // SAFETY: SSE2 is part of the x86_64 baseline.
    let sum = unsafe { hsum_m128d(_mm_loadu_pd(values.as_ptr())) };
    assert_eq!(sum, 5.75);
}

#[test]
fn test_hsum_m256_adds_all_lanes() {
    if !is_x86_feature_detected!("avx") {
        return;
    }
    let values = [1.0_f32, -1.0, 2.0, -2.0, 3.0, 4.0, 5.0, 0.5];
    // SAFETY: AVX support checked above.
    let sum = unsafe { hsum_m256(_mm256_loadu_ps(values.as_ptr())) };
    assert_eq!(sum, 12.5);
}

#[test]
fn test_hsum_m256d_adds_all_lanes() {
    if !is_x86_feature_detected!("avx") {
        return;
    }
    let values = [0.5_f64, 1.5, -4.0, 10.0];
    // SAFETY: AVX support checked above.
    let sum = unsafe { hsum_m256d(_mm256_loadu_pd(values.as_ptr())) };
    assert_eq!(sum, 8.0);
}

#[test]
fn test_hsum_of_zero_register_is_zero() {
    if !is_x86_feature_detected!("avx") {
        return;
    }
    // SAFETY: AVX support checked above.
    unsafe {
        assert_eq!(hsum_m256(_mm256_setzero_ps()), 0.0);
        assert_eq!(hsum_m256d(_mm256_setzero_pd()), 0.0);
    }
}
