//! Horizontal sums for x86 registers.
//!
//! Every helper folds the upper half onto the lower half until one lane
//! remains. Lane order of the additions is fixed, so the result is
//! deterministic for a given register.

#![allow(clippy::inline_always)]

use std::arch::x86_64::*;

/// Sum of the four lanes of a `__m128`.
///
/// # Safety
///
/// CPU must support SSE3 (implied by every x86 tier above the baseline).
#[inline(always)]
pub(crate) unsafe fn hsum_m128(v: __m128) -> f32 {
    // [a b c d] + [b b d d] = [a+b _ c+d _]
    let shuf = _mm_movehdup_ps(v);
    let sums = _mm_add_ps(v, shuf);
    let high = _mm_movehl_ps(sums, sums);
    _mm_cvtss_f32(_mm_add_ss(sums, high))
}

/// Sum of the two lanes of a `__m128d`.
///
/// # Safety
///
/// CPU must support SSE2.
#[inline(always)]
pub(crate) unsafe fn hsum_m128d(v: __m128d) -> f64 {
    let high = _mm_unpackhi_pd(v, v);
    _mm_cvtsd_f64(_mm_add_sd(v, high))
}

/// Sum of the eight lanes of a `__m256`.
///
/// # Safety
///
/// CPU must support AVX.
#[inline(always)]
pub(crate) unsafe fn hsum_m256(v: __m256) -> f32 {
    let hi = _mm256_extractf128_ps(v, 1);
    let lo = _mm256_castps256_ps128(v);
    hsum_m128(_mm_add_ps(lo, hi))
}

/// Sum of the four lanes of a `__m256d`.
///
/// # Safety
///
/// CPU must support AVX.
#[inline(always)]
pub(crate) unsafe fn hsum_m256d(v: __m256d) -> f64 {
    let hi = _mm256_extractf128_pd(v, 1);
    let lo = _mm256_castpd256_pd128(v);
    hsum_m128d(_mm_add_pd(lo, hi))
}
