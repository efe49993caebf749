//! AVX kernels for x86_64: 256-bit registers without FMA.
//!
//! All entry points require runtime AVX detection before calling.

#![allow(clippy::inline_always)]

use std::arch::x86_64::*;

use super::backend::SimdBackend;
use super::kernels::tier_entry_points;
use super::reduce::{hsum_m256, hsum_m256d};

pub(crate) enum AvxF32 {}
pub(crate) enum AvxF64 {}

impl SimdBackend for AvxF32 {
    type Elem = f32;
    type Reg = __m256;
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn zero() -> __m256 {
        _mm256_setzero_ps()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> __m256 {
        _mm256_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m256, b: __m256) -> __m256 {
        _mm256_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m256, b: __m256) -> __m256 {
        _mm256_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m256, b: __m256, acc: __m256) -> __m256 {
        _mm256_add_ps(acc, _mm256_mul_ps(a, b))
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m256) -> f32 {
        hsum_m256(v)
    }
}

impl SimdBackend for AvxF64 {
    type Elem = f64;
    type Reg = __m256d;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> __m256d {
        _mm256_setzero_pd()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> __m256d {
        _mm256_loadu_pd(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m256d, b: __m256d) -> __m256d {
        _mm256_add_pd(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m256d, b: __m256d) -> __m256d {
        _mm256_sub_pd(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m256d, b: __m256d, acc: __m256d) -> __m256d {
        _mm256_add_pd(acc, _mm256_mul_pd(a, b))
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m256d) -> f64 {
        hsum_m256d(v)
    }
}

tier_entry_points!(features = ["avx"], f32 = AvxF32, f64 = AvxF64);
