//! AVX2+FMA kernels for x86_64.
//!
//! Same 256-bit register shape as the AVX tier, with every multiply-accumulate
//! fused into one `vfmadd` instruction.
//!
//! All entry points require runtime AVX2+FMA detection before calling.

#![allow(clippy::inline_always)]

use std::arch::x86_64::*;

use super::backend::SimdBackend;
use super::kernels::tier_entry_points;
use super::reduce::{hsum_m256, hsum_m256d};

pub(crate) enum Avx2F32 {}
pub(crate) enum Avx2F64 {}

impl SimdBackend for Avx2F32 {
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
        _mm256_fmadd_ps(a, b, acc)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m256) -> f32 {
        hsum_m256(v)
    }
}

impl SimdBackend for Avx2F64 {
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
        _mm256_fmadd_pd(a, b, acc)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m256d) -> f64 {
        hsum_m256d(v)
    }
}

tier_entry_points!(features = ["avx2", "fma"], f32 = Avx2F32, f64 = Avx2F64);
