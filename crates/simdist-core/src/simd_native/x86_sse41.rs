//! SSE4.1 kernels for x86_64: 128-bit registers, separate multiply and add.
//!
//! All entry points require runtime SSE4.1 detection before calling.

#![allow(clippy::inline_always)]

use std::arch::x86_64::*;

use super::backend::SimdBackend;
use super::kernels::tier_entry_points;
use super::reduce::{hsum_m128, hsum_m128d};

pub(crate) enum Sse41F32 {}
pub(crate) enum Sse41F64 {}

impl SimdBackend for Sse41F32 {
    type Elem = f32;
    type Reg = __m128;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> __m128 {
        _mm_setzero_ps()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> __m128 {
        _mm_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m128, b: __m128) -> __m128 {
        _mm_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m128, b: __m128) -> __m128 {
        _mm_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m128, b: __m128, acc: __m128) -> __m128 {
        _mm_add_ps(acc, _mm_mul_ps(a, b))
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m128) -> f32 {
        hsum_m128(v)
    }
}

impl SimdBackend for Sse41F64 {
    type Elem = f64;
    type Reg = __m128d;
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn zero() -> __m128d {
        _mm_setzero_pd()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> __m128d {
        _mm_loadu_pd(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m128d, b: __m128d) -> __m128d {
        _mm_add_pd(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m128d, b: __m128d) -> __m128d {
        _mm_sub_pd(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m128d, b: __m128d, acc: __m128d) -> __m128d {
        _mm_add_pd(acc, _mm_mul_pd(a, b))
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m128d) -> f64 {
        hsum_m128d(v)
    }
}

tier_entry_points!(features = ["sse4.1"], f32 = Sse41F32, f64 = Sse41F64);
