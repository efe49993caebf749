//! AVX-512F kernels for x86_64: 512-bit registers with fused multiply-add.
//!
//! All entry points require runtime AVX-512F detection before calling.

#![allow(clippy::inline_always)]

use std::arch::x86_64::*;

use super::backend::SimdBackend;
use super::kernels::tier_entry_points;

pub(crate) enum Avx512F32 {}
pub(crate) enum Avx512F64 {}

impl SimdBackend for Avx512F32 {
    type Elem = f32;
    type Reg = __m512;
    const LANES: usize = 16;

    #[inline(always)]
    unsafe fn zero() -> __m512 {
        _mm512_setzero_ps()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> __m512 {
        _mm512_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m512, b: __m512) -> __m512 {
        _mm512_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m512, b: __m512) -> __m512 {
        _mm512_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m512, b: __m512, acc: __m512) -> __m512 {
        _mm512_fmadd_ps(a, b, acc)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m512) -> f32 {
        _mm512_reduce_add_ps(v)
    }
}

impl SimdBackend for Avx512F64 {
    type Elem = f64;
    type Reg = __m512d;
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn zero() -> __m512d {
        _mm512_setzero_pd()
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> __m512d {
        _mm512_loadu_pd(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: __m512d, b: __m512d) -> __m512d {
        _mm512_add_pd(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m512d, b: __m512d) -> __m512d {
        _mm512_sub_pd(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: __m512d, b: __m512d, acc: __m512d) -> __m512d {
        _mm512_fmadd_pd(a, b, acc)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: __m512d) -> f64 {
        _mm512_reduce_add_pd(v)
    }
}

tier_entry_points!(features = ["avx512f"], f32 = Avx512F32, f64 = Avx512F64);
